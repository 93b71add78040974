//! Media host integration for publishing uploaded images
//!
//! Handles uploading raw image bytes to Cloudinary and handing back the
//! durable public URL the host assigns.

pub mod cloudinary;
pub mod mock;

pub use cloudinary::CloudinaryClient;
pub use mock::MockMediaClient;

use crate::models::PublishedImage;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait MediaService: Send + Sync {
    /// Upload raw image bytes; returns the host's secure URL. No retry, no
    /// dedup of repeated uploads of the same bytes.
    async fn upload(&self, data: &[u8]) -> Result<PublishedImage>;
}
