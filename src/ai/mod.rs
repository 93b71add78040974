//! Vision-language model integration for caption generation
//!
//! Provides the interface to Gemini's `generateContent` API for turning an
//! uploaded image plus a user requirement into caption candidates.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiCaptionClient;
pub use mock::MockCaptionClient;

use crate::models::EncodedImage;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CaptionService: Send + Sync {
    /// Send the fixed instruction, the encoded image, and the user's free-text
    /// requirement to the model; return its response text verbatim.
    async fn generate_captions(
        &self,
        instruction: &str,
        image: &EncodedImage,
        requirement: &str,
    ) -> Result<String>;
}
