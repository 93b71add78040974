//! Document store integration for persisting caption records
//!
//! Write-only from this service's perspective: one collection, one
//! `insert_one` per completed generation, no reads or updates.

pub mod mock;
pub mod mongo;

pub use mock::MockCaptionStore;
pub use mongo::MongoCaptionStore;

use crate::models::CaptionRecord;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CaptionStore: Send + Sync {
    /// Append one record to the collection. No upsert or idempotency key.
    async fn insert(&self, record: &CaptionRecord) -> Result<()>;

    /// Cheap reachability probe, used at startup and by the health endpoint.
    async fn ping(&self) -> Result<()>;
}
