//! Event store trait.
//!
//! Defines what the importer needs from ActivityWatch. Uses async methods
//! because the real implementation is HTTP-based.

use crate::error::Result;
use crate::model::Event;

use super::bucket::Bucket;

/// A remote store of buckets and events.
///
/// Implemented by [`super::AwClient`]; tests use an in-memory recorder.
pub trait EventStore: Send + Sync {
    /// Create `bucket` if it does not exist yet.
    ///
    /// Must succeed when the bucket already exists.
    fn create_bucket(&self, bucket: &Bucket) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Append `events` to the bucket with id `bucket_id` in one batch.
    fn insert_events(
        &self,
        bucket_id: &str,
        events: &[Event],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Store that accepts everything and sends nothing (`--dry-run`).
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunStore;

impl EventStore for DryRunStore {
    async fn create_bucket(&self, bucket: &Bucket) -> Result<()> {
        tracing::debug!(bucket = %bucket.id, "Dry run: would create bucket");
        Ok(())
    }

    async fn insert_events(&self, bucket_id: &str, events: &[Event]) -> Result<()> {
        tracing::debug!(bucket = %bucket_id, count = events.len(), "Dry run: would insert events");
        Ok(())
    }
}
