//! Publishing normalized events, one bucket per device.

use tracing::{debug, info};

use crate::error::Result;
use crate::model::{Device, Event};

use super::bucket::Bucket;
use super::store::EventStore;

/// Forwards a device's events to an [`EventStore`].
pub struct Publisher<S: EventStore> {
    store: S,
}

impl<S: EventStore> Publisher<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ensure the device's bucket exists, then submit `events` in one batch.
    ///
    /// Does nothing for an empty slice. Returns the bucket written to, or
    /// `None` when nothing was sent.
    ///
    /// # Errors
    ///
    /// Propagates the first store failure; nothing is retried.
    pub async fn publish(&self, device: &Device, events: &[Event]) -> Result<Option<Bucket>> {
        if events.is_empty() {
            debug!(%device, "No events, skipping publish");
            return Ok(None);
        }

        let bucket = Bucket::for_device(device);
        self.store.create_bucket(&bucket).await?;
        self.store.insert_events(&bucket.id, events).await?;

        info!(bucket = %bucket.id, count = events.len(), "Published events");
        Ok(Some(bucket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activitywatch::store::recording::{Call, RecordingStore};
    use crate::model::{UsageRow, Weekday};

    fn events(n: usize) -> Vec<Event> {
        (0..n)
            .map(|i| {
                Event::from_row(&UsageRow {
                    app: Some(format!("app{i}")),
                    usage: Some(60.0),
                    day_of_week: Some(Weekday::Monday),
                    tz_offset_hours: Some(0),
                    start_time: Some("2024-01-01 10:00:00".into()),
                    end_time: Some("2024-01-01 10:01:00".into()),
                    created_at: None,
                    source: "Other".into(),
                    device: Some("ABC123".into()),
                })
                .unwrap()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_publish_creates_bucket_then_inserts() {
        let publisher = Publisher::new(RecordingStore::default());
        let device = Device::from_columns(Some("ABC123".into()), Some("iPhone14,2".into()));

        let bucket = publisher.publish(&device, &events(3)).await.unwrap().unwrap();

        assert_eq!(
            publisher.store().calls(),
            vec![
                Call::CreateBucket(bucket.clone()),
                Call::InsertEvents {
                    bucket_id: bucket.id.clone(),
                    count: 3
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_batch_makes_no_calls() {
        let publisher = Publisher::new(RecordingStore::default());

        let result = publisher.publish(&Device::Local, &[]).await.unwrap();

        assert!(result.is_none());
        assert!(publisher.store().calls().is_empty());
    }

    #[tokio::test]
    async fn test_republish_ensures_same_bucket_each_time() {
        let publisher = Publisher::new(RecordingStore::default());
        let device = Device::from_columns(Some("ABC123".into()), None);

        publisher.publish(&device, &events(2)).await.unwrap();
        publisher.publish(&device, &events(2)).await.unwrap();

        let bucket = Bucket::for_device(&device);
        let created: Vec<_> = publisher
            .store()
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::CreateBucket(_)))
            .collect();
        assert_eq!(
            created,
            vec![Call::CreateBucket(bucket.clone()), Call::CreateBucket(bucket)]
        );
        assert_eq!(publisher.store().insert_sizes(), vec![2, 2]);
    }

    #[tokio::test]
    async fn test_insert_failure_propagates() {
        let device = Device::from_columns(Some("ABC123".into()), None);
        let store = RecordingStore {
            fail_bucket: Some(Bucket::for_device(&device).id),
            ..RecordingStore::default()
        };
        let publisher = Publisher::new(store);

        assert!(publisher.publish(&device, &events(1)).await.is_err());
    }
}
