//! Import orchestration.
//!
//! Devices are processed one after another:
//! 1. List devices from the Knowledge database
//! 2. Fetch and normalize each device's `/app/usage` rows
//! 3. Print a progress line
//! 4. Publish when there is at least one event
//!
//! A failure stops the run. Devices already published stay published;
//! later devices are never attempted.

mod types;

pub use types::{DeviceReport, ImportOptions, ImportStats};

use std::io::Write;

use tracing::info;

use crate::activitywatch::{EventStore, Publisher};
use crate::error::{Error, Result};
use crate::model::{Device, Event};
use crate::storage::KnowledgeStore;

/// Moves usage from a [`KnowledgeStore`] into ActivityWatch.
pub struct Importer<'a> {
    store: &'a KnowledgeStore,
    options: ImportOptions,
}

impl<'a> Importer<'a> {
    #[must_use]
    pub fn new(store: &'a KnowledgeStore, options: ImportOptions) -> Self {
        Self { store, options }
    }

    /// Devices selected for this run, in database order.
    ///
    /// # Errors
    ///
    /// Returns an error if the device query fails, or `InvalidArgument` if a
    /// requested device id does not exist.
    pub fn devices(&self) -> Result<Vec<Device>> {
        let all = self.store.list_devices()?;

        if let Some(unknown) = self
            .options
            .only_devices
            .iter()
            .find(|id| !all.iter().any(|d| d.id() == Some(id.as_str())))
        {
            return Err(Error::InvalidArgument(format!("unknown device id: {unknown}")));
        }

        Ok(all
            .into_iter()
            .filter(|d| self.options.includes(d))
            .collect())
    }

    /// Normalized events for one device.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or any row has a malformed
    /// timestamp.
    pub fn events_for(&self, device: &Device) -> Result<Vec<Event>> {
        self.store
            .events_for(device)?
            .iter()
            .map(Event::from_row)
            .collect()
    }

    /// Run the import, writing one progress line per device to `out`.
    ///
    /// # Errors
    ///
    /// Returns the first query, mapping, publish, or write failure.
    pub async fn run<S: EventStore, W: Write>(
        &self,
        publisher: &Publisher<S>,
        out: &mut W,
    ) -> Result<ImportStats> {
        let devices = self.devices()?;
        let total = devices.len();
        let mut stats = ImportStats::default();

        for (index, device) in devices.into_iter().enumerate() {
            let events = self.events_for(&device)?;
            writeln!(
                out,
                "{} / {total} Sending {} events to ActivityWatch for device {device}",
                index + 1,
                events.len(),
            )?;

            if events.is_empty() {
                info!(%device, "No usage events, skipping");
                stats.devices.push(DeviceReport {
                    device,
                    events: 0,
                    bucket: None,
                });
                continue;
            }

            let bucket = publisher.publish(&device, &events).await?;
            stats.devices.push(DeviceReport {
                device,
                events: events.len(),
                bucket: bucket.map(|b| b.id),
            });
        }

        info!(
            devices = stats.devices_seen(),
            published = stats.devices_published(),
            events = stats.events_sent(),
            "Import finished"
        );
        Ok(stats)
    }
}
