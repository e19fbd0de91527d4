//! Types describing an import run.

use serde::Serialize;

use crate::model::Device;

/// Knobs for an import run.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Ignore usage recorded on this Mac (sources without a device id).
    pub skip_local: bool,

    /// Only import these device ids. Empty means every device.
    pub only_devices: Vec<String>,
}

impl ImportOptions {
    /// Whether `device` takes part in the run.
    #[must_use]
    pub fn includes(&self, device: &Device) -> bool {
        match device {
            Device::Local => !self.skip_local && self.only_devices.is_empty(),
            Device::Named { id, .. } => {
                self.only_devices.is_empty() || self.only_devices.iter().any(|d| d == id)
            }
        }
    }
}

/// Outcome for one device.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeviceReport {
    pub device: Device,
    pub events: usize,
    /// Bucket written to, `None` when the device had no events.
    pub bucket: Option<String>,
}

/// Totals for an import run.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ImportStats {
    pub devices: Vec<DeviceReport>,
}

impl ImportStats {
    #[must_use]
    pub fn devices_seen(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn devices_published(&self) -> usize {
        self.devices.iter().filter(|d| d.bucket.is_some()).count()
    }

    #[must_use]
    pub fn events_sent(&self) -> usize {
        self.devices
            .iter()
            .filter(|d| d.bucket.is_some())
            .map(|d| d.events)
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events_sent() == 0
    }
}
