//! Per-device bucket naming.

use serde::Serialize;

use crate::model::Device;

/// Prefix that makes aw-webui render the bucket as a mobile device.
pub const WATCHER_TAG: &str = "aw-watcher-android";

/// Client name embedded in every bucket id.
pub const IMPORTER_NAME: &str = "aw-import-screentime";

/// Hostname used for usage recorded on this Mac.
pub const LOCAL_HOSTNAME: &str = "macos-screentime-test";

/// Bucket type understood by aw-webui's activity views.
pub const BUCKET_TYPE: &str = "currentwindow";

/// A destination bucket in ActivityWatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub id: String,
    pub event_type: String,
    pub hostname: String,
}

impl Bucket {
    /// Derive the bucket for `device`.
    ///
    /// The id is `aw-watcher-android_aw-import-screentime_<hostname>`.
    #[must_use]
    pub fn for_device(device: &Device) -> Self {
        let hostname = hostname_for(device);
        Self {
            id: format!("{WATCHER_TAG}_{IMPORTER_NAME}_{hostname}"),
            event_type: BUCKET_TYPE.to_string(),
            hostname,
        }
    }
}

/// Simulated hostname for a device.
///
/// `ios-<id>-<model>` for known peers, `ios-<id>` when the model is unknown,
/// and a fixed placeholder for the local device.
#[must_use]
pub fn hostname_for(device: &Device) -> String {
    match device {
        Device::Local => LOCAL_HOSTNAME.to_string(),
        Device::Named {
            id,
            model: Some(model),
        } => format!("ios-{id}-{model}"),
        Device::Named { id, model: None } => format!("ios-{id}"),
    }
}
