//! Device model.
//!
//! Every usage row in knowledgeC.db is attributed to a source. Sources synced
//! from another Apple device carry that device's identifier; sources created
//! on this Mac carry none.

use serde::{Deserialize, Serialize};

/// Display label used when a device has no known model.
pub const UNKNOWN_MODEL_LABEL: &str = "Other";

/// The device a usage row originated from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Device {
    /// Rows recorded locally (the source has no device id).
    Local,

    /// Rows synced from a peer device.
    Named {
        /// Device identifier from `ZSOURCE.ZDEVICEID`
        id: String,

        /// Model name from `ZSYNCPEER.ZMODEL`, if the peer is known
        model: Option<String>,
    },
}

impl Device {
    /// Build a device from the nullable columns of the device query.
    #[must_use]
    pub fn from_columns(id: Option<String>, model: Option<String>) -> Self {
        match id {
            Some(id) => Self::Named { id, model },
            None => Self::Local,
        }
    }

    /// Device identifier, `None` for the local device.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Local => None,
            Self::Named { id, .. } => Some(id),
        }
    }

    /// Model name for display, `"Other"` when unknown.
    #[must_use]
    pub fn model_label(&self) -> &str {
        match self {
            Self::Named {
                model: Some(model), ..
            } => model,
            _ => UNKNOWN_MODEL_LABEL,
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local - {UNKNOWN_MODEL_LABEL}"),
            Self::Named { id, .. } => write!(f, "{id} - {}", self.model_label()),
        }
    }
}
