//! Data models for the importer.
//!
//! - Device (local or synced peer)
//! - UsageRow (raw `/app/usage` interval)
//! - Event (normalized ActivityWatch event)

pub mod device;
pub mod event;
pub mod usage;

pub use device::{Device, UNKNOWN_MODEL_LABEL};
pub use event::{parse_timestamp, Event};
pub use usage::{UsageRow, Weekday};
