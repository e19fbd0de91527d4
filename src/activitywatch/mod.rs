//! ActivityWatch integration.
//!
//! Events are written to one bucket per source device:
//!
//! ```text
//! ┌──────────────┐   Vec<Event>   ┌───────────┐   HTTP   ┌───────────┐
//! │   Importer   │ ─────────────▶ │ Publisher │ ───────▶ │ aw-server │
//! └──────────────┘                └───────────┘          └───────────┘
//!                                   │ Bucket::for_device
//!                                   ▼
//!               aw-watcher-android_aw-import-screentime_<hostname>
//! ```
//!
//! The [`EventStore`] trait is the seam between the publisher and the
//! transport; [`AwClient`] is the REST implementation.

pub mod bucket;
pub mod client;
pub mod publisher;
pub mod store;

pub use bucket::{hostname_for, Bucket, BUCKET_TYPE, LOCAL_HOSTNAME, WATCHER_TAG};
pub use client::{AwClient, ServerInfo};
pub use publisher::Publisher;
pub use store::{DryRunStore, EventStore};
