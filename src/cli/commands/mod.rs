//! Command implementations.

pub mod completions;
pub mod devices;
pub mod import;
pub mod locate;
pub mod version;
