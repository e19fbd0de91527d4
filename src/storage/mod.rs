//! SQLite access to the Screen Time (Knowledge) database.
//!
//! The database is owned by macOS and only read here:
//! - WAL journaling so the OS can keep writing while we read
//! - Literal SQL against the Core Data tables
//!
//! # Submodules
//!
//! - [`knowledge`] - Connection and queries
//! - [`schema`] - SQL text and epoch constants

pub mod knowledge;
pub mod schema;

pub use knowledge::KnowledgeStore;
