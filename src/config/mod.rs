//! Configuration management.
//!
//! This module resolves where the Screen Time database lives and how to
//! reach the ActivityWatch server.
//!
//! # Database location
//!
//! macOS keeps Screen Time data in `knowledgeC.db` under
//! `~/Library/Application Support/Knowledge/`. A copy synced from a VM host
//! at `~/tmp/sync-with-vm-host/Knowledge/` takes precedence so the importer
//! can be exercised off-Mac.

mod client;

pub use client::{
    resolve_server_url, ClientConfig, CLIENT_NAME, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS,
    TESTING_PORT,
};

use crate::error::{Error, Result};

use std::path::{Path, PathBuf};
use tracing::debug;

/// Database file name used by the Knowledge subsystem.
pub const DATABASE_FILE_NAME: &str = "knowledgeC.db";

/// Ordered list of well-known database locations.
///
/// 1. `~/tmp/sync-with-vm-host/Knowledge/knowledgeC.db` (sync mirror)
/// 2. `~/Library/Application Support/Knowledge/knowledgeC.db`
///
/// Empty if the home directory cannot be determined.
#[must_use]
pub fn candidate_paths() -> Vec<PathBuf> {
    directories::BaseDirs::new()
        .map(|b| candidate_paths_in(b.home_dir()))
        .unwrap_or_default()
}

/// Well-known database locations relative to `home`.
#[must_use]
pub fn candidate_paths_in(home: &Path) -> Vec<PathBuf> {
    vec![
        home.join("tmp")
            .join("sync-with-vm-host")
            .join("Knowledge")
            .join(DATABASE_FILE_NAME),
        home.join("Library")
            .join("Application Support")
            .join("Knowledge")
            .join(DATABASE_FILE_NAME),
    ]
}

/// Locate the Screen Time database.
///
/// Priority:
/// 1. `explicit` (from `--db` or `SCREENTIME_DB`), which must exist
/// 2. The first existing path from [`candidate_paths`]
///
/// # Errors
///
/// Returns `DatabaseNotFound` listing every path tried.
pub fn locate_database(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => first_existing(&[path.to_path_buf()]),
        None => first_existing(&candidate_paths()),
    }
}

/// Return the first path in `candidates` that exists.
///
/// # Errors
///
/// Returns `DatabaseNotFound` if none exists.
pub fn first_existing(candidates: &[PathBuf]) -> Result<PathBuf> {
    for path in candidates {
        debug!(path = %path.display(), "Probing for database");
        if path.exists() {
            return Ok(path.clone());
        }
    }

    Err(Error::DatabaseNotFound {
        searched: candidates.to_vec(),
    })
}
