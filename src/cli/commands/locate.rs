//! Locate command implementation.

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::config::{candidate_paths, locate_database};
use crate::error::Result;

#[derive(Serialize)]
struct Candidate {
    path: String,
    exists: bool,
}

#[derive(Serialize)]
struct LocateOutput {
    resolved: Option<String>,
    explicit: bool,
    candidates: Vec<Candidate>,
}

/// Execute the locate command.
///
/// Prints the probe order and which file would be used.
///
/// # Errors
///
/// Returns `DatabaseNotFound` if no candidate exists.
pub fn execute(db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let candidates = match db_path {
        Some(path) => vec![path.clone()],
        None => candidate_paths(),
    };
    let resolved = locate_database(db_path.map(PathBuf::as_path));

    if json {
        let output = LocateOutput {
            resolved: resolved.as_ref().ok().map(|p| p.display().to_string()),
            explicit: db_path.is_some(),
            candidates: candidates
                .iter()
                .map(|p| Candidate {
                    path: p.display().to_string(),
                    exists: p.exists(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        for path in &candidates {
            let marker = if path.exists() {
                "found".green()
            } else {
                "missing".dimmed()
            };
            println!("  [{marker}] {}", path.display());
        }
        if let Ok(path) = &resolved {
            println!();
            println!("Using {}", path.display().to_string().bold());
        }
    }

    resolved.map(|_| ())
}
