//! Devices command implementation.

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::activitywatch::Bucket;
use crate::config::locate_database;
use crate::error::Result;
use crate::model::Device;
use crate::storage::KnowledgeStore;

/// One row of the devices listing.
#[derive(Debug, Serialize)]
struct DeviceRow {
    device: Device,
    label: String,
    usage_rows: usize,
    bucket: String,
}

/// Execute the devices command.
///
/// # Errors
///
/// Returns an error if the database is missing or a query fails.
pub fn execute(db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let db_path = locate_database(db_path.map(PathBuf::as_path))?;
    let store = KnowledgeStore::open(&db_path)?;
    let rows = collect_rows(&store)?;

    if json {
        let output = serde_json::json!({
            "database": db_path.display().to_string(),
            "count": rows.len(),
            "devices": rows,
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No devices found in {}", db_path.display());
        return Ok(());
    }

    println!("{} ({})", "Devices".bold(), db_path.display());
    println!();
    for row in &rows {
        let events = format!("{:>6} events", row.usage_rows);
        let events = if row.usage_rows == 0 {
            events.dimmed()
        } else {
            events.normal()
        };
        println!("  {}  {}", row.label.bold(), events);
        println!("      {}", row.bucket.cyan());
    }

    Ok(())
}

fn collect_rows(store: &KnowledgeStore) -> Result<Vec<DeviceRow>> {
    let counts = store.usage_counts()?;

    Ok(store
        .list_devices()?
        .into_iter()
        .map(|device| {
            let usage_rows = counts
                .get(&device.id().map(str::to_string))
                .copied()
                .unwrap_or(0);
            DeviceRow {
                label: device.to_string(),
                bucket: Bucket::for_device(&device).id,
                usage_rows,
                device,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::knowledge::fixtures::*;

    #[test]
    fn test_collect_rows_counts_usage() {
        let store = store();
        add_source(&store, 1, Some("AAA"));
        add_source(&store, 2, None);
        add_peer(&store, "AAA", Some("iPhone14,2"));
        add_usage(&store, Some(1), "a.app", "2024-01-01 10:00:00", "2024-01-01 10:01:00");
        add_usage(&store, Some(1), "b.app", "2024-01-01 11:00:00", "2024-01-01 11:01:00");

        let rows = collect_rows(&store).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].device, Device::Local);
        assert_eq!(rows[0].usage_rows, 0);
        assert_eq!(rows[1].label, "AAA - iPhone14,2");
        assert_eq!(rows[1].usage_rows, 2);
        assert_eq!(
            rows[1].bucket,
            "aw-watcher-android_aw-import-screentime_ios-AAA-iPhone14,2"
        );
    }
}
