//! Read access to the macOS Knowledge database (knowledgeC.db).

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, Row};
use tracing::debug;

use crate::error::Result;
use crate::model::{Device, UsageRow, Weekday};
use crate::storage::schema::{
    events_for_device_sql, events_without_device_sql, APP_USAGE_STREAM, DEVICES_SQL,
    USAGE_COUNTS_SQL,
};

/// How long to wait for a lock held by the OS writer.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection to a Knowledge database.
///
/// The OS keeps writing to the file while we read it, so the connection is
/// switched to WAL journaling on open. That pragma is the only write issued.
#[derive(Debug)]
pub struct KnowledgeStore {
    conn: Connection,
}

impl KnowledgeStore {
    /// Open the database at `path` and enable WAL journaling.
    ///
    /// Waits up to [`BUSY_TIMEOUT`] when the OS holds a lock on the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the pragma fails.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        let mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
        debug!(path = %path.display(), journal_mode = %mode, "Opened knowledge database");

        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// List every source device exactly once.
    ///
    /// A source without a device id is the local Mac. A device without a
    /// matching sync peer has no model.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_devices(&self) -> Result<Vec<Device>> {
        let mut stmt = self.conn.prepare(DEVICES_SQL)?;
        let rows = stmt.query_map([], |row| {
            Ok(Device::from_columns(row.get(0)?, row.get(1)?))
        })?;

        let devices = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = devices.len(), "Listed devices");
        Ok(devices)
    }

    /// All `/app/usage` rows synced from the device with `device_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn events_for_device(&self, device_id: &str) -> Result<Vec<UsageRow>> {
        let mut stmt = self.conn.prepare(&events_for_device_sql())?;
        let rows = stmt.query_map(params![APP_USAGE_STREAM, device_id], map_usage_row)?;
        let rows = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(device_id, count = rows.len(), "Fetched usage rows");
        Ok(rows)
    }

    /// All `/app/usage` rows recorded on this Mac (no source device id).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn events_without_device(&self) -> Result<Vec<UsageRow>> {
        let mut stmt = self.conn.prepare(&events_without_device_sql())?;
        let rows = stmt.query_map(params![APP_USAGE_STREAM], map_usage_row)?;
        let rows = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = rows.len(), "Fetched local usage rows");
        Ok(rows)
    }

    /// Usage rows for `device`, whichever kind it is.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn events_for(&self, device: &Device) -> Result<Vec<UsageRow>> {
        match device {
            Device::Local => self.events_without_device(),
            Device::Named { id, .. } => self.events_for_device(id),
        }
    }

    /// Count `/app/usage` rows per device id (`None` key for local rows).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn usage_counts(&self) -> Result<HashMap<Option<String>, usize>> {
        let mut stmt = self.conn.prepare(USAGE_COUNTS_SQL)?;
        let rows = stmt.query_map(params![APP_USAGE_STREAM], |row| {
            let count: i64 = row.get(1)?;
            Ok((row.get::<_, Option<String>>(0)?, usize::try_from(count).unwrap_or(0)))
        })?;

        rows.collect::<rusqlite::Result<HashMap<_, _>>>()
            .map_err(Into::into)
    }
}

fn map_usage_row(row: &Row<'_>) -> rusqlite::Result<UsageRow> {
    Ok(UsageRow {
        app: row.get(0)?,
        usage: row.get(1)?,
        day_of_week: integer_column(row, 2)?.and_then(Weekday::from_code),
        tz_offset_hours: integer_column(row, 3)?,
        start_time: row.get(4)?,
        end_time: row.get(5)?,
        created_at: row.get(6)?,
        source: row.get(7)?,
        device: row.get(8)?,
    })
}

/// Read an informational column that only means something as an integer.
///
/// REAL, TEXT and BLOB values become `None` instead of a type error.
fn integer_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<i64>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Integer(n) => Some(n),
        _ => None,
    })
}
