//! SQL for the Knowledge database.
//!
//! The schema belongs to macOS (Core Data). This module only holds the
//! read queries run against it, plus a minimal copy of the tables used by
//! the tests.

/// Seconds between the Unix epoch and the Core Data reference date
/// (2001-01-01T00:00:00Z).
pub const CORE_DATA_EPOCH_OFFSET: i64 = 978_307_200;

/// The only stream this tool reads.
pub const APP_USAGE_STREAM: &str = "/app/usage";

/// Distinct source devices with their peer model, if any.
///
/// Grouped by device id so duplicate `ZSOURCE` or `ZSYNCPEER` rows for the
/// same device collapse to one.
pub const DEVICES_SQL: &str = r"
SELECT
    ZSOURCE.ZDEVICEID AS device_id,
    MAX(ZSYNCPEER.ZMODEL) AS device_model
FROM ZSOURCE
LEFT JOIN ZSYNCPEER ON ZSYNCPEER.ZDEVICEID = ZSOURCE.ZDEVICEID
GROUP BY ZSOURCE.ZDEVICEID
ORDER BY ZSOURCE.ZDEVICEID
";

/// Column list and joins shared by the usage queries.
///
/// `?1` is the stream name. Timestamps are shifted by
/// [`CORE_DATA_EPOCH_OFFSET`]; `ZSECONDSFROMGMT` is reported but not applied.
const USAGE_SELECT: &str = r"
SELECT
    ZOBJECT.ZVALUESTRING AS app,
    (ZOBJECT.ZENDDATE - ZOBJECT.ZSTARTDATE) AS usage,
    ZOBJECT.ZSTARTDAYOFWEEK AS dow,
    ZOBJECT.ZSECONDSFROMGMT / 3600 AS tz,
    DATETIME(ZOBJECT.ZSTARTDATE + 978307200, 'unixepoch') AS start_time,
    DATETIME(ZOBJECT.ZENDDATE + 978307200, 'unixepoch') AS end_time,
    DATETIME(ZOBJECT.ZCREATIONDATE + 978307200, 'unixepoch') AS created_at,
    COALESCE(ZSYNCPEER.ZMODEL, 'Other') AS source,
    ZSOURCE.ZDEVICEID AS device
FROM ZOBJECT
LEFT JOIN ZSTRUCTUREDMETADATA ON ZOBJECT.ZSTRUCTUREDMETADATA = ZSTRUCTUREDMETADATA.Z_PK
LEFT JOIN ZSOURCE ON ZOBJECT.ZSOURCE = ZSOURCE.Z_PK
LEFT JOIN ZSYNCPEER ON ZSOURCE.ZDEVICEID = ZSYNCPEER.ZDEVICEID
WHERE ZOBJECT.ZSTREAMNAME = ?1
";

/// Usage rows for one synced device (`?2` is the device id).
#[must_use]
pub fn events_for_device_sql() -> String {
    format!("{USAGE_SELECT} AND ZSOURCE.ZDEVICEID = ?2\nORDER BY ZOBJECT.ZSTARTDATE")
}

/// Usage rows with no resolved device id.
#[must_use]
pub fn events_without_device_sql() -> String {
    format!("{USAGE_SELECT} AND ZSOURCE.ZDEVICEID IS NULL\nORDER BY ZOBJECT.ZSTARTDATE")
}

/// Number of usage rows per device id (`NULL` for local rows).
pub const USAGE_COUNTS_SQL: &str = r"
SELECT ZSOURCE.ZDEVICEID, COUNT(*)
FROM ZOBJECT
LEFT JOIN ZSOURCE ON ZOBJECT.ZSOURCE = ZSOURCE.Z_PK
WHERE ZOBJECT.ZSTREAMNAME = ?1
GROUP BY ZSOURCE.ZDEVICEID
";

/// The subset of the Knowledge schema the queries touch.
#[cfg(test)]
pub const FIXTURE_SCHEMA_SQL: &str = r"
CREATE TABLE ZSOURCE (
    Z_PK INTEGER PRIMARY KEY,
    ZDEVICEID VARCHAR,
    ZBUNDLEID VARCHAR
);

CREATE TABLE ZSYNCPEER (
    Z_PK INTEGER PRIMARY KEY,
    ZDEVICEID VARCHAR,
    ZMODEL VARCHAR
);

CREATE TABLE ZSTRUCTUREDMETADATA (
    Z_PK INTEGER PRIMARY KEY
);

CREATE TABLE ZOBJECT (
    Z_PK INTEGER PRIMARY KEY,
    ZSTREAMNAME VARCHAR,
    ZVALUESTRING VARCHAR,
    ZSTARTDATE TIMESTAMP,
    ZENDDATE TIMESTAMP,
    ZCREATIONDATE TIMESTAMP,
    ZSECONDSFROMGMT INTEGER,
    ZSTARTDAYOFWEEK INTEGER,
    ZSTRUCTUREDMETADATA INTEGER,
    ZSOURCE INTEGER
);
";
