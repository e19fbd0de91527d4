//! End-to-end tests for the `aw-import-screentime` binary.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use rusqlite::{params, Connection};
use tempfile::TempDir;

/// Seconds between 1970-01-01 and 2001-01-01.
const CORE_DATA_EPOCH_OFFSET: i64 = 978_307_200;

/// 2024-01-01 10:00:00 UTC in Core Data seconds.
const MONDAY_10AM: i64 = 1_704_103_200 - CORE_DATA_EPOCH_OFFSET;

fn create_knowledge_db(dir: &Path) -> PathBuf {
    let path = dir.join("knowledgeC.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE ZSOURCE (Z_PK INTEGER PRIMARY KEY, ZDEVICEID VARCHAR);
         CREATE TABLE ZSYNCPEER (Z_PK INTEGER PRIMARY KEY, ZDEVICEID VARCHAR, ZMODEL VARCHAR);
         CREATE TABLE ZSTRUCTUREDMETADATA (Z_PK INTEGER PRIMARY KEY);
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
         INSERT INTO ZSOURCE (Z_PK, ZDEVICEID) VALUES (1, 'AAA'), (2, 'BBB');
         INSERT INTO ZSYNCPEER (ZDEVICEID, ZMODEL) VALUES ('AAA', 'iPhone14,2');",
    )
    .unwrap();

    for (app, offset) in [("com.apple.mobilesafari", 0), ("com.apple.MobileSMS", 600)] {
        let start = MONDAY_10AM + offset;
        conn.execute(
            "INSERT INTO ZOBJECT (ZSTREAMNAME, ZVALUESTRING, ZSTARTDATE, ZENDDATE, ZCREATIONDATE,
                                  ZSECONDSFROMGMT, ZSTARTDAYOFWEEK, ZSOURCE)
             VALUES ('/app/usage', ?1, ?2, ?3, ?3, 0, 2, 1)",
            params![app, start, start + 300],
        )
        .unwrap();
    }

    path
}

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("aw-import-screentime").unwrap();
    cmd.env_remove("SCREENTIME_DB")
        .env_remove("AW_SERVER_URL")
        .env_remove("AW_TESTING")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn test_dry_run_import_prints_progress() {
    let temp_dir = TempDir::new().unwrap();
    let db = create_knowledge_db(temp_dir.path());

    let output = bin()
        .args(["import", "--dry-run", "--db"])
        .arg(&db)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Reading from database file at"));
    assert!(stdout.contains("1 / 2 Sending 2 events to ActivityWatch for device AAA - iPhone14,2"));
    assert!(stdout.contains("2 / 2 Sending 0 events to ActivityWatch for device BBB - Other"));
    assert!(stdout.contains("aw-watcher-android_aw-import-screentime_ios-AAA-iPhone14,2"));
}

#[test]
fn test_dry_run_json_summary() {
    let temp_dir = TempDir::new().unwrap();
    let db = create_knowledge_db(temp_dir.path());

    let output = bin()
        .args(["--json", "import", "--dry-run", "--db"])
        .arg(&db)
        .output()
        .unwrap();

    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["dry_run"], true);
    assert_eq!(summary["devices_seen"], 2);
    assert_eq!(summary["devices_published"], 1);
    assert_eq!(summary["events_sent"], 2);

    // Progress moves to stderr in JSON mode
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("1 / 2 Sending 2 events"));
}

#[test]
fn test_devices_json() {
    let temp_dir = TempDir::new().unwrap();
    let db = create_knowledge_db(temp_dir.path());

    let output = bin()
        .args(["--json", "devices", "--db"])
        .arg(&db)
        .output()
        .unwrap();

    assert!(output.status.success());
    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listing["count"], 2);
    assert_eq!(listing["devices"][0]["usage_rows"], 2);
    assert_eq!(listing["devices"][0]["device"]["id"], "AAA");
    assert_eq!(listing["devices"][1]["device"]["model"], serde_json::Value::Null);
}

#[test]
fn test_missing_database_exits_with_database_code() {
    let temp_dir = TempDir::new().unwrap();

    bin()
        .env("HOME", temp_dir.path())
        .args(["import", "--dry-run"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_missing_database_json_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.db");

    let output = bin()
        .args(["--json", "devices", "--db"])
        .arg(&missing)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["code"], "DATABASE_NOT_FOUND");
}

#[test]
fn test_invalid_server_url_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let db = create_knowledge_db(temp_dir.path());

    bin()
        .args(["import", "--server", "localhost:5600", "--db"])
        .arg(&db)
        .assert()
        .failure()
        .code(7);
}

#[test]
fn test_version() {
    let output = bin().arg("version").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("aw-import-screentime "));
}
