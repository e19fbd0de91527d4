//! Import command implementation.
//!
//! Reads every device's `/app/usage` rows from knowledgeC.db and sends them
//! to ActivityWatch, one bucket per device.

use std::io::{self, Write};
use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use crate::activitywatch::{AwClient, DryRunStore, Publisher};
use crate::cli::ImportArgs;
use crate::config::{locate_database, ClientConfig};
use crate::error::{Error, Result};
use crate::import::{ImportOptions, ImportStats, Importer};
use crate::storage::KnowledgeStore;

#[derive(Serialize)]
struct ImportOutput<'a> {
    database: String,
    server: Option<&'a str>,
    dry_run: bool,
    devices_seen: usize,
    devices_published: usize,
    events_sent: usize,
    stats: &'a ImportStats,
}

/// Execute the import command.
///
/// # Errors
///
/// Returns an error if the database is missing, a row cannot be converted,
/// or ActivityWatch rejects a request.
pub fn execute(
    args: &ImportArgs,
    db_path: Option<&PathBuf>,
    client_config: &ClientConfig,
    json: bool,
) -> Result<()> {
    let db_path = locate_database(db_path.map(PathBuf::as_path))?;
    if !json {
        println!("Reading from database file at {}", db_path.display());
    }

    let store = KnowledgeStore::open(&db_path)?;
    let importer = Importer::new(
        &store,
        ImportOptions {
            skip_local: args.skip_local,
            only_devices: args.devices.clone(),
        },
    );

    // Progress lines go to stderr when stdout carries JSON.
    let mut progress: Box<dyn Write> = if json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;

    let (stats, server) = if args.dry_run {
        let publisher = Publisher::new(DryRunStore);
        (rt.block_on(importer.run(&publisher, &mut progress))?, None)
    } else {
        let client = AwClient::new(client_config)?;
        let stats = rt.block_on(run_against_server(&importer, client, &mut progress))?;
        (stats, Some(client_config.server_url.as_str()))
    };

    if json {
        let output = ImportOutput {
            database: db_path.display().to_string(),
            server,
            dry_run: args.dry_run,
            devices_seen: stats.devices_seen(),
            devices_published: stats.devices_published(),
            events_sent: stats.events_sent(),
            stats: &stats,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        print_summary(&stats, args.dry_run);
    }

    Ok(())
}

async fn run_against_server<W: Write>(
    importer: &Importer<'_>,
    client: AwClient,
    progress: &mut W,
) -> Result<ImportStats> {
    let server = client.info().await?;
    info!(
        hostname = %server.hostname,
        version = %server.version,
        testing = server.testing,
        "Connected to aw-server"
    );

    importer.run(&Publisher::new(client), progress).await
}

fn print_summary(stats: &ImportStats, dry_run: bool) {
    println!();
    if stats.is_empty() {
        println!("{}", "No usage events to import.".dimmed());
        return;
    }

    let verb = if dry_run { "Would import" } else { "Imported" };
    println!(
        "{} {} events from {} of {} devices",
        verb.green().bold(),
        stats.events_sent(),
        stats.devices_published(),
        stats.devices_seen()
    );
    for report in &stats.devices {
        if let Some(bucket) = &report.bucket {
            println!("  {:>6}  {}", report.events, bucket.cyan());
        }
    }
}
