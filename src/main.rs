//! aw-import-screentime entry point.

use clap::Parser;
use screentime::cli::commands;
use screentime::cli::{Cli, Commands, ImportArgs};
use screentime::config::ClientConfig;
use screentime::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color || !std::io::IsTerminal::is_terminal(&std::io::stdout()) {
        colored::control::set_override(false);
    }

    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,rusqlite=info,hyper=info,reqwest=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<(), Error> {
    match &cli.command {
        None => {
            let client = ClientConfig::new(cli.server.as_deref(), cli.testing, cli.timeout)?;
            commands::import::execute(&ImportArgs::default(), cli.db.as_ref(), &client, cli.json)
        }
        Some(Commands::Import(args)) => {
            let client = ClientConfig::new(cli.server.as_deref(), cli.testing, cli.timeout)?;
            commands::import::execute(args, cli.db.as_ref(), &client, cli.json)
        }
        Some(Commands::Devices) => commands::devices::execute(cli.db.as_ref(), cli.json),
        Some(Commands::Locate) => commands::locate::execute(cli.db.as_ref(), cli.json),
        Some(Commands::Completions { shell }) => commands::completions::execute(shell),
        Some(Commands::Version) => commands::version::execute(cli.json),
    }
}
