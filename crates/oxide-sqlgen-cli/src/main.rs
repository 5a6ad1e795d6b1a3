//! oxide-sqlgen CLI
//!
//! Renders a JSON statement tree to SQL for one dialect.

use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_sqlgen::Dialect;
use oxide_sqlgen_cli::{load_config, read_statement, render, Mode};

/// Dialect-aware SQL generation for ORM statement trees.
#[derive(Parser)]
#[command(name = "oxide-sqlgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target dialect (sqlserver, mysql, postgresql, oracle, sqlite, oledb, other).
    #[arg(short, long, env = "OXIDE_SQLGEN_DIALECT")]
    dialect: Dialect,

    /// Render configuration (JSON).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write escaped literals instead of placeholders.
    #[arg(long)]
    inline: bool,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Statement file (JSON); stdin when omitted.
    input: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(cli.config.as_deref())?;
    let statement = read_statement(cli.input.as_deref())?;
    let mode = if cli.inline {
        Mode::Inline
    } else {
        Mode::Parameterized
    };
    debug!(dialect = %cli.dialect, ?mode, "Rendering statement");

    let rendered = render(&statement, cli.dialect, &config, mode)?;
    if cli.json {
        println!("{}", rendered.to_json()?);
    } else {
        print!("{}", rendered.to_text());
    }
    Ok(())
}
