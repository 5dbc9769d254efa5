//! VectorView CLI - command-line interface
//!
//! Front end for the VectorView viewing core: probe endpoint selection,
//! inspect archives, compose style documents, and decode view fragments.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use std::process;
use vectorview::config::ViewerConfig;
use vectorview::logging::init_logging;

#[derive(Parser)]
#[command(name = "vectorview")]
#[command(about = "Map tile viewing client tools", long_about = None)]
#[command(version = vectorview::VERSION)]
struct Args {
    /// Use a specific config file instead of ~/.vectorview/config.ini
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Probe the self-hosted stack and report the endpoint selection
    Probe,
    /// Print an archive's header, metadata, and compatibility
    Inspect {
        /// Archive URL or local file path
        reference: String,
    },
    /// Compose a style document and print it as JSON
    Style {
        /// Theme name
        #[arg(long, default_value = "light")]
        theme: String,
        /// Label language code
        #[arg(long, default_value = "en")]
        lang: String,
        /// Tile source reference (archive URL or endpoint template)
        #[arg(long)]
        source: Option<String>,
        /// Use locally hosted sprite sheets
        #[arg(long)]
        local_sprites: bool,
    },
    /// Decode a view-state fragment and show its canonical encoding
    Fragment {
        /// The fragment text (without the leading '#')
        fragment: String,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _guard = match init_logging(None) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let config = match &args.config {
        Some(path) => ViewerConfig::load_from(path)?,
        None => ViewerConfig::load()?,
    };

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    match args.command {
        Command::Probe => commands::probe::run(&config, client).await,
        Command::Inspect { reference } => commands::inspect::run(&reference, client).await,
        Command::Style {
            theme,
            lang,
            source,
            local_sprites,
        } => commands::style::run(&config, &theme, &lang, source.as_deref(), local_sprites),
        Command::Fragment { fragment } => {
            commands::fragment::run(fragment.trim_start_matches('#'))
        }
    }
}
