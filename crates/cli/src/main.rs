//! Trackline CLI - Render order tracking timelines from order payloads.
//!
//! # Usage
//!
//! ```bash
//! # Render the timeline for a fetched order
//! trackline timeline order.json
//!
//! # Same, as JSON, reading the payload from stdin
//! curl -s "$ORDER_URL" | trackline timeline --format json
//!
//! # Print only the estimated delivery date
//! trackline estimate order.json --utc-offset +01:00
//!
//! # Print and validate the canonical step table
//! trackline steps
//! ```
//!
//! # Commands
//!
//! - `timeline` - Full timeline with the delivery estimate
//! - `estimate` - Delivery estimate only
//! - `steps` - Canonical step table

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::FixedOffset;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trackline_core::timeline::{DuplicatePolicy, StepTable, TimelineBuilder};

mod commands;
mod config;
mod error;

use config::{LogFormat, TracklineConfig, parse_offset};

#[derive(Parser)]
#[command(name = "trackline")]
#[command(author, version, about = "Order tracking timeline tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the tracking timeline for an order
    Timeline {
        /// Order payload (JSON); `-` or omitted reads stdin
        #[arg(default_value = "-")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Duplicate event policy (`first`, `latest`, `earliest`)
        #[arg(short, long)]
        duplicates: Option<DuplicatePolicy>,

        /// UTC offset for dates, e.g. +05:30
        #[arg(long, value_parser = parse_offset, allow_hyphen_values = true)]
        utc_offset: Option<FixedOffset>,
    },
    /// Print the estimated delivery date for an order
    Estimate {
        /// Order payload (JSON); `-` or omitted reads stdin
        #[arg(default_value = "-")]
        file: PathBuf,

        /// UTC offset for dates, e.g. +05:30
        #[arg(long, value_parser = parse_offset, allow_hyphen_values = true)]
        utc_offset: Option<FixedOffset>,
    },
    /// Print and validate the canonical step table
    Steps,
}

/// Output format for rendered timelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let config = match TracklineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::Text);
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(config.log_format);

    if let Err(e) = run(cli, &config) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing on stderr so stdout carries only command output.
///
/// Defaults to info level for our crates if `RUST_LOG` is not set.
fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trackline=info,trackline_core=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn run(cli: Cli, config: &TracklineConfig) -> error::Result<()> {
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Timeline {
            file,
            format,
            duplicates,
            utc_offset,
        } => {
            let order = commands::load_order(&file)?;
            let builder = TimelineBuilder::new(StepTable::standard())
                .with_duplicate_policy(duplicates.unwrap_or(config.duplicate_policy));
            commands::timeline::run(
                &order,
                &builder,
                utc_offset.unwrap_or(config.utc_offset),
                format,
                &mut stdout,
            )?;
        }
        Commands::Estimate { file, utc_offset } => {
            let order = commands::load_order(&file)?;
            commands::estimate::run(&order, utc_offset.unwrap_or(config.utc_offset), &mut stdout)?;
        }
        Commands::Steps => commands::steps::run(&StepTable::standard(), &mut stdout)?,
    }
    Ok(())
}
