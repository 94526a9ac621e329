//! usb-inspector
//!
//! Reports the USB devices and USB4 / Thunderbolt smart cables attached to a
//! Mac. Each device is classified by link generation, power role, video
//! support and whether it is part of the machine itself.

mod config;
mod filter;
mod profiler;
mod render;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use common::setup_logging;
use config::{InspectorConfig, OutputFormat};
use filter::Filter;
use profiler::{ReportSource, inspect};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "usb-inspector")]
#[command(
    author,
    version,
    about = "USB Inspector - Classify attached USB devices and Thunderbolt cables"
)]
#[command(long_about = "
Runs system_profiler, walks the USB and Thunderbolt trees it reports and
prints one record per device and per smart cable. Each device is tagged with
its transport generation, data/power role, video capability and whether it
is built into the machine.

EXAMPLES:
    # Inspect the current machine
    usb-inspector

    # Machine-readable output
    usb-inspector --json

    # Only external devices whose name, vendor or path mentions 'dock'
    usb-inspector --hide-built-in --search dock

    # Classify a saved report instead of running system_profiler
    system_profiler -json SPUSBDataType SPThunderboltDataType > report.json
    usb-inspector --input report.json

    # Interactive browser
    usb-inspector --tui

CONFIGURATION:
    The inspector looks for configuration files in the following order:
    1. Path specified with --config
    2. ~/.config/usb-inspector/config.toml
    3. /etc/usb-inspector/config.toml
    4. Built-in defaults
")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Save default configuration to default location and exit
    #[arg(long)]
    save_config: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Print the inventory as JSON
    #[arg(long, conflicts_with = "tui")]
    json: bool,

    /// Leave out devices that belong to the machine itself
    #[arg(long)]
    hide_built_in: bool,

    /// Only show records containing TEXT (case-insensitive)
    #[arg(short, long, value_name = "TEXT")]
    search: Option<String>,

    /// Browse the inventory interactively
    #[arg(long)]
    tui: bool,

    /// Read a saved system_profiler JSON report ("-" for stdin)
    #[arg(short, long, value_name = "FILE")]
    input: Option<String>,

    /// Seconds to wait for system_profiler
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    // Handle --save-config before anything else is loaded
    if args.save_config {
        let config = InspectorConfig::default();
        let path = InspectorConfig::default_path();
        config.save(&path).context("Failed to save configuration")?;
        println!("Configuration saved to: {}", path.display());
        return Ok(());
    }

    let mut config = if let Some(ref path) = args.config {
        InspectorConfig::load(Some(path.clone())).context("Failed to load configuration")?
    } else {
        InspectorConfig::load_or_default()
    };

    // Command-line flags win over the file
    if let Some(secs) = args.timeout {
        config.profiler.timeout_secs = secs;
    }
    if args.json {
        config.display.format = OutputFormat::Json;
    }
    if args.hide_built_in {
        config.display.hide_built_in = true;
    }
    if let Some(ref level) = args.log_level {
        config.general.log_level = level.clone();
    }
    config.validate().context("Invalid configuration")?;

    // The TUI owns the terminal, so it runs without a log subscriber
    if !args.tui {
        setup_logging(&config.general.log_level).context("Failed to setup logging")?;
    }

    info!("usb-inspector v{}", env!("CARGO_PKG_VERSION"));
    debug!("Log level: {}", config.general.log_level);

    let source = match args.input.as_deref() {
        Some(input) => ReportSource::from_input(input),
        None => ReportSource::profiler(&config.profiler),
    };
    let filter = Filter {
        search: args.search.unwrap_or_default(),
        hide_built_in: config.display.hide_built_in,
    };

    if args.tui {
        anyhow::ensure!(
            source != ReportSource::Stdin,
            "The TUI re-reads its input on refresh and cannot use stdin"
        );
        return tui::app::run(source, filter).await;
    }

    let inventory = filter.apply(&inspect(&source).await?);

    let mut stdout = io::stdout().lock();
    let written = match config.display.format {
        OutputFormat::Text => render::write_text(&mut stdout, &inventory),
        OutputFormat::Json => render::write_json(&mut stdout, &inventory),
    };
    written
        .and_then(|()| stdout.flush())
        .context("Failed to write report")?;

    Ok(())
}
