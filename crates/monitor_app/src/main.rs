mod platform;

use std::path::PathBuf;

use clap::Parser;

use platform::logging::LogDestination;

#[derive(Parser)]
#[command(name = "caption-monitor")]
#[command(about = "Live progress dashboard for the captioning backend", long_about = None)]
struct Cli {
    /// Origin of the page serving the backend, e.g. http://localhost:8000.
    #[arg(long)]
    origin: Option<String>,

    #[arg(long, default_value = platform::config::DEFAULT_CONFIG_FILENAME)]
    config: PathBuf,

    #[arg(long, value_enum)]
    log: Option<LogDestination>,

    /// Write the default configuration to `--config` and exit.
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.init_config {
        platform::config::write_default_config(&cli.config)?;
        println!("Wrote default configuration to {}", cli.config.display());
        return Ok(());
    }

    let loaded = platform::config::read_config(&cli.config);
    let mut config = loaded.as_ref().cloned().unwrap_or_default();
    if let Some(origin) = cli.origin {
        config.origin = origin;
    }
    if let Some(destination) = cli.log {
        config.log_destination = destination;
    }

    platform::logging::initialize(config.log_destination, config.log_level());
    if let Err(err) = loaded {
        monitor_logging::monitor_warn!("{}; using defaults", err);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(platform::app::run_app(config))
}
