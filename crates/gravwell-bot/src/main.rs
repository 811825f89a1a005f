//! Gravwell fleet bot.
//!
//! Speaks the engine's line protocol on stdin/stdout. Logs never go to stdout;
//! they are written to `--log-file` when given and dropped otherwise.
//!
//! Usage:
//!   gravwell --strategy lemming --seed 42 --log-file gravwell.log
//!   RUST_LOG=debug gravwell --config fleet.json --log-file gravwell.log

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use gravwell_core::fleet::{Fleet, FleetConfig};
use gravwell_core::session::Session;
use gravwell_core::strategy::StrategyKind;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gravwell")]
#[command(version, about = "Fleet bot for the line-based snapshot protocol")]
struct Cli {
    /// Name announced to the engine
    #[arg(long, default_value = "Gravwell")]
    name: String,

    /// Strategy: settler, lemming or hyena (overrides the config file)
    #[arg(long)]
    strategy: Option<StrategyKind>,

    /// Master seed for per-ship randomness (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON fleet configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs here (stdout is reserved for the protocol)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Configuration from the file (or defaults), with flags applied on top.
    fn fleet_config(&self) -> Result<FleetConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => FleetConfig::default(),
        };
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<FleetConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn setup_stop_flag() -> Result<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })
    .context("failed to install Ctrl-C handler")?;
    Ok(stop)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    let config = cli.fleet_config()?;
    let stop = setup_stop_flag()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::handshake(stdin.lock(), stdout.lock(), &cli.name)
        .context("handshake with engine failed")?;

    let fleet = Fleet::new(session.player(), config);
    info!(
        player = %session.player(),
        strategy = fleet.strategy_name(),
        seed = fleet.config().seed,
        "fleet ready"
    );

    let end = session.run(&fleet, &stop).context("turn loop failed")?;
    info!(turns = session.turn(), ?end, "session finished");
    Ok(())
}
