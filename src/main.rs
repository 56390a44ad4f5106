use std::path::PathBuf;

use clap::Parser;
use malikay::config::AppConfig;
use malikay::kernel::access::SharedSecretVerifier;
use malikay::kernel::reactor::{Reactor, ReactorConfig};
use malikay::kernel::session::SessionKernel;
use malikay::kernel::table::ClassificationTable;
use malikay::render::console::ConsoleAdapter;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "malikay")]
#[command(about = "Pulse-based acupoint lookup with a treatment timer", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (falls back to MALIKAY_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory exported records are written to
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr, the console transcript owns stdout.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = AppConfig::load(cli.config.as_deref());
    if let Some(dir) = cli.export_dir {
        config.export_dir = dir;
    }
    tracing::info!(brand = %config.brand, export_dir = ?config.export_dir, "Starting");

    let kernel = SessionKernel::new(
        Box::new(SharedSecretVerifier::new(config.secret.clone())),
        ClassificationTable::new(),
        config.brand.clone(),
    );
    let adapter = ConsoleAdapter::new(std::io::stdout(), config.brand.clone());
    let mut reactor = Reactor::new(
        kernel,
        adapter,
        ReactorConfig {
            export_dir: config.export_dir.clone(),
            default_timer_minutes: config.default_timer_minutes,
        },
    );

    let lines = BufReader::new(tokio::io::stdin()).lines();
    reactor.run(lines).await;

    let summary = reactor.shutdown();
    tracing::info!(summary = %serde_json::to_string(&summary)?, "Session closed");
    Ok(())
}
