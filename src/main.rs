//! Benchwatch — Binary Entrypoint
//! Scrapes the Artificial Analysis leaderboards on a schedule and pushes
//! change alerts via Pushover.
//!
//! See `README.md` for quickstart.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use benchwatch::config::{Config, DEFAULT_INTERVAL_MINUTES};
use benchwatch::extract::classify::HeuristicPolicy;
use benchwatch::monitor::Monitor;
use benchwatch::notify::PushoverNotifier;

#[derive(Debug, Parser)]
#[command(name = "benchwatch", about = "Monitor AI benchmark leaderboard changes")]
struct Args {
    /// Run a single check cycle and exit.
    #[arg(long)]
    once: bool,

    /// Check interval in minutes.
    #[arg(long, default_value_t = DEFAULT_INTERVAL_MINUTES)]
    interval: u64,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env in local/dev; no-op when the vars come from the real env.
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Args::parse();
    let mut config = Config::from_env();
    config.interval_minutes = args.interval;

    // Credentials are mandatory: validate before any cycle runs.
    let notifier = PushoverNotifier::new(
        config.pushover_token.clone(),
        config.pushover_user.clone(),
    );
    if let Err(e) = notifier.validate().await {
        error!("❌ {e:#}");
        return ExitCode::FAILURE;
    }

    let policy = Arc::new(HeuristicPolicy::default());
    let monitor = Monitor::from_config(&config, policy, Box::new(notifier));

    if args.once {
        match monitor.check().await {
            Ok(report) => {
                println!();
                if report.changed() {
                    println!("CHANGES:");
                    for change in &report.changes {
                        println!("  {change}");
                    }
                } else {
                    println!("No changes (or first run)");
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("check failed: {e:#}");
                ExitCode::FAILURE
            }
        }
    } else {
        println!("Benchwatch: checking every {} minutes, Ctrl+C to stop", config.interval_minutes);
        monitor.run_continuous(config.interval_minutes).await;
        ExitCode::SUCCESS
    }
}
