pub mod cli;
pub mod config;
pub mod error;
pub mod service;
pub mod store;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::Config;
use crate::service::ReviewService;
use crate::store::JsonFileStore;

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(account) = cli.account {
        config.account = account;
    }
    if let Some(state_dir) = cli.state_dir {
        config.state_dir = state_dir;
    }

    tracing::debug!(
        state_dir = %config.state_dir.display(),
        account = %config.account,
        "starting"
    );

    let service = ReviewService::new(JsonFileStore::new(&config.state_dir), config.settings);
    let mut stdout = std::io::stdout().lock();
    cli::execute(cli.command, &service, &config.account, &mut stdout)
}
