use anyhow::Context;
use clap::Parser;
use lexicard_config::Config;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod pipeline;
mod steps;

use self::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json);

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply(&mut config);
    tracing::debug!(?config, "configuration loaded");

    commands::execute(&cli.command, &config).await
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lexicard=info"));

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
