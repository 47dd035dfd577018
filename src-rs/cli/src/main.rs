mod cli;
mod models;
mod repl;
mod render;

use std::sync::Arc;

use anyhow::Context;
use task_manager_rs::ApiClient;
use tracing_subscriber::EnvFilter;

use repl::REPL;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = cli::parse_config();
    init_tracing(config.debug);

    let client = ApiClient::new(config.client_config()).context("failed to build http client")?;
    let mut repl = REPL::new(config, Arc::new(client));
    repl.run();
    Ok(())
}

fn init_tracing(debug: bool) {
    let fallback = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
