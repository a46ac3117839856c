use std::process::ExitCode;

use clap::Parser;

use subs_server::config::{load_config, Cli};
use subs_server::lifecycle;
use subs_server::observability::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load_config(Cli::parse()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("subs-server: {}", err);
            return ExitCode::FAILURE;
        }
    };

    init_logging(config.observability.debug);
    tracing::info!("subs-server v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(err) = lifecycle::run(config).await {
        tracing::error!(error = %err, "Fatal error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
