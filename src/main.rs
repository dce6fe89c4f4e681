//
//  repo-aggregator
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use repo_aggregator::auth::AuthError;
use repo_aggregator::cli::Cli;
use repo_aggregator::config::ConfigError;
use repo_aggregator::{exit_codes, server};

#[actix_web::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Start the service
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            let code = if e.downcast_ref::<AuthError>().is_some() {
                exit_codes::AUTH_ERROR
            } else if e.downcast_ref::<ConfigError>().is_some() {
                exit_codes::USAGE
            } else {
                exit_codes::ERROR
            };
            std::process::exit(code);
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("AGGREGATOR_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info,actix_web=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.resolve_config().context("Invalid configuration")?;

    if cli.print_config {
        print!("{}", config.to_redacted_toml()?);
        return Ok(());
    }

    let state = server::build_state(&config).await?;
    server::run(&config, state)
        .await
        .with_context(|| format!("Server on {} failed", config.bind_address()))
}
