// This is the entry point of the profile scanner.
//
// **Architecture Overview:**
// - `core/` = Business logic (front-end agnostic)
// - `infra/` = Implementations of core traits (HTTP client, settings)
// - `cli/` = Terminal adapters (arguments, rendering, interactive session)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Dispatch the requested command

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with several mod.rs files that all look the same.
#[path = "cli/cli_layer.rs"]
mod cli;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command, Outcome, Renderer};
use crate::core::scanner::ScannerService;
use crate::infra::scanner::{HttpScannerClient, ScannerSettings};

fn init_tracing() {
    // Logs go to stderr so stdout only carries reports.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> anyhow::Result<Outcome> {
    let renderer = Renderer::for_stdout();
    let mut stdout = std::io::stdout().lock();

    if let Command::Customers = args.command {
        return cli::commands::run_catalogue(&mut stdout);
    }

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // A missing token is not fatal here: each action reports it inline.

    let settings = ScannerSettings::load(&args.secrets)
        .with_context(|| format!("Failed to load settings from {}", args.secrets.display()))?;
    tracing::debug!(?settings, "Loaded scanner settings");
    if settings.bearer_token.is_none() {
        tracing::warn!("No BEARER_TOKEN configured; scanner actions will fail");
    }

    let client = HttpScannerClient::new(&settings.base_url, settings.timeout)
        .context("Failed to create scanner API client")?;
    let service = ScannerService::new(client, settings.bearer_token);

    cli::commands::run(&service, args.command, &renderer, &mut stdout).await
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::Failed) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
