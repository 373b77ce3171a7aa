// One-shot subcommands.
//
// **Same pattern as the session:**
// 1. Hand the operator's input to the core service
// 2. Render the outcome, success or failure, to `out`
// 3. Report whether the action succeeded
//
// This layer is THIN - no business logic, just translation.

use std::io::Write;

use super::args::Command;
use super::render::{self, Renderer};
use crate::core::scanner::{RiskBanner, ScannerApi, ScannerError, ScannerService};

/// Outcome of a one-shot command, mapped to the process exit status by main.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed,
}

fn report_failure<W: Write>(
    out: &mut W,
    renderer: &Renderer,
    err: &ScannerError,
) -> std::io::Result<Outcome> {
    tracing::debug!("Action failed: {}", err);
    writeln!(out, "{}", renderer.error(err))?;
    Ok(Outcome::Failed)
}

pub async fn run<A: ScannerApi, W: Write>(
    service: &ScannerService<A>,
    command: Command,
    renderer: &Renderer,
    out: &mut W,
) -> anyhow::Result<Outcome> {
    let outcome = match command {
        Command::Scan {
            username,
            platform,
            customer,
            raw,
            override_block,
        } => {
            let request = match service.prepare_scan(&username, platform, &customer) {
                Ok(request) => request,
                Err(e) => return Ok(report_failure(out, renderer, &e)?),
            };
            eprintln!("Analyzing profile...");
            let report = match service.submit_scan(request).await {
                Ok(report) => report,
                Err(e) => return Ok(report_failure(out, renderer, &e)?),
            };
            write!(out, "{}", renderer.report(&report, raw))?;

            if !override_block {
                if let Some(hint) = override_hint(RiskBanner::for_response(&report.response)) {
                    writeln!(out, "{}", hint)?;
                }
                Outcome::Success
            } else {
                match service.override_block(&report).await {
                    Ok(()) => {
                        writeln!(
                            out,
                            "{}",
                            renderer.success(&render::block_success(&report.request.username))
                        )?;
                        Outcome::Success
                    }
                    Err(e) => report_failure(out, renderer, &e)?,
                }
            }
        }
        Command::Moderate { username, platform } => {
            match service.moderate(&username, platform).await {
                Ok(()) => {
                    writeln!(
                        out,
                        "{}",
                        renderer.success(&render::moderate_success(&username))
                    )?;
                    Outcome::Success
                }
                Err(e) => report_failure(out, renderer, &e)?,
            }
        }
        Command::Block { username, platform } => match service.block(&username, platform).await {
            Ok(()) => {
                writeln!(out, "{}", renderer.success(&render::block_success(&username)))?;
                Outcome::Success
            }
            Err(e) => report_failure(out, renderer, &e)?,
        },
        Command::Customers => run_catalogue(out)?,
        Command::Interactive => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            super::session::Session::new(service, *renderer)
                .run(stdin, out)
                .await?;
            Outcome::Success
        }
    };

    Ok(outcome)
}

/// List known customers. Needs no settings or network.
pub fn run_catalogue<W: Write>(out: &mut W) -> anyhow::Result<Outcome> {
    write!(out, "{}", render::customer_list())?;
    Ok(Outcome::Success)
}

/// Hint printed under a scan whose verdict still allows a manual block.
pub fn override_hint(banner: RiskBanner) -> Option<&'static str> {
    banner
        .allows_override()
        .then_some("Re-run with --override-block to block this user anyway.")
}
