// Interactive operator session.
//
// Plays the role of the scan form: the operator sets the handle, platform and
// customer, then runs one action at a time. Every action is awaited before the
// next line is read, and failures are printed without ending the session.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::render::{self, Renderer};
use crate::core::scanner::{
    Customer, Platform, RiskBanner, ScanReport, ScannerApi, ScannerService, DEFAULT_CUSTOMER,
};

const HELP: &str = "\
Commands:
  user <handle>        set the social handle
  platform <name>      instagram | twitter | facebook | tiktok
  customer <name>      customer account the scan is billed to
  show                 print the current form
  scan                 run a scan with the current form
  raw                  print the raw response of the last scan
  override             block the last scanned user anyway
  moderate             trigger remoderation for the current handle
  block                hard-block the current handle
  customers            list known customers
  help                 show this help
  quit                 leave the session";

/// One parsed line of operator input.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    SetUser(String),
    SetPlatform(Platform),
    SetCustomer(String),
    Show,
    Scan,
    Raw,
    Override,
    Moderate,
    Block,
    Customers,
    Help,
    Quit,
    Empty,
}

pub fn parse_line(line: &str) -> Result<SessionCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_lowercase().as_str() {
        "" => SessionCommand::Empty,
        "user" | "username" => SessionCommand::SetUser(rest.to_string()),
        "platform" => {
            let platform = rest.parse::<Platform>().map_err(|e| e.to_string())?;
            SessionCommand::SetPlatform(platform)
        }
        "customer" => match Customer::lookup(rest) {
            Some(customer) => SessionCommand::SetCustomer(customer.handle.to_string()),
            None => return Err(format!("Unknown customer: {}", rest)),
        },
        "show" => SessionCommand::Show,
        "scan" => SessionCommand::Scan,
        "raw" => SessionCommand::Raw,
        "override" => SessionCommand::Override,
        "moderate" | "remoderate" => SessionCommand::Moderate,
        "block" => SessionCommand::Block,
        "customers" => SessionCommand::Customers,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
    };
    Ok(command)
}

/// Current form inputs plus the last scan, if any.
#[derive(Debug, Clone)]
pub struct FormState {
    pub username: String,
    pub platform: Platform,
    pub customer: String,
    pub last_report: Option<ScanReport>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            username: String::new(),
            platform: Platform::default(),
            customer: DEFAULT_CUSTOMER.to_string(),
            last_report: None,
        }
    }
}

pub struct Session<'a, A: ScannerApi> {
    service: &'a ScannerService<A>,
    renderer: Renderer,
    form: FormState,
}

impl<'a, A: ScannerApi> Session<'a, A> {
    pub fn new(service: &'a ScannerService<A>, renderer: Renderer) -> Self {
        Self {
            service,
            renderer,
            form: FormState::default(),
        }
    }

    /// Read commands until `quit` or end of input.
    pub async fn run<R, W>(&mut self, reader: R, out: &mut W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "Social Profile Scanner. Type 'help' for commands.")?;
        let mut lines = reader.lines();

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match parse_line(&line) {
                Ok(SessionCommand::Quit) => break,
                Ok(command) => self.execute(command, out).await?,
                Err(message) => writeln!(out, "{}", message)?,
            }
        }

        Ok(())
    }

    async fn execute<W: Write>(
        &mut self,
        command: SessionCommand,
        out: &mut W,
    ) -> anyhow::Result<()> {
        match command {
            SessionCommand::Empty | SessionCommand::Quit => {}
            SessionCommand::Help => writeln!(out, "{}", HELP)?,
            SessionCommand::Customers => write!(out, "{}", render::customer_list())?,
            SessionCommand::SetUser(username) => {
                self.form.username = username;
                writeln!(out, "Handle set to '{}'.", self.form.username)?;
            }
            SessionCommand::SetPlatform(platform) => {
                self.form.platform = platform;
                writeln!(out, "Platform set to {}.", platform)?;
            }
            SessionCommand::SetCustomer(customer) => {
                self.form.customer = customer;
                writeln!(out, "Customer set to {}.", self.form.customer)?;
            }
            SessionCommand::Show => {
                writeln!(
                    out,
                    "Handle: '{}'  Platform: {}  Customer: {}",
                    self.form.username, self.form.platform, self.form.customer
                )?;
            }
            SessionCommand::Scan => self.scan(out).await?,
            SessionCommand::Raw => match &self.form.last_report {
                Some(report) => {
                    let raw = serde_json::to_string_pretty(&report.raw)?;
                    writeln!(out, "{}", raw)?;
                }
                None => writeln!(out, "Run a scan first.")?,
            },
            SessionCommand::Override => match &self.form.last_report {
                Some(report) => {
                    let message = match self.service.override_block(report).await {
                        Ok(()) => self
                            .renderer
                            .success(&render::block_success(&report.request.username)),
                        Err(e) => self.renderer.error(&e),
                    };
                    writeln!(out, "{}", message)?;
                }
                None => writeln!(out, "Run a scan first.")?,
            },
            SessionCommand::Moderate => {
                match self
                    .service
                    .moderate(&self.form.username, self.form.platform)
                    .await
                {
                    Ok(()) => writeln!(
                        out,
                        "{}",
                        self.renderer
                            .success(&render::moderate_success(&self.form.username))
                    )?,
                    Err(e) => writeln!(out, "{}", self.renderer.error(&e))?,
                }
            }
            SessionCommand::Block => {
                match self
                    .service
                    .block(&self.form.username, self.form.platform)
                    .await
                {
                    Ok(()) => writeln!(
                        out,
                        "{}",
                        self.renderer
                            .success(&render::block_success(&self.form.username))
                    )?,
                    Err(e) => writeln!(out, "{}", self.renderer.error(&e))?,
                }
            }
        }
        Ok(())
    }

    async fn scan<W: Write>(&mut self, out: &mut W) -> anyhow::Result<()> {
        let request = match self.service.prepare_scan(
            &self.form.username,
            self.form.platform,
            &self.form.customer,
        ) {
            Ok(request) => request,
            Err(e) => {
                writeln!(out, "{}", self.renderer.error(&e))?;
                return Ok(());
            }
        };

        writeln!(out, "Analyzing profile...")?;
        out.flush()?;

        match self.service.submit_scan(request).await {
            Ok(report) => {
                write!(out, "{}", self.renderer.report(&report, false))?;
                if RiskBanner::for_response(&report.response).allows_override() {
                    writeln!(
                        out,
                        "Type 'override' to block @{} anyway.",
                        report.request.username
                    )?;
                }
                self.form.last_report = Some(report);
            }
            Err(e) => {
                writeln!(out, "{}", self.renderer.error(&e))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_api::{canned, hits, CannedApi};
    use serde_json::json;

    async fn run_script(
        service: &ScannerService<CannedApi>,
        script: &str,
    ) -> (String, FormState) {
        let mut session = Session::new(service, Renderer::new(false));
        let mut out = Vec::new();
        session.run(script.as_bytes(), &mut out).await.unwrap();
        (String::from_utf8(out).unwrap(), session.form.clone())
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("user  janesmith123 "),
            Ok(SessionCommand::SetUser("janesmith123".to_string()))
        );
        assert_eq!(
            parse_line("PLATFORM twitter"),
            Ok(SessionCommand::SetPlatform(Platform::Twitter))
        );
        assert_eq!(
            parse_line("customer mancity"),
            Ok(SessionCommand::SetCustomer("mancity".to_string()))
        );
        assert_eq!(
            parse_line("customer ICC"),
            Ok(SessionCommand::SetCustomer("icc".to_string()))
        );
        assert_eq!(parse_line("   "), Ok(SessionCommand::Empty));
        assert_eq!(parse_line("exit"), Ok(SessionCommand::Quit));
        assert!(parse_line("customer arsenal").is_err());
        assert!(parse_line("platform myspace").is_err());
        assert!(parse_line("launch").is_err());
    }

    #[tokio::test]
    async fn test_scan_then_override() {
        let (service, api_hits) = canned(
            json!({
                "profile_info": {"username": "jane"},
                "visual_analysis": {"final_risk_level": "Medium", "key_red_flags": ["odd bio"]}
            }),
            Some("token"),
        );

        let (output, form) =
            run_script(&service, "user jane\nplatform twitter\nscan\noverride\nquit\n").await;

        assert!(output.contains("Analyzing profile..."));
        assert!(output.contains("- odd bio"));
        assert!(output.contains("Type 'override' to block @jane anyway."));
        assert!(output.contains("User @jane has been blocked."));
        assert!(form.last_report.is_some());
        assert_eq!(
            hits(&api_hits),
            vec!["scan twitter jane", "block twitter jane"]
        );
    }

    #[tokio::test]
    async fn test_high_risk_scan_offers_no_override() {
        let (service, api_hits) = canned(
            json!({"visual_analysis": {"final_risk_level": "High"}}),
            Some("token"),
        );

        let (output, _) = run_script(&service, "user jane\nscan\noverride\n").await;

        assert!(!output.contains("Type 'override'"));
        assert!(output.contains("Warning: Override is not available"));
        assert_eq!(hits(&api_hits), vec!["scan instagram jane"]);
    }

    #[tokio::test]
    async fn test_errors_do_not_end_session() {
        let (service, api_hits) = canned(json!({}), None);

        let (output, _) =
            run_script(&service, "scan\nuser jane\nmoderate\nraw\nbogus\nshow\n").await;

        assert!(output.contains("Warning: Please enter a username."));
        assert!(output.contains("Error: Configuration error"));
        assert!(!output.contains("Analyzing profile..."));
        assert!(output.contains("Run a scan first."));
        assert!(output.contains("Unknown command 'bogus'"));
        assert!(output.contains("Handle: 'jane'  Platform: instagram  Customer: icc"));
        assert!(hits(&api_hits).is_empty());
    }

    #[tokio::test]
    async fn test_scan_without_token_prints_no_progress() {
        let (service, api_hits) = canned(json!({}), None);

        let (output, form) = run_script(&service, "user jane\ncustomer MANCITY\nscan\n").await;

        assert!(output.contains("Customer set to mancity."));
        assert!(output.contains("Error: Configuration error"));
        assert!(!output.contains("Analyzing profile..."));
        assert_eq!(form.customer, "mancity");
        assert!(form.last_report.is_none());
        assert!(hits(&api_hits).is_empty());
    }

    #[tokio::test]
    async fn test_moderate_and_block_use_form() {
        let (service, api_hits) = canned(json!({}), Some("token"));

        let (output, _) =
            run_script(&service, "user jane\nplatform facebook\nmoderate\nblock\n").await;

        assert!(output.contains("Remoderation triggered for @jane."));
        assert!(output.contains("User @jane has been blocked."));
        assert_eq!(
            hits(&api_hits),
            vec!["moderate facebook jane", "block facebook jane"]
        );
    }
}
