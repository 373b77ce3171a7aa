// Terminal rendering for scan reports and action outcomes.
//
// Everything renders to a String so the session and the one-shot commands
// share the same output, and tests can inspect it without a terminal.

use crate::core::scanner::{
    BannerColor, RiskBanner, ScanReport, ScannerError, CUSTOMERS, DEFAULT_CUSTOMER, NO_RED_FLAGS,
};
use crossterm::style::{Color, Stylize};
use std::fmt;

const RULE: &str = "----------------------------------------";

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Color output only when stdout is an interactive terminal.
    pub fn for_stdout() -> Self {
        use std::io::IsTerminal;
        Self::new(std::io::stdout().is_terminal())
    }

    fn paint(&self, text: &str, color: BannerColor) -> String {
        if !self.color {
            return text.to_string();
        }
        let color = match color {
            BannerColor::Red => Color::Red,
            BannerColor::Yellow => Color::Yellow,
            BannerColor::Green => Color::Green,
            BannerColor::Blue => Color::Blue,
        };
        text.with(color).bold().to_string()
    }

    pub fn report(&self, report: &ScanReport, show_raw: bool) -> String {
        ReportView {
            renderer: self,
            report,
            show_raw,
        }
        .to_string()
    }

    pub fn error(&self, err: &ScannerError) -> String {
        match err {
            ScannerError::Input(_) => self.paint(&format!("Warning: {}", err), BannerColor::Yellow),
            _ => self.paint(&format!("Error: {}", err), BannerColor::Red),
        }
    }

    pub fn success(&self, message: &str) -> String {
        self.paint(message, BannerColor::Green)
    }
}

pub fn moderate_success(username: &str) -> String {
    format!("Remoderation triggered for @{}.", username.trim())
}

pub fn block_success(username: &str) -> String {
    format!("User @{} has been blocked.", username.trim())
}

pub fn customer_list() -> String {
    CUSTOMERS
        .iter()
        .map(|customer| {
            let marker = if customer.handle == DEFAULT_CUSTOMER {
                " (default)"
            } else {
                ""
            };
            format!("{:<10} {}{}\n", customer.handle, customer.client_id, marker)
        })
        .collect()
}

struct ReportView<'a> {
    renderer: &'a Renderer,
    report: &'a ScanReport,
    show_raw: bool,
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let profile = &report.response.profile_info;
        let visual = &report.response.visual_analysis;
        let banner = RiskBanner::for_response(&report.response);
        let username = profile
            .username
            .as_deref()
            .unwrap_or(&report.request.username);

        writeln!(f, "{}", RULE)?;
        writeln!(
            f,
            "Scan result for @{} on {} ({})",
            report.request.username,
            report.request.platform,
            report.scanned_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(f, "{}", RULE)?;

        match profile.profile_pic_url.as_deref() {
            Some(url) => writeln!(f, "Profile picture: {} (@{})", url, username)?,
            None => writeln!(f, "No profile picture available")?,
        }
        writeln!(f, "Username: {}", username)?;
        if let Some(full_name) = profile.full_name.as_deref() {
            writeln!(f, "Full name: {}", full_name)?;
        }
        // The level is shown as the scanner sent it; only the banner is normalized.
        writeln!(
            f,
            "Final Risk Level: {}",
            self.renderer.paint(visual.risk_label(), banner.color())
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.renderer.paint(banner.message(), banner.color()))?;
        writeln!(f)?;

        writeln!(f, "Key Red Flags:")?;
        if visual.key_red_flags.is_empty() {
            writeln!(f, "{}", NO_RED_FLAGS)?;
        } else {
            for flag in &visual.key_red_flags {
                writeln!(f, "- {}", flag)?;
            }
        }

        if self.show_raw {
            let raw = serde_json::to_string_pretty(&report.raw)
                .unwrap_or_else(|_| report.raw.to_string());
            writeln!(f)?;
            writeln!(f, "Raw API Response:")?;
            writeln!(f, "{}", raw)?;
        }
        Ok(())
    }
}
