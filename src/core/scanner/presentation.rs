//! Risk banner selection for scan results.
//!
//! The banner is a pure function of the reported risk level and the profile's
//! full name, so every front-end shows the same verdict for the same response.

use super::scanner_models::{RiskLevel, ScanResponse, BLACKLISTED_FULL_NAME};

/// Which banner a scan result gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBanner {
    High,
    Medium,
    Low,
    /// Low risk reported for a profile the service already blocked.
    AlreadyBlocked,
}

/// Abstract banner color; the terminal layer maps it to real colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerColor {
    Red,
    Yellow,
    Green,
    Blue,
}

impl RiskBanner {
    pub fn select(level: RiskLevel, full_name: Option<&str>) -> Self {
        match level {
            RiskLevel::High => RiskBanner::High,
            RiskLevel::Medium => RiskBanner::Medium,
            RiskLevel::Low if full_name == Some(BLACKLISTED_FULL_NAME) => {
                RiskBanner::AlreadyBlocked
            }
            RiskLevel::Low => RiskBanner::Low,
        }
    }

    pub fn for_response(response: &ScanResponse) -> Self {
        Self::select(
            response.visual_analysis.risk_level(),
            response.profile_info.full_name.as_deref(),
        )
    }

    pub fn color(&self) -> BannerColor {
        match self {
            RiskBanner::High => BannerColor::Red,
            RiskBanner::Medium => BannerColor::Yellow,
            RiskBanner::Low => BannerColor::Green,
            RiskBanner::AlreadyBlocked => BannerColor::Blue,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RiskBanner::High => "High risk: this profile should be blocked.",
            RiskBanner::Medium => "Medium risk: review this profile manually.",
            RiskBanner::Low => "Low risk: no action needed.",
            RiskBanner::AlreadyBlocked => "This user has already been blocked.",
        }
    }

    /// Whether a manual block override makes sense for this verdict.
    pub fn allows_override(&self) -> bool {
        matches!(self, RiskBanner::Medium | RiskBanner::Low)
    }
}

/// Text shown when the scanner reported no red flags.
pub const NO_RED_FLAGS: &str = "No specific red flags identified.";
