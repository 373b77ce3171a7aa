// Scanner domain models - request payloads and the scan response shape.
//
// Pure data types with no HTTP or terminal dependencies.
// The infra layer serializes these, the cli layer renders them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::scanner_service::ScannerError;

/// Sentinel full name the scanning service reports for users it already blocked.
pub const BLACKLISTED_FULL_NAME: &str = "Blacklisted User";

// ============================================================================
// CATALOGUE
// ============================================================================

/// A customer account the scanning service knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Customer {
    pub handle: &'static str,
    pub client_id: &'static str,
}

pub const CUSTOMERS: &[Customer] = &[
    Customer {
        handle: "icc",
        client_id: "63125d7e96571fcbbdb75fe7",
    },
    Customer {
        handle: "mancity",
        client_id: "63125d7e96571fcbbdb75fe8",
    },
];

pub const DEFAULT_CUSTOMER: &str = "icc";

impl Customer {
    /// Look up a customer by handle, ignoring case and surrounding whitespace.
    pub fn lookup(handle: &str) -> Option<&'static Customer> {
        let handle = handle.trim();
        CUSTOMERS
            .iter()
            .find(|c| c.handle.eq_ignore_ascii_case(handle))
    }
}

/// Social platforms the scanner accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Instagram,
    Twitter,
    Facebook,
    Tiktok,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Instagram,
        Platform::Twitter,
        Platform::Facebook,
        Platform::Tiktok,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::Facebook => "facebook",
            Platform::Tiktok => "tiktok",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ScannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| ScannerError::Input(format!("Unknown platform: {}", s)))
    }
}

// ============================================================================
// REQUESTS
// ============================================================================

/// Body of `POST /scan`. Field order matches the wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanRequest {
    pub client_id: String,
    pub client_handle: String,
    pub username: String,
    pub platform: Platform,
}

impl ScanRequest {
    pub fn new(customer: &Customer, username: &str, platform: Platform) -> Self {
        Self {
            client_id: customer.client_id.to_string(),
            client_handle: customer.handle.to_string(),
            username: username.to_string(),
            platform,
        }
    }
}

/// Target of `GET /moderate/{platform}/{username}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerateRequest {
    pub platform: Platform,
    pub username: String,
}

/// Body of `POST /block`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockRequest {
    pub username: String,
    pub platform: Platform,
}

// ============================================================================
// RESPONSES
// ============================================================================

/// Profile metadata echoed back by the scanner.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfileInfo {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
}

/// Output of the scanner's image and profile analysis.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VisualAnalysis {
    #[serde(default)]
    pub final_risk_level: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_red_flags: Vec<String>,
}

impl VisualAnalysis {
    pub fn risk_level(&self) -> RiskLevel {
        self.final_risk_level
            .as_deref()
            .map(RiskLevel::parse)
            .unwrap_or_default()
    }

    /// The level as the scanner reported it, or "Low" when it sent none.
    pub fn risk_label(&self) -> &str {
        self.final_risk_level
            .as_deref()
            .map(str::trim)
            .filter(|level| !level.is_empty())
            .unwrap_or("Low")
    }
}

/// Typed view of a successful `/scan` response. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScanResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_info: ProfileInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub visual_analysis: VisualAnalysis,
}

// `null` and a missing key mean the same thing to the scanner.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Risk level computed by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Case-insensitive. Anything unrecognized is treated as Low.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "high" => RiskLevel::High,
            "medium" => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Result of a completed scan: the typed view plus the untouched JSON.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub request: ScanRequest,
    pub response: ScanResponse,
    pub raw: serde_json::Value,
    pub scanned_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_request_wire_format() {
        let customer = Customer::lookup("icc").unwrap();
        let request = ScanRequest::new(customer, "janesmith123", Platform::Instagram);

        let json = serde_json::to_string(&request).unwrap();

        assert_eq!(
            json,
            r#"{"client_id":"63125d7e96571fcbbdb75fe7","client_handle":"icc","username":"janesmith123","platform":"instagram"}"#
        );
    }

    #[test]
    fn test_block_request_wire_format() {
        let request = BlockRequest {
            username: "janesmith123".to_string(),
            platform: Platform::Tiktok,
        };

        let json = serde_json::to_string(&request).unwrap();

        assert_eq!(json, r#"{"username":"janesmith123","platform":"tiktok"}"#);
    }

    #[test]
    fn test_customer_lookup() {
        assert_eq!(
            Customer::lookup("mancity").map(|c| c.client_id),
            Some("63125d7e96571fcbbdb75fe8")
        );
        assert!(Customer::lookup("arsenal").is_none());
        assert!(Customer::lookup(DEFAULT_CUSTOMER).is_some());
    }

    #[test]
    fn test_customer_lookup_ignores_case() {
        assert_eq!(Customer::lookup("ICC").map(|c| c.handle), Some("icc"));
        assert_eq!(Customer::lookup(" ManCity ").map(|c| c.handle), Some("mancity"));
        assert!(Customer::lookup("").is_none());
    }

    #[test]
    fn test_platform_parsing_is_case_insensitive() {
        assert_eq!("TikTok".parse::<Platform>().unwrap(), Platform::Tiktok);
        assert_eq!(" twitter ".parse::<Platform>().unwrap(), Platform::Twitter);
        assert!(matches!(
            "myspace".parse::<Platform>(),
            Err(ScannerError::Input(_))
        ));
    }

    #[test]
    fn test_risk_level_parsing() {
        assert_eq!(RiskLevel::parse("HIGH"), RiskLevel::High);
        assert_eq!(RiskLevel::parse("medium"), RiskLevel::Medium);
        assert_eq!(RiskLevel::parse("Low"), RiskLevel::Low);
        // Unrecognized falls back to Low
        assert_eq!(RiskLevel::parse("Critical"), RiskLevel::Low);
        assert_eq!(RiskLevel::parse(""), RiskLevel::Low);
    }

    #[test]
    fn test_risk_label_keeps_reported_text() {
        let visual = |level: Option<&str>| VisualAnalysis {
            final_risk_level: level.map(str::to_string),
            key_red_flags: Vec::new(),
        };

        assert_eq!(visual(Some("Critical")).risk_label(), "Critical");
        assert_eq!(visual(Some(" HIGH ")).risk_label(), "HIGH");
        assert_eq!(visual(Some("")).risk_label(), "Low");
        assert_eq!(visual(None).risk_label(), "Low");
    }

    #[test]
    fn test_response_with_missing_fields() {
        let response: ScanResponse = serde_json::from_str("{}").unwrap();

        assert_eq!(response.visual_analysis.risk_level(), RiskLevel::Low);
        assert!(response.visual_analysis.key_red_flags.is_empty());
        assert!(response.profile_info.profile_pic_url.is_none());
    }

    #[test]
    fn test_response_with_null_sections() {
        let json = r#"{
            "profile_info": null,
            "visual_analysis": {"final_risk_level": "Medium", "key_red_flags": null}
        }"#;
        let response: ScanResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.visual_analysis.risk_level(), RiskLevel::Medium);
        assert!(response.visual_analysis.key_red_flags.is_empty());
        assert_eq!(response.profile_info, ProfileInfo::default());
    }

    #[test]
    fn test_response_keeps_flag_order_and_ignores_extra_fields() {
        let json = r#"{
            "profile_info": {"username": "jane", "followers": 12},
            "visual_analysis": {
                "final_risk_level": "high",
                "key_red_flags": ["stock photo avatar", "new account", "link in bio"],
                "confidence": 0.93
            }
        }"#;
        let response: ScanResponse = serde_json::from_str(json).unwrap();

        assert_eq!(
            response.visual_analysis.key_red_flags,
            vec!["stock photo avatar", "new account", "link in bio"]
        );
        assert_eq!(response.profile_info.username.as_deref(), Some("jane"));
    }
}
