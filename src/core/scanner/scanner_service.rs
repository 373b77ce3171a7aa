// Scanner service - validates operator input and drives the remote API.
//
// This service handles:
// - Input validation (username, customer)
// - Token resolution (missing token is fatal to the action only)
// - Typed parsing of scan results
// - The manual block override after a scan
//
// NO HTTP or terminal dependencies here - the API is reached through a port.

use super::presentation::RiskBanner;
use super::scanner_models::{
    BlockRequest, Customer, ModerateRequest, Platform, ScanReport, ScanRequest, ScanResponse,
};
use async_trait::async_trait;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ScannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Input(String),

    #[error("API Error: {status}\n{body}")]
    Remote { status: u16, body: String },

    #[error("An error occurred: {0}")]
    Transport(String),
}

// ============================================================================
// API TRAIT (PORT)
// ============================================================================

/// The remote scanning service.
///
/// Implementations return `Remote` for any status other than 200 and
/// `Transport` for network or decoding failures.
#[async_trait]
pub trait ScannerApi: Send + Sync {
    /// `POST /scan`. Returns the response body as untyped JSON.
    async fn scan(
        &self,
        token: &str,
        request: &ScanRequest,
    ) -> Result<serde_json::Value, ScannerError>;

    /// `GET /moderate/{platform}/{username}`. The body is ignored.
    async fn moderate(&self, token: &str, request: &ModerateRequest) -> Result<(), ScannerError>;

    /// `POST /block`. The body is ignored.
    async fn block(&self, token: &str, request: &BlockRequest) -> Result<(), ScannerError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

pub struct ScannerService<A: ScannerApi> {
    api: A,
    token: Option<String>,
}

impl<A: ScannerApi> ScannerService<A> {
    pub fn new(api: A, token: Option<String>) -> Self {
        Self { api, token }
    }

    fn token(&self) -> Result<&str, ScannerError> {
        self.token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ScannerError::Config("Missing 'BEARER_TOKEN' in secrets.".to_string()))
    }

    fn require_username(username: &str) -> Result<&str, ScannerError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ScannerError::Input("Please enter a username.".to_string()));
        }
        Ok(username)
    }

    /// Validate the scan form and build the request body. Fails before any
    /// network traffic on a blank handle, unknown customer or missing token.
    pub fn prepare_scan(
        &self,
        username: &str,
        platform: Platform,
        customer: &str,
    ) -> Result<ScanRequest, ScannerError> {
        let username = Self::require_username(username)?;
        let customer = Customer::lookup(customer)
            .ok_or_else(|| ScannerError::Input(format!("Unknown customer: {}", customer)))?;
        self.token()?;

        Ok(ScanRequest::new(customer, username, platform))
    }

    /// Send a prepared scan and parse the verdict.
    pub async fn submit_scan(&self, request: ScanRequest) -> Result<ScanReport, ScannerError> {
        let token = self.token()?;
        tracing::info!(
            username = %request.username,
            platform = %request.platform,
            customer = %request.client_handle,
            "Scanning profile"
        );

        let raw = self.api.scan(token, &request).await?;
        let response: ScanResponse = serde_json::from_value(raw.clone())
            .map_err(|e| ScannerError::Transport(format!("Malformed scan response: {}", e)))?;

        tracing::debug!(
            risk_level = %response.visual_analysis.risk_level(),
            red_flags = response.visual_analysis.key_red_flags.len(),
            "Scan completed"
        );

        Ok(ScanReport {
            request,
            response,
            raw,
            scanned_at: chrono::Utc::now(),
        })
    }

    /// Ask the service to run moderation again for a user.
    pub async fn moderate(&self, username: &str, platform: Platform) -> Result<(), ScannerError> {
        let username = Self::require_username(username)?;
        let token = self.token()?;

        let request = ModerateRequest {
            platform,
            username: username.to_string(),
        };
        tracing::info!(username = %request.username, platform = %platform, "Triggering remoderation");
        self.api.moderate(token, &request).await
    }

    /// Hard-block a user on the service.
    pub async fn block(&self, username: &str, platform: Platform) -> Result<(), ScannerError> {
        let username = Self::require_username(username)?;
        let token = self.token()?;

        let request = BlockRequest {
            username: username.to_string(),
            platform,
        };
        tracing::info!(username = %request.username, platform = %platform, "Blocking user");
        self.api.block(token, &request).await
    }

    /// Block the user from a finished scan, unless the verdict already covers it.
    pub async fn override_block(&self, report: &ScanReport) -> Result<(), ScannerError> {
        let banner = RiskBanner::for_response(&report.response);
        if !banner.allows_override() {
            return Err(ScannerError::Input(format!(
                "Override is not available: {}",
                banner.message()
            )));
        }
        self.block(&report.request.username, report.request.platform)
            .await
    }
}

// ============================================================================
// TESTS
// ============================================================================
