use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use std::time::Duration;

use crate::core::scanner::{BlockRequest, ModerateRequest, ScanRequest, ScannerApi, ScannerError};

pub const DEFAULT_BASE_URL: &str = "https://social-profile-scanner-prod.gobubble.cc/";

/// HTTP client for the social profile scanning service.
pub struct HttpScannerClient {
    client: Client,
    base_url: Url,
}

impl HttpScannerClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ScannerError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ScannerError::Config(format!("Invalid scanner base URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ScannerError::Config(format!(
                "Invalid scanner base URL: {}",
                base_url
            )));
        }

        let mut builder = Client::builder().user_agent("ProfileScanner/0.2");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ScannerError::Config(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Append path segments to the base URL. Each segment is percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn moderate_url(&self, request: &ModerateRequest) -> Url {
        self.endpoint(&["moderate", request.platform.as_str(), request.username.as_str()])
    }

    /// Anything but 200 becomes a `Remote` error carrying the body verbatim.
    async fn expect_ok(response: Response) -> Result<Response, ScannerError> {
        let status = response.status();
        tracing::debug!(status = status.as_u16(), url = %response.url(), "Scanner responded");

        if status == StatusCode::OK {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScannerError::Transport(e.to_string()))?;
        tracing::warn!(status = status.as_u16(), "Scanner API returned an error");
        Err(ScannerError::Remote {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ScannerApi for HttpScannerClient {
    async fn scan(
        &self,
        token: &str,
        request: &ScanRequest,
    ) -> Result<serde_json::Value, ScannerError> {
        let response = self
            .client
            .post(self.endpoint(&["scan"]))
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(|e| ScannerError::Transport(e.to_string()))?;

        let response = Self::expect_ok(response).await?;
        response
            .json()
            .await
            .map_err(|e| ScannerError::Transport(e.to_string()))
    }

    async fn moderate(&self, token: &str, request: &ModerateRequest) -> Result<(), ScannerError> {
        let response = self
            .client
            .get(self.moderate_url(request))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ScannerError::Transport(e.to_string()))?;

        Self::expect_ok(response).await.map(|_| ())
    }

    async fn block(&self, token: &str, request: &BlockRequest) -> Result<(), ScannerError> {
        let response = self
            .client
            .post(self.endpoint(&["block"]))
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(|e| ScannerError::Transport(e.to_string()))?;

        Self::expect_ok(response).await.map(|_| ())
    }
}
