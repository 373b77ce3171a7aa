// Canned scanner API shared by the cli layer tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::core::scanner::{
    BlockRequest, ModerateRequest, ScanRequest, ScannerApi, ScannerError, ScannerService,
};

pub type Hits = Arc<Mutex<Vec<String>>>;

/// Records which endpoints were hit. Scans answer with `body`, or every call
/// fails with `status` when one is set.
pub struct CannedApi {
    body: serde_json::Value,
    status: Option<u16>,
    error_body: String,
    hits: Hits,
}

impl CannedApi {
    fn record(&self, hit: String) -> Result<(), ScannerError> {
        self.hits.lock().unwrap().push(hit);
        match self.status {
            Some(status) => Err(ScannerError::Remote {
                status,
                body: self.error_body.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ScannerApi for CannedApi {
    async fn scan(
        &self,
        _token: &str,
        request: &ScanRequest,
    ) -> Result<serde_json::Value, ScannerError> {
        self.record(format!("scan {} {}", request.platform, request.username))?;
        Ok(self.body.clone())
    }

    async fn moderate(&self, _token: &str, request: &ModerateRequest) -> Result<(), ScannerError> {
        self.record(format!("moderate {} {}", request.platform, request.username))
    }

    async fn block(&self, _token: &str, request: &BlockRequest) -> Result<(), ScannerError> {
        self.record(format!("block {} {}", request.platform, request.username))
    }
}

fn build(
    body: serde_json::Value,
    status: Option<u16>,
    error_body: &str,
    token: Option<&str>,
) -> (ScannerService<CannedApi>, Hits) {
    let hits = Hits::default();
    let api = CannedApi {
        body,
        status,
        error_body: error_body.to_string(),
        hits: Arc::clone(&hits),
    };
    (ScannerService::new(api, token.map(str::to_string)), hits)
}

pub fn canned(body: serde_json::Value, token: Option<&str>) -> (ScannerService<CannedApi>, Hits) {
    build(body, None, "", token)
}

pub fn failing(status: u16, body: &str, token: Option<&str>) -> (ScannerService<CannedApi>, Hits) {
    build(serde_json::Value::Null, Some(status), body, token)
}

pub fn hits(hits: &Hits) -> Vec<String> {
    hits.lock().unwrap().clone()
}
