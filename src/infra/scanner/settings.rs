// Scanner settings - where the bearer token and endpoint come from.
//
// Each key is looked up in the process environment first (main loads `.env`
// into it), then in a flat secrets TOML file. A missing secrets file is fine.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::core::scanner::ScannerError;
use crate::infra::scanner::scanner_client::DEFAULT_BASE_URL;

pub const DEFAULT_SECRETS_PATH: &str = ".streamlit/secrets.toml";

const TOKEN_KEY: &str = "BEARER_TOKEN";
const BASE_URL_KEY: &str = "SCANNER_BASE_URL";
const TIMEOUT_KEY: &str = "SCANNER_TIMEOUT_SECS";

#[derive(Clone, PartialEq)]
pub struct ScannerSettings {
    pub bearer_token: Option<String>,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

// Keep the token out of debug output and logs.
impl std::fmt::Debug for ScannerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScannerSettings")
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ScannerSettings {
    /// Load settings from the environment and the secrets file at `secrets_path`.
    pub fn load(secrets_path: &Path) -> Result<Self, ScannerError> {
        let secrets = read_secrets(secrets_path)?;
        Self::resolve(|key| std::env::var(key).ok(), &secrets)
    }

    fn resolve(
        env: impl Fn(&str) -> Option<String>,
        secrets: &HashMap<String, String>,
    ) -> Result<Self, ScannerError> {
        let lookup = |key: &str| {
            env(key)
                .or_else(|| secrets.get(key).cloned())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let timeout = match lookup(TIMEOUT_KEY) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ScannerError::Config(format!(
                        "{} must be a positive number of seconds, got '{}'",
                        TIMEOUT_KEY, raw
                    )))
                }
            },
            None => None,
        };

        Ok(Self {
            bearer_token: lookup(TOKEN_KEY),
            base_url: lookup(BASE_URL_KEY).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout,
        })
    }
}

/// Read a flat `KEY = value` TOML table. Non-string scalars are stringified.
fn read_secrets(path: &Path) -> Result<HashMap<String, String>, ScannerError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No secrets file at {}", path.display());
            return Ok(HashMap::new());
        }
        Err(e) => {
            return Err(ScannerError::Config(format!(
                "Failed to read secrets file {}: {}",
                path.display(),
                e
            )))
        }
    };

    let table: toml::Table = content.parse().map_err(|e| {
        ScannerError::Config(format!(
            "Failed to parse secrets file {}: {}",
            path.display(),
            e
        ))
    })?;

    Ok(table
        .into_iter()
        .filter_map(|(key, value)| match value {
            toml::Value::String(s) => Some((key, s)),
            toml::Value::Integer(i) => Some((key, i.to_string())),
            toml::Value::Boolean(b) => Some((key, b.to_string())),
            _ => None,
        })
        .collect())
}
