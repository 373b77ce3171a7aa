// Scanner infra layer.
// - `scanner_client.rs` talks to the scanning service over HTTPS.
// - `settings.rs` resolves the token and endpoint from env and secrets file.

#[path = "scanner_client.rs"]
pub mod scanner_client;

#[path = "settings.rs"]
pub mod settings;

pub use scanner_client::HttpScannerClient;
pub use settings::ScannerSettings;
