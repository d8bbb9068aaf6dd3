pub mod huggingface;
pub mod newsapi;
pub mod yahoo;

use std::time::Duration;

use reqwest::Client;

use common::{Error, Result};

pub use huggingface::HuggingFaceClassifier;
pub use newsapi::NewsApiClient;
pub use yahoo::YahooFinanceClient;

const USER_AGENT: &str = concat!("market-sentinel/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client setup. `timeout` applies to each whole request.
fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .use_rustls_tls()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Http(e.to_string()))
}
