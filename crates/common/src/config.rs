use std::time::Duration;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_SENTIMENT_MODEL: &str = "distilbert/distilbert-base-uncased-finetuned-sst-2-english";

/// Process configuration loaded from environment variables at startup.
/// Missing required variables cause an immediate panic with a clear message.
#[derive(Debug, Clone)]
pub struct Config {
    // News
    pub news_api_key: String,

    // Sentiment classifier
    pub hf_api_token: Option<String>,
    pub sentiment_model: String,

    // Analyzer settings file (thresholds, periods, watchlist)
    pub analyzer_config_path: String,

    /// `None` runs the watchlist once and exits.
    pub run_interval: Option<Duration>,
    pub http_timeout: Duration,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present. Panics on any missing required variable.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        let run_interval = optional_env("RUN_INTERVAL_SECS").map(|v| {
            let secs = v.trim().parse::<u64>().unwrap_or_else(|_| {
                panic!("RUN_INTERVAL_SECS must be a whole number of seconds, got: '{v}'")
            });
            Duration::from_secs(secs.max(1))
        });

        Config {
            news_api_key: required_env("NEWS_API_KEY"),
            hf_api_token: optional_env("HF_API_TOKEN").filter(|t| !t.trim().is_empty()),
            sentiment_model: optional_env("SENTIMENT_MODEL")
                .unwrap_or_else(|| DEFAULT_SENTIMENT_MODEL.to_string()),
            analyzer_config_path: optional_env("ANALYZER_CONFIG_PATH")
                .unwrap_or_else(|| "config/analyzer.toml".to_string()),
            run_interval,
            http_timeout: http_timeout(optional_env("HTTP_TIMEOUT_SECS").as_deref()),
        }
    }
}

/// Defaults to 10s on a missing or unparsable value; never below 1s.
fn http_timeout(raw: Option<&str>) -> Duration {
    let secs = raw
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
    Duration::from_secs(secs.max(1))
}

fn required_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        panic!("Required environment variable '{key}' is not set. Check your .env file.")
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
