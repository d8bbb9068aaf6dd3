use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Price data unavailable for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    #[error("Indicator computation failed: {0}")]
    IndicatorCompute(String),

    #[error("Sentiment unavailable: {0}")]
    SentimentUnavailable(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn data_unavailable(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::DataUnavailable {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
