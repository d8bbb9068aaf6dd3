use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use common::{Error, NewsProvider, Result};

const BASE_URL: &str = "https://newsapi.org/v2/everything";
/// NewsAPI rejects larger page sizes.
const MAX_PAGE_SIZE: usize = 100;

/// Recent English-language headlines from NewsAPI, newest first.
pub struct NewsApiClient {
    api_key: String,
    http: Client,
}

impl NewsApiClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            http: super::http_client(timeout)?,
        })
    }
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    async fn headlines(&self, symbol: &str, limit: usize) -> Result<Vec<String>> {
        let page_size = limit.clamp(1, MAX_PAGE_SIZE).to_string();
        debug!(symbol = %symbol, page_size = %page_size, "Fetching headlines");

        let resp = self
            .http
            .get(BASE_URL)
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("q", symbol),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::SentimentUnavailable(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::SentimentUnavailable(e.to_string()))?;

        // Error responses carry {"status":"error","message":...}, which
        // parse_titles reports; fall back to the bare status otherwise.
        match parse_titles(&body, limit) {
            Ok(titles) if status.is_success() => Ok(titles),
            Ok(_) => Err(Error::SentimentUnavailable(format!("HTTP {status}"))),
            Err(e) => Err(e),
        }
    }
}

/// Article titles from a response body, null titles as empty strings.
fn parse_titles(body: &str, limit: usize) -> Result<Vec<String>> {
    let resp: NewsResponse =
        serde_json::from_str(body).map_err(|e| Error::SentimentUnavailable(e.to_string()))?;

    let articles = resp.articles.ok_or_else(|| {
        Error::SentimentUnavailable(
            resp.message
                .unwrap_or_else(|| "response has no articles".to_string()),
        )
    })?;

    Ok(articles
        .into_iter()
        .take(limit)
        .map(|a| a.title.unwrap_or_default())
        .collect())
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NewsResponse {
    articles: Option<Vec<Article>>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct Article {
    title: Option<String>,
}
