use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use common::{Bar, Error, LookbackPeriod, MarketDataProvider, PriceSeries, Result};

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Daily bars from the public Yahoo Finance chart endpoint.
pub struct YahooFinanceClient {
    http: Client,
}

impl YahooFinanceClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: super::http_client(timeout)?,
        })
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceClient {
    async fn price_history(&self, symbol: &str, lookback: LookbackPeriod) -> Result<PriceSeries> {
        let url = format!("{BASE_URL}/{symbol}");
        debug!(symbol = %symbol, range = %lookback, "Fetching price history");

        let resp = self
            .http
            .get(&url)
            .query(&[("range", lookback.as_str()), ("interval", "1d")])
            .send()
            .await
            .map_err(|e| Error::data_unavailable(symbol, e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::data_unavailable(symbol, e.to_string()))?;

        if !status.is_success() {
            // Yahoo reports unknown symbols as 404 with a chart.error payload
            return Err(match parse_chart(symbol, &body) {
                Err(e @ Error::DataUnavailable { .. }) => e,
                _ => Error::data_unavailable(symbol, format!("HTTP {status}")),
            });
        }

        parse_chart(symbol, &body)
    }
}

/// Convert a chart response body into a price series. Bars without a close
/// are dropped; missing open/high/low fall back to the close.
fn parse_chart(symbol: &str, body: &str) -> Result<PriceSeries> {
    let resp: ChartResponse = serde_json::from_str(body)?;

    if let Some(err) = resp.chart.error {
        return Err(Error::data_unavailable(
            symbol,
            format!("{}: {}", err.code, err.description),
        ));
    }

    let result = resp
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| Error::data_unavailable(symbol, "empty chart result"))?;

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let bars: Vec<Bar> = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let close = field(&quote.close, i)?;
            Some(Bar {
                timestamp: DateTime::<Utc>::from_timestamp(ts, 0)?,
                open: field(&quote.open, i).unwrap_or(close),
                high: field(&quote.high, i).unwrap_or(close),
                low: field(&quote.low, i).unwrap_or(close),
                close,
                volume: field(&quote.volume, i).unwrap_or(0.0),
            })
        })
        .collect();

    if bars.is_empty() {
        return Err(Error::data_unavailable(symbol, "no bars returned"));
    }
    Ok(PriceSeries::new(symbol, bars))
}

fn field(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten()
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Deserialize, Default)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}
