use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use common::{AnalysisResult, Config};
use engine::{AlertOrchestrator, HuggingFaceClassifier, NewsApiClient, YahooFinanceClient};
use signals::AnalyzerConfig;

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    let analyzer_cfg = load_analyzer_config(&cfg.analyzer_config_path);

    // ── Collaborators ─────────────────────────────────────────────────────────
    let market = YahooFinanceClient::new(cfg.http_timeout)
        .unwrap_or_else(|e| panic!("Failed to build market data client: {e}"));
    let news = NewsApiClient::new(&cfg.news_api_key, cfg.http_timeout)
        .unwrap_or_else(|e| panic!("Failed to build news client: {e}"));
    let classifier = HuggingFaceClassifier::new(
        &cfg.sentiment_model,
        cfg.hf_api_token.clone(),
        cfg.http_timeout,
    )
    .unwrap_or_else(|e| panic!("Failed to build sentiment classifier: {e}"));
    if cfg.hf_api_token.is_none() {
        warn!("HF_API_TOKEN not set — sentiment requests are anonymous and rate-limited");
    }

    let orchestrator = AlertOrchestrator::new(
        analyzer_cfg,
        Arc::new(market),
        Arc::new(news),
        Arc::new(classifier),
    )
    .unwrap_or_else(|e| panic!("Invalid analyzer configuration: {e}"));

    let active = orchestrator.config();
    info!(
        symbols = ?active.symbols,
        lookback = %active.lookback,
        sma_periods = ?active.sma_periods,
        "Market Sentinel starting"
    );

    // ── Run ───────────────────────────────────────────────────────────────────
    let Some(period) = cfg.run_interval else {
        report(&orchestrator.run().await);
        return;
    };

    info!(interval_secs = period.as_secs(), "Running on an interval. Ctrl-C to stop.");
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Could not listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    orchestrator.run_every(period, shutdown, report).await;
}

/// Settings file if present, defaults otherwise. Panics on a file that
/// exists but does not parse or validate.
fn load_analyzer_config(path: &str) -> AnalyzerConfig {
    if !Path::new(path).exists() {
        info!(path = %path, "No analyzer config file — using defaults");
        return AnalyzerConfig::default();
    }
    AnalyzerConfig::load(path)
        .unwrap_or_else(|e| panic!("Failed to load analyzer config at '{path}': {e}"))
}

fn report(result: &AnalysisResult) {
    if result.is_empty() {
        info!("No alerts generated");
        return;
    }
    info!(count = result.len(), "Alerts generated:");
    for alert in &result.alerts {
        info!(category = %alert.category, "- {alert}");
    }
}
