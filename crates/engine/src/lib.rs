pub mod orchestrator;
pub mod providers;

pub use orchestrator::AlertOrchestrator;
pub use providers::{HuggingFaceClassifier, NewsApiClient, YahooFinanceClient};
