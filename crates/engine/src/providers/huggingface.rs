use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use common::{Error, Result, SentimentClassifier, SentimentLabel};

const BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Text classification through the Hugging Face Inference API.
///
/// Named labels (`POSITIVE`, `neg`, `neutral`, ...) are mapped directly.
/// Generic `LABEL_n` ids depend on how many labels the model returns: with
/// two, `LABEL_0`/`LABEL_1` are negative/positive; with three,
/// `LABEL_0`/`LABEL_1`/`LABEL_2` are negative/neutral/positive.
pub struct HuggingFaceClassifier {
    model: String,
    token: Option<String>,
    http: Client,
}

impl HuggingFaceClassifier {
    pub fn new(model: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            model: model.into(),
            token,
            http: super::http_client(timeout)?,
        })
    }
}

#[async_trait]
impl SentimentClassifier for HuggingFaceClassifier {
    async fn classify(&self, text: &str) -> Result<SentimentLabel> {
        let url = format!("{BASE_URL}/{}", self.model);

        let mut req = self.http.post(&url).json(&json!({ "inputs": text }));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| Error::SentimentUnavailable(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::SentimentUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::SentimentUnavailable(format!("HTTP {status}: {body}")));
        }

        let label = parse_classification(&body)?;
        debug!(model = %self.model, label = %label, "Headline classified");
        Ok(label)
    }
}

/// Pick the highest-scoring label from an inference response.
fn parse_classification(body: &str) -> Result<SentimentLabel> {
    let resp: ClassificationResponse =
        serde_json::from_str(body).map_err(|e| Error::SentimentUnavailable(e.to_string()))?;

    let scores = match resp {
        ClassificationResponse::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
        ClassificationResponse::Flat(scores) => scores,
    };

    let label_count = scores.len();
    let best = scores
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| Error::SentimentUnavailable("classifier returned no labels".into()))?;

    map_label(&best.label, label_count)
}

fn map_label(label: &str, label_count: usize) -> Result<SentimentLabel> {
    match (label.trim().to_lowercase().as_str(), label_count) {
        ("pos", _) => Ok(SentimentLabel::Positive),
        ("neg", _) => Ok(SentimentLabel::Negative),
        ("neu", _) => Ok(SentimentLabel::Neutral),
        ("label_0", 2 | 3) => Ok(SentimentLabel::Negative),
        ("label_1", 2) | ("label_2", 3) => Ok(SentimentLabel::Positive),
        ("label_1", 3) => Ok(SentimentLabel::Neutral),
        (other, n) if other.starts_with("label_") => Err(Error::SentimentUnavailable(format!(
            "cannot map {other} from a {n}-label model"
        ))),
        (other, _) => other.parse(),
    }
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

#[derive(Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_highest_score_from_nested_response() {
        let body = r#"[[{"label":"NEGATIVE","score":0.12},{"label":"POSITIVE","score":0.88}]]"#;
        assert_eq!(parse_classification(body).unwrap(), SentimentLabel::Positive);
    }

    #[test]
    fn accepts_flat_response() {
        let body = r#"[{"label":"NEGATIVE","score":0.97},{"label":"POSITIVE","score":0.03}]"#;
        assert_eq!(parse_classification(body).unwrap(), SentimentLabel::Negative);
    }

    #[test]
    fn maps_three_class_labels() {
        let body = r#"[[{"label":"LABEL_0","score":0.1},{"label":"LABEL_1","score":0.7},{"label":"LABEL_2","score":0.2}]]"#;
        assert_eq!(parse_classification(body).unwrap(), SentimentLabel::Neutral);
        assert_eq!(map_label("LABEL_2", 3).unwrap(), SentimentLabel::Positive);
        assert_eq!(map_label("neutral", 3).unwrap(), SentimentLabel::Neutral);
    }

    #[test]
    fn two_class_label_ids_map_to_negative_and_positive() {
        let body = r#"[[{"label":"LABEL_1","score":0.93},{"label":"LABEL_0","score":0.07}]]"#;
        assert_eq!(parse_classification(body).unwrap(), SentimentLabel::Positive);

        let body = r#"[{"label":"LABEL_0","score":0.81},{"label":"LABEL_1","score":0.19}]"#;
        assert_eq!(parse_classification(body).unwrap(), SentimentLabel::Negative);
    }

    #[test]
    fn label_id_outside_known_layouts_is_an_error() {
        assert!(map_label("LABEL_2", 2).is_err());
        assert!(map_label("LABEL_0", 5).is_err());
    }

    #[test]
    fn unknown_label_is_an_error() {
        assert!(map_label("joy", 2).is_err());
    }

    #[test]
    fn error_payload_is_sentiment_unavailable() {
        let body = r#"{"error":"Model is currently loading","estimated_time":20.0}"#;
        assert!(matches!(
            parse_classification(body),
            Err(Error::SentimentUnavailable(_))
        ));
    }

    #[test]
    fn empty_scores_is_an_error() {
        assert!(parse_classification("[[]]").is_err());
    }
}
