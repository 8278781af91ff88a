use serde::{Deserialize, Serialize};

use crate::intent::{Intent, classify_intent};
use crate::sentiment::{Sentiment, SentimentPredictor};

/// One analyzed review. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub text: String,
    pub sentiment: Sentiment,
    pub intent: Intent,
}

impl ReviewRecord {
    pub fn new(text: impl Into<String>, sentiment: Sentiment, intent: Intent) -> Self {
        Self {
            text: text.into(),
            sentiment,
            intent,
        }
    }

    /// Run the sentiment model and the intent rule over `text`.
    pub fn analyze(text: &str, predictor: &SentimentPredictor) -> Self {
        Self::new(
            text,
            predictor.predict_sentiment(text),
            classify_intent(text),
        )
    }
}
