//! Keyword and phrase-pattern classification strategy
//!
//! The dependency-light baseline: scores both lexicons, applies the
//! strict-win rule, and derives confidence from match counts. Also hosts
//! the preview/debug entry point that surfaces raw scoring evidence.

use crate::classifier::{
    validate_message, CategoryDistribution, ClassificationResult, Classifier,
};
use crate::scoring::{MessageScores, ScoringEngine};
use async_trait::async_trait;
use mailroom_core::{Category, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Combined score at which confidence saturates at 1.0
const CONFIDENCE_SATURATION: f32 = 3.0;

/// Confidence reported when neither side wins
const TIE_CONFIDENCE: f32 = 0.5;

/// Maximum characters shown in a details preview
const PREVIEW_CHARS: usize = 100;

/// Minimum trimmed length accepted by the preview entry point
const MIN_PREVIEW_CHARS: usize = 5;

/// Lexicon-driven classifier over sales/support keywords and phrases
pub struct KeywordClassifier {
    name: String,
    engine: ScoringEngine,
}

impl KeywordClassifier {
    /// Create a new keyword classifier with the default lexicons
    pub fn new() -> Result<Self> {
        Ok(Self {
            name: "keyword-based".to_string(),
            engine: ScoringEngine::new()?,
        })
    }

    fn resolve(&self, scores: &MessageScores) -> ClassificationResult {
        let category = scores.decide();
        let total = scores.total();

        let probabilities = if total > 0 {
            // Score ratios; `other` carries no score of its own
            CategoryDistribution::new(
                scores.sales.score() as f32 / total as f32,
                scores.support.score() as f32 / total as f32,
                0.0,
            )
        } else {
            CategoryDistribution::zero_match_fallback()
        };

        let (confidence, matched) = match category {
            Category::Sales => (
                (scores.sales.score() as f32 / CONFIDENCE_SATURATION).min(1.0),
                scores.sales.matched_terms(),
            ),
            Category::Support => (
                (scores.support.score() as f32 / CONFIDENCE_SATURATION).min(1.0),
                scores.support.matched_terms(),
            ),
            Category::Other => (TIE_CONFIDENCE, Vec::new()),
        };

        ClassificationResult::new(category, confidence, probabilities).with_keywords(matched)
    }

    /// Debug view of the scoring evidence, persisting nothing
    ///
    /// Reports both sides' keyword matches regardless of the winner, plus
    /// the category the full strict-win rule (patterns included) resolves
    /// to.
    pub fn classification_details(&self, message: &str) -> Result<ClassificationDetails> {
        if message.trim().chars().count() < MIN_PREVIEW_CHARS {
            return Err(Error::invalid_input(format!(
                "preview message must be at least {MIN_PREVIEW_CHARS} characters"
            )));
        }

        let scores = self.engine.score(message);
        Ok(ClassificationDetails {
            message_preview: preview(message),
            sales_matches: scores.sales.keywords.clone(),
            support_matches: scores.support.keywords.clone(),
            final_category: scores.decide(),
        })
    }
}

/// Scoring evidence surfaced by the preview/debug entry point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationDetails {
    /// Leading characters of the message, ellipsis-marked when truncated
    pub message_preview: String,

    /// Sales keywords present in the message
    pub sales_matches: Vec<String>,

    /// Support keywords present in the message
    pub support_matches: Vec<String>,

    /// Category the scoring rule resolves to
    pub final_category: Category,
}

/// First `PREVIEW_CHARS` characters, with an ellipsis marker when longer
///
/// Counted in characters so a multi-byte message is never split mid-char.
fn preview(message: &str) -> String {
    let mut chars = message.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[async_trait]
impl Classifier for KeywordClassifier {
    async fn classify(&self, message: &str) -> Result<ClassificationResult> {
        validate_message(message)?;

        let scores = self.engine.score(message);
        let result = self.resolve(&scores);

        debug!(
            strategy = %self.name,
            category = %result.category,
            confidence = result.confidence,
            "classified message"
        );

        Ok(result)
    }

    async fn train(&mut self, messages: &[String], labels: &[Category]) -> Result<()> {
        if messages.len() != labels.len() {
            return Err(Error::insufficient_data(format!(
                "messages and labels differ in length: {} vs {}",
                messages.len(),
                labels.len()
            )));
        }

        info!(
            strategy = %self.name,
            examples = messages.len(),
            "lexicons are static; training request ignored"
        );
        Ok(())
    }

    fn is_trained(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }
}
