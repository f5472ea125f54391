//! Zero-shot strategy
//!
//! Scores a message against one natural-language hypothesis per category
//! and reports the top-ranked label. The entailment model is a lexical
//! proxy: each hypothesis expands to a term set and entailment strength is
//! the share of terms the message covers, softmaxed across labels.
//!
//! Confidence is the model's true top score. An earlier incarnation of the
//! intake system pinned zero-shot confidence to a constant instead; that
//! behavior is intentionally not reproduced.

use crate::classifier::{
    validate_message, CategoryDistribution, ClassificationResult, Classifier,
};
use crate::features::content_bearing_tokens;
use async_trait::async_trait;
use mailroom_core::{Category, Error, Result};
use tracing::{debug, info};

/// Hypothesis sentence rendered per candidate label
const HYPOTHESIS_TEMPLATE: &str = "Este mensaje trata sobre {}.";

/// Candidate label descriptions fed into the hypothesis template
const LABEL_DESCRIPTIONS: &[(Category, &str)] = &[
    (Category::Sales, "ventas, compras, precios, cotizaciones"),
    (Category::Support, "soporte técnico, problemas, errores, ayuda"),
    (Category::Other, "información general, otros temas"),
];

/// Sharpening applied to raw overlap scores before the softmax
const SCORE_SCALE: f32 = 4.0;

/// Minimum shared prefix for an inflection match
const MIN_STEM_CHARS: usize = 4;

/// Cap on reported matched terms
const MAX_KEYWORDS: usize = 5;

/// One candidate label: rendered hypothesis plus its term set
struct Hypothesis {
    category: Category,
    statement: String,
    terms: Vec<String>,
}

impl Hypothesis {
    fn build(category: Category, description: &str) -> Self {
        let terms = description
            .split([',', ' '])
            .map(str::trim)
            .filter(|t| t.chars().count() >= 2)
            .map(str::to_string)
            .collect();
        Self {
            category,
            statement: HYPOTHESIS_TEMPLATE.replace("{}", description),
            terms,
        }
    }

    /// Distinct hypothesis terms covered by the message tokens
    fn matched_terms(&self, tokens: &[String]) -> Vec<String> {
        self.terms
            .iter()
            .filter(|term| tokens.iter().any(|token| term_matches(token, term)))
            .cloned()
            .collect()
    }
}

/// Exact or prefix match with enough shared stem to cover inflection
/// ("precio" hits "precios", "errores" hits "error")
fn term_matches(token: &str, term: &str) -> bool {
    if token == term {
        return true;
    }
    let shorter = token.chars().count().min(term.chars().count());
    if shorter < MIN_STEM_CHARS {
        return false;
    }
    token.starts_with(term) || term.starts_with(token)
}

/// Pretrained-style classifier needing no training step
pub struct ZeroShotClassifier {
    name: String,
    hypotheses: Vec<Hypothesis>,
}

impl ZeroShotClassifier {
    /// Build the classifier with the default candidate labels
    pub fn new() -> Result<Self> {
        Ok(Self {
            name: "zero-shot".to_string(),
            hypotheses: LABEL_DESCRIPTIONS
                .iter()
                .map(|(category, description)| Hypothesis::build(*category, description))
                .collect(),
        })
    }
}

#[async_trait]
impl Classifier for ZeroShotClassifier {
    async fn classify(&self, message: &str) -> Result<ClassificationResult> {
        validate_message(message)?;

        let tokens = content_bearing_tokens(message);
        let matched: Vec<Vec<String>> = self
            .hypotheses
            .iter()
            .map(|h| h.matched_terms(&tokens))
            .collect();
        let raw: Vec<f32> = self
            .hypotheses
            .iter()
            .zip(&matched)
            .map(|(h, m)| m.len() as f32 / h.terms.len() as f32)
            .collect();

        let exp: Vec<f32> = raw.iter().map(|r| (r * SCORE_SCALE).exp()).collect();
        let total: f32 = exp.iter().sum();
        let scores: Vec<f32> = exp.into_iter().map(|e| e / total).collect();

        let mut distribution = CategoryDistribution::new(0.0, 0.0, 0.0);
        for (hypothesis, score) in self.hypotheses.iter().zip(&scores) {
            distribution.set(hypothesis.category, *score);
        }

        // No overlap anywhere means no label is entailed; that is `other`
        // by definition, not the argmax of a flat softmax
        let best = if raw.iter().all(|r| *r == 0.0) {
            self.hypotheses
                .iter()
                .position(|h| h.category == Category::Other)
                .unwrap_or(0)
        } else {
            let mut best = 0;
            for (index, score) in scores.iter().enumerate() {
                if *score > scores[best] {
                    best = index;
                }
            }
            best
        };

        let mut keywords = matched[best].clone();
        keywords.truncate(MAX_KEYWORDS);

        let result = ClassificationResult::new(
            self.hypotheses[best].category,
            scores[best],
            distribution,
        )
        .with_keywords(keywords);

        debug!(
            strategy = %self.name,
            category = %result.category,
            confidence = result.confidence,
            hypothesis = %self.hypotheses[best].statement,
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
            "model is pretrained; training request ignored"
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

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> ZeroShotClassifier {
        ZeroShotClassifier::new().unwrap()
    }

    #[tokio::test]
    async fn pricing_message_entails_sales() {
        let result = classifier()
            .classify("¿Cuál es el precio? quiero hacer una compra")
            .await
            .unwrap();
        assert_eq!(result.category, Category::Sales);
        assert!(result.matched_keywords.contains(&"precios".to_string()));
    }

    #[tokio::test]
    async fn support_terms_entail_support() {
        let result = classifier()
            .classify("Tengo problemas y errores, necesito ayuda del soporte técnico")
            .await
            .unwrap();
        assert_eq!(result.category, Category::Support);
        assert!(result.confidence > 0.8);
    }

    #[tokio::test]
    async fn no_overlap_resolves_to_other() {
        let result = classifier().classify("Hola, buen día").await.unwrap();
        assert_eq!(result.category, Category::Other);
        assert!(result.matched_keywords.is_empty());
        assert!((result.probabilities.sum() - 1.0).abs() < 1e-4);
    }

    #[tokio::test]
    async fn confidence_is_the_true_top_score() {
        let result = classifier()
            .classify("quisiera una cotización de precios")
            .await
            .unwrap();
        assert_eq!(result.confidence, result.probabilities.get(result.category));
        // never the historical hardcoded constant
        assert!((result.confidence - 0.85).abs() > 1e-3);
    }

    #[tokio::test]
    async fn inflected_tokens_still_match() {
        let result = classifier()
            .classify("hubo muchos errores con el pago")
            .await
            .unwrap();
        assert_eq!(result.category, Category::Support);
        assert!(result.matched_keywords.contains(&"errores".to_string()));
    }

    #[tokio::test]
    async fn scores_sum_to_one() {
        let result = classifier()
            .classify("necesito información general")
            .await
            .unwrap();
        assert!((result.probabilities.sum() - 1.0).abs() < 1e-4);
    }

    #[tokio::test]
    async fn train_is_a_noop() {
        let mut classifier = classifier();
        assert!(classifier.is_trained());
        let messages = vec!["hola".to_string()];
        let labels = vec![Category::Other];
        classifier.train(&messages, &labels).await.unwrap();
        assert!(classifier.is_trained());
    }

    #[tokio::test]
    async fn blank_message_is_invalid_input() {
        let err = classifier().classify("\t").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
