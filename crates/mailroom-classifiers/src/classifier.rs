//! Classifier trait and common result types

use async_trait::async_trait;
use mailroom_core::{Category, Error, Result};
use serde::{Deserialize, Serialize};

/// Trait for all classification strategies
///
/// Strategies hold their model state immutably between trainings, so a
/// single instance may serve concurrent `classify` calls. `train` takes
/// `&mut self`, which enforces the single-writer discipline at compile
/// time.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify the given message text
    async fn classify(&self, message: &str) -> Result<ClassificationResult>;

    /// Replace internal model state with one trained on the given examples
    ///
    /// `messages` and `labels` must have equal lengths; strategies may
    /// additionally require a minimum sample count.
    async fn train(&mut self, messages: &[String], labels: &[Category]) -> Result<()>;

    /// Whether this strategy currently holds a usable model
    fn is_trained(&self) -> bool;

    /// Get the strategy name
    fn name(&self) -> &str;
}

/// Result of classifying one message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Assigned category (always exactly one)
    pub category: Category,

    /// Confidence score (0.0-1.0)
    pub confidence: f32,

    /// Per-category probability estimates
    pub probabilities: CategoryDistribution,

    /// Keywords that drove the decision, in lexicon order (may be empty)
    pub matched_keywords: Vec<String>,
}

impl ClassificationResult {
    /// Create a result with no matched keywords
    pub fn new(category: Category, confidence: f32, probabilities: CategoryDistribution) -> Self {
        Self {
            category,
            confidence,
            probabilities,
            matched_keywords: Vec::new(),
        }
    }

    /// Attach the keywords that drove the decision
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.matched_keywords = keywords;
        self
    }
}

/// Per-category probability estimates
///
/// Normalization varies by strategy: the statistical strategy emits a true
/// distribution summing to 1.0, while the keyword strategy reports score
/// ratios with `other` pinned at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryDistribution {
    /// Probability assigned to sales
    #[serde(rename = "ventas")]
    pub sales: f32,

    /// Probability assigned to support
    #[serde(rename = "soporte")]
    pub support: f32,

    /// Probability assigned to other
    #[serde(rename = "otro")]
    pub other: f32,
}

impl CategoryDistribution {
    /// Create a distribution from raw values
    pub fn new(sales: f32, support: f32, other: f32) -> Self {
        Self {
            sales,
            support,
            other,
        }
    }

    /// Split reported when a message matches no keyword evidence at all
    ///
    /// Historical values, kept verbatim; treat as a placeholder rather than
    /// a calibrated prior.
    pub fn zero_match_fallback() -> Self {
        Self::new(0.33, 0.33, 0.34)
    }

    /// Probability for one category
    pub fn get(&self, category: Category) -> f32 {
        match category {
            Category::Sales => self.sales,
            Category::Support => self.support,
            Category::Other => self.other,
        }
    }

    /// Set the probability for one category
    pub fn set(&mut self, category: Category, value: f32) {
        match category {
            Category::Sales => self.sales = value,
            Category::Support => self.support = value,
            Category::Other => self.other = value,
        }
    }

    /// Category holding the strictly highest probability
    ///
    /// Ties resolve to the earliest category in canonical order.
    pub fn max_category(&self) -> Category {
        let mut best = Category::Sales;
        for category in Category::ALL {
            if self.get(category) > self.get(best) {
                best = category;
            }
        }
        best
    }

    /// Sum of all three probabilities
    pub fn sum(&self) -> f32 {
        self.sales + self.support + self.other
    }
}

/// Shared input validation applied by every strategy
///
/// Blank input is the one malformed shape a typed API can still receive.
pub(crate) fn validate_message(message: &str) -> Result<()> {
    if message.trim().is_empty() {
        return Err(Error::invalid_input("message must not be blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_split_sums_to_one() {
        let dist = CategoryDistribution::zero_match_fallback();
        assert!((dist.sum() - 1.0).abs() < 1e-6);
        assert!(dist.other > dist.sales);
    }

    #[test]
    fn max_category_picks_highest() {
        let dist = CategoryDistribution::new(0.2, 0.7, 0.1);
        assert_eq!(dist.max_category(), Category::Support);
    }

    #[test]
    fn get_and_set_round_trip() {
        let mut dist = CategoryDistribution::new(0.0, 0.0, 0.0);
        dist.set(Category::Sales, 0.9);
        assert_eq!(dist.get(Category::Sales), 0.9);
    }

    #[test]
    fn distribution_serializes_wire_labels() {
        let dist = CategoryDistribution::new(0.5, 0.3, 0.2);
        let json = serde_json::to_string(&dist).unwrap();
        assert!(json.contains("\"ventas\":0.5"));
        assert!(json.contains("\"soporte\":0.3"));
        assert!(json.contains("\"otro\":0.2"));
    }

    #[test]
    fn blank_message_is_rejected() {
        assert!(validate_message("   ").is_err());
        assert!(validate_message("hola").is_ok());
    }
}
