//! Linguistic-pipeline strategy
//!
//! A trainable text-categorization pipeline: bag-of-words features feeding
//! a softmax layer, trained with shuffled minibatch gradient updates over a
//! fixed epoch count. Keyword derivation mimics a tagger: content-bearing
//! tokens plus named-entity-like tokens, deduplicated and capped.

use crate::classifier::{
    validate_message, CategoryDistribution, ClassificationResult, Classifier,
};
use crate::dataset;
use crate::features::content_bearing_tokens;
use async_trait::async_trait;
use mailroom_core::{Category, Error, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Examples per minibatch
const BATCH_SIZE: usize = 8;

/// Passes over the shuffled corpus
const EPOCHS: usize = 10;

/// Gradient step size
const LEARNING_RATE: f32 = 0.5;

/// Fixed shuffle seed keeps training reproducible between runs
const SHUFFLE_SEED: u64 = 42;

/// Cap on derived keywords per classification
const MAX_KEYWORDS: usize = 5;

/// Bag-of-words softmax model, one weight row per category
#[derive(Debug, Clone)]
struct TextcatModel {
    vocabulary: HashMap<String, usize>,
    classes: Vec<Category>,
    /// `weights[class]` has one entry per vocabulary term plus a bias slot
    weights: Vec<Vec<f32>>,
}

impl TextcatModel {
    fn fit(messages: &[String], labels: &[Category]) -> Result<Self> {
        let tokenized: Vec<Vec<String>> = messages
            .iter()
            .map(|m| content_bearing_tokens(m))
            .collect();

        let mut terms: Vec<String> = tokenized
            .iter()
            .flatten()
            .cloned()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        terms.sort();
        if terms.is_empty() {
            return Err(Error::insufficient_data(
                "training corpus produced no tokens",
            ));
        }
        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(i, t)| (t, i))
            .collect();

        let classes: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|c| labels.contains(c))
            .collect();

        let rows: Vec<Vec<f32>> = tokenized
            .iter()
            .map(|tokens| Self::features(&vocabulary, tokens))
            .collect();
        let targets: Vec<usize> = labels
            .iter()
            .map(|label| classes.iter().position(|c| c == label).unwrap_or(0))
            .collect();

        let mut weights = vec![vec![0.0f32; vocabulary.len() + 1]; classes.len()];
        let mut order: Vec<usize> = (0..rows.len()).collect();
        let mut rng = StdRng::seed_from_u64(SHUFFLE_SEED);

        for _ in 0..EPOCHS {
            order.shuffle(&mut rng);
            for batch in order.chunks(BATCH_SIZE) {
                let mut gradients = vec![vec![0.0f32; vocabulary.len() + 1]; classes.len()];
                for &example in batch {
                    let probs = Self::softmax_scores(&weights, &rows[example]);
                    for (class, prob) in probs.iter().enumerate() {
                        let target = if class == targets[example] { 1.0 } else { 0.0 };
                        let delta = prob - target;
                        for (gradient, value) in
                            gradients[class].iter_mut().zip(&rows[example])
                        {
                            *gradient += delta * value;
                        }
                    }
                }
                let step = LEARNING_RATE / batch.len() as f32;
                for (row, gradient_row) in weights.iter_mut().zip(&gradients) {
                    for (weight, gradient) in row.iter_mut().zip(gradient_row) {
                        *weight -= step * gradient;
                    }
                }
            }
        }

        Ok(Self {
            vocabulary,
            classes,
            weights,
        })
    }

    /// Token counts over the vocabulary, with a trailing bias feature of 1.0
    fn features(vocabulary: &HashMap<String, usize>, tokens: &[String]) -> Vec<f32> {
        let mut row = vec![0.0f32; vocabulary.len() + 1];
        for token in tokens {
            if let Some(&index) = vocabulary.get(token) {
                row[index] += 1.0;
            }
        }
        row[vocabulary.len()] = 1.0;
        row
    }

    fn softmax_scores(weights: &[Vec<f32>], row: &[f32]) -> Vec<f32> {
        let logits: Vec<f32> = weights
            .iter()
            .map(|w| w.iter().zip(row).map(|(a, b)| a * b).sum::<f32>())
            .collect();
        let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let exp: Vec<f32> = logits.iter().map(|l| (l - max).exp()).collect();
        let total: f32 = exp.iter().sum();
        exp.into_iter().map(|e| e / total).collect()
    }

    fn predict(&self, message: &str) -> Vec<f32> {
        let tokens = content_bearing_tokens(message);
        let row = Self::features(&self.vocabulary, &tokens);
        Self::softmax_scores(&self.weights, &row)
    }
}

/// Trainable text-categorization pipeline behind the strategy contract
pub struct LinguisticClassifier {
    name: String,
    model: TextcatModel,
}

impl LinguisticClassifier {
    /// Train the pipeline on the bundled linguistic corpus
    pub fn new() -> Result<Self> {
        let (messages, labels) = dataset::linguistic_training_data();
        let model = TextcatModel::fit(&messages, &labels)?;
        info!(
            examples = messages.len(),
            epochs = EPOCHS,
            "trained linguistic pipeline on bundled dataset"
        );
        Ok(Self {
            name: "linguistic-pipeline".to_string(),
            model,
        })
    }

    /// Content tokens plus entity-like tokens, deduplicated and capped
    ///
    /// Entity-like means capitalized in a non-sentence-initial position;
    /// those tokens are listed after the plain content tokens, the way a
    /// tagger reports entities separately from lemmas.
    fn derive_keywords(message: &str) -> Vec<String> {
        let entities = entity_like_tokens(message);
        let entity_set: HashSet<String> = entities.iter().cloned().collect();

        let mut keywords = Vec::new();
        let mut seen = HashSet::new();
        let content = content_bearing_tokens(message)
            .into_iter()
            .filter(|token| !entity_set.contains(token));
        for token in content.chain(entities) {
            if keywords.len() == MAX_KEYWORDS {
                break;
            }
            if seen.insert(token.clone()) {
                keywords.push(token);
            }
        }
        keywords
    }
}

/// Lowercased capitalized tokens sitting in non-sentence-initial positions
fn entity_like_tokens(message: &str) -> Vec<String> {
    let words: Vec<&str> = message.split_whitespace().collect();
    let mut entities = Vec::new();
    for (i, word) in words.iter().enumerate() {
        let cleaned = word.trim_matches(|c: char| !c.is_alphanumeric());
        if cleaned.chars().count() < 2 {
            continue;
        }
        let capitalized = cleaned.chars().next().is_some_and(|c| c.is_uppercase());
        let sentence_initial = i == 0 || words[i - 1].ends_with(['.', '!', '?']);
        if capitalized && !sentence_initial {
            entities.push(cleaned.to_lowercase());
        }
    }
    entities
}

#[async_trait]
impl Classifier for LinguisticClassifier {
    async fn classify(&self, message: &str) -> Result<ClassificationResult> {
        validate_message(message)?;

        let scores = self.model.predict(message);

        let mut distribution = CategoryDistribution::new(0.0, 0.0, 0.0);
        for (class, score) in self.model.classes.iter().zip(&scores) {
            distribution.set(*class, *score);
        }

        let mut best = 0;
        for (index, score) in scores.iter().enumerate() {
            if *score > scores[best] {
                best = index;
            }
        }
        let category = self.model.classes[best];
        let confidence = scores[best];

        let result = ClassificationResult::new(category, confidence, distribution)
            .with_keywords(Self::derive_keywords(message));

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
        if messages.is_empty() {
            return Err(Error::insufficient_data(
                "cannot train the pipeline on an empty corpus",
            ));
        }

        self.model = TextcatModel::fit(messages, labels)?;
        info!(
            strategy = %self.name,
            examples = messages.len(),
            "retrained linguistic pipeline"
        );
        Ok(())
    }

    fn is_trained(&self) -> bool {
        !self.model.weights.is_empty()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
