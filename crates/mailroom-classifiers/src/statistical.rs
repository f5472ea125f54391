//! Statistical strategy: TF-IDF features with multinomial naive Bayes
//!
//! The default strategy. Trains at construction on the bundled dataset when
//! no persisted artifact exists, otherwise loads the artifact; either way a
//! constructed instance is always usable.

use crate::classifier::{
    validate_message, CategoryDistribution, ClassificationResult, Classifier,
};
use crate::dataset;
use crate::features::TfidfVectorizer;
use async_trait::async_trait;
use mailroom_core::{Category, Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Minimum number of examples `train` accepts
pub const MIN_TRAINING_EXAMPLES: usize = 10;

/// Additive smoothing applied to per-class feature counts
const SMOOTHING_ALPHA: f32 = 0.1;

/// Terms surfaced as matched keywords per classification
const TOP_TERMS: usize = 5;

/// Multinomial naive Bayes over tf-idf rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    alpha: f32,
    classes: Vec<Category>,
    class_log_prior: Vec<f32>,
    feature_log_prob: Vec<Vec<f32>>,
}

impl MultinomialNb {
    /// Create an unfitted model with the given smoothing constant
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            classes: Vec::new(),
            class_log_prior: Vec::new(),
            feature_log_prob: Vec::new(),
        }
    }

    /// Whether `fit` has produced class statistics
    pub fn is_fitted(&self) -> bool {
        !self.classes.is_empty()
    }

    /// Whether the class tables agree with each other and the feature width
    ///
    /// `predict_proba` indexes priors and likelihoods per class, so a
    /// deserialized model whose tables disagree must be rejected before
    /// it is used.
    pub fn is_coherent(&self, n_features: usize) -> bool {
        self.classes.len() == self.class_log_prior.len()
            && self.classes.len() == self.feature_log_prob.len()
            && self
                .feature_log_prob
                .iter()
                .all(|row| row.len() == n_features)
    }

    /// Classes in the order `predict_proba` reports them
    pub fn classes(&self) -> &[Category] {
        &self.classes
    }

    /// Estimate class priors and feature likelihoods from labeled rows
    pub fn fit(&mut self, rows: &[Vec<f32>], labels: &[Category]) -> Result<()> {
        if rows.is_empty() || rows.len() != labels.len() {
            return Err(Error::insufficient_data(
                "feature rows and labels must be non-empty and equal in length",
            ));
        }
        let n_features = rows[0].len();
        if n_features == 0 {
            return Err(Error::insufficient_data(
                "training corpus produced no features",
            ));
        }

        let classes: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|c| labels.contains(c))
            .collect();

        let mut class_log_prior = Vec::with_capacity(classes.len());
        let mut feature_log_prob = Vec::with_capacity(classes.len());

        for &class in &classes {
            let mut feature_sums = vec![0.0f32; n_features];
            let mut doc_count = 0usize;
            for (row, label) in rows.iter().zip(labels) {
                if *label == class {
                    doc_count += 1;
                    for (sum, value) in feature_sums.iter_mut().zip(row) {
                        *sum += value;
                    }
                }
            }

            class_log_prior.push((doc_count as f32 / rows.len() as f32).ln());

            let class_total: f32 = feature_sums.iter().sum();
            let denominator = class_total + self.alpha * n_features as f32;
            feature_log_prob.push(
                feature_sums
                    .iter()
                    .map(|sum| ((sum + self.alpha) / denominator).ln())
                    .collect(),
            );
        }

        self.classes = classes;
        self.class_log_prior = class_log_prior;
        self.feature_log_prob = feature_log_prob;
        Ok(())
    }

    /// Per-class probabilities for one row, normalized to sum to 1.0
    pub fn predict_proba(&self, row: &[f32]) -> Vec<f32> {
        let joint: Vec<f32> = self
            .classes
            .iter()
            .enumerate()
            .map(|(c, _)| {
                let likelihood: f32 = row
                    .iter()
                    .zip(&self.feature_log_prob[c])
                    .map(|(value, log_prob)| value * log_prob)
                    .sum();
                self.class_log_prior[c] + likelihood
            })
            .collect();

        // log-sum-exp keeps the normalization numerically stable
        let max = joint.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let log_sum = max
            + joint
                .iter()
                .map(|j| (j - max).exp())
                .sum::<f32>()
                .ln();
        joint.iter().map(|j| (j - log_sum).exp()).collect()
    }
}

/// The persisted artifact: fitted vectorizer plus fitted naive Bayes
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StatisticalModel {
    vectorizer: TfidfVectorizer,
    nb: MultinomialNb,
}

impl StatisticalModel {
    fn fit(messages: &[String], labels: &[Category]) -> Result<Self> {
        let mut vectorizer = TfidfVectorizer::default();
        vectorizer.fit(messages)?;

        let rows: Vec<Vec<f32>> = messages.iter().map(|m| vectorizer.transform(m)).collect();
        let mut nb = MultinomialNb::new(SMOOTHING_ALPHA);
        nb.fit(&rows, labels)?;

        Ok(Self { vectorizer, nb })
    }
}

/// Supervised text classifier behind the shared strategy contract
#[derive(Debug)]
pub struct StatisticalClassifier {
    name: String,
    model: StatisticalModel,
    model_path: Option<PathBuf>,
}

impl StatisticalClassifier {
    /// Train on the bundled dataset, with no persistence
    pub fn new() -> Result<Self> {
        let (messages, labels) = dataset::default_training_data();
        let model = StatisticalModel::fit(&messages, &labels)?;
        info!(
            examples = messages.len(),
            features = model.vectorizer.vocabulary_len(),
            "trained statistical model on bundled dataset"
        );
        Ok(Self {
            name: "statistical".to_string(),
            model,
            model_path: None,
        })
    }

    /// Load the artifact at `path` if present, otherwise train on the
    /// bundled dataset and persist the result there
    ///
    /// A corrupt artifact fails construction. A save failure after a fresh
    /// training only logs a warning; the instance stays usable.
    pub fn with_model_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.exists() {
            let model = Self::load_model(&path)?;
            info!(path = %path.display(), "loaded persisted statistical model");
            return Ok(Self {
                name: "statistical".to_string(),
                model,
                model_path: Some(path),
            });
        }

        let mut classifier = Self::new()?;
        classifier.model_path = Some(path);
        classifier.persist_best_effort();
        Ok(classifier)
    }

    fn load_model(path: &Path) -> Result<StatisticalModel> {
        let raw = fs::read_to_string(path).map_err(|e| {
            Error::model_load(format!(
                "failed to read model artifact {}: {e}",
                path.display()
            ))
        })?;
        let model: StatisticalModel = serde_json::from_str(&raw).map_err(|e| {
            Error::model_load(format!("corrupt model artifact {}: {e}", path.display()))
        })?;
        if !model.vectorizer.is_fitted() || !model.nb.is_fitted() {
            return Err(Error::model_load(format!(
                "model artifact {} holds an unfitted model",
                path.display()
            )));
        }
        if !model.vectorizer.is_coherent()
            || !model.nb.is_coherent(model.vectorizer.vocabulary_len())
        {
            return Err(Error::model_load(format!(
                "model artifact {} is internally inconsistent",
                path.display()
            )));
        }
        Ok(model)
    }

    fn persist(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string(&self.model)?;
        fs::write(path, raw)?;
        Ok(())
    }

    fn persist_best_effort(&self) {
        let Some(path) = &self.model_path else {
            return;
        };
        if let Err(e) = self.persist(path) {
            warn!(
                path = %path.display(),
                error = %e,
                "failed to persist statistical model"
            );
        }
    }

    /// Top terms present in the message, ranked by tf-idf weight
    ///
    /// Best-effort by contract: never fails classification, just returns an
    /// empty list when the message shares nothing with the vocabulary.
    fn important_terms(&self, message: &str) -> Vec<String> {
        let row = self.model.vectorizer.transform(message);
        let mut weighted: Vec<(usize, f32)> = row
            .into_iter()
            .enumerate()
            .filter(|(_, weight)| *weight > 0.0)
            .collect();
        weighted.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        weighted.truncate(TOP_TERMS);
        weighted
            .into_iter()
            .filter_map(|(index, _)| self.model.vectorizer.term(index).map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl Classifier for StatisticalClassifier {
    async fn classify(&self, message: &str) -> Result<ClassificationResult> {
        validate_message(message)?;

        let row = self.model.vectorizer.transform(message);
        let probs = self.model.nb.predict_proba(&row);

        let mut distribution = CategoryDistribution::new(0.0, 0.0, 0.0);
        for (class, p) in self.model.nb.classes().iter().zip(&probs) {
            distribution.set(*class, *p);
        }

        // argmax over model class order; the first class wins exact ties
        let mut best = 0;
        for (index, p) in probs.iter().enumerate() {
            if *p > probs[best] {
                best = index;
            }
        }
        let category = self.model.nb.classes()[best];
        let confidence = probs[best];

        let result = ClassificationResult::new(category, confidence, distribution)
            .with_keywords(self.important_terms(message));

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
        if messages.len() < MIN_TRAINING_EXAMPLES {
            return Err(Error::insufficient_data(format!(
                "need at least {MIN_TRAINING_EXAMPLES} examples, got {}",
                messages.len()
            )));
        }

        self.model = StatisticalModel::fit(messages, labels)?;
        info!(
            strategy = %self.name,
            examples = messages.len(),
            "retrained statistical model"
        );
        self.persist_best_effort();
        Ok(())
    }

    fn is_trained(&self) -> bool {
        self.model.nb.is_fitted()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
