//! Strategy construction
//!
//! The factory owns the configuration and builds one boxed strategy per
//! request. Construction is eager: ML-backed strategies load or train
//! their models before `create` returns, so callers wanting lazy startup
//! defer the call themselves.

use crate::classifier::Classifier;
use crate::config::{ClassifierConfig, StrategyKind};
use crate::keyword::KeywordClassifier;
use crate::linguistic::LinguisticClassifier;
use crate::statistical::StatisticalClassifier;
use crate::zero_shot::ZeroShotClassifier;
use mailroom_core::Result;
use std::path::Path;
use tracing::info;

/// Builds classification strategies from configuration
#[derive(Debug, Clone, Default)]
pub struct StrategyFactory {
    config: ClassifierConfig,
}

impl StrategyFactory {
    /// Create a factory with the given configuration
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Create a factory from a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(ClassifierConfig::from_file(path)?))
    }

    /// Configuration backing this factory
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Build the strategy of the given kind, falling back to the
    /// configured default when `kind` is omitted
    pub fn create(&self, kind: Option<StrategyKind>) -> Result<Box<dyn Classifier>> {
        let kind = kind.unwrap_or(self.config.strategy);
        info!(strategy = %kind, "building classification strategy");

        let classifier: Box<dyn Classifier> = match kind {
            StrategyKind::KeywordBased => Box::new(KeywordClassifier::new()?),
            StrategyKind::Statistical => match &self.config.model_path {
                Some(path) => Box::new(StatisticalClassifier::with_model_path(path)?),
                None => Box::new(StatisticalClassifier::new()?),
            },
            StrategyKind::LinguisticPipeline => Box::new(LinguisticClassifier::new()?),
            StrategyKind::ZeroShot => Box::new(ZeroShotClassifier::new()?),
        };

        Ok(classifier)
    }
}
