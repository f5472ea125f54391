//! Mailroom Classifiers
//!
//! Classification strategies for contact-intake messages. Every strategy
//! implements the same [`Classifier`] trait and sorts a message into one
//! of three categories: sales, support, or other.
//!
//! Four strategies are available, selected through [`StrategyFactory`]:
//! - `keyword-based`: lexicon and phrase-pattern scoring, no training
//! - `statistical`: TF-IDF features with multinomial naive Bayes
//! - `linguistic-pipeline`: bag-of-words text categorizer trained in minibatches
//! - `zero-shot`: hypothesis-per-category scoring, pretrained
//!
//! All strategies run on CPU and answer in microseconds to milliseconds.

pub mod classifier;
pub mod config;
pub mod dataset;
pub mod factory;
pub mod features;
pub mod keyword;
pub mod linguistic;
pub mod scoring;
pub mod statistical;
pub mod zero_shot;

pub use classifier::{CategoryDistribution, ClassificationResult, Classifier};
pub use config::{ClassifierConfig, StrategyKind};
pub use dataset::{default_training_data, linguistic_training_data};
pub use factory::StrategyFactory;
pub use features::TfidfVectorizer;
pub use keyword::{ClassificationDetails, KeywordClassifier};
pub use linguistic::LinguisticClassifier;
pub use statistical::StatisticalClassifier;
pub use zero_shot::ZeroShotClassifier;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{CategoryDistribution, ClassificationResult, Classifier};
    pub use crate::config::{ClassifierConfig, StrategyKind};
    pub use crate::factory::StrategyFactory;
    pub use crate::keyword::KeywordClassifier;
    pub use crate::linguistic::LinguisticClassifier;
    pub use crate::statistical::StatisticalClassifier;
    pub use crate::zero_shot::ZeroShotClassifier;
    pub use mailroom_core::{Category, Error, Result};
}
