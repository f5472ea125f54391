//! Configuration for strategy selection and model persistence

use mailroom_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Strategy selector recognized by the factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    KeywordBased,
    Statistical,
    LinguisticPipeline,
    ZeroShot,
}

impl StrategyKind {
    /// All recognized selector values
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::KeywordBased,
        StrategyKind::Statistical,
        StrategyKind::LinguisticPipeline,
        StrategyKind::ZeroShot,
    ];

    /// Selector string as it appears in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeywordBased => "keyword-based",
            Self::Statistical => "statistical",
            Self::LinguisticPipeline => "linguistic-pipeline",
            Self::ZeroShot => "zero-shot",
        }
    }
}

impl Default for StrategyKind {
    fn default() -> Self {
        Self::Statistical
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "keyword-based" => Ok(Self::KeywordBased),
            "statistical" => Ok(Self::Statistical),
            "linguistic-pipeline" => Ok(Self::LinguisticPipeline),
            "zero-shot" => Ok(Self::ZeroShot),
            other => Err(Error::config(format!(
                "unknown strategy selector: {other}"
            ))),
        }
    }
}

/// Configuration consumed by the strategy factory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Strategy used when the caller does not name one
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Where the statistical strategy persists its fitted model
    #[serde(default)]
    pub model_path: Option<PathBuf>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Statistical,
            model_path: None,
        }
    }
}

impl ClassifierConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::config(format!("invalid configuration: {e}")))
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }
}
