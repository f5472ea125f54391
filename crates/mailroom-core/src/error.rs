//! Error types for mailroom

/// Result type alias using mailroom's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for mailroom operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Blank or malformed input handed to a classifier or intake validation
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Training invoked with too few or mismatched examples
    #[error("insufficient training data: {0}")]
    InsufficientData(String),

    /// Persisted model artifact missing or corrupt at construction time
    #[error("model load error: {0}")]
    ModelLoad(String),

    /// Configuration errors (unknown strategy selector, bad config file)
    #[error("configuration error: {0}")]
    Config(String),

    /// Classifier execution errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Automation dispatch errors
    #[error("automation error: {0}")]
    Automation(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new invalid-input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new insufficient-data error
    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Self::InsufficientData(msg.into())
    }

    /// Create a new model-load error
    pub fn model_load(msg: impl Into<String>) -> Self {
        Self::ModelLoad(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new automation error
    pub fn automation(msg: impl Into<String>) -> Self {
        Self::Automation(msg.into())
    }
}
