//! Contact intake types and field validation

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::category::Category;
use crate::error::{Error, Result};

/// Minimum trimmed name length accepted by intake
const MIN_NAME_CHARS: usize = 2;

/// Minimum trimmed message length accepted by intake
const MIN_MESSAGE_CHARS: usize = 10;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .expect("email regex compiles")
    })
}

/// An inbound contact submission, prior to classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    /// Sender's name
    pub name: String,

    /// Sender's email address
    pub email: String,

    /// Free-text message body
    pub message: String,
}

impl ContactRequest {
    /// Create a new contact request
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Validate field constraints before the message reaches a classifier
    ///
    /// Lengths are counted over trimmed characters, not bytes, so accented
    /// names are not penalized.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().chars().count() < MIN_NAME_CHARS {
            return Err(Error::invalid_input(format!(
                "name must be at least {MIN_NAME_CHARS} characters"
            )));
        }
        if self.message.trim().chars().count() < MIN_MESSAGE_CHARS {
            return Err(Error::invalid_input(format!(
                "message must be at least {MIN_MESSAGE_CHARS} characters"
            )));
        }
        if !email_regex().is_match(self.email.trim()) {
            return Err(Error::invalid_input(format!(
                "invalid email address: {}",
                self.email
            )));
        }
        Ok(())
    }
}

/// A classified contact as the storage collaborator persists it
///
/// The classifier never reads or writes this record; it only produces the
/// `category` value the intake path stamps onto it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Storage-assigned identity
    pub id: i64,

    /// Sender's name
    pub name: String,

    /// Sender's email address
    pub email: String,

    /// Original message text
    pub message: String,

    /// Assigned category
    pub category: Category,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl ContactRecord {
    /// Stamp a validated request with an identity and its assigned category
    pub fn from_request(id: i64, request: ContactRequest, category: Category) -> Self {
        Self {
            id,
            name: request.name,
            email: request.email,
            message: request.message,
            category,
            created_at: Utc::now(),
        }
    }
}
