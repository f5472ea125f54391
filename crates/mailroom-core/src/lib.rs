//! Mailroom Core
//!
//! Core types, traits, and utilities shared across mailroom components.
//!
//! This crate provides:
//! - The closed `Category` taxonomy for classified contact messages
//! - Contact request validation and the persisted record shape
//! - Error types and result handling

pub mod category;
pub mod contact;
pub mod error;

pub use category::Category;
pub use contact::{ContactRecord, ContactRequest};
pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::category::Category;
    pub use crate::contact::{ContactRecord, ContactRequest};
    pub use crate::error::{Error, Result};
}
