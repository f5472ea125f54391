//! The closed contact-message taxonomy

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Classification outcome for a contact message
///
/// Exactly one category is assigned per message; there is no "unknown"
/// outcome. Wire labels are the Spanish names the intake system speaks
/// (`ventas`, `soporte`, `otro`) and are used in persistence, logs, and
/// downstream payloads alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Commercial interest: pricing, quotes, purchases
    #[serde(rename = "ventas")]
    Sales,

    /// Technical issues and assistance requests
    #[serde(rename = "soporte")]
    Support,

    /// Everything else: greetings, HR, general inquiries
    #[serde(rename = "otro")]
    Other,
}

impl Category {
    /// All categories in canonical order
    pub const ALL: [Category; 3] = [Category::Sales, Category::Support, Category::Other];

    /// Wire label for this category
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sales => "ventas",
            Self::Support => "soporte",
            Self::Other => "otro",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ventas" => Ok(Self::Sales),
            "soporte" => Ok(Self::Support),
            "otro" => Ok(Self::Other),
            other => Err(Error::invalid_input(format!("unknown category: {other}"))),
        }
    }
}
