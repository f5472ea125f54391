//! Ticket priority derivation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency markers that escalate a support ticket, Spanish and English
const URGENCY_KEYWORDS: &[&str] = &[
    "urgente",
    "emergencia",
    "crítico",
    "no funciona",
    "caído",
    "urgent",
    "emergency",
    "critical",
    "down",
    "broken",
];

/// Priority assigned to a simulated support ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Normal,
}

impl Priority {
    /// Derive priority from the message body. Matching is substring
    /// presence over the lowercased text, so "download" carries "down".
    pub fn from_message(message: &str) -> Self {
        let lowered = message.to_lowercase();
        if URGENCY_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            Priority::High
        } else {
            Priority::Normal
        }
    }

    /// Wire label as it appears in ticket payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Normal => "normal",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_keywords_escalate() {
        for message in [
            "esto es urgente",
            "tenemos una emergencia",
            "fallo crítico en producción",
            "la página no funciona",
            "el servidor está caído",
            "this is urgent",
            "emergency in the store",
            "critical failure",
            "the site is down",
            "my account is broken",
        ] {
            assert_eq!(Priority::from_message(message), Priority::High, "{message}");
        }
    }

    #[test]
    fn calm_messages_stay_normal() {
        assert_eq!(
            Priority::from_message("quisiera saber el estado de mi pedido"),
            Priority::Normal
        );
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(Priority::from_message("URGENTE por favor"), Priority::High);
    }

    #[test]
    fn substring_presence_is_enough() {
        // "download" contains "down"
        assert_eq!(
            Priority::from_message("the download never finishes"),
            Priority::High
        );
    }

    #[test]
    fn priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        assert_eq!(
            serde_json::to_string(&Priority::Normal).unwrap(),
            "\"normal\""
        );
    }
}
