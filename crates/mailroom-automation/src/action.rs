//! Automation outcome payloads

use crate::priority::Priority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Characters of the message echoed into a simulated email body
const EXCERPT_CHARS: usize = 100;

/// Outcome of running the automation for one classified contact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action")]
#[serde(rename_all = "snake_case")]
pub enum AutomationOutcome {
    /// Sales inquiry: a simulated email to the commercial team
    SalesEmailSent { email: SalesEmail },

    /// Support request: a simulated ticket for the support service
    SupportNotificationSent { ticket: SupportTicket },

    /// No follow-up required
    None,
}

impl AutomationOutcome {
    /// Action label as it appears in serialized outcomes
    pub fn action(&self) -> &'static str {
        match self {
            Self::SalesEmailSent { .. } => "sales_email_sent",
            Self::SupportNotificationSent { .. } => "support_notification_sent",
            Self::None => "none",
        }
    }
}

/// Simulated outbound email for a sales inquiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesEmail {
    /// Commercial team inbox
    pub recipient: String,

    /// Subject line naming the customer
    pub subject: String,

    /// Customer name from the contact record
    pub customer_name: String,

    /// Customer reply address
    pub customer_email: String,

    /// Leading excerpt of the message body
    pub message_excerpt: String,

    /// When the contact was recorded
    pub created_at: DateTime<Utc>,
}

/// Simulated ticket payload for the support service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportTicket {
    /// Contact record identity
    pub contact_id: i64,

    /// Customer name from the contact record
    pub customer_name: String,

    /// Customer reply address
    pub customer_email: String,

    /// Full message text
    pub message: String,

    /// Derived from urgency markers in the message
    pub priority: Priority,

    /// When the contact was recorded
    pub created_at: DateTime<Utc>,

    /// Always "contact_form" for this intake path
    pub source: String,
}

/// First `EXCERPT_CHARS` characters, marked when truncated
pub(crate) fn message_excerpt(message: &str) -> String {
    let excerpt: String = message.chars().take(EXCERPT_CHARS).collect();
    if message.chars().count() > EXCERPT_CHARS {
        format!("{excerpt}...")
    } else {
        excerpt
    }
}
