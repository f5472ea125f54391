//! Automation dispatch keyed by contact category
//!
//! Executes the follow-up for a classified contact:
//! - sales: simulated email to the commercial team
//! - support: simulated ticket notification with derived priority
//! - other: nothing
//!
//! Both channels are simulations. The outbound side is logged and the
//! payload that a real transport would carry is returned to the caller.

use crate::action::{message_excerpt, AutomationOutcome, SalesEmail, SupportTicket};
use crate::priority::Priority;
use mailroom_core::{Category, ContactRecord, Result};
use tracing::{debug, info};

const DEFAULT_SALES_RECIPIENT: &str = "sales@company.com";
const DEFAULT_SUPPORT_URL: &str = "http://localhost:8001/support-service";

/// Runs category-driven follow-up actions
pub struct AutomationService {
    /// Commercial team inbox for sales inquiries
    sales_recipient: String,

    /// Support service endpoint the ticket would be posted to
    support_service_url: String,
}

impl Default for AutomationService {
    fn default() -> Self {
        Self::new()
    }
}

impl AutomationService {
    /// Create a service with the default endpoints
    pub fn new() -> Self {
        Self {
            sales_recipient: DEFAULT_SALES_RECIPIENT.to_string(),
            support_service_url: DEFAULT_SUPPORT_URL.to_string(),
        }
    }

    /// Override the sales inbox
    pub fn with_sales_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.sales_recipient = recipient.into();
        self
    }

    /// Override the support service endpoint
    pub fn with_support_url(mut self, url: impl Into<String>) -> Self {
        self.support_service_url = url.into();
        self
    }

    /// Run the follow-up for one classified contact
    pub async fn execute(&self, contact: &ContactRecord) -> Result<AutomationOutcome> {
        let outcome = match contact.category {
            Category::Sales => self.handle_sales(contact),
            Category::Support => self.handle_support(contact),
            Category::Other => {
                debug!(contact_id = contact.id, "no automation for this category");
                AutomationOutcome::None
            }
        };

        info!(
            contact_id = contact.id,
            category = %contact.category,
            action = outcome.action(),
            "automation executed"
        );

        Ok(outcome)
    }

    fn handle_sales(&self, contact: &ContactRecord) -> AutomationOutcome {
        let email = SalesEmail {
            recipient: self.sales_recipient.clone(),
            subject: format!("Nueva consulta de ventas - {}", contact.name),
            customer_name: contact.name.clone(),
            customer_email: contact.email.clone(),
            message_excerpt: message_excerpt(&contact.message),
            created_at: contact.created_at,
        };

        info!(
            to = %email.recipient,
            subject = %email.subject,
            customer = %email.customer_name,
            "simulated sales email"
        );

        AutomationOutcome::SalesEmailSent { email }
    }

    fn handle_support(&self, contact: &ContactRecord) -> AutomationOutcome {
        let ticket = SupportTicket {
            contact_id: contact.id,
            customer_name: contact.name.clone(),
            customer_email: contact.email.clone(),
            message: contact.message.clone(),
            priority: Priority::from_message(&contact.message),
            created_at: contact.created_at,
            source: "contact_form".to_string(),
        };

        info!(
            url = %self.support_service_url,
            customer = %ticket.customer_name,
            priority = %ticket.priority,
            "simulated support notification"
        );

        AutomationOutcome::SupportNotificationSent { ticket }
    }
}
