//! Mailroom Automation
//!
//! Follow-up actions driven by a contact's assigned category: sales
//! inquiries trigger a simulated email to the commercial team, support
//! requests a simulated ticket with urgency-derived priority, and
//! everything else no action. Transports are simulated by design; the
//! payloads a real transport would carry are logged and returned.

pub mod action;
pub mod priority;
pub mod service;

pub use action::{AutomationOutcome, SalesEmail, SupportTicket};
pub use priority::Priority;
pub use service::AutomationService;
