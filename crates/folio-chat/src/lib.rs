//! Conversational layer for the portfolio assistant.
//!
//! Provides the keyword rule table, the intent responder that resolves user
//! input against it, per-session conversation bookkeeping, and the
//! appointment side-channel.

pub mod appointment;
pub mod catalog;
pub mod conversation;
pub mod error;
pub mod responder;
pub mod rules;

pub use appointment::{AppointmentDesk, AppointmentRequest, AppointmentSink, Delivery, FileSink};
pub use catalog::portfolio_rules;
pub use conversation::Conversation;
pub use error::ChatError;
pub use responder::{normalize, IntentResponder, DEFAULT_RULE_ID};
pub use rules::{MatcherGroup, ResponseRule, RuleTable};
