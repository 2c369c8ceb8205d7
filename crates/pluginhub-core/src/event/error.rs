//! # Pluginhub Event System Errors
//!
//! Defines [`EventSystemError`], raised when registering analytics event
//! schemas or when a raw payload does not satisfy the schema it names.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventSystemError {
    #[error("Event type '{event_type}' is already registered")]
    DuplicateEventType { event_type: String },

    #[error("Unknown event type '{event_type}'")]
    UnknownEventType { event_type: String },

    #[error("Event '{event_type}' is missing required attribute '{attribute}'")]
    MissingAttribute {
        event_type: String,
        attribute: String,
    },

    #[error("Invalid value for attribute '{attribute}' of event '{event_type}': expected {expected}, got {found}")]
    InvalidAttribute {
        event_type: String,
        attribute: String,
        expected: String,
        found: String,
    },

    #[error("Invalid event payload for '{event_type}': {details}")]
    InvalidPayload { event_type: String, details: String },
}
