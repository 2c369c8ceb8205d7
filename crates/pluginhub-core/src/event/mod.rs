//! # Pluginhub Analytics Events
//!
//! Declarative analytics event schemas. An event type is a unit struct
//! implementing [`AnalyticsEvent`]: a dotted type name plus a fixed list of
//! typed [`Attribute`]s. Schemas are collected in an [`EventRegistry`],
//! whose process-wide instance ([`EventRegistry::global`]) registers every
//! built-in event from [`types`] the first time it is touched.
//!
//! The registry does not transport events anywhere; it validates and
//! coerces raw JSON payloads into a [`RecordedEvent`] that a sink can
//! forward.
pub mod error;
pub mod registry;
pub mod types;

use std::fmt;

/// Value type of an event attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    Str,
    Int,
    Bool,
    Float,
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::Str => write!(f, "str"),
            AttributeType::Int => write!(f, "int"),
            AttributeType::Bool => write!(f, "bool"),
            AttributeType::Float => write!(f, "float"),
        }
    }
}

/// A single named, typed attribute of an analytics event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttributeType,
    pub required: bool,
}

impl Attribute {
    /// A required string attribute
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            kind: AttributeType::Str,
            required: true,
        }
    }

    pub const fn with_type(mut self, kind: AttributeType) -> Self {
        self.kind = kind;
        self
    }

    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Schema declaration implemented by every analytics event type
pub trait AnalyticsEvent {
    /// Dotted event type name, e.g. `inbox.inbox_out`
    const TYPE: &'static str;

    /// Ordered attribute list
    fn attributes() -> &'static [Attribute];
}

/// Re-export important types
pub use error::EventSystemError;
pub use registry::{EventRegistry, EventSchema, RecordedEvent};
pub use types::InboxOutEvent;

// Test module declaration
#[cfg(test)]
mod tests;
