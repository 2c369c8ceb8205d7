use std::collections::HashMap;
use std::sync::OnceLock;

use log::{debug, error, info};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::event::error::EventSystemError;
use crate::event::types::InboxOutEvent;
use crate::event::{AnalyticsEvent, Attribute, AttributeType};

/// Registered schema of one event type
#[derive(Debug, Clone)]
pub struct EventSchema {
    pub event_type: &'static str,
    pub attributes: &'static [Attribute],
}

/// A payload that passed validation against its schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: Map<String, Value>,
}

impl RecordedEvent {
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.data.get(attribute)
    }
}

/// Registry of analytics event schemas, keyed by event type
#[derive(Debug, Default)]
pub struct EventRegistry {
    schemas: HashMap<&'static str, EventSchema>,
}

static GLOBAL_REGISTRY: OnceLock<EventRegistry> = OnceLock::new();

impl EventRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in event type
    pub fn with_builtin_events() -> Result<Self, EventSystemError> {
        let mut registry = Self::new();
        registry.register::<InboxOutEvent>()?;
        Ok(registry)
    }

    /// The process-wide registry, populated on first use.
    pub fn global() -> &'static EventRegistry {
        GLOBAL_REGISTRY.get_or_init(|| match Self::with_builtin_events() {
            Ok(registry) => registry,
            Err(e) => {
                error!("Failed to register built-in analytics events: {}", e);
                EventRegistry::new()
            }
        })
    }

    /// Register an event type
    pub fn register<E: AnalyticsEvent>(&mut self) -> Result<(), EventSystemError> {
        if self.schemas.contains_key(E::TYPE) {
            return Err(EventSystemError::DuplicateEventType {
                event_type: E::TYPE.to_string(),
            });
        }
        self.schemas.insert(
            E::TYPE,
            EventSchema {
                event_type: E::TYPE,
                attributes: E::attributes(),
            },
        );
        info!("Registered analytics event type '{}'", E::TYPE);
        Ok(())
    }

    pub fn is_registered(&self, event_type: &str) -> bool {
        self.schemas.contains_key(event_type)
    }

    pub fn schema(&self, event_type: &str) -> Option<&EventSchema> {
        self.schemas.get(event_type)
    }

    /// Registered event type names, sorted
    pub fn event_types(&self) -> Vec<&'static str> {
        let mut types: Vec<&'static str> = self.schemas.keys().copied().collect();
        types.sort_unstable();
        types
    }

    /// Validate `payload` against the schema of `event_type`.
    ///
    /// Required attributes must be present and non-null. Missing optional
    /// attributes are recorded as `null`. Values are coerced to the declared
    /// attribute type; keys the schema does not declare are dropped.
    pub fn build(&self, event_type: &str, payload: &Value) -> Result<RecordedEvent, EventSystemError> {
        let schema = self
            .schemas
            .get(event_type)
            .ok_or_else(|| EventSystemError::UnknownEventType {
                event_type: event_type.to_string(),
            })?;

        let object = payload
            .as_object()
            .ok_or_else(|| EventSystemError::InvalidPayload {
                event_type: event_type.to_string(),
                details: "payload must be a JSON object".to_string(),
            })?;

        let mut data = Map::new();
        for attribute in schema.attributes {
            let raw = object.get(attribute.name).unwrap_or(&Value::Null);
            let value = if raw.is_null() {
                if attribute.required {
                    return Err(EventSystemError::MissingAttribute {
                        event_type: event_type.to_string(),
                        attribute: attribute.name.to_string(),
                    });
                }
                Value::Null
            } else {
                coerce(event_type, attribute, raw)?
            };
            data.insert(attribute.name.to_string(), value);
        }

        debug!("Built analytics event '{}' with {} attributes", event_type, data.len());
        Ok(RecordedEvent {
            event_type: event_type.to_string(),
            data,
        })
    }
}

fn coerce(event_type: &str, attribute: &Attribute, raw: &Value) -> Result<Value, EventSystemError> {
    let coerced = match (attribute.kind, raw) {
        (AttributeType::Str, Value::String(_)) => Some(raw.clone()),
        (AttributeType::Str, Value::Number(n)) => Some(Value::String(n.to_string())),
        (AttributeType::Str, Value::Bool(b)) => Some(Value::String(b.to_string())),

        (AttributeType::Int, Value::Number(n)) if n.is_i64() || n.is_u64() => Some(raw.clone()),
        (AttributeType::Int, Value::String(s)) => s.trim().parse::<i64>().ok().map(Value::from),

        (AttributeType::Bool, Value::Bool(_)) => Some(raw.clone()),
        (AttributeType::Bool, Value::String(s)) => match s.trim() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },

        (AttributeType::Float, Value::Number(n)) => n.as_f64().map(Value::from),
        (AttributeType::Float, Value::String(s)) => s.trim().parse::<f64>().ok().map(Value::from),

        _ => None,
    };

    coerced.ok_or_else(|| EventSystemError::InvalidAttribute {
        event_type: event_type.to_string(),
        attribute: attribute.name.to_string(),
        expected: attribute.kind.to_string(),
        found: raw.to_string(),
    })
}
