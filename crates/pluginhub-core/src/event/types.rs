use crate::event::{AnalyticsEvent, Attribute, AttributeType};

/// An issue left the inbox (marked reviewed, resolved, ignored, ...)
#[derive(Debug, Clone, Copy, Default)]
pub struct InboxOutEvent;

const INBOX_OUT_ATTRIBUTES: &[Attribute] = &[
    Attribute::new("user_id").with_type(AttributeType::Int).optional(),
    Attribute::new("default_user_id").with_type(AttributeType::Int),
    Attribute::new("organization_id").with_type(AttributeType::Int),
    Attribute::new("group_id"),
    Attribute::new("action"),
    Attribute::new("inbox_in_ts").with_type(AttributeType::Int),
];

impl AnalyticsEvent for InboxOutEvent {
    const TYPE: &'static str = "inbox.inbox_out";

    fn attributes() -> &'static [Attribute] {
        INBOX_OUT_ATTRIBUTES
    }
}
