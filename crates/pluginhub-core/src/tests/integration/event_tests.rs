#![cfg(test)]

use serde_json::json;

use crate::event::types::InboxOutEvent;
use crate::event::{AnalyticsEvent, EventRegistry};
use crate::kernel::error::Result;

#[test]
fn test_global_registry_records_inbox_out() -> Result<()> {
    let registry = EventRegistry::global();
    assert!(registry.is_registered(InboxOutEvent::TYPE));

    let event = registry.build(
        "inbox.inbox_out",
        &json!({
            "default_user_id": 3,
            "organization_id": "17",
            "group_id": 991,
            "action": "resolved",
            "inbox_in_ts": 1700000000,
        }),
    )?;

    let value = serde_json::to_value(&event).map_err(|e| e.to_string())?;
    assert_eq!(value["type"], json!("inbox.inbox_out"));
    assert_eq!(value["data"]["user_id"], json!(null));
    assert_eq!(value["data"]["organization_id"], json!(17));
    assert_eq!(value["data"]["group_id"], json!("991"));
    Ok(())
}
