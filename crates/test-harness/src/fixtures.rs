//! Inbound payload fixtures shaped like real platform notifications.

use serde_json::{json, Map, Value};

/// Workflow id used by detection fixtures, matching a real notification
/// workflow's id format.
pub const DETECTION_WORKFLOW_ID: &str = "12314515135113241231234124312346";

/// Second configured workflow id for multi-workflow tests.
pub const INCIDENT_WORKFLOW_ID: &str = "34122412341234123412341234124312";

/// Builds an inbound event payload with the given data fields, in order.
pub fn event_payload(workflow_id: &str, trigger_name: &str, data: &[(&str, &str)]) -> Value {
    let mut map = Map::new();
    for (key, value) in data {
        map.insert((*key).to_string(), Value::String((*value).to_string()));
    }

    json!({
        "meta": {
            "workflow_id": workflow_id,
            "trigger_name": trigger_name
        },
        "data": map
    })
}

/// The reference detection event: one severity field, detection trigger.
pub fn detection_event() -> Value {
    event_payload(DETECTION_WORKFLOW_ID, "new detection", &[("detections.severity", "High")])
}

/// An event whose workflow id is not configured anywhere.
pub fn unknown_workflow_event() -> Value {
    event_payload("00000000000000000000000000000000", "new detection", &[("source", "sensor-7")])
}
