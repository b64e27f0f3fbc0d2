//! Decoding of raw RPC events into [`EscrowEvent`] rows.

use chrono::DateTime;
use serde_json::Value;

use crate::events::{EscrowEvent, EventKind};
use crate::rpc::RawEvent;

/// Decode a page of raw RPC events.
///
/// Events from failed contract calls and events without a topic are dropped.
pub fn decode_events(raw: &[RawEvent], contract_id: &str) -> Vec<EscrowEvent> {
    raw.iter()
        .filter(|e| e.in_successful_contract_call != Some(false))
        .filter_map(|e| decode_single(e, contract_id))
        .collect()
}

fn decode_single(raw: &RawEvent, contract_id: &str) -> Option<EscrowEvent> {
    let kind = EventKind::from_topic(&topic_value(raw.topic.first()?));

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    let task_id = if kind.carries_task_id() {
        raw.topic.get(1).map(|t| topic_value(t))
    } else {
        None
    };
    let (actor, amount) = decode_data(&raw.value, kind);

    let event_id = raw
        .id
        .clone()
        .or_else(|| raw.paging_token.clone())
        .unwrap_or_else(|| {
            format!(
                "{ledger}:{}:{}:{}",
                raw.tx_hash.as_deref().unwrap_or("-"),
                kind.as_str(),
                task_id.as_deref().unwrap_or("-")
            )
        });

    Some(EscrowEvent {
        event_id,
        event_type: kind.as_str().to_string(),
        task_id,
        actor,
        amount,
        ledger,
        timestamp,
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| contract_id.to_string()),
        tx_hash: raw.tx_hash.clone(),
    })
}

/// Pick the actor address and amount out of the event data for `kind`.
fn decode_data(value: &Value, kind: EventKind) -> (Option<String>, Option<String>) {
    match kind {
        EventKind::Initialized => (
            field(value, &["owner"]),
            field(value, &["fixed_pricing"]),
        ),
        EventKind::TaskCreated => (field(value, &["creator"]), field(value, &["amount"])),
        EventKind::TaskUpdated => (field(value, &["caller"]), None),
        EventKind::FundsWithdrawn => (field(value, &["to"]), field(value, &["amount"])),
        EventKind::OwnershipTransferred => (field(value, &["new_owner"]), None),
        // The sink address itself is the data; `None` clears the sink.
        EventKind::AuditSinkChanged => (scalar(value).or_else(|| field(value, &["value"])), None),
        EventKind::PolicyChanged | EventKind::Unknown => (None, None),
    }
}

/// First present key among `keys`, rendered as a string.
fn field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| value.get(key).and_then(scalar))
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("value").and_then(scalar),
        _ => None,
    }
}

/// Extract the payload of a topic entry, which the RPC may return as
/// `{"type":"symbol","value":"task_new"}` or as the bare value.
fn topic_value(raw: &str) -> String {
    serde_json::from_str::<Value>(raw)
        .ok()
        .and_then(|v| scalar(&v))
        .unwrap_or_else(|| raw.to_string())
}

/// Parse an RFC 3339 timestamp into Unix seconds.
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.timestamp())
}
