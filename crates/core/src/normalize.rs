//! Normalization of order payloads returned by the order service.
//!
//! The order service is not consistent about where it puts the order or what
//! it calls its fields. This module is the one place that deals with that;
//! everything downstream works on [`OrderRecord`].
//!
//! # Envelope
//!
//! The order object is taken from the first of these that is a JSON object:
//!
//! 1. `data.order`
//! 2. `order`
//! 3. `data`
//! 4. the payload itself
//!
//! # Fields
//!
//! Aliases are tried left to right; `null` and blank strings count as absent.
//! String values are trimmed.
//!
//! | Field | Keys |
//! |-------|------|
//! | id | `id`, `_id`, `orderId` |
//! | tracking number | `trackingNumber`, `tracking_number` |
//! | status | `currentStatus`, `status` |
//! | payment status | `paymentStatus`, `payment_status` |
//! | shipping type | `shippingType`, `shipping_type` |
//! | delivery estimate | `deliveryEstimate`, `estimatedDelivery`, `delivery_estimate` |
//! | created at | `createdAt`, `created_at` |
//! | paid at | `paidAt`, `paid_at` |
//! | tracking history | `trackingHistory`, `tracking_history`, `events` |
//!
//! Timestamps may be RFC 3339 strings, `YYYY-MM-DD` dates (midnight UTC) or
//! epoch milliseconds. Unparseable timestamps are dropped rather than failing
//! the whole order.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::{OrderId, OrderRecord, TrackingEvent, TrackingNumber};

/// Errors that can occur when normalizing an order payload.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The payload is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// No JSON object was found in the payload.
    #[error("order payload is not a JSON object")]
    NotAnObject,
    /// A field has the wrong shape.
    #[error("invalid field {field}: {reason}")]
    InvalidField {
        /// Canonical field name.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

/// Parse JSON text and normalize it.
///
/// # Errors
///
/// Returns an error if the text is not JSON or the payload cannot be
/// normalized (see [`order_from_value`]).
pub fn order_from_str(json: &str) -> Result<OrderRecord, NormalizeError> {
    let value: Value = serde_json::from_str(json)?;
    order_from_value(&value)
}

/// Normalize an order payload.
///
/// # Errors
///
/// Returns an error if no order object is found, or a field has a type that
/// cannot be coerced (for example a numeric status or a non-array history).
pub fn order_from_value(payload: &Value) -> Result<OrderRecord, NormalizeError> {
    let order = unwrap_envelope(payload).ok_or(NormalizeError::NotAnObject)?;

    let tracking_history = match field(order, &["trackingHistory", "tracking_history", "events"])
    {
        None => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter_map(tracking_event).collect(),
        Some(other) => {
            return Err(invalid("tracking_history", "expected an array", other));
        }
    };

    Ok(OrderRecord {
        id: identifier(order, "id", &["id", "_id", "orderId"])?.map(OrderId::from),
        tracking_number: identifier(
            order,
            "tracking_number",
            &["trackingNumber", "tracking_number"],
        )?
        .map(TrackingNumber::from),
        status: string(order, "status", &["currentStatus", "status"])?,
        payment_status: string(order, "payment_status", &["paymentStatus", "payment_status"])?
            .map(Into::into)
            .unwrap_or_default(),
        shipping_type: string(order, "shipping_type", &["shippingType", "shipping_type"])?
            .map(Into::into)
            .unwrap_or_default(),
        delivery_estimate: identifier(
            order,
            "delivery_estimate",
            &["deliveryEstimate", "estimatedDelivery", "delivery_estimate"],
        )?,
        created_at: field(order, &["createdAt", "created_at"]).and_then(timestamp),
        paid_at: field(order, &["paidAt", "paid_at"]).and_then(timestamp),
        tracking_history,
    })
}

fn unwrap_envelope(payload: &Value) -> Option<&Map<String, Value>> {
    let candidates = [
        payload.get("data").and_then(|d| d.get("order")),
        payload.get("order"),
        payload.get("data"),
        Some(payload),
    ];

    candidates.into_iter().flatten().find_map(Value::as_object)
}

fn field<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !is_absent(value))
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn invalid(field: &'static str, expected: &str, found: &Value) -> NormalizeError {
    NormalizeError::InvalidField {
        field,
        reason: format!("{expected}, found {}", type_name(found)),
    }
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A non-empty string field.
fn string(
    object: &Map<String, Value>,
    name: &'static str,
    keys: &[&str],
) -> Result<Option<String>, NormalizeError> {
    match field(object, keys) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(non_empty(s)),
        Some(other) => Err(invalid(name, "expected a string", other)),
    }
}

/// A string field that may also arrive as a number.
fn identifier(
    object: &Map<String, Value>,
    name: &'static str,
    keys: &[&str],
) -> Result<Option<String>, NormalizeError> {
    match field(object, keys) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(non_empty(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(invalid(name, "expected a string or number", other)),
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let parsed = match value {
        Value::String(s) => parse_timestamp(s.trim()),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    };

    if parsed.is_none() {
        tracing::debug!(value = %value, "Dropping unparseable timestamp");
    }
    parsed
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Actor reference: a plain string, or an object carrying a name or ID.
fn actor(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s),
        Value::Object(object) => match field(object, &["name", "email", "_id", "id"])? {
            Value::String(s) => non_empty(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        },
        _ => None,
    }
}

fn optional_text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    match field(object, keys)? {
        Value::String(s) => non_empty(s),
        _ => None,
    }
}

fn tracking_event(value: &Value) -> Option<TrackingEvent> {
    let Some(object) = value.as_object() else {
        tracing::debug!(value = %value, "Skipping tracking event that is not an object");
        return None;
    };

    let Some(status) = optional_text(object, &["status", "statusKey"]) else {
        tracing::debug!("Skipping tracking event without a status");
        return None;
    };

    Some(TrackingEvent {
        status,
        message: optional_text(object, &["message", "description"]),
        timestamp: field(object, &["timestamp", "createdAt", "date"]).and_then(timestamp),
        location: optional_text(object, &["location"]),
        updated_by: field(object, &["updatedBy", "updated_by"]).and_then(actor),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::timeline::TimelineBuilder;
    use crate::types::{PaymentStatus, ShippingType};

    #[test]
    fn test_envelope_fallback_order() {
        let nested = json!({ "data": { "order": { "id": "A" }, "id": "B" }, "order": { "id": "C" } });
        assert_eq!(order_from_value(&nested).unwrap().id, Some(OrderId::new("A")));

        let order = json!({ "order": { "id": "C" }, "data": { "id": "B" } });
        assert_eq!(order_from_value(&order).unwrap().id, Some(OrderId::new("C")));

        let data = json!({ "data": { "id": "B" }, "id": "D" });
        assert_eq!(order_from_value(&data).unwrap().id, Some(OrderId::new("B")));

        let root = json!({ "id": "D" });
        assert_eq!(order_from_value(&root).unwrap().id, Some(OrderId::new("D")));
    }

    #[test]
    fn test_non_object_envelope_entries_are_skipped() {
        let payload = json!({ "data": "ok", "order": null, "id": "D" });
        assert_eq!(order_from_value(&payload).unwrap().id, Some(OrderId::new("D")));
    }

    #[test]
    fn test_not_an_object() {
        assert!(matches!(
            order_from_value(&json!([1, 2, 3])),
            Err(NormalizeError::NotAnObject)
        ));
    }

    #[test]
    fn test_current_status_preferred_over_status() {
        let payload = json!({ "status": "processing", "currentStatus": "preparing" });
        let order = order_from_value(&payload).unwrap();
        assert_eq!(order.status.as_deref(), Some("preparing"));
    }

    #[test]
    fn test_null_alias_falls_through() {
        let payload = json!({ "currentStatus": null, "status": "delivered" });
        let order = order_from_value(&payload).unwrap();
        assert_eq!(order.status.as_deref(), Some("delivered"));
    }

    #[test]
    fn test_blank_alias_falls_through() {
        for blank in ["", "   "] {
            let payload = json!({ "currentStatus": blank, "status": "delivered" });
            let order = order_from_value(&payload).unwrap();
            assert_eq!(order.status.as_deref(), Some("delivered"));

            let timeline = TimelineBuilder::standard().build(&order.lifecycle());
            assert_eq!(timeline.active_index(), 6);
        }

        let events = json!({
            "status": "preparing",
            "trackingHistory": [{ "status": "", "statusKey": "preparing" }]
        });
        let order = order_from_value(&events).unwrap();
        assert_eq!(order.tracking_history.len(), 1);
        assert_eq!(order.tracking_history[0].status, "preparing");
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let order = order_from_value(&json!({})).unwrap();
        assert_eq!(order.status, None);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.shipping_type, ShippingType::Standard);
        assert!(order.tracking_history.is_empty());
    }

    #[test]
    fn test_numeric_delivery_estimate_is_stringified() {
        let order = order_from_value(&json!({ "deliveryEstimate": 5 })).unwrap();
        assert_eq!(order.delivery_estimate.as_deref(), Some("5"));
    }

    #[test]
    fn test_numeric_status_rejected() {
        let err = order_from_value(&json!({ "status": 3 })).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::InvalidField { field: "status", .. }
        ));
    }

    #[test]
    fn test_history_must_be_array() {
        let err = order_from_value(&json!({ "trackingHistory": { "status": "x" } })).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::InvalidField {
                field: "tracking_history",
                ..
            }
        ));
    }

    #[test]
    fn test_timestamp_formats() {
        let payload = json!({
            "createdAt": "2024-01-10",
            "paidAt": "2024-01-10T09:30:00+02:00",
        });
        let order = order_from_value(&payload).unwrap();
        assert_eq!(
            order.created_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap())
        );
        assert_eq!(
            order.paid_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 10, 7, 30, 0).unwrap())
        );

        let millis = order_from_value(&json!({ "createdAt": 1_704_844_800_000_i64 })).unwrap();
        assert_eq!(
            millis.created_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_bad_timestamp_dropped() {
        let order = order_from_value(&json!({ "createdAt": "last tuesday" })).unwrap();
        assert_eq!(order.created_at, None);
    }

    #[test]
    fn test_tracking_events() {
        let payload = json!({
            "trackingHistory": [
                {
                    "status": "processing",
                    "message": "Order received",
                    "timestamp": "2024-01-10T10:00:00Z",
                    "location": "Lagos Hub",
                    "updatedBy": { "_id": "u1", "name": "Ada" }
                },
                { "message": "no status" },
                "garbage",
                { "status": "preparing", "updatedBy": "system" }
            ]
        });
        let order = order_from_value(&payload).unwrap();
        assert_eq!(order.tracking_history.len(), 2);

        let first = &order.tracking_history[0];
        assert_eq!(first.status, "processing");
        assert_eq!(first.message.as_deref(), Some("Order received"));
        assert_eq!(first.location.as_deref(), Some("Lagos Hub"));
        assert_eq!(first.updated_by.as_deref(), Some("Ada"));
        assert!(first.timestamp.is_some());

        assert_eq!(order.tracking_history[1].updated_by.as_deref(), Some("system"));
    }

    #[test]
    fn test_order_from_str_rejects_bad_json() {
        assert!(matches!(
            order_from_str("{not json"),
            Err(NormalizeError::Json(_))
        ));
    }
}
