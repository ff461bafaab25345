//! Integration tests for Trackline.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p trackline-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `order_timelines` - Raw order payloads through normalization to timelines
//! - `delivery_estimates` - Delivery estimate derivation from raw payloads
//!
//! Shared fixtures live here so both suites build payloads the same way.

use serde_json::{Value, json};
use trackline_core::OrderRecord;
use trackline_core::normalize::order_from_value;
use trackline_core::timeline::{Timeline, TimelineBuilder};

/// Wrap an order object the way the order-by-ID endpoint does.
#[must_use]
pub fn by_id_response(order: Value) -> Value {
    json!({ "success": true, "data": { "order": order } })
}

/// Wrap an order object the way the order-by-tracking-number endpoint does.
#[must_use]
pub fn by_tracking_number_response(order: Value) -> Value {
    json!({ "success": true, "data": order })
}

/// Normalize a payload, panicking with the error on failure.
///
/// # Panics
///
/// Panics if the payload cannot be normalized.
#[must_use]
pub fn normalized(payload: &Value) -> OrderRecord {
    match order_from_value(payload) {
        Ok(order) => order,
        Err(e) => panic!("fixture payload should normalize: {e}"),
    }
}

/// Build a timeline with the standard builder.
#[must_use]
pub fn timeline_for(payload: &Value) -> Timeline {
    TimelineBuilder::standard().build(&normalized(payload).lifecycle())
}
