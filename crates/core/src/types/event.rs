//! Tracking events recorded by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A status change recorded against an order.
///
/// Events arrive unordered and sparse: a step may have zero, one or several
/// events, and `status` is not guaranteed to name a canonical step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEvent {
    /// Backend status key this event was recorded for.
    pub status: String,
    /// Free-text description.
    #[serde(default)]
    pub message: Option<String>,
    /// When the event occurred.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Where the event occurred (warehouse, hub, city).
    #[serde(default)]
    pub location: Option<String>,
    /// Actor that recorded the event.
    #[serde(default)]
    pub updated_by: Option<String>,
}

impl TrackingEvent {
    /// Create an event with only a status key.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: None,
            timestamp: None,
            location: None,
            updated_by: None,
        }
    }

    /// Set the event message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the event timestamp.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the event location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}
