//! Normalized order record and the lifecycle snapshot derived from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OrderId, PaymentStatus, ShippingType, TrackingEvent, TrackingNumber};

/// Order data as consumed by the tracking screen.
///
/// Produced by [`crate::normalize`] from whatever envelope the order service
/// returned. Every field except the tracking history is optional upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// Order identifier.
    pub id: Option<OrderId>,
    /// Carrier tracking number.
    pub tracking_number: Option<TrackingNumber>,
    /// Raw lifecycle status from the order itself.
    pub status: Option<String>,
    /// Payment state.
    #[serde(default)]
    pub payment_status: PaymentStatus,
    /// Shipping speed.
    #[serde(default)]
    pub shipping_type: ShippingType,
    /// Explicit delivery estimate, either a day count or display text.
    pub delivery_estimate: Option<String>,
    /// When the order was placed.
    pub created_at: Option<DateTime<Utc>>,
    /// When payment was captured.
    pub paid_at: Option<DateTime<Utc>>,
    /// Recorded status changes, in storage order.
    #[serde(default)]
    pub tracking_history: Vec<TrackingEvent>,
}

impl OrderRecord {
    /// Status used when the order carries none.
    pub const DEFAULT_STATUS: &'static str = "pending_payment";

    /// Snapshot of the fields the timeline builder needs.
    #[must_use]
    pub fn lifecycle(&self) -> OrderLifecycleState<'_> {
        OrderLifecycleState {
            current_status: self.status.as_deref().unwrap_or(Self::DEFAULT_STATUS),
            payment_status: &self.payment_status,
            events: &self.tracking_history,
            paid_at: self.paid_at,
            created_at: self.created_at,
        }
    }
}

/// Per-order view combining current status, payment state and events.
///
/// Derived fresh from an [`OrderRecord`] on every build; never stored.
#[derive(Debug, Clone, Copy)]
pub struct OrderLifecycleState<'a> {
    /// Authoritative current status key.
    pub current_status: &'a str,
    /// Payment state.
    pub payment_status: &'a PaymentStatus,
    /// Recorded tracking events.
    pub events: &'a [TrackingEvent],
    /// Payment capture time, preferred for a synthesized payment event.
    pub paid_at: Option<DateTime<Utc>>,
    /// Order creation time, fallback for a synthesized payment event.
    pub created_at: Option<DateTime<Utc>>,
}
