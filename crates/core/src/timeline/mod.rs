//! Tracking timeline derivation.
//!
//! - [`steps`] - The canonical step table and status lookup
//! - [`builder`] - Maps sparse tracking events onto the canonical steps
//! - [`estimate`] - Delivery estimate text

pub mod builder;
pub mod estimate;
pub mod steps;

use serde::Serialize;

pub use builder::{
    DuplicatePolicy, MatchedEvent, SYNTHESIZED_PAYMENT_MESSAGE, StepState, Timeline,
    TimelineBuilder, TimelineStep,
};
pub use estimate::{DeliveryEstimator, format_long_date};
pub use steps::{CanonicalStep, StepTable, StepTableError};

use crate::types::{OrderId, OrderRecord, TrackingNumber};

/// Everything the tracking screen renders for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingSummary {
    pub order_id: Option<OrderId>,
    pub tracking_number: Option<TrackingNumber>,
    pub timeline: Timeline,
    pub estimated_delivery: Option<String>,
}

impl TrackingSummary {
    /// Derive the timeline and delivery estimate for an order.
    #[must_use]
    pub fn build(
        builder: &TimelineBuilder,
        estimator: &DeliveryEstimator,
        order: &OrderRecord,
    ) -> Self {
        Self {
            order_id: order.id.clone(),
            tracking_number: order.tracking_number.clone(),
            timeline: builder.build(&order.lifecycle()),
            estimated_delivery: estimator.estimate(order),
        }
    }
}
