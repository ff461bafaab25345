//! `trackline estimate` - print the estimated delivery date for an order.

use std::io::Write;

use chrono::FixedOffset;
use trackline_core::OrderRecord;
use trackline_core::timeline::DeliveryEstimator;

use crate::error::Result;

/// Write the delivery estimate, or `unavailable` if none can be derived.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn run(order: &OrderRecord, offset: FixedOffset, out: &mut impl Write) -> Result<()> {
    let estimate = DeliveryEstimator::new(offset).estimate(order);
    if estimate.is_none() {
        tracing::warn!(
            shipping_type = order.shipping_type.as_str(),
            "No delivery estimate and no creation date to derive one from"
        );
    }
    writeln!(out, "{}", estimate.as_deref().unwrap_or("unavailable"))?;
    Ok(())
}
