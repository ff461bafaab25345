//! Estimated delivery date derivation.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeDelta, Utc};

use crate::types::{OrderRecord, ShippingType};

/// Long-form date format, e.g. "Thursday, January 11, 2024".
pub const LONG_DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// Text shown for same-day orders without an explicit estimate.
pub const ARRIVES_TODAY: &str = "Arrives Today";

/// Substrings marking an estimate that is already display text.
const RELATIVE_MARKERS: [&str; 3] = ["Today", "Business Day", "Arrives"];

const EXPRESS_DAYS: i64 = 1;
const STANDARD_DAYS: i64 = 3;

/// Derives the delivery estimate string shown on the tracking screen.
///
/// Calendar arithmetic happens in the configured UTC offset, so an order
/// created late in the evening counts from the customer's local date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryEstimator {
    offset: FixedOffset,
}

impl DeliveryEstimator {
    /// Estimator working in the given offset.
    #[must_use]
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Estimator working in UTC.
    #[must_use]
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// Offset used for calendar arithmetic.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Estimate for an order.
    ///
    /// In order of precedence:
    /// 1. An explicit estimate that is already display text is returned
    ///    verbatim, surrounding whitespace included.
    /// 2. An explicit non-negative integer estimate is a day count after
    ///    order creation.
    /// 3. Any other explicit estimate, negative day counts included, is
    ///    returned verbatim.
    /// 4. Without an estimate, same-day orders "Arrive Today", express orders
    ///    take one day and everything else three.
    ///
    /// Returns `None` when a date is needed but the order has no creation
    /// time, or the arithmetic overflows.
    #[must_use]
    pub fn estimate(&self, order: &OrderRecord) -> Option<String> {
        let explicit = order
            .delivery_estimate
            .as_deref()
            .filter(|s| !s.trim().is_empty());

        if let Some(raw) = explicit {
            let text = raw.trim();
            if RELATIVE_MARKERS.iter().any(|marker| text.contains(marker)) {
                return Some(raw.to_owned());
            }
            return match text.parse::<i64>() {
                Ok(days) if days >= 0 => self.days_after(order.created_at, days),
                _ => {
                    tracing::debug!(estimate = raw, "Passing through unrecognized delivery estimate");
                    Some(raw.to_owned())
                }
            };
        }

        match order.shipping_type {
            ShippingType::SameDay => Some(ARRIVES_TODAY.to_owned()),
            ShippingType::Express => self.days_after(order.created_at, EXPRESS_DAYS),
            ShippingType::Standard | ShippingType::Other(_) => {
                self.days_after(order.created_at, STANDARD_DAYS)
            }
        }
    }

    fn days_after(&self, created_at: Option<DateTime<Utc>>, days: i64) -> Option<String> {
        let created = created_at?.with_timezone(&self.offset).date_naive();
        let delta = TimeDelta::try_days(days)?;
        created.checked_add_signed(delta).map(format_long_date)
    }
}

impl Default for DeliveryEstimator {
    fn default() -> Self {
        Self::utc()
    }
}

/// Format a calendar date in long form.
#[must_use]
pub fn format_long_date(date: NaiveDate) -> String {
    date.format(LONG_DATE_FORMAT).to_string()
}
