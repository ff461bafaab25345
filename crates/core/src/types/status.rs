//! Status enums for orders and their tracking steps.

use serde::{Deserialize, Serialize};

/// Key of a canonical lifecycle step.
///
/// These are the stages a shipped order moves through, in order. Backend
/// statuses outside this set (for example `confirmed`) are mapped onto a step
/// by the [`StepTable`](crate::timeline::StepTable) alias table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKey {
    PendingPayment,
    PaymentCompleted,
    Processing,
    Preparing,
    ReadyForDispatch,
    OutForDelivery,
    Delivered,
}

impl StepKey {
    /// Wire name of the step, as used in order and tracking event statuses.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingPayment => "pending_payment",
            Self::PaymentCompleted => "payment_completed",
            Self::Processing => "processing",
            Self::Preparing => "preparing",
            Self::ReadyForDispatch => "ready_for_dispatch",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
        }
    }
}

impl std::fmt::Display for StepKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StepKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_payment" => Ok(Self::PendingPayment),
            "payment_completed" => Ok(Self::PaymentCompleted),
            "processing" => Ok(Self::Processing),
            "preparing" => Ok(Self::Preparing),
            "ready_for_dispatch" => Ok(Self::ReadyForDispatch),
            "out_for_delivery" => Ok(Self::OutForDelivery),
            "delivered" => Ok(Self::Delivered),
            _ => Err(format!("invalid step key: {s}")),
        }
    }
}

/// Semantic icon tag for a timeline step.
///
/// Chosen per step independently of [`StepKey`] so a renderer can reuse
/// icons across steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconCategory {
    Payment,
    Confirmed,
    Processing,
    Package,
    Shipping,
    Truck,
    Delivered,
}

/// Payment state of an order.
///
/// Unknown backend values are kept verbatim in [`PaymentStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Paid,
    Completed,
    #[default]
    Pending,
    Failed,
    Refunded,
    Other(String),
}

impl PaymentStatus {
    /// Returns `true` when the payment is known to have gone through.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Paid | Self::Completed)
    }

    /// Wire name of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Paid => "paid",
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "paid" => Self::Paid,
            "completed" => Self::Completed,
            "" | "pending" => Self::Pending,
            "failed" => Self::Failed,
            "refunded" => Self::Refunded,
            _ => Self::Other(s.to_owned()),
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Other(raw) => raw,
            other => other.as_str().to_owned(),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shipping speed selected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShippingType {
    SameDay,
    Express,
    #[default]
    Standard,
    Other(String),
}

impl ShippingType {
    /// Wire name of the shipping type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::SameDay => "same_day",
            Self::Express => "express",
            Self::Standard => "standard",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for ShippingType {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "same_day" => Self::SameDay,
            "express" => Self::Express,
            "" | "standard" => Self::Standard,
            _ => Self::Other(s.to_owned()),
        }
    }
}

impl From<String> for ShippingType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ShippingType> for String {
    fn from(shipping: ShippingType) -> Self {
        match shipping {
            ShippingType::Other(raw) => raw,
            other => other.as_str().to_owned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_step_key_roundtrips_through_from_str() {
        for key in [
            StepKey::PendingPayment,
            StepKey::PaymentCompleted,
            StepKey::Processing,
            StepKey::Preparing,
            StepKey::ReadyForDispatch,
            StepKey::OutForDelivery,
            StepKey::Delivered,
        ] {
            assert_eq!(key.as_str().parse::<StepKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_step_key_rejects_alias() {
        assert!("confirmed".parse::<StepKey>().is_err());
    }

    #[test]
    fn test_payment_status_settled() {
        assert!(PaymentStatus::from("paid").is_settled());
        assert!(PaymentStatus::from("COMPLETED").is_settled());
        assert!(!PaymentStatus::from("pending").is_settled());
        assert!(!PaymentStatus::from("authorized").is_settled());
    }

    #[test]
    fn test_payment_status_keeps_unknown_value() {
        let status = PaymentStatus::from("authorized");
        assert_eq!(status, PaymentStatus::Other("authorized".to_string()));
        assert_eq!(String::from(status), "authorized");
    }

    #[test]
    fn test_empty_payment_status_is_pending() {
        assert_eq!(PaymentStatus::from("  "), PaymentStatus::Pending);
    }

    #[test]
    fn test_shipping_type_serde() {
        let shipping: ShippingType = serde_json::from_str("\"same_day\"").unwrap();
        assert_eq!(shipping, ShippingType::SameDay);
        assert_eq!(serde_json::to_string(&shipping).unwrap(), "\"same_day\"");
    }
}
