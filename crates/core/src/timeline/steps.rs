//! Canonical lifecycle steps and the status lookup table.

use serde::Serialize;
use thiserror::Error;

use crate::types::{IconCategory, StepKey};

/// One fixed stage of the idealized order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanonicalStep {
    /// Step identifier.
    #[serde(rename = "statusKey")]
    pub key: StepKey,
    /// Human-readable name.
    #[serde(rename = "displayLabel")]
    pub label: &'static str,
    /// Icon tag for renderers.
    #[serde(rename = "iconCategory")]
    pub icon: IconCategory,
}

impl CanonicalStep {
    /// Create a step.
    #[must_use]
    pub const fn new(key: StepKey, label: &'static str, icon: IconCategory) -> Self {
        Self { key, label, icon }
    }
}

const STANDARD_STEPS: [CanonicalStep; 7] = [
    CanonicalStep::new(
        StepKey::PendingPayment,
        "Pending Payment",
        IconCategory::Payment,
    ),
    CanonicalStep::new(
        StepKey::PaymentCompleted,
        "Payment Completed",
        IconCategory::Confirmed,
    ),
    CanonicalStep::new(StepKey::Processing, "Processing", IconCategory::Processing),
    CanonicalStep::new(StepKey::Preparing, "Preparing", IconCategory::Package),
    CanonicalStep::new(
        StepKey::ReadyForDispatch,
        "Ready for Dispatch",
        IconCategory::Shipping,
    ),
    CanonicalStep::new(
        StepKey::OutForDelivery,
        "Out for Delivery",
        IconCategory::Truck,
    ),
    CanonicalStep::new(StepKey::Delivered, "Delivered", IconCategory::Delivered),
];

/// Backend statuses that share a position with a canonical step.
const STANDARD_ALIASES: [(&str, usize); 1] = [("confirmed", 2)];

/// Errors found while validating a [`StepTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepTableError {
    /// The table has no steps.
    #[error("step table must contain at least one step")]
    Empty,
    /// A step key appears more than once.
    #[error("step key {0} appears more than once")]
    DuplicateKey(StepKey),
    /// An alias points past the end of the table.
    #[error("alias {alias} points at position {index}, but the table has {len} steps")]
    AliasOutOfRange {
        /// Alias status.
        alias: String,
        /// Target position.
        index: usize,
        /// Number of steps.
        len: usize,
    },
    /// An alias shadows a canonical key.
    #[error("alias {0} shadows a canonical step key")]
    AliasShadowsStep(String),
    /// The table has no payment-completed step to synthesize events for.
    #[error("step table has no payment_completed step")]
    MissingPaymentStep,
}

/// Ordered canonical steps plus the status-to-position lookup.
///
/// Immutable once built. Position in the table is the only ranking key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTable {
    steps: Vec<CanonicalStep>,
    aliases: Vec<(String, usize)>,
}

impl StepTable {
    /// Build and validate a custom table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty, repeats a step key, has an
    /// alias that is out of range or shadows a step key, or lacks a
    /// `payment_completed` step.
    pub fn new(
        steps: Vec<CanonicalStep>,
        aliases: Vec<(String, usize)>,
    ) -> Result<Self, StepTableError> {
        let table = Self { steps, aliases };
        table.validate()?;
        Ok(table)
    }

    /// The seven-step table used by the tracking screen.
    ///
    /// `confirmed` resolves to the same position as `processing`.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            steps: STANDARD_STEPS.to_vec(),
            aliases: STANDARD_ALIASES
                .iter()
                .map(|(alias, index)| ((*alias).to_owned(), *index))
                .collect(),
        }
    }

    /// Check the table invariants.
    ///
    /// # Errors
    ///
    /// See [`StepTable::new`].
    pub fn validate(&self) -> Result<(), StepTableError> {
        if self.steps.is_empty() {
            return Err(StepTableError::Empty);
        }

        for (i, step) in self.steps.iter().enumerate() {
            if self.steps.iter().skip(i + 1).any(|s| s.key == step.key) {
                return Err(StepTableError::DuplicateKey(step.key));
            }
        }

        for (alias, index) in &self.aliases {
            if *index >= self.steps.len() {
                return Err(StepTableError::AliasOutOfRange {
                    alias: alias.clone(),
                    index: *index,
                    len: self.steps.len(),
                });
            }
            if self.steps.iter().any(|s| s.key.as_str() == alias) {
                return Err(StepTableError::AliasShadowsStep(alias.clone()));
            }
        }

        if self.index_of(StepKey::PaymentCompleted).is_none() {
            return Err(StepTableError::MissingPaymentStep);
        }

        Ok(())
    }

    /// Steps in order.
    #[must_use]
    pub fn steps(&self) -> &[CanonicalStep] {
        &self.steps
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if the table has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Position of a canonical step.
    #[must_use]
    pub fn index_of(&self, key: StepKey) -> Option<usize> {
        self.steps.iter().position(|s| s.key == key)
    }

    /// Map a backend status onto a table position.
    ///
    /// Canonical keys are checked first, then aliases. Anything else falls
    /// back to the first step.
    #[must_use]
    pub fn resolve_index(&self, status: &str) -> usize {
        if let Some(index) = self.steps.iter().position(|s| s.key.as_str() == status) {
            return index;
        }

        if let Some((_, index)) = self.aliases.iter().find(|(alias, _)| alias == status) {
            return *index;
        }

        tracing::debug!(status, "Unknown order status, falling back to first step");
        0
    }
}

impl Default for StepTable {
    fn default() -> Self {
        Self::standard()
    }
}
