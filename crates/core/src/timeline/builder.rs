//! Timeline reconstruction from sparse tracking events.
//!
//! The builder walks the canonical steps in order, attaches the best matching
//! recorded event to each step, and classifies every step against the active
//! position:
//!
//! ```text
//! index:   0        1        2        3        4        5        6
//!        [done]   [done]  [active] [pending][pending][pending][pending]
//! ```
//!
//! When payment is known to have succeeded but the backend recorded no
//! `payment_completed` event, a stand-in event is synthesized for that step.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::steps::{CanonicalStep, StepTable};
use crate::types::{OrderLifecycleState, StepKey, TrackingEvent};

/// Message attached to a synthesized payment confirmation.
pub const SYNTHESIZED_PAYMENT_MESSAGE: &str = "Payment received and confirmed";

/// How to choose between several events recorded for the same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DuplicatePolicy {
    /// First event in storage order.
    FirstRecorded,
    /// Most recent timestamp. Untimestamped events lose to timestamped ones.
    #[default]
    LatestByTimestamp,
    /// Oldest timestamp. Untimestamped events lose to timestamped ones.
    EarliestByTimestamp,
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstRecorded => write!(f, "first"),
            Self::LatestByTimestamp => write!(f, "latest"),
            Self::EarliestByTimestamp => write!(f, "earliest"),
        }
    }
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" | "first_recorded" => Ok(Self::FirstRecorded),
            "latest" | "latest_by_timestamp" => Ok(Self::LatestByTimestamp),
            "earliest" | "earliest_by_timestamp" => Ok(Self::EarliestByTimestamp),
            _ => Err(format!("invalid duplicate policy: {s}")),
        }
    }
}

/// Classification of a step relative to the active position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Completed,
    Active,
    Pending,
}

impl StepState {
    const fn classify(index: usize, active_index: usize) -> Self {
        if index < active_index {
            Self::Completed
        } else if index == active_index {
            Self::Active
        } else {
            Self::Pending
        }
    }
}

/// Event attached to a timeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchedEvent {
    /// Event recorded by the backend.
    Recorded(TrackingEvent),
    /// Event fabricated to fill a gap the backend left.
    Synthesized(TrackingEvent),
}

impl MatchedEvent {
    /// The underlying event.
    #[must_use]
    pub const fn event(&self) -> &TrackingEvent {
        match self {
            Self::Recorded(event) | Self::Synthesized(event) => event,
        }
    }

    /// Returns `true` if the event was fabricated.
    #[must_use]
    pub const fn is_synthesized(&self) -> bool {
        matches!(self, Self::Synthesized(_))
    }
}

/// A canonical step enriched with its event and state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineStep {
    /// The canonical step.
    pub step: CanonicalStep,
    /// Best available event, if any.
    pub event: Option<MatchedEvent>,
    /// Position relative to the active step.
    pub state: StepState,
}

impl TimelineStep {
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.state, StepState::Completed)
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, StepState::Active)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.state, StepState::Pending)
    }

    /// The attached event, recorded or synthesized.
    #[must_use]
    pub fn matched_event(&self) -> Option<&TrackingEvent> {
        self.event.as_ref().map(MatchedEvent::event)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimelineStepWire<'a> {
    #[serde(flatten)]
    step: &'a CanonicalStep,
    matched_event: Option<&'a TrackingEvent>,
    synthesized: bool,
    is_completed: bool,
    is_active: bool,
    is_pending: bool,
}

impl Serialize for TimelineStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TimelineStepWire {
            step: &self.step,
            matched_event: self.matched_event(),
            synthesized: self.event.as_ref().is_some_and(MatchedEvent::is_synthesized),
            is_completed: self.is_completed(),
            is_active: self.is_active(),
            is_pending: self.is_pending(),
        }
        .serialize(serializer)
    }
}

/// Fully populated, ordered timeline for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    steps: Vec<TimelineStep>,
    active_index: usize,
}

impl Timeline {
    /// Steps in canonical order.
    #[must_use]
    pub fn steps(&self) -> &[TimelineStep] {
        &self.steps
    }

    /// Resolved active position.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active_index
    }

    /// The active step.
    #[must_use]
    pub fn active_step(&self) -> Option<&TimelineStep> {
        self.steps.get(self.active_index)
    }

    /// Number of completed steps.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_completed()).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimelineStep> {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineStep;
    type IntoIter = std::slice::Iter<'a, TimelineStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Builds [`Timeline`]s against a fixed [`StepTable`].
///
/// Building is pure: identical inputs always yield identical timelines.
#[derive(Debug, Clone, Default)]
pub struct TimelineBuilder {
    table: StepTable,
    duplicates: DuplicatePolicy,
}

impl TimelineBuilder {
    /// Create a builder over a validated table.
    #[must_use]
    pub fn new(table: StepTable) -> Self {
        Self {
            table,
            duplicates: DuplicatePolicy::default(),
        }
    }

    /// Builder over [`StepTable::standard`].
    #[must_use]
    pub fn standard() -> Self {
        Self::new(StepTable::standard())
    }

    /// Set how duplicate events for one step are resolved.
    #[must_use]
    pub const fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// The step table.
    #[must_use]
    pub const fn table(&self) -> &StepTable {
        &self.table
    }

    /// The duplicate policy.
    #[must_use]
    pub const fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// Position of the order's current step.
    ///
    /// An order still marked `pending_payment` whose payment has settled is
    /// placed on `payment_completed`: the payment provider confirms before the
    /// order service advances the status.
    #[must_use]
    pub fn resolve_active_index(&self, state: &OrderLifecycleState<'_>) -> usize {
        if state.payment_status.is_settled()
            && state.current_status == StepKey::PendingPayment.as_str()
        {
            if let Some(index) = self.table.index_of(StepKey::PaymentCompleted) {
                tracing::debug!(
                    payment_status = %state.payment_status,
                    "Payment settled before status advanced, using payment_completed"
                );
                return index;
            }
        }

        self.table.resolve_index(state.current_status)
    }

    /// Build the timeline for one order.
    #[must_use]
    pub fn build(&self, state: &OrderLifecycleState<'_>) -> Timeline {
        let active_index = self.resolve_active_index(state);

        let steps = self
            .table
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| TimelineStep {
                step: *step,
                event: self.match_event(step, state),
                state: StepState::classify(index, active_index),
            })
            .collect();

        Timeline {
            steps,
            active_index,
        }
    }

    fn match_event(
        &self,
        step: &CanonicalStep,
        state: &OrderLifecycleState<'_>,
    ) -> Option<MatchedEvent> {
        if let Some(event) = self.select_event(state.events, step.key.as_str()) {
            return Some(MatchedEvent::Recorded(event.clone()));
        }

        if step.key == StepKey::PaymentCompleted && state.payment_status.is_settled() {
            tracing::debug!("No payment_completed event recorded, synthesizing one");
            return Some(MatchedEvent::Synthesized(synthesize_payment_event(
                state.paid_at.or(state.created_at),
            )));
        }

        None
    }

    fn select_event<'e>(&self, events: &'e [TrackingEvent], key: &str) -> Option<&'e TrackingEvent> {
        let mut matching = events.iter().filter(|e| e.status == key);

        match self.duplicates {
            DuplicatePolicy::FirstRecorded => matching.next(),
            DuplicatePolicy::LatestByTimestamp => matching.fold(None, |best, event| match best {
                Some(current) if event.timestamp <= current.timestamp => Some(current),
                _ => Some(event),
            }),
            DuplicatePolicy::EarliestByTimestamp => {
                matching.fold(None, |best, event| match (best, event.timestamp) {
                    (None, _) => Some(event),
                    (Some(current), Some(ts)) if current.timestamp.is_none_or(|c| ts < c) => {
                        Some(event)
                    }
                    (current, _) => current,
                })
            }
        }
    }
}

fn synthesize_payment_event(timestamp: Option<DateTime<Utc>>) -> TrackingEvent {
    TrackingEvent {
        status: StepKey::PaymentCompleted.as_str().to_owned(),
        message: Some(SYNTHESIZED_PAYMENT_MESSAGE.to_owned()),
        timestamp,
        location: None,
        updated_by: None,
    }
}
