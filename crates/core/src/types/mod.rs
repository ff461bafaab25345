//! Core types for Trackline.
//!
//! This module provides type-safe wrappers for order tracking concepts.

pub mod event;
pub mod id;
pub mod order;
pub mod status;

pub use event::TrackingEvent;
pub use id::*;
pub use order::{OrderLifecycleState, OrderRecord};
pub use status::*;
