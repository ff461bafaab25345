//! Trackline Core - Order tracking timeline derivation.
//!
//! This crate turns an already-fetched order payload into the data a tracking
//! screen renders:
//! - a fully populated, ordered timeline of lifecycle steps
//! - an estimated delivery date string
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no persistence. Fetching orders (by ID or tracking number) is the
//! caller's job; this crate only consumes the resolved payload.
//!
//! # Modules
//!
//! - [`types`] - Domain types for orders, payment/shipping status, and tracking events
//! - [`normalize`] - Single normalization point for loosely shaped order payloads
//! - [`timeline`] - Canonical step table, timeline builder, and delivery estimates
//!
//! # Example
//!
//! ```rust
//! use trackline_core::normalize::order_from_value;
//! use trackline_core::timeline::TimelineBuilder;
//!
//! let payload = serde_json::json!({
//!     "data": { "order": { "id": "ORD-1", "status": "processing", "paymentStatus": "paid" } }
//! });
//! let order = order_from_value(&payload).unwrap();
//! let timeline = TimelineBuilder::standard().build(&order.lifecycle());
//!
//! assert_eq!(timeline.active_index(), 2);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod normalize;
pub mod timeline;
pub mod types;

pub use types::*;
