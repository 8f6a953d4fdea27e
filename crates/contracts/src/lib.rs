//! Shared contracts between the dashboard frontend and the REST backend.
//!
//! Besides the wire DTOs this crate holds the whole computational core of the
//! dashboards: status normalization, status presentation, budget coercion,
//! the aggregation rollup engine and the cascading filter state machine.
//! Everything in here is pure and synchronous so it can be unit-tested
//! natively, without a browser or a running backend.

pub mod domain;
pub mod enums;
pub mod shared;
pub mod stats;
