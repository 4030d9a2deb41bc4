//! Lightweight in-process metrics.
//!
//! Counters are atomics keyed by label sets and rendered as Prometheus text,
//! so a host process can expose them however it likes.

pub mod metrics;

pub use metrics::{BridgeMetrics, CounterVec};
