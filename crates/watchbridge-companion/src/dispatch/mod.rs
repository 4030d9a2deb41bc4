//! Dispatcher module exports.
//!
//! Re-exports the dispatcher and consumer trait so downstream consumers can
//! depend on this module directly.

pub mod dispatcher;

pub use dispatcher::{AttachmentConsumer, Dispatcher};
