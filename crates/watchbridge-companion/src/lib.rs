//! watchbridge companion: the receiving side of the attachment bridge.
//!
//! This crate wires the core codec into something a watch-side process can
//! run: strict config, a registry built from it, a skip/fail batch policy,
//! consumer dispatch for the presentation layer, and counters. It is consumed
//! by the `watchbridge-decode` binary and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod batch;
pub mod config;
pub mod consumers;
pub mod dispatch;
pub mod error;
pub mod obs;
pub mod receiver;

pub use error::{BridgeError, Result};
pub use receiver::{ReceiveReport, Receiver};
