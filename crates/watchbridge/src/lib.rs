//! Top-level facade crate for watchbridge.
//!
//! Re-exports the attachment model and the receiver so users can depend on a single crate.

pub mod core {
    pub use watchbridge_core::*;
}

pub mod companion {
    pub use watchbridge_companion::*;
}
