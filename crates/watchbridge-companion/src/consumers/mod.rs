//! Built-in consumers.

pub mod json_lines;

pub use json_lines::JsonLinesConsumer;
