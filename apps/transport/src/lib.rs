//! # Transport Library
//!
//! This library exposes the CLI command functions for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;

// Re-export transport_core for convenience
pub use transport_core;
