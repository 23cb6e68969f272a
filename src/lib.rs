// ABOUTME: Library root for slipway - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod artifact;
pub mod client;
pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod types;
