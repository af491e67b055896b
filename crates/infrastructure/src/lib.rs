//! Vigil Infrastructure - Transport and configuration adapters
//!
//! Implementations of the application layer's ports against real external
//! systems: a reqwest-backed HTTP client and environment-resolved harness
//! configuration.

pub mod adapters;
pub mod config;

pub use adapters::ReqwestHttpClient;
pub use config::{ApiToken, ConfigError, HarnessConfig};
