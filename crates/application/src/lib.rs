//! Vigil Application - Verification orchestration
//!
//! This crate holds the harness's use cases and the ports they depend on.
//! The [`ports::HttpClient`] trait is the fetch-capability boundary: the
//! same case definitions run against a real transport adapter or a test
//! stub.

pub mod ports;
pub mod use_cases;

pub use ports::{HttpClient, HttpClientError};
pub use use_cases::RunSuite;
