//! Vigil Domain - Core verification types
//!
//! This crate defines the domain model for the Vigil endpoint verifier.
//! All types here are pure Rust with no I/O dependencies: a [`case::Case`]
//! describes one request/assert transaction, [`check`] holds the expectation
//! types evaluated against a [`response::Response`], and [`report`] aggregates
//! per-case outcomes into a run summary.

pub mod case;
pub mod check;
pub mod error;
pub mod report;
pub mod request;
pub mod response;
pub mod suite;

pub use case::{Case, CaseOutcome, FailureKind, Verdict};
pub use check::{BodyShape, StatusExpectation};
pub use error::{DomainError, DomainResult};
pub use report::RunReport;
pub use request::{Header, Headers, HttpMethod, RequestSpec};
pub use response::{Response, StatusCode};
pub use suite::{INVALID_TOKEN, TOKEN_HEADER, dashboard_suite};
