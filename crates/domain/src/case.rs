//! Verification cases and their outcomes
//!
//! A [`Case`] is one independent request/assert transaction: a target path,
//! the headers to send, and the checks the response must satisfy. Evaluation
//! is pure; issuing the request is the runner's job.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::check::{BodyShape, StatusExpectation};
use crate::request::Headers;
use crate::response::Response;

/// How a case failed.
///
/// The three kinds are reported distinctly so the operator can tell a server
/// that answered wrongly from one that could not be reached at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A response arrived but its status code did not match.
    Assertion,
    /// The request could not complete (connection, timeout, DNS).
    Transport,
    /// The body could not be decoded as JSON or had the wrong shape.
    Decode,
}

impl FailureKind {
    /// Returns the kind name used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assertion => "assertion",
            Self::Transport => "transport",
            Self::Decode => "decode",
        }
    }
}

/// The result of evaluating a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Verdict {
    /// Every check passed.
    Pass,
    /// A check failed or the request never completed.
    Fail {
        /// The failure classification.
        kind: FailureKind,
        /// Human-readable failure detail.
        reason: String,
    },
}

impl Verdict {
    /// Creates a failing verdict.
    #[must_use]
    pub fn fail(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self::Fail {
            kind,
            reason: reason.into(),
        }
    }

    /// Returns true when the verdict is a pass.
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// One independent request/assert unit.
///
/// Cases share no mutable state; the order they run in must not affect any
/// outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// Short identifier used in reports.
    pub name: String,
    /// What the case verifies.
    pub description: String,
    /// Request path relative to the configured base URL.
    pub path: String,
    /// Headers sent with the request.
    #[serde(default)]
    pub headers: Headers,
    /// Expected response status.
    pub expect_status: StatusExpectation,
    /// Optional constraint on the decoded JSON body's top-level shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_shape: Option<BodyShape>,
}

impl Case {
    /// Creates a case expecting the given exact status.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>, status: u16) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            path: path.into(),
            headers: Headers::new(),
            expect_status: StatusExpectation::exact(status),
            expect_shape: None,
        }
    }

    /// Sets the description (builder form).
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replaces the request headers (builder form).
    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Requires the response body to decode as JSON with the given top-level
    /// shape (builder form).
    #[must_use]
    pub const fn expecting_shape(mut self, shape: BodyShape) -> Self {
        self.expect_shape = Some(shape);
        self
    }

    /// Evaluates a received response against this case's checks.
    ///
    /// The status check runs first; a mismatch is an assertion failure and
    /// the body is not inspected. When the status matches and a shape is
    /// expected, an unparsable body or a wrong top-level type is a decode
    /// failure even though the status matched.
    #[must_use]
    pub fn evaluate(&self, response: &Response) -> Verdict {
        if !self.expect_status.matches(response.status) {
            return Verdict::fail(
                FailureKind::Assertion,
                format!(
                    "expected status {}, got {}",
                    self.expect_status.description(),
                    response.status_code()
                ),
            );
        }

        if let Some(shape) = self.expect_shape {
            let value = match response.body_json() {
                Ok(value) => value,
                Err(err) => {
                    return Verdict::fail(
                        FailureKind::Decode,
                        format!("body is not valid JSON: {err}"),
                    );
                }
            };
            if !shape.matches(&value) {
                return Verdict::fail(
                    FailureKind::Decode,
                    format!(
                        "expected JSON {shape}, got {}",
                        BodyShape::of(&value)
                    ),
                );
            }
        }

        Verdict::Pass
    }
}

/// The recorded outcome of one executed case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseOutcome {
    /// Name of the case.
    pub case: String,
    /// Pass/fail verdict.
    pub verdict: Verdict,
    /// Observed status code, when a response arrived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Time taken by the request, when a response arrived.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_duration_millis")]
    pub duration: Option<Duration>,
}

impl CaseOutcome {
    /// Records the outcome of a case whose response arrived.
    #[must_use]
    pub fn evaluated(case: &Case, response: &Response) -> Self {
        Self {
            case: case.name.clone(),
            verdict: case.evaluate(response),
            status: Some(response.status),
            duration: Some(response.duration),
        }
    }

    /// Records a case whose request never completed.
    ///
    /// The transport error text is surfaced verbatim so the operator sees
    /// the underlying cause.
    #[must_use]
    pub fn transport_failure(case: &Case, error: impl Into<String>) -> Self {
        Self {
            case: case.name.clone(),
            verdict: Verdict::fail(FailureKind::Transport, error),
            status: None,
            duration: None,
        }
    }

    /// Returns true when the case passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.verdict.passed()
    }
}

mod opt_duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            #[allow(clippy::cast_possible_truncation)]
            Some(duration) => serializer.serialize_some(&(duration.as_millis() as u64)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = Option::<u64>::deserialize(deserializer)?;
        Ok(millis.map(Duration::from_millis))
    }
}
