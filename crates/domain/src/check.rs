//! Response expectations
//!
//! Checks are the declarative half of a case: what the response must look
//! like for the case to pass. Status expectations compare status codes
//! exactly or against a range; body shapes constrain the structural type of
//! a decoded JSON body independent of its contents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Expected status code value or range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Range of status codes (inclusive on both ends).
    Range {
        /// Minimum status code.
        min: u16,
        /// Maximum status code.
        max: u16,
    },
    /// One of multiple status codes.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Checks whether a status code satisfies this expectation.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => status >= *min && status <= *max,
            Self::OneOf(codes) => codes.contains(&status),
        }
    }

    /// Describes the expectation for failure messages.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("{code}"),
            Self::Range { min, max } => format!("{min}-{max}"),
            Self::OneOf(codes) => {
                let codes: Vec<_> = codes.iter().map(ToString::to_string).collect();
                format!("one of [{}]", codes.join(", "))
            }
        }
    }

    /// Creates an exact status expectation.
    #[must_use]
    pub const fn exact(code: u16) -> Self {
        Self::Exact(code)
    }

    /// Creates a "success" expectation (200-299).
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }
}

impl Default for StatusExpectation {
    fn default() -> Self {
        Self::success()
    }
}

/// The structural type of a decoded JSON body's top-level value.
///
/// A shape predicate checks only the type, never the contents: an empty
/// array satisfies [`BodyShape::Array`] just as a populated one does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyShape {
    /// An ordered JSON list.
    Array,
    /// A JSON object (mapping).
    Object,
    /// A JSON string.
    String,
    /// A JSON number.
    Number,
    /// A JSON boolean.
    Bool,
    /// JSON null.
    Null,
}

impl BodyShape {
    /// Returns the shape of a decoded JSON value.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
            Value::String(_) => Self::String,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Bool,
            Value::Null => Self::Null,
        }
    }

    /// Checks whether a decoded JSON value has this shape.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        Self::of(value) == self
    }

    /// Returns the shape name used in failure messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Object => "object",
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "boolean",
            Self::Null => "null",
        }
    }
}

impl std::fmt::Display for BodyShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
