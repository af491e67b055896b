//! Built-in dashboard verification suite
//!
//! The six cases the harness runs against a dashboard deployment: four
//! authenticated reads and two credential-rejection checks. The suite is
//! plain data; it can be executed through any transport implementation.

use crate::case::Case;
use crate::check::BodyShape;
use crate::request::{Header, Headers};

/// Header carrying the caller's credential.
pub const TOKEN_HEADER: &str = "api-token";

/// A well-formed credential guaranteed not to match any issued token.
pub const INVALID_TOKEN: &str = "invalid";

/// Builds the six dashboard verification cases.
///
/// `token` is the valid credential sent on the authenticated cases. Cases
/// are returned in canonical order, but each is independent: outcomes must
/// not change under reordering.
#[must_use]
pub fn dashboard_suite(token: &str) -> Vec<Case> {
    vec![
        Case::new("health", "/dashboard/", 200)
            .describe("API health endpoint answers an authenticated probe")
            .with_headers(credential(token)),
        Case::new("accounts", "/dashboard/accounts", 200)
            .describe("accounts listing returns a JSON array")
            .with_headers(credential(token))
            .expecting_shape(BodyShape::Array),
        Case::new("plans", "/dashboard/plans", 200)
            .describe("plans listing answers an authenticated probe")
            .with_headers(credential(token)),
        Case::new("explore", "/dashboard/explore", 200)
            .describe("explore listing answers an authenticated probe")
            .with_headers(credential(token)),
        Case::new("invalid_token", "/dashboard/accounts", 401)
            .describe("a well-formed but wrong credential is rejected")
            .with_headers(credential(INVALID_TOKEN)),
        Case::new("missing_token", "/dashboard/accounts", 401)
            .describe("a request without any credential is rejected"),
    ]
}

/// Builds the credential header set for one case.
fn credential(token: &str) -> Headers {
    // TOKEN_HEADER is a valid field name, so construction cannot fail.
    Header::sensitive(TOKEN_HEADER, token)
        .map(|header| Headers::new().with(header))
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::check::StatusExpectation;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_suite_has_six_cases() {
        assert_eq!(dashboard_suite("t").len(), 6);
    }

    #[test]
    fn test_authenticated_cases_carry_the_token() {
        let cases = dashboard_suite("sekrit");
        for name in ["health", "accounts", "plans", "explore"] {
            let case = cases.iter().find(|c| c.name == name).unwrap();
            assert_eq!(case.headers.get(TOKEN_HEADER), Some("sekrit"), "{name}");
        }
    }

    #[test]
    fn test_invalid_token_case_sends_the_invalid_literal() {
        let cases = dashboard_suite("sekrit");
        let case = cases.iter().find(|c| c.name == "invalid_token").unwrap();
        assert_eq!(case.headers.get(TOKEN_HEADER), Some(INVALID_TOKEN));
        assert_eq!(case.expect_status, StatusExpectation::exact(401));
    }

    #[test]
    fn test_missing_token_case_sends_no_headers() {
        let cases = dashboard_suite("sekrit");
        let case = cases.iter().find(|c| c.name == "missing_token").unwrap();
        assert!(case.headers.is_empty());
        assert_eq!(case.expect_status, StatusExpectation::exact(401));
    }

    #[test]
    fn test_only_accounts_checks_body_shape() {
        let cases = dashboard_suite("t");
        for case in &cases {
            if case.name == "accounts" {
                assert_eq!(case.expect_shape, Some(BodyShape::Array));
            } else {
                assert_eq!(case.expect_shape, None, "{}", case.name);
            }
        }
    }

    #[test]
    fn test_rejection_cases_target_accounts() {
        let cases = dashboard_suite("t");
        for name in ["invalid_token", "missing_token"] {
            let case = cases.iter().find(|c| c.name == name).unwrap();
            assert_eq!(case.path, "/dashboard/accounts", "{name}");
        }
    }
}
