//! Suite runner
//!
//! Drives every case to completion: one request per case, no retries, and
//! strict per-case isolation. A failure of any kind in one case never
//! prevents the remaining cases from executing.

use std::time::{Duration, Instant};

use chrono::Utc;
use url::Url;
use vigil_domain::case::{Case, CaseOutcome};
use vigil_domain::report::RunReport;
use vigil_domain::request::RequestSpec;

use crate::ports::HttpClient;

/// Executes verification cases against a configured base URL.
///
/// Cases run sequentially, each awaited to completion before the next
/// starts. They are independent and side-effect-free against shared state,
/// so this is an attribution choice rather than a correctness requirement.
pub struct RunSuite<C> {
    client: C,
    base_url: Url,
    timeout: Duration,
}

impl<C: HttpClient> RunSuite<C> {
    /// Creates a runner over the given transport.
    pub const fn new(client: C, base_url: Url, timeout: Duration) -> Self {
        Self {
            client,
            base_url,
            timeout,
        }
    }

    /// Runs every case and aggregates the outcomes into a report.
    ///
    /// Never short-circuits: all cases execute regardless of earlier
    /// failures, and nothing here aborts the process.
    pub async fn run(&self, cases: &[Case]) -> RunReport {
        let started_at = Utc::now();
        let run_start = Instant::now();

        let mut outcomes = Vec::with_capacity(cases.len());
        for case in cases {
            let outcome = self.run_case(case).await;
            tracing::debug!(
                case = %outcome.case,
                passed = outcome.passed(),
                status = outcome.status,
                "case finished"
            );
            outcomes.push(outcome);
        }

        RunReport::new(outcomes, started_at, run_start.elapsed())
    }

    /// Executes a single case: resolve the URL, issue the request, evaluate.
    async fn run_case(&self, case: &Case) -> CaseOutcome {
        let url = match self.base_url.join(&case.path) {
            Ok(url) => url,
            Err(err) => {
                return CaseOutcome::transport_failure(
                    case,
                    format!("cannot resolve {:?} against base URL: {err}", case.path),
                );
            }
        };

        let request = RequestSpec::get(url)
            .with_headers(case.headers.clone())
            .with_timeout(self.timeout);

        match self.client.execute(&request).await {
            Ok(response) => CaseOutcome::evaluated(case, &response),
            Err(err) => CaseOutcome::transport_failure(case, err.to_string()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use vigil_domain::case::{FailureKind, Verdict};
    use vigil_domain::response::Response;
    use vigil_domain::suite::{TOKEN_HEADER, dashboard_suite};

    use super::*;
    use crate::ports::HttpClientError;

    const VALID_TOKEN: &str = "token-under-test";

    /// Scripted stand-in for the dashboard server: enforces the credential
    /// contract and serves a configurable accounts body.
    struct FakeDashboard {
        accounts_body: &'static str,
        calls: Mutex<Vec<String>>,
    }

    impl FakeDashboard {
        fn new(accounts_body: &'static str) -> Self {
            Self {
                accounts_body,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn respond(&self, request: &RequestSpec) -> Response {
            let path = Url::parse(&request.url).unwrap().path().to_string();
            self.calls.lock().unwrap().push(path.clone());

            if request.headers.get(TOKEN_HEADER) != Some(VALID_TOKEN) {
                return body_response(401, "{\"error\": \"unauthorized\"}");
            }
            match path.as_str() {
                "/dashboard/" => body_response(200, "{\"status\": \"ok\"}"),
                "/dashboard/accounts" => body_response(200, self.accounts_body),
                "/dashboard/plans" | "/dashboard/explore" => body_response(200, "[]"),
                _ => body_response(404, ""),
            }
        }
    }

    impl HttpClient for FakeDashboard {
        fn execute(
            &self,
            request: &RequestSpec,
        ) -> Pin<Box<dyn Future<Output = Result<Response, HttpClientError>> + Send + '_>> {
            let response = self.respond(request);
            Box::pin(async move { Ok(response) })
        }
    }

    /// Transport that never reaches a server.
    struct Unreachable;

    impl HttpClient for Unreachable {
        fn execute(
            &self,
            _request: &RequestSpec,
        ) -> Pin<Box<dyn Future<Output = Result<Response, HttpClientError>> + Send + '_>> {
            Box::pin(async {
                Err(HttpClientError::ConnectionRefused {
                    host: "localhost".to_string(),
                    port: 5001,
                })
            })
        }
    }

    fn body_response(status: u16, body: &str) -> Response {
        Response::new(
            status,
            HashMap::new(),
            body.as_bytes().to_vec(),
            Duration::from_millis(1),
        )
    }

    fn runner<C: HttpClient>(client: C) -> RunSuite<C> {
        let base = Url::parse("http://dashboard.test").unwrap();
        RunSuite::new(client, base, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn conforming_server_passes_all_six_cases() {
        let runner = runner(FakeDashboard::new("[]"));
        let report = runner.run(&dashboard_suite(VALID_TOKEN)).await;

        assert_eq!(report.total, 6);
        assert_eq!(report.failed, 0);
        assert!(report.all_passed());
    }

    #[tokio::test]
    async fn cases_execute_in_order_one_request_each() {
        // The runner is sequential and retry-free: exactly one request per
        // case, in suite order.
        let runner = runner(FakeDashboard::new("[]"));
        runner.run(&dashboard_suite(VALID_TOKEN)).await;
        let calls = runner.client.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                "/dashboard/",
                "/dashboard/accounts",
                "/dashboard/plans",
                "/dashboard/explore",
                "/dashboard/accounts",
                "/dashboard/accounts",
            ]
        );
    }

    #[tokio::test]
    async fn shape_mismatch_fails_only_the_accounts_case() {
        let runner = runner(FakeDashboard::new("{\"accounts\": []}"));
        let report = runner.run(&dashboard_suite(VALID_TOKEN)).await;

        assert_eq!(report.total, 6);
        assert_eq!(report.failed, 1);
        let failure = report.failures().next().unwrap();
        assert_eq!(failure.case, "accounts");
        assert!(matches!(
            failure.verdict,
            Verdict::Fail {
                kind: FailureKind::Decode,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unreachable_server_reports_transport_failure_per_case() {
        let runner = runner(Unreachable);
        let report = runner.run(&dashboard_suite(VALID_TOKEN)).await;

        // Every case still executes; none is suppressed by earlier failures.
        assert_eq!(report.total, 6);
        assert_eq!(report.failed, 6);
        for outcome in &report.outcomes {
            assert_eq!(outcome.status, None, "{}", outcome.case);
            match &outcome.verdict {
                Verdict::Fail { kind, reason } => {
                    assert_eq!(*kind, FailureKind::Transport);
                    assert_eq!(reason, "connection refused by localhost:5001");
                }
                Verdict::Pass => panic!("unreachable server cannot pass"),
            }
        }
    }

    #[tokio::test]
    async fn reruns_are_idempotent() {
        let cases = dashboard_suite(VALID_TOKEN);
        let first = runner(FakeDashboard::new("[]")).run(&cases).await;
        let second = runner(FakeDashboard::new("[]")).run(&cases).await;
        assert_eq!(first.outcomes, second.outcomes);
    }

    #[tokio::test]
    async fn wrong_credential_cases_see_unauthorized() {
        let runner = runner(FakeDashboard::new("[]"));
        let report = runner.run(&dashboard_suite(VALID_TOKEN)).await;

        for name in ["invalid_token", "missing_token"] {
            let outcome = report.outcomes.iter().find(|o| o.case == name).unwrap();
            assert_eq!(outcome.status, Some(401), "{name}");
            assert!(outcome.passed(), "{name}");
        }
    }
}
