//! Console report rendering
//!
//! Formats a run report for the operator: one line per case, then a
//! summary. Verbose mode adds observed status, timing and failure detail.

use std::fmt::Write as _;

use vigil_domain::case::{CaseOutcome, Verdict};
use vigil_domain::report::RunReport;

/// Renders a run report as the harness's console output.
#[must_use]
pub fn format_report(report: &RunReport, verbose: bool) -> String {
    let mut out = String::new();

    for outcome in &report.outcomes {
        render_case(&mut out, outcome, verbose);
    }

    let _ = writeln!(
        out,
        "{} cases, {} passed, {} failed in {} ms",
        report.total, report.passed, report.failed, report.duration_ms
    );
    if !report.all_passed() {
        let _ = writeln!(out, "result: FAIL ({:.1}% pass rate)", report.pass_rate());
    }

    out
}

fn render_case(out: &mut String, outcome: &CaseOutcome, verbose: bool) {
    match &outcome.verdict {
        Verdict::Pass => {
            if verbose {
                let detail = match (outcome.status, outcome.duration) {
                    (Some(status), Some(duration)) => {
                        format!(" ({status} in {} ms)", duration.as_millis())
                    }
                    (Some(status), None) => format!(" ({status})"),
                    _ => String::new(),
                };
                let _ = writeln!(out, "PASS {}{detail}", outcome.case);
            } else {
                let _ = writeln!(out, "PASS {}", outcome.case);
            }
        }
        Verdict::Fail { kind, reason } => {
            let _ = writeln!(out, "FAIL {} [{}]: {reason}", outcome.case, kind.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use vigil_domain::case::{Case, FailureKind};

    use super::*;

    fn sample_report() -> RunReport {
        let passing = CaseOutcome {
            case: "health".to_string(),
            verdict: Verdict::Pass,
            status: Some(200),
            duration: Some(Duration::from_millis(12)),
        };
        let failing = CaseOutcome::transport_failure(
            &Case::new("plans", "/dashboard/plans", 200),
            "connection refused by localhost:5001",
        );
        RunReport::new(vec![passing, failing], Utc::now(), Duration::from_millis(40))
    }

    #[test]
    fn test_terse_output() {
        let rendered = format_report(&sample_report(), false);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "PASS health",
                "FAIL plans [transport]: connection refused by localhost:5001",
                "2 cases, 1 passed, 1 failed in 40 ms",
                "result: FAIL (50.0% pass rate)",
            ]
        );
    }

    #[test]
    fn test_verbose_output_includes_status_and_timing() {
        let rendered = format_report(&sample_report(), true);
        assert!(rendered.contains("PASS health (200 in 12 ms)"), "{rendered}");
    }

    #[test]
    fn test_all_pass_summary_has_no_fail_line() {
        let passing = CaseOutcome {
            case: "health".to_string(),
            verdict: Verdict::Pass,
            status: Some(200),
            duration: Some(Duration::from_millis(3)),
        };
        let report = RunReport::new(vec![passing], Utc::now(), Duration::from_millis(5));
        let rendered = format_report(&report, false);
        assert!(!rendered.contains("result: FAIL"), "{rendered}");
    }

    #[test]
    fn test_failure_kind_is_visible() {
        let failing = CaseOutcome {
            case: "accounts".to_string(),
            verdict: Verdict::fail(FailureKind::Decode, "expected JSON array, got object"),
            status: Some(200),
            duration: Some(Duration::from_millis(8)),
        };
        let report = RunReport::new(vec![failing], Utc::now(), Duration::from_millis(9));
        let rendered = format_report(&report, false);
        assert!(
            rendered.contains("FAIL accounts [decode]: expected JSON array, got object"),
            "{rendered}"
        );
    }
}
