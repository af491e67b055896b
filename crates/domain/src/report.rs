//! Run reports
//!
//! A [`RunReport`] is the consolidated summary of one harness run: every
//! case outcome, pass/fail counts and timing. Reports aggregate; they never
//! suppress an outcome.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::case::CaseOutcome;

/// Consolidated results of one verification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique run identifier (sortable, time-ordered).
    pub id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Per-case outcomes in execution order.
    pub outcomes: Vec<CaseOutcome>,
    /// Total number of cases executed.
    pub total: usize,
    /// Number of cases that passed.
    pub passed: usize,
    /// Number of cases that failed.
    pub failed: usize,
    /// Wall-clock duration of the whole run in milliseconds.
    pub duration_ms: u64,
}

impl RunReport {
    /// Builds a report from executed case outcomes.
    #[must_use]
    pub fn new(outcomes: Vec<CaseOutcome>, started_at: DateTime<Utc>, duration: Duration) -> Self {
        let total = outcomes.len();
        let passed = outcomes.iter().filter(|o| o.passed()).count();
        let failed = total - passed;

        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = duration.as_millis() as u64;

        Self {
            id: Uuid::now_v7(),
            started_at,
            outcomes,
            total,
            passed,
            failed,
            duration_ms,
        }
    }

    /// Returns true when every case passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Returns the pass rate as a percentage.
    #[must_use]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            {
                (self.passed as f64 / self.total as f64) * 100.0
            }
        }
    }

    /// Returns the outcomes of failed cases.
    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }
}
