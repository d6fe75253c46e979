use chrono::{NaiveDateTime, TimeDelta};
use std::fmt;

/// Immutable per-cycle counters, appended once on every cycle completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleResult {
    pub number: usize,
    pub ok_count: usize,
    pub fail_count: usize,
}

/// What closed a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleTrigger {
    /// Direct OK on the last item wrapped the index to 0
    NormalCompletion,
    /// Fail-overlap resolution wrapped the index
    AfterFailNext,
    /// Fail-overlap jumped back to item 0 before confirming it
    WrapBeforeNextOk,
    /// Fail-overlap target lost its gating and was stepped over
    ParentNotMatched,
    EndOfLog,
}

impl fmt::Display for CycleTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::NormalCompletion => "normal completion",
            Self::AfterFailNext => "after handling fail-next",
            Self::WrapBeforeNextOk => "wrap-around before next OK",
            Self::ParentNotMatched => "parent not matched for next OK",
            Self::EndOfLog => "end of log",
        };
        f.write_str(tag)
    }
}

/// Everything reported about a completed cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleSummary {
    pub result: CycleResult,
    pub started: Option<NaiveDateTime>,
    pub ended: Option<NaiveDateTime>,
    pub trigger: CycleTrigger,
}

impl CycleSummary {
    /// `ended - started` when both timestamps were seen during the cycle.
    pub fn elapsed(&self) -> Option<TimeDelta> {
        Some(self.ended? - self.started?)
    }

    /// Elapsed time as `minutes:seconds`, or `0` when unknown or not positive.
    pub fn elapsed_display(&self) -> String {
        match self.elapsed() {
            Some(delta) if delta > TimeDelta::zero() => {
                let secs = delta.num_seconds();
                format!("{}:{:02}", secs / 60, secs % 60)
            }
            _ => "0".to_string(),
        }
    }
}
