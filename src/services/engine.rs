use crate::models::{Checklist, CycleResult, CycleSummary, CycleTrigger};
use crate::services::timestamp::TimestampExtractor;
use chrono::NaiveDateTime;
use std::collections::HashSet;

/// Structured outcome of feeding a line to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckEvent {
    /// Item `index` was confirmed by `line`
    Ok {
        index: usize,
        pattern: String,
        line_no: usize,
        line: String,
    },

    /// Item `index` failed; counted in the current cycle
    Fail { index: usize, reason: FailReason },

    CycleComplete(CycleSummary),
}

/// Why an item was marked failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailReason {
    /// A later item matched on `line_no` first
    Skipped { line_no: usize },

    /// A pattern matched but so did an exclusion
    UnexpectedMatch {
        not_pattern: String,
        line_no: usize,
        line: String,
    },

    /// Still outstanding when the log ended
    MissingAtEndOfLog,
}

/// Checklist-matching state machine.
///
/// Consumes log lines strictly in order and reports what happened as
/// [`CheckEvent`]s. The engine never formats output; see
/// [`ReportSink`](crate::services::ReportSink) for that.
///
/// # Invariants
///
/// - For a non-empty checklist, `current_index` is always in `0..len`
/// - `ok_count`, `fail_count`, timestamps and the matched set are reset
///   together whenever a cycle completes
/// - A sub item only produces events once its parent was confirmed in the
///   same cycle
pub struct CycleEngine<'a> {
    checklist: &'a Checklist,
    timestamps: TimestampExtractor,

    current_index: usize,
    ok_count: usize,
    fail_count: usize,
    cycle_count: usize,
    cycle_start: Option<NaiveDateTime>,
    cycle_end: Option<NaiveDateTime>,

    /// Items confirmed OK in the current cycle
    matched: HashSet<usize>,

    results: Vec<CycleResult>,
}

impl<'a> CycleEngine<'a> {
    pub fn new(checklist: &'a Checklist) -> Self {
        Self {
            checklist,
            timestamps: TimestampExtractor::new(),
            current_index: 0,
            ok_count: 0,
            fail_count: 0,
            cycle_count: 0,
            cycle_start: None,
            cycle_end: None,
            matched: HashSet::new(),
            results: Vec::new(),
        }
    }

    /// Feed one log line (1-based `line_no`), extracting its timestamp.
    pub fn process_line(&mut self, line_no: usize, line: &str) -> Vec<CheckEvent> {
        let timestamp = self.timestamps.extract(line);
        self.process_line_at(line_no, line, timestamp)
    }

    /// Feed one log line with an already-known timestamp.
    pub fn process_line_at(
        &mut self,
        line_no: usize,
        line: &str,
        timestamp: Option<NaiveDateTime>,
    ) -> Vec<CheckEvent> {
        let mut events = Vec::new();
        if self.checklist.is_empty() {
            return events;
        }

        if let Some(target) = self.find_fail_next(line) {
            self.handle_fail_next(target, line_no, line, timestamp, &mut events);
        } else {
            self.match_current(line_no, line, timestamp, &mut events);
        }

        events
    }

    /// Close the log: fail everything still outstanding in an open cycle.
    ///
    /// A log that ends exactly on a cycle boundary produces no events.
    pub fn finish(&mut self) -> Vec<CheckEvent> {
        let mut events = Vec::new();
        if self.current_index == 0 {
            return events;
        }

        for index in self.current_index..self.checklist.len() {
            if self.is_eligible(index) {
                self.fail(index, FailReason::MissingAtEndOfLog, &mut events);
            }
        }
        self.complete_cycle(CycleTrigger::EndOfLog, &mut events);

        events
    }

    /// Gating predicate: main items are always eligible, sub items only
    /// once their parent was confirmed in this cycle.
    /// Out-of-range indexes are never eligible.
    pub fn is_eligible(&self, index: usize) -> bool {
        let Some(item) = self.checklist.get(index) else {
            return false;
        };
        if !item.is_sub {
            return true;
        }
        item.parent.is_some_and(|parent| self.matched.contains(&parent))
    }

    pub fn checklist(&self) -> &'a Checklist {
        self.checklist
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn ok_count(&self) -> usize {
        self.ok_count
    }

    pub fn fail_count(&self) -> usize {
        self.fail_count
    }

    pub fn cycle_count(&self) -> usize {
        self.cycle_count
    }

    /// Completed cycles, oldest first.
    pub fn results(&self) -> &[CycleResult] {
        &self.results
    }

    /// Look past the current item for a later one (or item 0) that this
    /// line confirms. Never runs at the start of a cycle.
    fn find_fail_next(&self, line: &str) -> Option<usize> {
        if self.current_index == 0 {
            return None;
        }

        (self.current_index + 1..self.checklist.len())
            .chain(std::iter::once(0))
            .filter(|&index| self.is_eligible(index))
            .find(|&index| self.checklist[index].accepts(line).is_some())
    }

    fn handle_fail_next(
        &mut self,
        target: usize,
        line_no: usize,
        line: &str,
        timestamp: Option<NaiveDateTime>,
        events: &mut Vec<CheckEvent>,
    ) {
        let checklist = self.checklist;
        let len = checklist.len();
        let start = self.current_index;

        let skipped: Vec<usize> = if start < target {
            (start..target).collect()
        } else {
            (start..len).chain(0..target).collect()
        };
        tracing::debug!(
            "Line {} matches item {} while waiting on item {}",
            line_no,
            target,
            start
        );

        for index in skipped {
            if self.is_eligible(index) {
                self.fail(index, FailReason::Skipped { line_no }, events);
            }
        }

        if target < start {
            self.complete_cycle(CycleTrigger::WrapBeforeNextOk, events);
        }

        let next = (target + 1) % len;
        if !self.is_eligible(target) {
            self.advance_to(next, CycleTrigger::ParentNotMatched, events);
            return;
        }

        self.touch_cycle_time(timestamp);

        let item = &checklist[target];
        if let Some(not_pattern) = item.excluded_by(line) {
            self.fail(
                target,
                FailReason::UnexpectedMatch {
                    not_pattern: not_pattern.as_str().to_string(),
                    line_no,
                    line: line.to_string(),
                },
                events,
            );
        } else if let Some(pattern) = item.matched_pattern(line) {
            self.confirm(target, pattern.as_str(), line_no, line, events);
        }

        self.advance_to(next, CycleTrigger::AfterFailNext, events);
    }

    fn match_current(
        &mut self,
        line_no: usize,
        line: &str,
        timestamp: Option<NaiveDateTime>,
        events: &mut Vec<CheckEvent>,
    ) {
        let checklist = self.checklist;
        let index = self.current_index;
        let item = &checklist[index];

        // Sub item waiting for its parent
        if !self.is_eligible(index) {
            return;
        }

        let Some(pattern) = item.matched_pattern(line) else {
            return;
        };

        if let Some(not_pattern) = item.excluded_by(line) {
            self.fail(
                index,
                FailReason::UnexpectedMatch {
                    not_pattern: not_pattern.as_str().to_string(),
                    line_no,
                    line: line.to_string(),
                },
                events,
            );
            return;
        }

        self.touch_cycle_time(timestamp);
        self.confirm(index, pattern.as_str(), line_no, line, events);
        self.advance_to(
            (index + 1) % checklist.len(),
            CycleTrigger::NormalCompletion,
            events,
        );
    }

    fn confirm(
        &mut self,
        index: usize,
        pattern: &str,
        line_no: usize,
        line: &str,
        events: &mut Vec<CheckEvent>,
    ) {
        self.ok_count += 1;
        self.matched.insert(index);
        events.push(CheckEvent::Ok {
            index,
            pattern: pattern.to_string(),
            line_no,
            line: line.to_string(),
        });
    }

    fn fail(&mut self, index: usize, reason: FailReason, events: &mut Vec<CheckEvent>) {
        self.fail_count += 1;
        events.push(CheckEvent::Fail { index, reason });
    }

    /// Only confirmed lines move the cycle clock.
    fn touch_cycle_time(&mut self, timestamp: Option<NaiveDateTime>) {
        if let Some(ts) = timestamp {
            self.cycle_start.get_or_insert(ts);
            self.cycle_end = Some(ts);
        }
    }

    /// Assign a new position. Moving to an index at or before the current
    /// one means the checklist wrapped, which closes the cycle first.
    fn advance_to(&mut self, next: usize, trigger: CycleTrigger, events: &mut Vec<CheckEvent>) {
        if next <= self.current_index {
            self.complete_cycle(trigger, events);
        }
        self.current_index = next;
    }

    fn complete_cycle(&mut self, trigger: CycleTrigger, events: &mut Vec<CheckEvent>) {
        self.cycle_count += 1;

        let result = CycleResult {
            number: self.cycle_count,
            ok_count: self.ok_count,
            fail_count: self.fail_count,
        };
        let summary = CycleSummary {
            result,
            started: self.cycle_start,
            ended: self.cycle_end,
            trigger,
        };

        tracing::info!(
            "Cycle {} complete (ok: {}, fail: {}, time: {}) [{}]",
            result.number,
            result.ok_count,
            result.fail_count,
            summary.elapsed_display(),
            trigger
        );

        self.results.push(result);
        events.push(CheckEvent::CycleComplete(summary));

        self.ok_count = 0;
        self.fail_count = 0;
        self.current_index = 0;
        self.cycle_start = None;
        self.cycle_end = None;
        self.matched.clear();
    }
}
