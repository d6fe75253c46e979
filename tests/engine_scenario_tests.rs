//! Integration tests for the checklist engine
//!
//! These tests verify:
//! - Cycle completion on wrap-around
//! - Fail-overlap detection and the start-of-cycle exemption
//! - End-of-log handling of open cycles
//! - Parent gating of sub items
//! - Loader warnings not disturbing downstream matching

use logcheck::services::{CheckEvent, ChecklistLoader, CycleEngine, FailReason, LogChecker};
use logcheck::{Checklist, CycleResult};

fn checklist(text: &str) -> Checklist {
    ChecklistLoader::default().parse_lines(text.lines()).checklist
}

fn run(checklist: &Checklist, log: &[&str]) -> Vec<CheckEvent> {
    LogChecker::new(checklist).run_lines(log.iter().copied()).events
}

fn results(checklist: &Checklist, log: &[&str]) -> Vec<CycleResult> {
    LogChecker::new(checklist).run_lines(log.iter().copied()).results
}

fn cycle(number: usize, ok_count: usize, fail_count: usize) -> CycleResult {
    CycleResult {
        number,
        ok_count,
        fail_count,
    }
}

const TWO_STEP: &str = "0|A|started|no start||START\n0|B|ended|no end||END\n";
const THREE_STEP: &str = "0|A|a ok|a fail||^A$\n0|B|b ok|b fail||^B$\n0|C|c ok|c fail||^C$\n";

#[test]
fn test_two_clean_cycles() {
    let checklist = checklist(TWO_STEP);
    assert_eq!(
        results(&checklist, &["START", "END", "START", "END"]),
        vec![cycle(1, 2, 0), cycle(2, 2, 0)]
    );
}

#[test]
fn test_no_overlap_scan_at_cycle_start() {
    let checklist = checklist(TWO_STEP);
    let events = run(&checklist, &["END", "START", "END"]);

    // The leading END is ignored rather than treated as a skipped START
    assert!(!events.iter().any(|e| matches!(e, CheckEvent::Fail { .. })));
    assert_eq!(
        results(&checklist, &["END", "START", "END"]),
        vec![cycle(1, 2, 0)]
    );
}

#[test]
fn test_skipped_item_fails_via_overlap() {
    let checklist = checklist(THREE_STEP);
    let events = run(&checklist, &["A", "C"]);

    assert!(matches!(
        events[1],
        CheckEvent::Fail {
            index: 1,
            reason: FailReason::Skipped { line_no: 2 }
        }
    ));
    assert!(matches!(events[2], CheckEvent::Ok { index: 2, .. }));
    assert_eq!(results(&checklist, &["A", "C"]), vec![cycle(1, 2, 1)]);
}

#[test]
fn test_malformed_line_is_excluded() {
    let outcome = ChecklistLoader::default().parse_lines(
        "0|A|ok|fail||START\n0|Broken|ok|fail|END\n0|B|ok|fail||END\n".lines(),
    );
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.checklist.len(), 2);

    assert_eq!(
        results(&outcome.checklist, &["START", "END"]),
        vec![cycle(1, 2, 0)]
    );
}

#[test]
fn test_end_of_log_fails_remaining_items() {
    let checklist = checklist(THREE_STEP);
    let events = run(&checklist, &["A"]);

    let fails: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            CheckEvent::Fail { index, reason } => Some((*index, reason.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        fails,
        vec![
            (1, FailReason::MissingAtEndOfLog),
            (2, FailReason::MissingAtEndOfLog)
        ]
    );

    let Some(CheckEvent::CycleComplete(summary)) = events.last() else {
        panic!("expected trailing cycle completion");
    };
    assert_eq!(summary.trigger.to_string(), "end of log");
    assert_eq!(summary.result, cycle(1, 1, 2));
}

#[test]
fn test_log_ending_on_boundary_has_no_trailing_cycle() {
    let checklist = checklist(TWO_STEP);
    let mut engine = CycleEngine::new(&checklist);
    engine.process_line(1, "START");
    engine.process_line(2, "END");

    assert!(engine.finish().is_empty());
    assert_eq!(engine.cycle_count(), 1);
}

#[test]
fn test_overlap_wrap_to_first_item_closes_cycle_first() {
    let checklist = checklist(THREE_STEP);
    let events = run(&checklist, &["A", "B", "A", "B", "C"]);

    // Second "A" arrives while C is expected: C fails, cycle 1 closes, then A
    // opens cycle 2.
    let trigger_tags: Vec<String> = events
        .iter()
        .filter_map(|e| match e {
            CheckEvent::CycleComplete(s) => Some(s.trigger.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(
        trigger_tags,
        vec!["wrap-around before next OK", "normal completion"]
    );
    assert_eq!(
        results(&checklist, &["A", "B", "A", "B", "C"]),
        vec![cycle(1, 2, 1), cycle(2, 3, 0)]
    );
}

#[test]
fn test_not_pattern_fail_holds_position_until_clean_match() {
    let checklist = checklist("0|Boot|ok|fail|error|boot\n0|Run|ok|fail||run\n");
    let mut engine = CycleEngine::new(&checklist);

    engine.process_line(1, "boot error");
    engine.process_line(2, "boot error");
    assert_eq!(engine.current_index(), 0);
    assert_eq!(engine.fail_count(), 2);

    engine.process_line(3, "boot");
    assert_eq!(engine.current_index(), 1);
    engine.process_line(4, "run");
    assert_eq!(engine.results(), &[cycle(1, 2, 2)]);
}

#[test]
fn test_not_pattern_hides_overlap_candidate() {
    let checklist = checklist("0|A|ok|fail||A\n0|B|ok|fail||B\n0|C|ok|fail|bad|C\n");
    let mut engine = CycleEngine::new(&checklist);

    engine.process_line(1, "A");
    // C is excluded, so no overlap and B is still expected
    assert!(engine.process_line(2, "C bad").is_empty());
    assert_eq!(engine.current_index(), 1);
}

#[test]
fn test_sub_items_fail_only_when_parent_matched() {
    let checklist = checklist(
        "0|Boot|ok|fail||boot\n\
         1|Boot.net|ok|fail||net\n\
         0|Test|ok|fail||test\n\
         1|Test.pass|ok|fail||pass\n\
         0|Done|ok|fail||done\n",
    );

    // "done" overtakes Test: Test fails, its sub was never eligible and is
    // skipped silently.
    let events = run(&checklist, &["boot", "net", "done"]);
    let failed: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            CheckEvent::Fail { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(failed, vec![2]);
    let Some(CheckEvent::CycleComplete(summary)) = events.last() else {
        panic!("expected cycle completion after the overlap");
    };
    assert_eq!(summary.trigger.to_string(), "after handling fail-next");
    assert_eq!(
        results(&checklist, &["boot", "net", "done"]),
        vec![cycle(1, 3, 1)]
    );
}

#[test]
fn test_sub_item_of_skipped_parent_is_not_failed() {
    let checklist = checklist(
        "0|Boot|ok|fail||boot\n\
         0|Test|ok|fail||test\n\
         1|Test.pass|ok|fail||pass\n\
         0|Done|ok|fail||done\n",
    );
    let events = run(&checklist, &["boot", "done"]);
    let failed: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            CheckEvent::Fail { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(failed, vec![1]);
}

#[test]
fn test_cycle_timing_resets_between_cycles() {
    let checklist = checklist(TWO_STEP);
    let events = run(
        &checklist,
        &[
            "[2024.06.10-08.00.00:000] START",
            "[2024.06.10-08.00.10:000] END",
            "[2024.06.10-08.05.00:000] START",
            "[2024.06.10-08.07.30:250] END",
        ],
    );
    let elapsed: Vec<String> = events
        .iter()
        .filter_map(|e| match e {
            CheckEvent::CycleComplete(s) => Some(s.elapsed_display()),
            _ => None,
        })
        .collect();
    assert_eq!(elapsed, vec!["0:10", "2:30"]);
}

#[test]
fn test_report_transcript() {
    let checklist = checklist(TWO_STEP);
    let outcome = LogChecker::new(&checklist).run_lines(["START", "noise", "START"]);
    let text = outcome.report.render();

    assert!(text.contains("A: started, match=[START]\n  >> (Line 1) START"));
    assert!(text.contains("B: no end (skipped, patterns=[END])"));
    assert!(text.contains("[wrap-around before next OK] ==="));
    assert!(text.contains("B: no end (not found in last cycle, patterns=[END])"));
    assert!(text.contains("[end of log] ==="));
    assert!(text.ends_with(
        "=== All Cycles Summary ===\nNo# 1: Ok=1, Fail=1\nNo# 2: Ok=1, Fail=1"
    ));
}

#[test]
fn test_rerun_is_deterministic() {
    let checklist = checklist(THREE_STEP);
    let log = ["A", "C", "B", "A", "x", "C", "A"];
    assert_eq!(run(&checklist, &log), run(&checklist, &log));
}
