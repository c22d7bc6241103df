use crate::pipeline::{BottleneckCategory, LineKind, LogEvent, classify, line_kind};
use pretty_assertions::assert_eq;

const TS: &str = "2025-01-15T10:00:00.000000Z  INFO forester:";

#[test]
fn unrelated_line_is_discarded() {
    assert_eq!(classify(&format!("{TS} Starting epoch 12")), None);
}

#[test]
fn line_without_timestamp_is_discarded() {
    assert_eq!(classify("Proof completed round_trip_ms=10"), None);
}

#[test]
fn submission_wins_over_later_markers() {
    // Also contains the completion marker; submission has priority.
    let line = "Batch 1 (append) submitted with job_id: abc after Proof completed";

    assert_eq!(line_kind(line), Some(LineKind::Submission));
}

#[test]
fn winning_marker_with_bad_shape_does_not_fall_through() {
    // Completion marker wins, its fields are absent, and the queue update
    // marker later in the line is not tried.
    let line = format!("{TS} Proof completed (cached) Queue update: tree=a items=1");

    assert_eq!(classify(&line), None);
}

#[test]
fn colored_completion_line_is_classified() {
    let line = "\x1b[2m2025-01-15T10:00:00Z\x1b[0m \x1b[32mINFO\x1b[0m Proof completed \
                job_id=\x1b[1mabc\x1b[0m round_trip_ms=40";

    let Some(LogEvent::Completion(c)) = classify(line) else {
        panic!("expected completion");
    };

    assert_eq!(c.job_id.as_deref(), Some("abc"));
    assert_eq!(c.round_trip_ms, 40);
}

#[test]
fn bottleneck_categories() {
    let cases = [
        (
            format!("{TS} Waiting for indexer: 12 slots behind"),
            BottleneckCategory::IndexerSyncWait,
            "12 slots behind",
        ),
        (
            format!("{TS} Reached batch limit (10)"),
            BottleneckCategory::BatchLimit,
            "(10)",
        ),
        (
            format!("{TS} No work available for tree smt1"),
            BottleneckCategory::Idle,
            "for tree smt1",
        ),
    ];

    for (line, category, detail) in cases {
        let Some(LogEvent::Bottleneck(b)) = classify(&line) else {
            panic!("expected bottleneck for {line}");
        };
        assert_eq!(b.category, category);
        assert_eq!(b.detail, detail);
    }
}

#[test]
fn every_kind_is_reachable() {
    let lines = [
        format!("{TS} Batch 1 (append) submitted with job_id: abc"),
        format!("{TS} Proof completed round_trip_ms=5"),
        format!("{TS} tx sent: sig type=append ixs=2"),
        format!("{TS} Submitting state proof request for batch 1"),
        format!("{TS} Queue update: tree=t items=0"),
        format!(
            "{TS} V2_TPS_METRIC: operation_complete tree=t tree_type=StateV2 duration_ms=1 items_processed=1"
        ),
    ];

    let kinds: Vec<&str> = lines
        .iter()
        .filter_map(|l| classify(l))
        .map(|e| match e {
            LogEvent::Submission(_) => "submission",
            LogEvent::Completion(_) => "completion",
            LogEvent::Transaction(_) => "transaction",
            LogEvent::Request(_) => "request",
            LogEvent::Bottleneck(_) => "bottleneck",
            LogEvent::Queue(_) => "queue",
            LogEvent::Throughput(_) => "throughput",
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            "submission",
            "completion",
            "transaction",
            "request",
            "queue",
            "throughput"
        ]
    );
}
