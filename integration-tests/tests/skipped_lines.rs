use integration_tests::harness::{capture_events, load_fixture};
use pretty_assertions::assert_eq;
use tracing::Level;

#[test]
fn marker_without_fields_is_traced_and_dropped() {
    let (store, events) = capture_events(|| load_fixture("forester.log"));

    let skipped: Vec<_> = events
        .iter()
        .filter(|e| e.level == Level::TRACE)
        .collect();

    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].target, "forester_perf_core::pipeline::classify");
    assert_eq!(skipped[0].field("kind"), Some("Completion"));
    assert!(
        skipped[0]
            .field("line")
            .is_some_and(|l| l.contains("job_id=job-x9"))
    );
    assert!(
        store
            .completions()
            .iter()
            .all(|c| c.job_id.as_deref() != Some("job-x9"))
    );
}

#[test]
fn load_reports_counts_at_debug() {
    let (_, events) = capture_events(|| load_fixture("baseline.log"));

    let loaded = events
        .iter()
        .find(|e| e.message() == Some("log loaded"))
        .unwrap();

    assert_eq!(loaded.level, Level::DEBUG);
    assert_eq!(loaded.target, "forester_perf_core::pipeline::store");
    assert_eq!(loaded.field("lines"), Some("5"));
    assert_eq!(loaded.field("events"), Some("5"));
}
