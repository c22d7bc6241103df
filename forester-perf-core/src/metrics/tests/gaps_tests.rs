use super::at_secs;
use crate::metrics::{GapAnalysis, gaps};
use pretty_assertions::assert_eq;

#[test]
fn gaps_are_consecutive_differences() {
    let ts = [at_secs(0.0), at_secs(1.5), at_secs(4.0)];

    assert_eq!(gaps(&ts), vec![1.5, 2.5]);
}

#[test]
fn single_inserted_fifteen_second_gap() {
    // one event per second, then a 15s hole, then one per second again
    let mut ts: Vec<_> = (0..10).map(|i| at_secs(i as f64)).collect();
    ts.extend((0..5).map(|i| at_secs(24.0 + i as f64)));

    let analysis = GapAnalysis::from_timestamps(&ts, 10.0).unwrap();

    assert_eq!(analysis.large_gaps.len(), 1);
    assert_eq!(analysis.large_gap_total_secs, 15.0);
    assert_eq!(analysis.large_gaps[0].index, 10);
    assert_eq!(analysis.large_gaps[0].started_at, at_secs(9.0));
    assert_eq!(analysis.window_secs, 28.0);
    assert!((analysis.large_gap_fraction - 15.0 / 28.0).abs() < 1e-9);
    assert_eq!(analysis.max_secs, 15.0);
    assert_eq!(analysis.count, 14);
}

#[test]
fn gap_equal_to_threshold_is_not_large() {
    let ts = [at_secs(0.0), at_secs(10.0)];

    let analysis = GapAnalysis::from_timestamps(&ts, 10.0).unwrap();

    assert!(analysis.large_gaps.is_empty());
    assert_eq!(analysis.large_gap_total_secs, 0.0);
}

#[test]
fn fewer_than_two_timestamps_is_no_data() {
    assert_eq!(GapAnalysis::from_timestamps(&[], 10.0), None);
    assert_eq!(GapAnalysis::from_timestamps(&[at_secs(1.0)], 10.0), None);
}
