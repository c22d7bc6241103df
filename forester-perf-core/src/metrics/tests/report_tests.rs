use super::at_ms;
use crate::conf::AnalysisConfig;
use crate::metrics::{CacheStats, PerformanceReport};
use crate::pipeline::{BottleneckCategory, EventStore, ProofCompletion};
use pretty_assertions::assert_eq;
use std::io::Cursor;

pub(super) const RUN: &str = "\
2025-01-15T10:00:00.000Z INFO Submitting append proof request for batch 1
2025-01-15T10:00:00.100Z INFO Batch 1 (append) submitted with job_id: a1
2025-01-15T10:00:00.200Z INFO Batch 2 (nullify) submitted with job_id: n1
2025-01-15T10:00:01.000Z INFO Proof completed job_id=a1 round_trip_ms=500 proof_ms=700
2025-01-15T10:00:03.000Z INFO Proof completed job_id=n1 round_trip_ms=1500 proof_ms=1000
2025-01-15T10:00:03.500Z INFO tx sent: s1 type=append ixs=2
2025-01-15T10:00:04.500Z INFO tx sent: s2 type=nullify ixs=4
2025-01-15T10:00:05.000Z INFO Queue update: tree=smt1 items=0
2025-01-15T10:00:06.000Z INFO Waiting for indexer: 3 slots behind
2025-01-15T10:00:07.000Z INFO V2_TPS_METRIC: operation_complete tree=t1 tree_type=StateV2 duration_ms=2000 items_processed=100 zkp_batches=2 tps=50.0
";

fn cfg() -> AnalysisConfig {
    AnalysisConfig {
        histogram_bounds_ms: vec![0.0, 500.0, 1000.0],
        ..AnalysisConfig::default()
    }
}

pub(super) fn report_for(log: &str) -> PerformanceReport {
    let store = EventStore::from_reader(Cursor::new(log)).unwrap();
    PerformanceReport::build(&store, &cfg())
}

fn completion(round_trip_ms: u64, proof_ms: Option<u64>) -> ProofCompletion {
    ProofCompletion {
        timestamp: at_ms(0),
        round_trip_ms,
        job_id: None,
        proof_type: None,
        proof_ms,
    }
}

#[test]
fn round_trip_shorter_than_proof_is_cache_hit() {
    let c = completion(500, Some(700));

    assert_eq!(c.queue_wait_ms(), Some(-200));
    assert!(c.is_cache_hit());
    assert!(!completion(700, Some(500)).is_cache_hit());
    assert!(!completion(700, None).is_cache_hit());
}

#[test]
fn cache_rate_counts_only_timed_completions() {
    let completions = [
        completion(500, Some(700)),
        completion(900, Some(600)),
        completion(1000, None),
    ];

    let stats = CacheStats::from_completions(&completions).unwrap();

    assert_eq!(stats.with_timing, 2);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.hit_rate_pct, 50.0);
    assert_eq!(CacheStats::from_completions(&[completion(1, None)]), None);
}

#[test]
fn full_run_report() {
    let report = report_for(RUN);

    assert_eq!(report.lines_read, 10);
    assert_eq!(report.events, 10);
    assert_eq!(report.window.as_ref().map(|w| w.secs), Some(7.0));

    let proofs = &report.proofs;
    assert_eq!(proofs.requests, 1);
    assert_eq!(proofs.submissions, 2);
    assert_eq!(proofs.completions, 2);
    assert_eq!(proofs.round_trip_ms.as_ref().map(|s| s.mean), Some(1000.0));
    assert_eq!(proofs.queue_wait_ms.as_ref().map(|s| s.min), Some(-200.0));
    assert_eq!(proofs.cache.as_ref().map(|c| c.hits), Some(1));
    assert_eq!(proofs.proofs_per_sec, Some(1.0));

    let types: Vec<&str> = proofs.round_trip_by_type.keys().map(String::as_str).collect();
    assert_eq!(types, vec!["append", "nullify"]);

    let counts: Vec<u64> = proofs.histogram.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![0, 1, 1]);
    assert_eq!(proofs.histogram.last().map(|b| b.upper), Some(1600.0));
}

#[test]
fn transactions_bottlenecks_and_throughput() {
    let report = report_for(RUN);

    let tx = report.transactions.as_ref().unwrap();
    assert_eq!(tx.count, 2);
    assert_eq!(tx.total_instructions, 6);
    assert_eq!(tx.mean_instructions, 3.0);
    assert_eq!(tx.tx_per_sec, Some(2.0));
    assert_eq!(tx.by_type.get("nullify"), Some(&1));

    assert_eq!(report.bottlenecks.total, 1);
    assert_eq!(report.bottlenecks.count(BottleneckCategory::IndexerSyncWait), 1);
    assert_eq!(report.bottlenecks.count(BottleneckCategory::Idle), 0);

    assert_eq!(report.queues.len(), 1);
    assert_eq!(report.queues[0].tree, "smt1");

    assert_eq!(report.throughput.len(), 1);
    let v2 = &report.throughput[0];
    assert_eq!(v2.tree_type, "StateV2");
    assert_eq!(v2.items_per_sec, Some(50.0));
    assert_eq!(v2.zkp_batches, 2);
    assert_eq!(v2.mean_reported_tps, Some(50.0));

    let in_flight = report.in_flight.as_ref().unwrap();
    assert_eq!(in_flight.start, at_ms(100));
    assert_eq!(in_flight.peak, 1);
}

#[test]
fn completion_without_submission_is_grouped_as_unknown() {
    let report = report_for("2025-01-15T10:00:00Z Proof completed round_trip_ms=80\n");

    let types: Vec<&str> = report
        .proofs
        .round_trip_by_type
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(types, vec!["unknown"]);
    assert_eq!(report.proofs.proofs_per_sec, None);
}

#[test]
fn empty_store_reports_no_data_everywhere() {
    let report = report_for("nothing useful\nat all\n");

    assert_eq!(report.lines_read, 2);
    assert_eq!(report.events, 0);
    assert_eq!(report.window, None);
    assert_eq!(report.proofs.round_trip_ms, None);
    assert_eq!(report.proofs.queue_wait_ms, None);
    assert_eq!(report.proofs.cache, None);
    assert_eq!(report.proofs.submission_gaps, None);
    assert!(report.proofs.histogram.is_empty());
    assert_eq!(report.transactions, None);
    assert_eq!(report.in_flight, None);
    assert!(report.queues.is_empty());
    assert!(report.throughput.is_empty());
    assert_eq!(report.bottlenecks.total, 0);
}

#[test]
fn misdated_line_keeps_in_flight_bins_bounded() {
    let log = "\
2025-01-15T10:00:00Z INFO Batch 1 (append) submitted with job_id: a1
2126-01-15T10:00:01Z INFO Proof completed job_id=a1 round_trip_ms=500
";

    let report = report_for(log);

    let in_flight = report.in_flight.as_ref().unwrap();
    assert!(in_flight.bins.len() <= cfg().in_flight_max_bins);
    assert!(in_flight.bin_secs > cfg().in_flight_bin_secs);
}
