use crate::conf::AnalysisConfig;
use crate::metrics::cache::CacheStats;
use crate::metrics::gaps::{GapAnalysis, seconds_between};
use crate::metrics::histogram::{Histogram, HistogramBin};
use crate::metrics::in_flight::InFlightEstimate;
use crate::metrics::latency::LatencyStats;
use crate::metrics::queue::{QueueSummary, summarize_queues};
use crate::metrics::summary::{
    BottleneckSummary, ThroughputSummary, TransactionSummary, summarize_throughput,
};
use crate::pipeline::{EventStore, Timestamp, constants::UNKNOWN_PROOF_TYPE};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationWindow {
    pub start: Timestamp,
    pub end: Timestamp,
    pub secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProofSummary {
    pub submissions: usize,
    pub requests: usize,
    pub completions: usize,
    pub round_trip_ms: Option<LatencyStats>,
    pub round_trip_by_type: BTreeMap<String, LatencyStats>,
    pub proof_ms: Option<LatencyStats>,
    pub queue_wait_ms: Option<LatencyStats>,
    pub histogram: Vec<HistogramBin>,
    pub cache: Option<CacheStats>,
    pub submission_gaps: Option<GapAnalysis>,
    pub proofs_per_sec: Option<f64>,
}

/// Everything derived from one log. Read-only over the store; absent data is
/// `None` or empty, never an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceReport {
    pub lines_read: u64,
    pub events: usize,
    pub window: Option<ObservationWindow>,
    pub proofs: ProofSummary,
    pub transactions: Option<TransactionSummary>,
    pub queues: Vec<QueueSummary>,
    pub bottlenecks: BottleneckSummary,
    pub in_flight: Option<InFlightEstimate>,
    pub throughput: Vec<ThroughputSummary>,
}

impl PerformanceReport {
    pub fn build(store: &EventStore, cfg: &AnalysisConfig) -> Self {
        let report = Self {
            lines_read: store.lines_read(),
            events: store.event_count(),
            window: store.window().map(|(start, end)| ObservationWindow {
                start,
                end,
                secs: seconds_between(start, end),
            }),
            proofs: proof_summary(store, cfg),
            transactions: TransactionSummary::from_events(
                store.transactions(),
                cfg.large_gap_secs,
            ),
            queues: summarize_queues(store.queue_updates(), cfg.noise_floor_ms / 1000.0),
            bottlenecks: BottleneckSummary::from_events(store.bottlenecks()),
            in_flight: InFlightEstimate::from_events(
                &store
                    .submissions()
                    .iter()
                    .map(|s| s.timestamp)
                    .collect::<Vec<_>>(),
                &store
                    .completions()
                    .iter()
                    .map(|c| c.timestamp)
                    .collect::<Vec<_>>(),
                cfg.in_flight_bin_secs,
                cfg.in_flight_max_bins,
            ),
            throughput: summarize_throughput(store.throughput()),
        };

        debug!(
            events = report.events,
            completions = report.proofs.completions,
            queues = report.queues.len(),
            "report built"
        );

        report
    }
}

fn proof_summary(store: &EventStore, cfg: &AnalysisConfig) -> ProofSummary {
    let completions = store.completions();

    let round_trips: Vec<f64> = completions.iter().map(|c| c.round_trip_ms as f64).collect();
    let proof_times: Vec<f64> = completions
        .iter()
        .filter_map(|c| c.proof_ms)
        .map(|ms| ms as f64)
        .collect();
    let queue_waits: Vec<f64> = completions
        .iter()
        .filter_map(|c| c.queue_wait_ms())
        .map(|ms| ms as f64)
        .collect();

    let mut by_type: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for c in completions {
        let proof_type = c.proof_type.as_deref().unwrap_or(UNKNOWN_PROOF_TYPE);
        by_type
            .entry(proof_type.to_string())
            .or_default()
            .push(c.round_trip_ms as f64);
    }

    let submission_times: Vec<Timestamp> =
        store.submissions().iter().map(|s| s.timestamp).collect();

    let proofs_per_sec = match (completions.first(), completions.last()) {
        (Some(first), Some(last)) if completions.len() > 1 => {
            let span = seconds_between(first.timestamp, last.timestamp);
            (span > 0.0).then(|| completions.len() as f64 / span)
        }
        _ => None,
    };

    ProofSummary {
        submissions: store.submissions().len(),
        requests: store.requests().len(),
        completions: completions.len(),
        round_trip_ms: LatencyStats::from_samples(&round_trips),
        round_trip_by_type: by_type
            .into_iter()
            .filter_map(|(t, samples)| LatencyStats::from_samples(&samples).map(|s| (t, s)))
            .collect(),
        proof_ms: LatencyStats::from_samples(&proof_times),
        queue_wait_ms: LatencyStats::from_samples(&queue_waits),
        histogram: Histogram::from_samples(
            &round_trips,
            &cfg.histogram_bounds_ms,
            cfg.histogram_margin_ms,
        )
        .map(|h| h.bins())
        .unwrap_or_default(),
        cache: CacheStats::from_completions(completions),
        submission_gaps: GapAnalysis::from_timestamps(&submission_times, cfg.large_gap_secs),
        proofs_per_sec,
    }
}
