//! Derived metrics over a completed [`EventStore`](crate::pipeline::EventStore).
//!
//! Every calculation here is read-only and total: an empty or partial store
//! yields `None`/empty aggregates which the renderer prints as "no data".

mod cache;
mod compare;
mod gaps;
mod histogram;
mod in_flight;
mod latency;
mod queue;
mod report;
mod summary;

#[cfg(test)]
mod tests;

pub use cache::CacheStats;
pub use compare::{Comparison, ComparisonRow, compare};
pub use gaps::{GapAnalysis, LargeGap, gaps, seconds_between};
pub use histogram::{Histogram, HistogramBin, histogram_edges};
pub use in_flight::{InFlightBin, InFlightEstimate};
pub use latency::{LatencyStats, percentile};
pub use queue::{QueueSummary, QueueTransitions, queue_transitions, summarize_queues};
pub use report::{ObservationWindow, PerformanceReport, ProofSummary};
pub use summary::{BottleneckSummary, ThroughputSummary, TransactionSummary, summarize_throughput};
