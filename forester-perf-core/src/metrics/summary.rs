use crate::metrics::gaps::{GapAnalysis, seconds_between};
use crate::pipeline::{BottleneckCategory, BottleneckEvent, ThroughputSample, TransactionEvent};
use serde::Serialize;
use std::collections::BTreeMap;

//-----------------------------------------------------------------------------
// Transactions
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionSummary {
    pub count: usize,
    pub by_type: BTreeMap<String, usize>,
    pub total_instructions: u64,
    pub mean_instructions: f64,
    /// Over the span between the first and last transaction; `None` when that
    /// span is zero.
    pub tx_per_sec: Option<f64>,
    pub gaps: Option<GapAnalysis>,
}

impl TransactionSummary {
    pub fn from_events(txs: &[TransactionEvent], large_gap_secs: f64) -> Option<Self> {
        let (first, last) = (txs.first()?, txs.last()?);

        let mut by_type = BTreeMap::new();
        for tx in txs {
            *by_type.entry(tx.tx_type.clone()).or_insert(0) += 1;
        }

        let total_instructions: u64 = txs.iter().map(|t| t.instructions as u64).sum();
        let span = seconds_between(first.timestamp, last.timestamp);
        let timestamps: Vec<_> = txs.iter().map(|t| t.timestamp).collect();

        Some(Self {
            count: txs.len(),
            by_type,
            total_instructions,
            mean_instructions: total_instructions as f64 / txs.len() as f64,
            tx_per_sec: (span > 0.0).then(|| txs.len() as f64 / span),
            gaps: GapAnalysis::from_timestamps(&timestamps, large_gap_secs),
        })
    }
}

//-----------------------------------------------------------------------------
// Bottlenecks
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BottleneckSummary {
    pub total: usize,
    pub by_category: BTreeMap<BottleneckCategory, usize>,
}

impl BottleneckSummary {
    pub fn from_events(events: &[BottleneckEvent]) -> Self {
        let mut by_category = BTreeMap::new();
        for e in events {
            *by_category.entry(e.category).or_insert(0) += 1;
        }
        Self {
            total: events.len(),
            by_category,
        }
    }

    pub fn count(&self, category: BottleneckCategory) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }
}

//-----------------------------------------------------------------------------
// V2 throughput
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThroughputSummary {
    pub tree_type: String,
    pub operations: usize,
    pub items_processed: u64,
    pub zkp_batches: u64,
    pub total_duration_ms: u64,
    /// Items per second of processing time.
    pub items_per_sec: Option<f64>,
    /// Mean of the TPS values the forester reported itself.
    pub mean_reported_tps: Option<f64>,
}

/// One summary per tree type, sorted by tree type.
pub fn summarize_throughput(samples: &[ThroughputSample]) -> Vec<ThroughputSummary> {
    let mut by_type: BTreeMap<&str, Vec<&ThroughputSample>> = BTreeMap::new();
    for s in samples {
        by_type.entry(s.tree_type.as_str()).or_default().push(s);
    }

    by_type
        .into_iter()
        .map(|(tree_type, group)| {
            let items_processed: u64 = group.iter().map(|s| s.items_processed).sum();
            let total_duration_ms: u64 = group.iter().map(|s| s.duration_ms).sum();
            let reported: Vec<f64> = group.iter().filter_map(|s| s.tps).collect();

            ThroughputSummary {
                tree_type: tree_type.to_string(),
                operations: group.len(),
                items_processed,
                zkp_batches: group.iter().filter_map(|s| s.zkp_batches).sum(),
                total_duration_ms,
                items_per_sec: (total_duration_ms > 0)
                    .then(|| items_processed as f64 / (total_duration_ms as f64 / 1000.0)),
                mean_reported_tps: (!reported.is_empty())
                    .then(|| reported.iter().sum::<f64>() / reported.len() as f64),
            }
        })
        .collect()
}
