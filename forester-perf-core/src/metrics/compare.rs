use crate::metrics::report::PerformanceReport;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub metric: String,
    pub unit: &'static str,
    pub baseline: Option<f64>,
    pub candidate: Option<f64>,
    /// Relative change from baseline, in percent.
    pub delta_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub baseline_label: String,
    pub candidate_label: String,
    pub rows: Vec<ComparisonRow>,
}

fn row(
    metric: impl Into<String>,
    unit: &'static str,
    b: Option<f64>,
    c: Option<f64>,
) -> ComparisonRow {
    let delta_pct = match (b, c) {
        (Some(b), Some(c)) if b != 0.0 => Some((c - b) / b.abs() * 100.0),
        _ => None,
    };
    ComparisonRow {
        metric: metric.into(),
        unit,
        baseline: b,
        candidate: c,
        delta_pct,
    }
}

/// Headline metrics of two runs side by side.
pub fn compare(
    baseline: &PerformanceReport,
    baseline_label: impl Into<String>,
    candidate: &PerformanceReport,
    candidate_label: impl Into<String>,
) -> Comparison {
    let (b, c) = (baseline, candidate);
    let rt = |r: &PerformanceReport| r.proofs.round_trip_ms.clone();

    let mut rows = vec![
        row(
            "proof completions",
            "",
            Some(b.proofs.completions as f64),
            Some(c.proofs.completions as f64),
        ),
        row("round trip mean", "ms", rt(b).map(|s| s.mean), rt(c).map(|s| s.mean)),
        row(
            "round trip median",
            "ms",
            rt(b).map(|s| s.median),
            rt(c).map(|s| s.median),
        ),
        row("round trip p95", "ms", rt(b).map(|s| s.p95), rt(c).map(|s| s.p95)),
        row("round trip p99", "ms", rt(b).map(|s| s.p99), rt(c).map(|s| s.p99)),
        row(
            "pure proof mean",
            "ms",
            b.proofs.proof_ms.as_ref().map(|s| s.mean),
            c.proofs.proof_ms.as_ref().map(|s| s.mean),
        ),
        row(
            "queue wait mean",
            "ms",
            b.proofs.queue_wait_ms.as_ref().map(|s| s.mean),
            c.proofs.queue_wait_ms.as_ref().map(|s| s.mean),
        ),
        row(
            "cache hit rate",
            "%",
            b.proofs.cache.as_ref().map(|s| s.hit_rate_pct),
            c.proofs.cache.as_ref().map(|s| s.hit_rate_pct),
        ),
        row("proofs per sec", "/s", b.proofs.proofs_per_sec, c.proofs.proofs_per_sec),
        row(
            "transactions",
            "",
            b.transactions.as_ref().map(|t| t.count as f64),
            c.transactions.as_ref().map(|t| t.count as f64),
        ),
        row(
            "transactions per sec",
            "/s",
            b.transactions.as_ref().and_then(|t| t.tx_per_sec),
            c.transactions.as_ref().and_then(|t| t.tx_per_sec),
        ),
        row(
            "large tx gap time",
            "s",
            b.transactions
                .as_ref()
                .and_then(|t| t.gaps.as_ref())
                .map(|g| g.large_gap_total_secs),
            c.transactions
                .as_ref()
                .and_then(|t| t.gaps.as_ref())
                .map(|g| g.large_gap_total_secs),
        ),
        row(
            "peak in-flight",
            "",
            b.in_flight.as_ref().map(|f| f.peak as f64),
            c.in_flight.as_ref().map(|f| f.peak as f64),
        ),
        row(
            "bottleneck events",
            "",
            Some(b.bottlenecks.total as f64),
            Some(c.bottlenecks.total as f64),
        ),
    ];

    let tree_types: BTreeSet<&str> = b
        .throughput
        .iter()
        .chain(&c.throughput)
        .map(|t| t.tree_type.as_str())
        .collect();

    for tree_type in tree_types {
        let items_per_sec = |r: &PerformanceReport| {
            r.throughput
                .iter()
                .find(|t| t.tree_type == tree_type)
                .and_then(|t| t.items_per_sec)
        };
        rows.push(row(
            format!("{tree_type} items per sec"),
            "/s",
            items_per_sec(b),
            items_per_sec(c),
        ));
    }

    Comparison {
        baseline_label: baseline_label.into(),
        candidate_label: candidate_label.into(),
        rows,
    }
}
