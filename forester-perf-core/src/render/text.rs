use crate::metrics::{GapAnalysis, HistogramBin, LatencyStats, PerformanceReport};
use crate::pipeline::BottleneckCategory;
use owo_colors::OwoColorize;

pub const NO_DATA: &str = "no data";

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Only the headline summary block.
    pub summary_only: bool,
    /// Terminal histogram bars.
    pub show_charts: bool,
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            summary_only: false,
            show_charts: true,
            color: false,
        }
    }
}

//-----------------------------------------------------------------------------
// Formatting helpers
//-----------------------------------------------------------------------------

pub(crate) fn fmt_value(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.1}{unit}"),
        None => NO_DATA.to_string(),
    }
}

fn heading(title: &str, opts: &RenderOptions) -> String {
    let underline = "=".repeat(title.chars().count());
    if opts.color {
        format!("{}\n{}\n", title.bold(), underline.dimmed())
    } else {
        format!("{title}\n{underline}\n")
    }
}

fn section(title: &str, opts: &RenderOptions) -> String {
    if opts.color {
        format!("\n{}\n", title.bold().cyan())
    } else {
        format!("\n{title}\n")
    }
}

fn kv_line(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {label:<22} {value}\n")
}

fn latency_header() -> String {
    format!(
        "  {:<14} {:>7} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
        "", "count", "min", "mean", "median", "p95", "p99", "max"
    )
}

fn latency_row(label: &str, stats: Option<&LatencyStats>, unit: &str) -> String {
    match stats {
        Some(s) => format!(
            "  {:<14} {:>7} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
            label,
            s.count,
            fmt_value(Some(s.min), unit),
            fmt_value(Some(s.mean), unit),
            fmt_value(Some(s.median), unit),
            fmt_value(Some(s.p95), unit),
            fmt_value(Some(s.p99), unit),
            fmt_value(Some(s.max), unit),
        ),
        None => format!("  {label:<14} {NO_DATA:>7}\n"),
    }
}

fn gap_lines(gaps: Option<&GapAnalysis>) -> String {
    let Some(g) = gaps else {
        return format!("  {NO_DATA}\n");
    };

    let mut out = String::new();
    out.push_str(&kv_line("gaps", g.count));
    out.push_str(&kv_line("mean gap", fmt_value(Some(g.mean_secs), "s")));
    out.push_str(&kv_line("max gap", fmt_value(Some(g.max_secs), "s")));
    out.push_str(&kv_line(
        &format!("gaps > {:.0}s", g.threshold_secs),
        format!(
            "{} totaling {:.1}s ({:.1}% of {:.1}s window)",
            g.large_gaps.len(),
            g.large_gap_total_secs,
            g.large_gap_fraction * 100.0,
            g.window_secs
        ),
    ));
    out
}

fn histogram_lines(bins: &[HistogramBin]) -> String {
    let total: u64 = bins.iter().map(|b| b.count).sum();
    if total == 0 {
        return format!("  {NO_DATA}\n");
    }

    let mut out = String::new();
    for bin in bins {
        let pct = (bin.count as f64 / total as f64) * 100.0;
        let bars = if bin.count > 0 {
            ((pct / 5.0).floor() as usize).max(1)
        } else {
            0
        };
        out.push_str(&format!(
            "  {:<16} {:<20} {:>5.1}% ({})\n",
            bin.label(),
            "█".repeat(bars),
            pct,
            bin.count
        ));
    }
    out
}

//-----------------------------------------------------------------------------
// Report
//-----------------------------------------------------------------------------

pub fn render_summary(report: &PerformanceReport, opts: &RenderOptions) -> String {
    let mut out = String::new();
    let proofs = &report.proofs;

    out.push_str(&heading("Forester Performance Report", opts));

    match &report.window {
        Some(w) => out.push_str(&format!(
            "lines: {} | events: {} | window: {:.1}s ({} → {})\n",
            report.lines_read,
            report.events,
            w.secs,
            w.start.format("%Y-%m-%d %H:%M:%S%.3f"),
            w.end.format("%Y-%m-%d %H:%M:%S%.3f"),
        )),
        None => out.push_str(&format!(
            "lines: {} | events: 0 | window: {NO_DATA}\n",
            report.lines_read
        )),
    }

    out.push_str(&section("Summary", opts));
    out.push_str(&kv_line("proof requests", proofs.requests));
    out.push_str(&kv_line("proofs submitted", proofs.submissions));
    out.push_str(&kv_line("proofs completed", proofs.completions));

    let rt = proofs.round_trip_ms.as_ref();
    out.push_str(&kv_line("round trip mean", fmt_value(rt.map(|s| s.mean), "ms")));
    out.push_str(&kv_line("round trip p95", fmt_value(rt.map(|s| s.p95), "ms")));
    out.push_str(&kv_line("round trip p99", fmt_value(rt.map(|s| s.p99), "ms")));
    out.push_str(&kv_line(
        "cache hit rate",
        fmt_value(proofs.cache.as_ref().map(|c| c.hit_rate_pct), "%"),
    ));
    out.push_str(&kv_line("proofs per sec", fmt_value(proofs.proofs_per_sec, "/s")));

    match &report.transactions {
        Some(t) => out.push_str(&kv_line(
            "transactions",
            format!("{} ({})", t.count, fmt_value(t.tx_per_sec, "/s")),
        )),
        None => out.push_str(&kv_line("transactions", NO_DATA)),
    }

    out.push_str(&kv_line(
        "peak in-flight",
        report
            .in_flight
            .as_ref()
            .map(|f| f.peak.to_string())
            .unwrap_or_else(|| NO_DATA.to_string()),
    ));
    out.push_str(&kv_line("bottleneck events", report.bottlenecks.total));

    out
}

pub fn render_report(report: &PerformanceReport, opts: &RenderOptions) -> String {
    let mut out = render_summary(report, opts);
    if opts.summary_only {
        return out;
    }

    let proofs = &report.proofs;

    //-------------------------------------------------------------------------
    // Proof latency
    //-------------------------------------------------------------------------
    out.push_str(&section("Round trip latency", opts));
    out.push_str(&latency_header());
    out.push_str(&latency_row("all", proofs.round_trip_ms.as_ref(), "ms"));
    for (proof_type, stats) in &proofs.round_trip_by_type {
        out.push_str(&latency_row(proof_type, Some(stats), "ms"));
    }

    out.push_str(&section("Proof timing", opts));
    out.push_str(&latency_header());
    out.push_str(&latency_row("pure proof", proofs.proof_ms.as_ref(), "ms"));
    out.push_str(&latency_row("queue wait", proofs.queue_wait_ms.as_ref(), "ms"));
    match &proofs.cache {
        Some(c) => out.push_str(&kv_line(
            "cache hits",
            format!(
                "{} of {} timed completions ({:.1}%)",
                c.hits, c.with_timing, c.hit_rate_pct
            ),
        )),
        None => out.push_str(&kv_line("cache hits", NO_DATA)),
    }

    if opts.show_charts {
        out.push_str(&section("Round trip distribution", opts));
        out.push_str(&histogram_lines(&proofs.histogram));
    }

    out.push_str(&section("Submission gaps", opts));
    out.push_str(&gap_lines(proofs.submission_gaps.as_ref()));

    //-------------------------------------------------------------------------
    // Transactions
    //-------------------------------------------------------------------------
    out.push_str(&section("Transactions", opts));
    match &report.transactions {
        Some(t) => {
            out.push_str(&kv_line("sent", t.count));
            out.push_str(&kv_line("per sec", fmt_value(t.tx_per_sec, "/s")));
            out.push_str(&kv_line(
                "instructions",
                format!("{} (mean {:.1})", t.total_instructions, t.mean_instructions),
            ));
            for (tx_type, count) in &t.by_type {
                out.push_str(&kv_line(&format!("type {tx_type}"), count));
            }
            out.push_str(&gap_lines(t.gaps.as_ref()));
        }
        None => out.push_str(&format!("  {NO_DATA}\n")),
    }

    //-------------------------------------------------------------------------
    // Queues
    //-------------------------------------------------------------------------
    out.push_str(&section("Queues", opts));
    if report.queues.is_empty() {
        out.push_str(&format!("  {NO_DATA}\n"));
    } else {
        out.push_str(&format!(
            "  {:<20} {:>8} {:>8} {:>8} {:>7} {:>11} {:>9} {:>13}\n",
            "tree", "updates", "peak", "final", "drains", "drain mean", "responses", "response mean"
        ));
        for q in &report.queues {
            out.push_str(&format!(
                "  {:<20} {:>8} {:>8} {:>8} {:>7} {:>11} {:>9} {:>13}\n",
                truncate(&q.tree, 20),
                q.updates,
                q.peak_items,
                q.final_items,
                q.transitions.drain_secs.len(),
                fmt_value(q.drain.as_ref().map(|s| s.mean), "s"),
                q.transitions.response_secs.len(),
                fmt_value(q.response.as_ref().map(|s| s.mean), "s"),
            ));
        }
    }

    //-------------------------------------------------------------------------
    // Bottlenecks
    //-------------------------------------------------------------------------
    out.push_str(&section("Bottlenecks", opts));
    for category in [
        BottleneckCategory::IndexerSyncWait,
        BottleneckCategory::BatchLimit,
        BottleneckCategory::Idle,
    ] {
        out.push_str(&kv_line(category.label(), report.bottlenecks.count(category)));
    }

    //-------------------------------------------------------------------------
    // Pipeline
    //-------------------------------------------------------------------------
    out.push_str(&section("In-flight estimate", opts));
    match &report.in_flight {
        Some(f) => {
            out.push_str(&kv_line("bin width", fmt_value(Some(f.bin_secs), "s")));
            out.push_str(&kv_line("bins", f.bins.len()));
            out.push_str(&kv_line("peak", f.peak));
            out.push_str(&kv_line("mean", fmt_value(Some(f.mean), "")));
        }
        None => out.push_str(&format!("  {NO_DATA}\n")),
    }

    out.push_str(&section("V2 throughput", opts));
    if report.throughput.is_empty() {
        out.push_str(&format!("  {NO_DATA}\n"));
    } else {
        out.push_str(&format!(
            "  {:<12} {:>6} {:>10} {:>8} {:>12} {:>12} {:>12}\n",
            "tree type", "ops", "items", "batches", "duration", "items/s", "reported tps"
        ));
        for t in &report.throughput {
            out.push_str(&format!(
                "  {:<12} {:>6} {:>10} {:>8} {:>12} {:>12} {:>12}\n",
                truncate(&t.tree_type, 12),
                t.operations,
                t.items_processed,
                t.zkp_batches,
                format!("{}ms", t.total_duration_ms),
                fmt_value(t.items_per_sec, "/s"),
                fmt_value(t.mean_reported_tps, ""),
            ));
        }
    }

    out
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut t: String = s.chars().take(width.saturating_sub(1)).collect();
    t.push('…');
    t
}
