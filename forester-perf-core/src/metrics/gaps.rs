use crate::pipeline::Timestamp;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LargeGap {
    /// Index of the event that ended the gap.
    pub index: usize,
    pub started_at: Timestamp,
    pub secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapAnalysis {
    pub count: usize,
    pub mean_secs: f64,
    pub max_secs: f64,
    pub threshold_secs: f64,
    pub large_gaps: Vec<LargeGap>,
    pub large_gap_total_secs: f64,
    pub window_secs: f64,
    /// Share of the observation window spent inside large gaps, 0..=1.
    pub large_gap_fraction: f64,
}

pub fn seconds_between(from: Timestamp, to: Timestamp) -> f64 {
    (to - from)
        .num_microseconds()
        .map(|us| us as f64 / 1_000_000.0)
        .unwrap_or_else(|| (to - from).num_milliseconds() as f64 / 1000.0)
}

/// Consecutive differences of a time-ordered sequence, in seconds.
pub fn gaps(timestamps: &[Timestamp]) -> Vec<f64> {
    timestamps
        .windows(2)
        .map(|w| seconds_between(w[0], w[1]))
        .collect()
}

impl GapAnalysis {
    /// `None` for fewer than two timestamps.
    pub fn from_timestamps(timestamps: &[Timestamp], threshold_secs: f64) -> Option<Self> {
        let gaps = gaps(timestamps);
        if gaps.is_empty() {
            return None;
        }

        let large_gaps: Vec<LargeGap> = gaps
            .iter()
            .enumerate()
            .filter(|(_, g)| **g > threshold_secs)
            .map(|(i, g)| LargeGap {
                index: i + 1,
                started_at: timestamps[i],
                secs: *g,
            })
            .collect();

        let large_gap_total_secs: f64 = large_gaps.iter().map(|g| g.secs).sum();
        let window_secs = seconds_between(timestamps[0], timestamps[timestamps.len() - 1]);
        let large_gap_fraction = if window_secs > 0.0 {
            large_gap_total_secs / window_secs
        } else {
            0.0
        };

        Some(Self {
            count: gaps.len(),
            mean_secs: gaps.iter().sum::<f64>() / gaps.len() as f64,
            max_secs: gaps.iter().copied().fold(f64::MIN, f64::max),
            threshold_secs,
            large_gaps,
            large_gap_total_secs,
            window_secs,
            large_gap_fraction,
        })
    }
}
