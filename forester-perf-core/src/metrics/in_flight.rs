use crate::metrics::gaps::seconds_between;
use crate::pipeline::Timestamp;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InFlightBin {
    /// Seconds from the earliest event to the start of this bin.
    pub offset_secs: f64,
    pub submitted: u64,
    pub completed: u64,
    /// Cumulative submitted minus cumulative completed at the end of the bin.
    pub in_flight: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InFlightEstimate {
    pub start: Timestamp,
    pub bin_secs: f64,
    pub bins: Vec<InFlightBin>,
    pub peak: i64,
    pub mean: f64,
}

impl InFlightEstimate {
    /// Fixed-width wall-clock bins aligned to the earliest submission or
    /// completion. `None` when both sequences are empty.
    ///
    /// The bin width is doubled until the window fits in `max_bins` bins.
    pub fn from_events(
        submitted: &[Timestamp],
        completed: &[Timestamp],
        bin_secs: f64,
        max_bins: usize,
    ) -> Option<Self> {
        let start = submitted.iter().chain(completed).min().copied()?;
        let end = submitted.iter().chain(completed).max().copied()?;
        let requested = if bin_secs > 0.0 { bin_secs } else { 1.0 };
        let max_bins = max_bins.max(1);

        let span = seconds_between(start, end);
        let count_for = |width: f64| (span / width).floor() as usize + 1;

        let mut bin_secs = requested;
        while count_for(bin_secs) > max_bins {
            bin_secs *= 2.0;
        }
        let bin_count = count_for(bin_secs);
        if bin_secs > requested {
            warn!(
                span_secs = span,
                requested_bin_secs = requested,
                bin_secs,
                max_bins,
                "in-flight window too long; widened bins"
            );
        }

        let bin_of = |ts: &Timestamp| -> usize {
            let idx = (seconds_between(start, *ts) / bin_secs).floor().max(0.0) as usize;
            idx.min(bin_count - 1)
        };

        let mut sub_counts = vec![0u64; bin_count];
        let mut comp_counts = vec![0u64; bin_count];
        for ts in submitted {
            sub_counts[bin_of(ts)] += 1;
        }
        for ts in completed {
            comp_counts[bin_of(ts)] += 1;
        }

        let mut running = 0i64;
        let bins: Vec<InFlightBin> = sub_counts
            .iter()
            .zip(&comp_counts)
            .enumerate()
            .map(|(i, (s, c))| {
                running += *s as i64 - *c as i64;
                InFlightBin {
                    offset_secs: i as f64 * bin_secs,
                    submitted: *s,
                    completed: *c,
                    in_flight: running,
                }
            })
            .collect();

        let peak = bins.iter().map(|b| b.in_flight).max().unwrap_or(0);
        let mean = bins.iter().map(|b| b.in_flight as f64).sum::<f64>() / bins.len() as f64;

        Some(Self {
            start,
            bin_secs,
            bins,
            peak,
            mean,
        })
    }
}
