use serde::Serialize;

/// Bin edges for a set of samples.
///
/// Fixed `bounds` at or above the largest sample are dropped and replaced by
/// one final edge at `max + margin`. A lower edge is prepended when a sample
/// falls below the first remaining edge, which also covers the case where
/// every bound was dropped. The result always has at least two strictly
/// increasing edges and its last edge exceeds `max`.
pub fn histogram_edges(min: f64, max: f64, bounds: &[f64], margin: f64) -> Vec<f64> {
    let margin = if margin > 0.0 { margin } else { 1.0 };

    let mut edges: Vec<f64> = bounds.iter().copied().filter(|b| *b < max).collect();
    edges.push(max + margin);

    if min < edges[0] {
        edges.insert(0, min.min(0.0));
    }

    edges
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

impl HistogramBin {
    pub fn label(&self) -> String {
        format!("{:.0}–{:.0}ms", self.lower, self.upper)
    }
}

#[derive(Debug, Clone)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<u64>,
}

impl Histogram {
    pub fn with_edges(edges: Vec<f64>) -> Self {
        let bins = edges.len().saturating_sub(1).max(1);
        Self {
            edges,
            counts: vec![0; bins],
        }
    }

    /// `None` when there are no finite samples.
    pub fn from_samples(samples: &[f64], bounds: &[f64], margin: f64) -> Option<Self> {
        let finite = samples.iter().copied().filter(|v| v.is_finite());
        let (min, max) = finite.clone().fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

        let mut histogram = Self::with_edges(histogram_edges(min, max, bounds, margin));
        for value in finite {
            histogram.record(value);
        }
        Some(histogram)
    }

    /// Half-open `[lo, hi)` bins; anything outside lands in the nearest end bin.
    pub fn record(&mut self, value: f64) {
        for (i, upper) in self.edges.iter().skip(1).enumerate() {
            if value < *upper {
                self.counts[i] += 1;
                return;
            }
        }
        if let Some(last) = self.counts.last_mut() {
            *last += 1;
        }
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn bins(&self) -> Vec<HistogramBin> {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, count)| HistogramBin {
                lower: w[0],
                upper: w[1],
                count: *count,
            })
            .collect()
    }
}
