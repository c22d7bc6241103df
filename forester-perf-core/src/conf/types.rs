use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: u32 = 1;

/// Resolved tool configuration. Every field has a default, so an empty file
/// (or no file at all) is valid.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerfConfig {
    pub version: u32,
    pub analysis: AnalysisConfig,
    pub chart: ChartConfig,
}

impl Default for PerfConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            analysis: AnalysisConfig::default(),
            chart: ChartConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Inter-event gaps longer than this are reported as large.
    pub large_gap_secs: f64,

    /// Queue response samples shorter than this are treated as noise.
    pub noise_floor_ms: f64,

    /// Width of the wall-clock bins used for the in-flight estimate.
    pub in_flight_bin_secs: f64,

    /// Upper bound on in-flight bins; wider bins are used past it.
    pub in_flight_max_bins: usize,

    /// Ascending bin boundaries for the round-trip histogram.
    pub histogram_bounds_ms: Vec<f64>,

    /// Headroom added above the largest sample for the final histogram edge.
    pub histogram_margin_ms: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            large_gap_secs: 10.0,
            noise_floor_ms: 10.0,
            in_flight_bin_secs: 1.0,
            in_flight_max_bins: 10_000,
            histogram_bounds_ms: vec![
                0.0, 500.0, 1000.0, 2000.0, 5000.0, 10000.0, 20000.0, 30000.0, 60000.0,
            ],
            histogram_margin_ms: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
        }
    }
}
