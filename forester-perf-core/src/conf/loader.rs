use crate::conf::error::ConfigError;
use crate::conf::types::{CONFIG_VERSION, PerfConfig};
use std::fs;
use std::path::Path;

/// Smallest charts that still leave a plot area inside the axis margins.
pub const MIN_CHART_WIDTH: u32 = 320;
pub const MIN_CHART_HEIGHT: u32 = 200;

pub fn load_config(path: &Path) -> Result<PerfConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let cfg = parse_config(&s, path)?;

    //--------------------------------------------------------------------------
    // Semantic validation (aggregate all problems)
    //--------------------------------------------------------------------------
    validate_config(&cfg).map_err(|problems| ConfigError::Invalid {
        path: path.to_path_buf(),
        problems,
    })?;

    Ok(cfg)
}

/// Falls back to defaults when no path is given.
pub fn load_config_or_default(path: Option<&Path>) -> Result<PerfConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(PerfConfig::default()),
    }
}

pub(crate) fn parse_config(s: &str, path: &Path) -> Result<PerfConfig, ConfigError> {
    if s.trim().is_empty() {
        return Ok(PerfConfig::default());
    }
    hcl::from_str(s).map_err(|e| ConfigError::parse(path, e))
}

pub fn validate_config(cfg: &PerfConfig) -> Result<(), Vec<String>> {
    let mut problems = Vec::new();
    let analysis = &cfg.analysis;

    if cfg.version != CONFIG_VERSION {
        problems.push(format!(
            "unsupported config version {} (expected {CONFIG_VERSION})",
            cfg.version
        ));
    }

    if !(analysis.large_gap_secs > 0.0) {
        problems.push("analysis.large_gap_secs must be greater than 0".to_string());
    }

    if !(analysis.noise_floor_ms >= 0.0) {
        problems.push("analysis.noise_floor_ms must not be negative".to_string());
    }

    if !(analysis.in_flight_bin_secs > 0.0) {
        problems.push("analysis.in_flight_bin_secs must be greater than 0".to_string());
    }

    if analysis.in_flight_max_bins == 0 {
        problems.push("analysis.in_flight_max_bins must be greater than 0".to_string());
    }

    if !(analysis.histogram_margin_ms > 0.0) {
        problems.push("analysis.histogram_margin_ms must be greater than 0".to_string());
    }

    if analysis.histogram_bounds_ms.is_empty() {
        problems.push("analysis.histogram_bounds_ms must not be empty".to_string());
    } else if analysis
        .histogram_bounds_ms
        .windows(2)
        .any(|w| !(w[0] < w[1]))
    {
        problems.push("analysis.histogram_bounds_ms must be strictly ascending".to_string());
    }

    for (name, value, min) in [
        ("chart.width", cfg.chart.width, MIN_CHART_WIDTH),
        ("chart.height", cfg.chart.height, MIN_CHART_HEIGHT),
    ] {
        if value < min {
            problems.push(format!("{name} must be at least {min} (got {value})"));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}
