mod chart;
mod compare;
mod text;

#[cfg(test)]
mod tests;

pub use chart::{
    Series, histogram_svg, queue_series, rasterize, round_trip_series, series_svg, write_charts,
};
pub use compare::render_comparison;
pub use text::{NO_DATA, RenderOptions, render_report, render_summary};

use crate::error::ReportError;
use serde::Serialize;

pub fn render_json<T: Serialize>(value: &T) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn render_yaml<T: Serialize>(value: &T) -> Result<String, ReportError> {
    Ok(serde_yaml::to_string(value)?)
}
