mod error;
mod loader;
pub mod types;


pub use error::ConfigError;
pub use loader::{
    MIN_CHART_HEIGHT, MIN_CHART_WIDTH, load_config, load_config_or_default, validate_config,
};
pub use types::{AnalysisConfig, ChartConfig, PerfConfig};
