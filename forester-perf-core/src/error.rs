use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read log file {path}: {source}")]
    ReadLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write chart {path}: {source}")]
    WriteChart {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render chart {path}: {reason}")]
    RenderChart { path: PathBuf, reason: String },

    #[error("failed to serialize report as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize report as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ReportError {
    pub fn read_log(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadLog {
            path: path.into(),
            source,
        }
    }

    pub fn write_chart(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteChart {
            path: path.into(),
            source,
        }
    }

    pub fn render_chart(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::RenderChart {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
