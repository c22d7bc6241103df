use clap::ValueEnum;
use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "warn";

/// Initialize diagnostics logging on stderr.
///
/// stdout carries the report itself, so every tracing event goes to stderr:
/// - `RUST_LOG` controls filtering (defaults to "warn" if not set)
/// - `json` switches to flattened JSON lines for machine consumption
pub fn init_logging(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);

    if json {
        builder.json().flatten_event(true).init();
    } else {
        builder
            .with_ansi(io::stderr().is_terminal())
            .with_target(false)
            .init();
    }
}

/// Colors only when stdout is a terminal and `NO_COLOR` is unset.
pub fn color_enabled() -> bool {
    io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}
