use crate::conf::load_config_or_default;
use crate::logging::{OutputFormat, color_enabled};
use crate::metrics::PerformanceReport;
use crate::pipeline::load_log;
use crate::render::{RenderOptions, render_json, render_report, render_yaml, write_charts};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Forester log file to analyze
    pub log: PathBuf,

    /// Analysis configuration (HCL)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print summary statistics only
    #[arg(long)]
    pub summary: bool,

    /// Do not draw charts in the terminal
    #[arg(long)]
    pub no_show: bool,

    /// Write PNG charts to <BASE>_<chart>.png
    #[arg(long, value_name = "BASE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: ReportArgs) -> Result<()> {
    let cfg = load_config_or_default(args.config.as_deref())?;

    let store = load_log(&args.log)?;
    if store.is_empty() {
        warn!(path = %args.log.display(), "no recognized events in log");
    }

    let report = PerformanceReport::build(&store, &cfg.analysis);

    let rendered = match args.format {
        OutputFormat::Text => render_report(
            &report,
            &RenderOptions {
                summary_only: args.summary,
                show_charts: !args.no_show,
                color: color_enabled(),
            },
        ),
        OutputFormat::Json => render_json(&report)?,
        OutputFormat::Yaml => render_yaml(&report)?,
    };
    println!("{rendered}");

    if let Some(base) = &args.output {
        let written = write_charts(&report, &store, &cfg.chart, base)
            .with_context(|| format!("failed to write charts to {}", base.display()))?;
        info!(charts = written.len(), "charts written");
        for path in written {
            eprintln!("chart: {}", path.display());
        }
    }

    Ok(())
}
