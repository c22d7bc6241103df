use crate::conf::load_config_or_default;
use crate::logging::OutputFormat;
use crate::metrics::{PerformanceReport, compare};
use crate::pipeline::load_log;
use crate::render::{render_comparison, render_json, render_yaml};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Log of the reference run
    pub baseline: PathBuf,

    /// Log of the run being evaluated
    pub candidate: PathBuf,

    /// Analysis configuration (HCL)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn run(args: CompareArgs) -> Result<()> {
    let cfg = load_config_or_default(args.config.as_deref())?;

    let baseline = PerformanceReport::build(&load_log(&args.baseline)?, &cfg.analysis);
    let candidate = PerformanceReport::build(&load_log(&args.candidate)?, &cfg.analysis);

    let cmp = compare(
        &baseline,
        args.baseline.display().to_string(),
        &candidate,
        args.candidate.display().to_string(),
    );

    let rendered = match args.format {
        OutputFormat::Text => render_comparison(&cmp),
        OutputFormat::Json => render_json(&cmp)?,
        OutputFormat::Yaml => render_yaml(&cmp)?,
    };
    println!("{rendered}");

    Ok(())
}
