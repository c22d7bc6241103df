use crate::conf::{PerfConfig, load_config, load_config_or_default};
use crate::render::{render_json, render_yaml};
use anyhow::Result;
use clap::Subcommand;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to config file
        path: PathBuf,
    },

    /// Print resolved configuration as JSON, or YAML with --yaml
    Dump {
        /// Config file; defaults are printed when omitted
        path: Option<PathBuf>,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },
}

pub fn run(cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Check { path } => check(&path),
        ConfigCmd::Dump { path, yaml } => dump(path.as_deref(), yaml),
    }
}

pub fn check(path: &Path) -> Result<()> {
    let cfg = load_config(path)?;

    println!("✔ Config loaded successfully");
    println!("✔ large gap threshold {}s", cfg.analysis.large_gap_secs);
    println!("✔ {} histogram bounds", cfg.analysis.histogram_bounds_ms.len());
    println!("✔ charts {}x{}", cfg.chart.width, cfg.chart.height);

    Ok(())
}

pub fn dump(path: Option<&Path>, yaml: bool) -> Result<()> {
    let cfg: PerfConfig = load_config_or_default(path)?;

    if yaml {
        println!("{}", render_yaml(&cfg)?);
    } else {
        println!("{}", render_json(&cfg)?);
    }

    Ok(())
}
