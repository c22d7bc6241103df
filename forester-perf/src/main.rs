use clap::{Parser, Subcommand};
use forester_perf_core::cli::{compare, config, report};
use forester_perf_core::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "forester-perf",
    version,
    about = "Forester performance reports from prover and forester logs"
)]
struct Cli {
    /// Emit diagnostics as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one log and print a performance report
    Report(report::ReportArgs),

    /// Compare the headline metrics of two logs
    Compare(compare::CompareArgs),

    /// Analysis configuration tooling
    Config {
        #[command(subcommand)]
        cmd: config::ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    let result = match cli.command {
        Command::Report(args) => report::run(args),
        Command::Compare(args) => compare::run(args),
        Command::Config { cmd } => config::run(cmd),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
