use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use portsim::util::atomic_write;
use portsim::{RunFile, RunOverrides, execute, init_logging, to_json};

#[derive(Parser, Debug)]
#[command(name = "portsim")]
#[command(about = "Monte Carlo portfolio simulator with risk analytics")]
struct Args {
    /// YAML run file describing the portfolio, horizon and model
    run_file: PathBuf,

    /// Number of simulated paths (overrides the run file)
    #[arg(short = 'n', long)]
    simulations: Option<usize>,

    /// Base seed for reproducible runs (overrides the run file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Goal value for the goal-probability report
    #[arg(short, long)]
    target: Option<f64>,

    /// Run file whose holdings are compared against RUN_FILE
    #[arg(short, long)]
    compare: Option<PathBuf>,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level, args.log_file.as_deref())?;

    let compare_holdings = match &args.compare {
        Some(path) => Some(RunFile::load(path)?.holdings),
        None => None,
    };

    let run = RunFile::load(&args.run_file)?.with_overrides(RunOverrides {
        num_simulations: args.simulations,
        seed: args.seed,
        goal_target: args.target,
        compare_holdings,
    });

    let output = execute(&run)?;
    let json = to_json(&output)?;

    match &args.output {
        Some(path) => {
            atomic_write(path, &json)
                .wrap_err_with(|| format!("failed to write report to {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }

    Ok(())
}
