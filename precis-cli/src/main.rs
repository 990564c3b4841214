//! Precis CLI
//!
//! Runs the precision-loss experiment, prints the error table (or JSON)
//! to stdout and writes the log-scale error chart.
//!
//! Logs go to stderr; set RUST_LOG to change verbosity.

use clap::Parser;
use precis::{Experiment, ExperimentConfig, Outcome, ReferenceConstant, TableRenderer};
use precis_core::PrecisError;
use precis_plot::{render_chart, ChartOptions, PlotError};
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "precis")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compare truncating and rounding pi by their error in a sphere volume", long_about = None)]
struct Cli {
    /// Fractional digits of pi to keep, ascending
    #[arg(short, long, value_delimiter = ',')]
    digits: Option<Vec<usize>>,

    /// Sphere radius (decimal literal)
    #[arg(short, long)]
    radius: Option<String>,

    /// Significant digits for all decimal arithmetic
    #[arg(short, long)]
    precision: Option<usize>,

    /// JSON file with an experiment configuration; flags override it
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Where to write the SVG chart
    #[arg(long, value_name = "PATH", default_value = "precision_error.svg")]
    plot: PathBuf,

    /// Skip the chart
    #[arg(long)]
    no_plot: bool,

    /// Print the outcome as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Also print the full baseline volume under the table
    #[arg(long)]
    baseline: bool,
}

/// Config file first, then explicit flags on top
fn build_config(cli: &Cli) -> Result<ExperimentConfig, PrecisError> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                PrecisError::parse_error(format!("cannot read '{}': {}", path.display(), e))
            })?;
            serde_json::from_str(&text).map_err(|e| {
                PrecisError::parse_error(format!("bad config '{}': {}", path.display(), e))
            })?
        }
        None => ExperimentConfig::default(),
    };

    if let Some(digits) = &cli.digits {
        config.digit_counts = digits.clone();
    }
    if let Some(radius) = &cli.radius {
        config.radius = radius.clone();
    }
    if let Some(precision) = cli.precision {
        config.precision = precision;
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), PrecisError> {
    let config = build_config(cli)?;
    let experiment = Experiment::from_config(ReferenceConstant::pi(), &config);
    let outcome = experiment.run()?;

    if cli.json {
        println!("{}", precis::render_json(&outcome)?);
    } else {
        print!("{}", TableRenderer::new().with_baseline(cli.baseline).render(&outcome));
    }

    if !cli.no_plot {
        write_chart(&outcome, &ChartOptions::default().with_path(&cli.plot))?;
    }

    Ok(())
}

/// An all-zero outcome has nothing for a log axis and only warns;
/// a chart that cannot be written fails the run.
fn write_chart(outcome: &Outcome, options: &ChartOptions) -> Result<(), PrecisError> {
    match render_chart(outcome, options) {
        Ok(path) => {
            info!(path = %path.display(), "open the chart to compare both series");
            Ok(())
        }
        Err(PlotError::NothingToPlot) => {
            warn!("every error is zero, no chart written");
            Ok(())
        }
        Err(e @ PlotError::Backend(_)) => Err(PrecisError::internal(format!(
            "cannot write chart '{}': {}",
            options.path.display(),
            e
        ))
        .with_suggestion("Pass a writable --plot path or use --no-plot")),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("precis=info,precis_plot=info,precis_cli=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        if cli.json {
            match serde_json::to_string_pretty(&e) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}", e),
            }
        } else {
            eprintln!("error: {}", e);
        }
        process::exit(1);
    }
}
