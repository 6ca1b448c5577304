mod run_apply;
mod run_bench;
mod run_scale;
mod run_simulate;
mod zscale_common;

use run_apply::*;
use run_bench::*;
use run_scale::*;
use run_simulate::*;
use zscale_common::*;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "ZSCALE",
    long_about = "Z-score normalization of dense matrices by columns or rows.\n\
		  Data files are delimited text (optionally gzipped),\n\
		  one line per row, `NA` or `NaN` for missing values."
)]
struct Cli {
    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Center and scale a matrix",
        long_about = "Normalize a matrix in four steps: \n\
		      (1) Keep the selected rows, then the selected columns\n\
		      (2) Compute the mean of each column (or row), skipping missing values\n\
		      (3) Compute the sample standard deviation around that mean\n\
		      (4) Subtract the mean and divide by the standard deviation.\n"
    )]
    Scale(ScaleArgs),

    #[command(
        about = "Apply saved statistics to new data",
        long_about = "Normalize new data with the center/scale vectors\n\
		      saved by `zscale scale`, or undo the normalization\n\
		      with `--revert`.\n"
    )]
    Apply(ApplyArgs),

    /// Simulate a Gaussian matrix
    Simulate(SimulateArgs),

    #[command(
        about = "Time the normalization against a reference implementation",
        long_about = "Simulate a Gaussian matrix and time repeated calls of\n\
		      the normalization routine and of a baseline built on\n\
		      ndarray's `mean_axis` and `std_axis`.\n"
    )]
    Bench(BenchArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.commands {
        Commands::Scale(args) => {
            run_scale(args)?;
        }
        Commands::Apply(args) => {
            run_apply(args)?;
        }
        Commands::Simulate(args) => {
            run_simulate(args)?;
        }
        Commands::Bench(args) => {
            run_bench(args)?;
        }
    }

    info!("Done");
    Ok(())
}
