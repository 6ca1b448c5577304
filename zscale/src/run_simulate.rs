use crate::zscale_common::*;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// number of rows
    #[arg(long, default_value_t = 1000)]
    nrow: usize,

    /// number of columns
    #[arg(long, default_value_t = 100)]
    ncol: usize,

    /// mean of every entry
    #[arg(long, default_value_t = 14.0)]
    mean: f64,

    /// standard deviation of every entry
    #[arg(long, default_value_t = 5.0)]
    sd: f64,

    /// Output file
    #[arg(long, short, required = true)]
    out: Box<str>,

    /// verbosity
    #[arg(long, short)]
    verbose: bool,
}

pub fn run_simulate(args: &SimulateArgs) -> anyhow::Result<()> {
    init_logger(args.verbose);

    let xx = Mat::rnorm_with(args.nrow, args.ncol, args.mean, args.sd)?;
    info!(
        "Sampled {} x {} from N({}, {}^2)",
        args.nrow, args.ncol, args.mean, args.sd
    );

    mkdir(&args.out)?;
    xx.to_tsv(&args.out)?;
    info!("Wrote {}", args.out);
    Ok(())
}
