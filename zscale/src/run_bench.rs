use crate::zscale_common::*;
use matrix_scale::bench::{compare, TimingSummary};
use matrix_scale::reference::reference_scale;

#[derive(Args, Debug)]
pub struct BenchArgs {
    /// number of rows
    #[arg(long, default_value_t = 10000)]
    nrow: usize,

    /// number of columns
    #[arg(long, default_value_t = 100)]
    ncol: usize,

    /// mean of the simulated entries
    #[arg(long, default_value_t = 14.0)]
    mean: f64,

    /// standard deviation of the simulated entries
    #[arg(long, default_value_t = 5.0)]
    sd: f64,

    /// repetitions per method
    #[arg(long, short, default_value_t = 20)]
    reps: usize,

    /// Time row normalization instead of column normalization
    #[arg(long, default_value_t = false)]
    rows: bool,

    /// Save every timing to this file
    #[arg(long, short)]
    out: Option<Box<str>>,

    /// Show a progress bar
    #[arg(long, default_value_t = false)]
    progress: bool,

    /// verbosity
    #[arg(long, short)]
    verbose: bool,
}

pub fn run_bench(args: &BenchArgs) -> anyhow::Result<()> {
    init_logger(args.verbose);

    let xx = Mat::rnorm_with(args.nrow, args.ncol, args.mean, args.sd)?;

    let margin = if args.rows {
        Margin::Rows
    } else {
        Margin::Columns
    };
    let opts = NormalizeOptions {
        margin,
        ..Default::default()
    };

    // both methods have to agree before their speed means anything
    let gap = (&normalize(&xx, &opts)?.data - &reference_scale(&xx, margin)?)
        .iter()
        .fold(0_f64, |acc, d| acc.max(d.abs()));
    if gap > 1e-8 {
        warn!("normalize and reference differ by up to {:.3e}", gap);
    } else {
        info!("normalize and reference agree within {:.3e}", gap);
    }

    let cmp = compare(
        args.reps,
        args.progress,
        ("normalize", "reference"),
        || Ok(normalize(&xx, &opts)?),
        || Ok(reference_scale(&xx, margin)?),
    )?;

    let lines: Vec<Box<str>> = vec![
        TimingSummary::header("\t").into_boxed_str(),
        cmp.fast.to_line("\t").into_boxed_str(),
        cmp.reference.to_line("\t").into_boxed_str(),
    ];
    write_lines(&lines, "stdout")?;

    if let Some(out) = &args.out {
        mkdir(out)?;
        cmp.save(out)?;
        info!("Wrote {}", out);
    }
    Ok(())
}
