use crate::zscale_common::*;

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Data file, one line per row (`.gz` for gzipped input)
    #[arg(required = true)]
    data_file: Box<str>,

    /// Statistics saved by `zscale scale` (`.stats.json`)
    #[arg(long, short, required = true)]
    stats: Box<str>,

    /// Output file
    #[arg(long, short, required = true)]
    out: Box<str>,

    /// Undo the normalization instead: `y * scale + center`
    #[arg(long, default_value_t = false)]
    revert: bool,

    /// Column delimiter
    #[arg(long, short = 'd', default_value = "\t")]
    delim: Box<str>,

    /// The first line is a header
    #[arg(long, default_value_t = false)]
    header: bool,

    /// verbosity
    #[arg(long, short)]
    verbose: bool,
}

pub fn run_apply(args: &ApplyArgs) -> anyhow::Result<()> {
    init_logger(args.verbose);

    let xx = read_matrix(&args.data_file, &args.delim, args.header)?;

    let stats = ScalingAnnotation::<f64>::from_json(&args.stats)?;
    info!(
        "Loaded {} statistics from {}",
        stats.margin.name(),
        args.stats
    );

    let yy = if args.revert {
        stats.revert(&xx)?
    } else {
        stats.apply(&xx)?
    };

    mkdir(&args.out)?;
    yy.to_tsv(&args.out)?;
    info!("Wrote {}", args.out);
    Ok(())
}
