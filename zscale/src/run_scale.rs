use crate::zscale_common::*;

#[derive(Args, Debug)]
pub struct ScaleArgs {
    /// Data file, one line per row (`.gz` for gzipped input)
    #[arg(required = true)]
    data_file: Box<str>,

    /// Output header
    #[arg(long, short, required = true)]
    out: Box<str>,

    /// Compute the statistics per row instead of per column
    #[arg(long, default_value_t = false)]
    rows: bool,

    /// Do not subtract the mean
    #[arg(long, default_value_t = false)]
    no_center: bool,

    /// Do not divide by the standard deviation
    #[arg(long, default_value_t = false)]
    no_scale: bool,

    /// Do not save the center/scale vectors
    #[arg(long, default_value_t = false)]
    no_stats: bool,

    /// Rows to keep, 0-based and comma-separated, in the output order
    #[arg(long, value_delimiter(','))]
    select_rows: Option<Vec<usize>>,

    /// Columns to keep, 0-based and comma-separated, in the output order
    #[arg(long, value_delimiter(','))]
    select_cols: Option<Vec<usize>>,

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

pub fn run_scale(args: &ScaleArgs) -> anyhow::Result<()> {
    init_logger(args.verbose);

    let xx = read_matrix(&args.data_file, &args.delim, args.header)?;

    let margin = if args.rows {
        Margin::Rows
    } else {
        Margin::Columns
    };

    let opts = NormalizeOptions {
        margin,
        center: !args.no_center,
        scale: !args.no_scale,
        attach_stats: !args.no_stats,
        rows: args.select_rows.clone().map(Selector::Indices),
        cols: args.select_cols.clone().map(Selector::Indices),
    };

    let out = normalize(&xx, &opts)?;
    info!(
        "Normalized {} x {} by {}s",
        out.data.nrows(),
        out.data.ncols(),
        margin.name()
    );

    let files = OutputFiles::new(&args.out);
    mkdir(&files.scaled)?;

    out.data.to_tsv(&files.scaled)?;
    info!("Wrote {}", files.scaled);

    if let Some(stats) = &out.stats {
        if let Some(sig) = &stats.scale {
            let ndegenerate = sig.iter().filter(|&&s| !(s.is_finite() && s > 0.0)).count();
            if ndegenerate > 0 {
                warn!(
                    "{} {}s have zero or undefined standard deviation",
                    ndegenerate,
                    margin.name()
                );
            }
        }

        stats.to_json(&files.stats)?;
        info!("Wrote {}", files.stats);

        // name each lane by its position in the input
        let bound = margin.num_lanes(xx.dim());
        let lanes = match margin {
            Margin::Columns => opts.cols.as_ref(),
            Margin::Rows => opts.rows.as_ref(),
        }
        .map(|sel| sel.resolve(bound, margin.name()))
        .transpose()?
        .unwrap_or_else(|| (0..bound).collect());

        let names: Vec<Box<str>> = lanes
            .iter()
            .map(|i| i.to_string().into_boxed_str())
            .collect();

        let narrowed = subset(&xx, opts.rows.as_ref(), opts.cols.as_ref())?;
        MarginStatistics::from_matrix(&narrowed, margin).save(&files.margin, &names, "\t")?;
        info!("Wrote {}", files.margin);
    }

    Ok(())
}
