#![allow(dead_code)]

pub use clap::{Args, Parser, Subcommand};
pub use log::{info, warn};

pub use matrix_scale::common_io::{mkdir, write_lines};
pub use matrix_scale::margin_stat::{Margin, MarginStatistics};
pub use matrix_scale::normalize::{normalize, NormalizeOptions};
pub use matrix_scale::selector::subset;
pub use matrix_scale::traits::{IoOps, SampleOps};
pub use matrix_scale::{ScalingAnnotation, Selector};

pub type Mat = ndarray::Array2<f64>;

/// Turn on `info` messages if asked, then start the logger
pub fn init_logger(verbose: bool) {
    if verbose {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();
}

/// Read a delimited matrix, one line per row
/// * `data_file` - file name--either gzipped or not
/// * `delim` - column delimiter
/// * `header` - skip the first data line
pub fn read_matrix(data_file: &str, delim: &str, header: bool) -> anyhow::Result<Mat> {
    let skip = if header { Some(0) } else { None };
    let xx = Mat::read_file_delim(data_file, delim, skip)?;
    info!("Read {} x {} matrix from {}", xx.nrows(), xx.ncols(), data_file);
    Ok(xx)
}

/// Output file names derived from `--out`
pub struct OutputFiles {
    pub scaled: Box<str>,
    pub stats: Box<str>,
    pub margin: Box<str>,
}

impl OutputFiles {
    pub fn new(out: &str) -> Self {
        OutputFiles {
            scaled: format!("{}.scaled.tsv.gz", out).into_boxed_str(),
            stats: format!("{}.stats.json", out).into_boxed_str(),
            margin: format!("{}.margin.tsv.gz", out).into_boxed_str(),
        }
    }
}
