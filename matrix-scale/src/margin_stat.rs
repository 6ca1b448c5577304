use crate::common_io::write_lines;
use ndarray::{Array1, ArrayBase, Axis, Data, Ix2, Zip};
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Orientation of the statistics
///
/// * `Columns` - one statistic per column, reduced over the rows
/// * `Rows` - one statistic per row, reduced over the columns
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Margin {
    #[default]
    Columns,
    Rows,
}

impl Margin {
    /// The axis we sum over
    pub fn reduce_axis(self) -> Axis {
        match self {
            Margin::Columns => Axis(0),
            Margin::Rows => Axis(1),
        }
    }

    /// Number of statistics for a matrix of shape `(nrows, ncols)`
    pub fn num_lanes(self, (nrows, ncols): (usize, usize)) -> usize {
        match self {
            Margin::Columns => ncols,
            Margin::Rows => nrows,
        }
    }

    pub fn transpose(self) -> Self {
        match self {
            Margin::Columns => Margin::Rows,
            Margin::Rows => Margin::Columns,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Margin::Columns => "column",
            Margin::Rows => "row",
        }
    }
}

/// Per-lane summary of a matrix along a margin. NaN entries are
/// treated as missing; everything else, infinities included, is
/// counted.
///
/// * `nobs` - number of non-missing values
/// * `mean` - mean of the non-missing values (NaN if there are none)
/// * `std` - sample standard deviation, `n-1` in the denominator,
///   around `mean` (NaN if `nobs < 2`)
///
#[derive(Debug, Clone, PartialEq)]
pub struct MarginStatistics<T> {
    pub margin: Margin,
    pub nobs: Array1<usize>,
    pub mean: Array1<T>,
    pub std: Array1<T>,
}

impl<T> MarginStatistics<T>
where
    T: Float,
{
    pub fn from_matrix<S>(xx: &ArrayBase<S, Ix2>, margin: Margin) -> Self
    where
        S: Data<Elem = T>,
    {
        let (nobs, mean) = margin_means(xx, margin);
        let std = margin_std(xx, margin, &nobs, &mean);
        MarginStatistics {
            margin,
            nobs,
            mean,
            std,
        }
    }

    pub fn num_lanes(&self) -> usize {
        self.mean.len()
    }

    /// One line per lane: `name nobs mu sig`
    pub fn to_string_vec(&self, names: &[Box<str>], sep: &str) -> anyhow::Result<Vec<Box<str>>> {
        if names.len() != self.num_lanes() {
            anyhow::bail!(
                "{} names for {} {} statistics",
                names.len(),
                self.num_lanes(),
                self.margin.name()
            );
        }

        Ok((0..self.num_lanes())
            .map(|i| {
                format!(
                    "{}{}{}{}{}{}{}",
                    names[i],
                    sep,
                    self.nobs[i],
                    sep,
                    format_stat(self.mean[i]),
                    sep,
                    format_stat(self.std[i])
                )
                .into_boxed_str()
            })
            .collect())
    }

    /// Save the statistics to a file
    /// # Arguments
    /// * `filename` - output file (gzipped if it ends with `.gz`)
    /// * `names` - one name per lane
    /// * `sep` - separator
    pub fn save(&self, filename: &str, names: &[Box<str>], sep: &str) -> anyhow::Result<()> {
        let mut out = self.to_string_vec(names, sep)?;
        let header = format!("#name{}nobs{}mu{}sig", sep, sep, sep);
        out.insert(0, header.into_boxed_str());
        write_lines(&out, filename)
    }
}

/// Count and mean of the non-missing values of each lane
pub fn margin_means<S, T>(xx: &ArrayBase<S, Ix2>, margin: Margin) -> (Array1<usize>, Array1<T>)
where
    S: Data<Elem = T>,
    T: Float,
{
    let nlanes = margin.num_lanes(xx.dim());
    let mut nobs = Array1::<usize>::zeros(nlanes);
    let mut tot = Array1::<T>::zeros(nlanes);

    // walk the reduced axis one slice at a time so that a row-major
    // matrix is read contiguously for column statistics
    for xx_k in xx.axis_iter(margin.reduce_axis()) {
        Zip::from(&mut nobs)
            .and(&mut tot)
            .and(&xx_k)
            .for_each(|n, s, &x| {
                if !x.is_nan() {
                    *n += 1;
                    *s = *s + x;
                }
            });
    }

    let mean = Zip::from(&tot)
        .and(&nobs)
        .map_collect(|&s, &n| s / count_as::<T>(n));

    (nobs, mean)
}

/// Sample standard deviation of each lane around the given `mean`
pub fn margin_std<S, T>(
    xx: &ArrayBase<S, Ix2>,
    margin: Margin,
    nobs: &Array1<usize>,
    mean: &Array1<T>,
) -> Array1<T>
where
    S: Data<Elem = T>,
    T: Float,
{
    let nlanes = margin.num_lanes(xx.dim());
    let mut ss = Array1::<T>::zeros(nlanes);

    for xx_k in xx.axis_iter(margin.reduce_axis()) {
        Zip::from(&mut ss)
            .and(&xx_k)
            .and(mean)
            .for_each(|s, &x, &mu| {
                if !x.is_nan() {
                    let d = x - mu;
                    *s = *s + d * d;
                }
            });
    }

    Zip::from(&ss).and(nobs).map_collect(|&s, &n| match n {
        0 => T::nan(),
        _ => (s / count_as::<T>(n - 1)).sqrt(),
    })
}

fn count_as<T: Float>(n: usize) -> T {
    T::from(n).unwrap_or_else(T::nan)
}

fn format_stat<T: Float>(x: T) -> String {
    match x.to_f64() {
        Some(v) if v.is_finite() && v.abs() > 1e-4 => format!("{:.6}", v)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string(),
        Some(v) if v.is_finite() && v.abs() > 1e-20 => format!("{:.4e}", v),
        Some(v) if v.is_finite() => "0".to_string(),
        Some(v) => format!("{}", v),
        None => "NaN".to_string(),
    }
}
