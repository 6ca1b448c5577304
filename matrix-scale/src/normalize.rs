use crate::annotation::ScalingAnnotation;
use crate::errors::NormalizeError;
use crate::margin_stat::{margin_means, margin_std, Margin};
use crate::selector::{subset, Selector};
use ndarray::{Array1, Array2, ArrayBase, ArrayD, Data, Ix2, Zip};
use num_traits::Float;

/// Options of [`normalize`]
///
/// * `margin` - compute statistics per column (default) or per row
/// * `center` - subtract the mean
/// * `scale` - divide by the sample standard deviation
/// * `attach_stats` - return the center/scale vectors with the result
/// * `rows` - optional row selector, applied first
/// * `cols` - optional column selector, applied after `rows`
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub margin: Margin,
    pub center: bool,
    pub scale: bool,
    pub attach_stats: bool,
    pub rows: Option<Selector>,
    pub cols: Option<Selector>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        NormalizeOptions {
            margin: Margin::Columns,
            center: true,
            scale: true,
            attach_stats: true,
            rows: None,
            cols: None,
        }
    }
}

impl NormalizeOptions {
    pub fn columns() -> Self {
        Self::default()
    }

    pub fn rows() -> Self {
        NormalizeOptions {
            margin: Margin::Rows,
            ..Self::default()
        }
    }

    pub fn with_center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    pub fn with_scale(mut self, scale: bool) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_stats(mut self, attach_stats: bool) -> Self {
        self.attach_stats = attach_stats;
        self
    }

    pub fn select_rows(mut self, rows: impl Into<Selector>) -> Self {
        self.rows = Some(rows.into());
        self
    }

    pub fn select_cols(mut self, cols: impl Into<Selector>) -> Self {
        self.cols = Some(cols.into());
        self
    }
}

/// A normalized matrix, with the statistics used to produce it if they
/// were asked for
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub data: Array2<T>,
    pub stats: Option<ScalingAnnotation<T>>,
}

impl<T> Normalized<T> {
    pub fn into_parts(self) -> (Array2<T>, Option<ScalingAnnotation<T>>) {
        (self.data, self.stats)
    }
}

/// Center and scale a matrix along a margin
///
/// 1. take the selected rows, then the selected columns
/// 2. compute the mean of each lane, skipping NaN
/// 3. compute the sample standard deviation around that mean if
///    `scale` is set, otherwise use 1
/// 4. use 0 as the center if `center` is not set
/// 5. `(x - center) / scale` for every entry of the lane
///
/// A lane without any non-missing value has a NaN mean, and a lane with
/// fewer than two has a NaN standard deviation; both carry through to
/// the output.
///
/// # Errors
/// * `NormalizeError::Index` - a selector points outside the matrix
///
pub fn normalize<S, T>(
    xx: &ArrayBase<S, Ix2>,
    opts: &NormalizeOptions,
) -> Result<Normalized<T>, NormalizeError>
where
    S: Data<Elem = T>,
    T: Float,
{
    let xx = subset(xx, opts.rows.as_ref(), opts.cols.as_ref())?;
    Ok(normalize_owned(xx, opts.margin, opts.center, opts.scale, opts.attach_stats))
}

/// z-score every column
pub fn normalize_columns<S, T>(xx: &ArrayBase<S, Ix2>) -> Normalized<T>
where
    S: Data<Elem = T>,
    T: Float,
{
    normalize_owned(xx.to_owned(), Margin::Columns, true, true, true)
}

/// z-score every row
pub fn normalize_rows<S, T>(xx: &ArrayBase<S, Ix2>) -> Normalized<T>
where
    S: Data<Elem = T>,
    T: Float,
{
    normalize_owned(xx.to_owned(), Margin::Rows, true, true, true)
}

/// [`normalize`] for arrays whose dimensionality is only known at run
/// time
///
/// # Errors
/// * `NormalizeError::Shape` - the array is not 2-dimensional
/// * `NormalizeError::Index` - a selector points outside the matrix
///
pub fn normalize_dyn<T>(xx: &ArrayD<T>, opts: &NormalizeOptions) -> Result<Normalized<T>, NormalizeError>
where
    T: Float,
{
    let ndim = xx.ndim();
    let xx = xx
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| NormalizeError::shape(format!("expected a 2-D array, got {} dimensions", ndim)))?;
    normalize(&xx, opts)
}

/// Build a matrix from rows of equal length
///
/// # Errors
/// * `NormalizeError::Shape` - rows of different lengths
///
pub fn matrix_from_rows<T>(rows: &[Vec<T>]) -> Result<Array2<T>, NormalizeError>
where
    T: Clone,
{
    let ncols = rows.first().map(|r| r.len()).unwrap_or(0);

    if let Some((i, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
        return Err(NormalizeError::shape(format!(
            "row {} has {} values, expected {}",
            i,
            r.len(),
            ncols
        )));
    }

    let data: Vec<T> = rows.iter().flat_map(|r| r.iter().cloned()).collect();
    Array2::from_shape_vec((rows.len(), ncols), data).map_err(|e| NormalizeError::shape(e.to_string()))
}

pub(crate) fn normalize_owned<T>(
    xx: Array2<T>,
    margin: Margin,
    center: bool,
    scale: bool,
    attach_stats: bool,
) -> Normalized<T>
where
    T: Float,
{
    let nlanes = margin.num_lanes(xx.dim());
    let (nobs, mean) = margin_means(&xx, margin);

    // the standard deviation always uses the actual mean
    let sig = if scale {
        margin_std(&xx, margin, &nobs, &mean)
    } else {
        Array1::ones(nlanes)
    };

    let mu = if center { mean } else { Array1::zeros(nlanes) };

    let data = sweep(xx, margin, &mu, &sig);

    let stats = attach_stats.then(|| ScalingAnnotation {
        margin,
        center: center.then_some(mu),
        scale: scale.then_some(sig),
    });

    Normalized { data, stats }
}

/// `(x - mu[k]) / sig[k]` for every entry `x` in lane `k`
pub(crate) fn sweep<T>(mut xx: Array2<T>, margin: Margin, mu: &Array1<T>, sig: &Array1<T>) -> Array2<T>
where
    T: Float,
{
    for mut xx_k in xx.axis_iter_mut(margin.reduce_axis()) {
        Zip::from(&mut xx_k)
            .and(mu)
            .and(sig)
            .for_each(|x, &m, &s| *x = (*x - m) / s);
    }
    xx
}

/// `y * sig[k] + mu[k]` for every entry `y` in lane `k`
pub(crate) fn unsweep<T>(mut yy: Array2<T>, margin: Margin, mu: &Array1<T>, sig: &Array1<T>) -> Array2<T>
where
    T: Float,
{
    for mut yy_k in yy.axis_iter_mut(margin.reduce_axis()) {
        Zip::from(&mut yy_k)
            .and(mu)
            .and(sig)
            .for_each(|y, &m, &s| *y = *y * s + m);
    }
    yy
}
