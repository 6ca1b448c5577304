use crate::errors::NormalizeError;
use ndarray::{Array2, ArrayBase, Axis, Data, Ix2};

/// Which rows (or columns) take part in a computation
///
/// * `Indices` - positions in the order they should appear; repeats
///   are allowed
/// * `Mask` - one flag per row (or column); `true` keeps it
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Indices(Vec<usize>),
    Mask(Vec<bool>),
}

impl From<Vec<usize>> for Selector {
    fn from(idx: Vec<usize>) -> Self {
        Selector::Indices(idx)
    }
}

impl From<&[usize]> for Selector {
    fn from(idx: &[usize]) -> Self {
        Selector::Indices(idx.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Selector {
    fn from(idx: [usize; N]) -> Self {
        Selector::Indices(idx.to_vec())
    }
}

impl From<Vec<bool>> for Selector {
    fn from(mask: Vec<bool>) -> Self {
        Selector::Mask(mask)
    }
}

impl Selector {
    /// Turn the selector into validated positions along a dimension of
    /// length `bound`
    ///
    /// * `bound` - size of the dimension being selected
    /// * `axis` - "row" or "column", used in error messages
    pub fn resolve(&self, bound: usize, axis: &'static str) -> Result<Vec<usize>, NormalizeError> {
        match self {
            Selector::Indices(idx) => {
                if let Some(&index) = idx.iter().find(|&&i| i >= bound) {
                    return Err(NormalizeError::Index { axis, index, bound });
                }
                Ok(idx.clone())
            }
            Selector::Mask(mask) => {
                if mask.len() != bound {
                    return Err(NormalizeError::MaskLength {
                        axis,
                        len: mask.len(),
                        bound,
                    });
                }
                Ok(mask
                    .iter()
                    .enumerate()
                    .filter_map(|(i, &keep)| keep.then_some(i))
                    .collect())
            }
        }
    }
}

/// Narrow a matrix to the selected rows, then the selected columns.
/// Either selector may be absent, meaning "all".
pub fn subset<S, T>(
    xx: &ArrayBase<S, Ix2>,
    rows: Option<&Selector>,
    cols: Option<&Selector>,
) -> Result<Array2<T>, NormalizeError>
where
    S: Data<Elem = T>,
    T: Clone,
{
    let mut ret = match rows {
        Some(sel) => {
            let idx = sel.resolve(xx.nrows(), "row")?;
            xx.select(Axis(0), &idx)
        }
        None => xx.to_owned(),
    };

    if let Some(sel) = cols {
        let idx = sel.resolve(ret.ncols(), "column")?;
        ret = ret.select(Axis(1), &idx);
    }

    Ok(ret)
}
