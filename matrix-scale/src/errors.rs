use thiserror::Error;

/// Failures of the normalization routine and its helpers.
///
/// Undefined statistics (a zero or NaN standard deviation) are not
/// errors: they show up as infinite or NaN entries in the output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The input is not a rectangular 2-D array, or a statistic vector
    /// does not line up with the matrix it is applied to
    #[error("shape error: {0}")]
    Shape(String),

    /// A selector index falls outside `[0, bound)`
    #[error("{axis} index {index} is out of bounds [0, {bound})")]
    Index {
        axis: &'static str,
        index: usize,
        bound: usize,
    },

    /// A boolean mask does not cover the dimension it selects
    #[error("{axis} mask has length {len}, expected {bound}")]
    MaskLength {
        axis: &'static str,
        len: usize,
        bound: usize,
    },
}

impl NormalizeError {
    pub fn shape(msg: impl Into<String>) -> Self {
        NormalizeError::Shape(msg.into())
    }

    pub fn is_shape_error(&self) -> bool {
        matches!(self, NormalizeError::Shape(_))
    }

    /// Both out-of-range indices and mis-sized masks count as index
    /// errors
    pub fn is_index_error(&self) -> bool {
        matches!(
            self,
            NormalizeError::Index { .. } | NormalizeError::MaskLength { .. }
        )
    }
}
