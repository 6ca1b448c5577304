pub mod annotation; // center/scale vectors attached to a normalized matrix
pub mod bench; // repeated timing of normalization routines
pub mod common_io; // buffered (gzipped) line io
pub mod dmatrix_util; // nalgebra::DMatrix bridge
pub mod errors;
pub mod margin_stat; // per-row or per-column mean and standard deviation
pub mod ndarray_io;
pub mod ndarray_util; // sampling and scaling for ndarray::Array2
pub mod normalize; // z-score normalization along a margin
pub mod reference; // baseline built on ndarray's own statistics
pub mod selector; // row/column subsetting
pub mod traits;

pub use annotation::ScalingAnnotation;
pub use errors::NormalizeError;
pub use margin_stat::{Margin, MarginStatistics};
pub use normalize::{normalize, normalize_columns, normalize_dyn, normalize_rows};
pub use normalize::{NormalizeOptions, Normalized};
pub use selector::Selector;
