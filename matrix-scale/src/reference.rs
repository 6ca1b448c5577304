use crate::errors::NormalizeError;
use crate::margin_stat::Margin;
use ndarray::{Array2, ArrayBase, Data, Ix2};
use num_traits::{Float, FromPrimitive};

/// Plain z-scoring built on `mean_axis` and `std_axis(ddof = 1)`.
///
/// No NaN handling, no selectors, no identity-value switches: this is
/// the yardstick [`crate::normalize::normalize`] is timed and checked
/// against.
///
/// # Errors
/// * `NormalizeError::Shape` - the reduced axis is empty
///
pub fn reference_scale<S, T>(xx: &ArrayBase<S, Ix2>, margin: Margin) -> Result<Array2<T>, NormalizeError>
where
    S: Data<Elem = T>,
    T: Float + FromPrimitive,
{
    let ax = margin.reduce_axis();

    let mu = xx.mean_axis(ax).ok_or_else(|| {
        NormalizeError::shape(format!("cannot average over an empty axis {}", ax.index()))
    })?;
    let sig = xx.std_axis(ax, T::one());

    Ok((xx - &mu.insert_axis(ax)) / &sig.insert_axis(ax))
}

/// Mean-centering only, the `scale = false` counterpart of
/// [`reference_scale`]
pub fn reference_centre<S, T>(xx: &ArrayBase<S, Ix2>, margin: Margin) -> Result<Array2<T>, NormalizeError>
where
    S: Data<Elem = T>,
    T: Float + FromPrimitive,
{
    let ax = margin.reduce_axis();

    let mu = xx.mean_axis(ax).ok_or_else(|| {
        NormalizeError::shape(format!("cannot average over an empty axis {}", ax.index()))
    })?;

    Ok(xx - &mu.insert_axis(ax))
}
