pub use nalgebra::DMatrix;

use crate::annotation::ScalingAnnotation;
use crate::errors::NormalizeError;
use crate::margin_stat::Margin;
use crate::ndarray_util::sample_normal;
use crate::normalize::{normalize, normalize_owned, NormalizeOptions};
use crate::traits::*;
use ndarray::Array2;
use num_traits::Float;
use rand::Rng;
use rayon::prelude::*;

/// Copy a column-major `DMatrix` into an `ndarray::Array2`
pub fn dmatrix_to_array<T>(xx: &DMatrix<T>) -> Array2<T>
where
    T: nalgebra::Scalar + Copy,
{
    Array2::from_shape_fn(xx.shape(), |(i, j)| xx[(i, j)])
}

pub fn array_to_dmatrix<T>(xx: &Array2<T>) -> DMatrix<T>
where
    T: nalgebra::Scalar + Copy,
{
    DMatrix::from_fn(xx.nrows(), xx.ncols(), |i, j| xx[(i, j)])
}

impl<T> SampleOps for DMatrix<T>
where
    T: nalgebra::Scalar + Float + Send,
{
    type Mat = Self;
    type Scalar = T;

    fn runif(dd: usize, nn: usize) -> anyhow::Result<Self::Mat> {
        let rvec: Vec<T> = (0..(dd * nn))
            .into_par_iter()
            .map_init(rand::rng, |rng, _| {
                let x: f64 = rng.random();
                T::from(x).unwrap_or_else(T::nan)
            })
            .collect();

        Ok(DMatrix::<T>::from_vec(dd, nn, rvec))
    }

    fn rnorm_with(dd: usize, nn: usize, mean: f64, sd: f64) -> anyhow::Result<Self::Mat> {
        let rvec = sample_normal::<T>(dd * nn, mean, sd)?;
        Ok(DMatrix::<T>::from_vec(dd, nn, rvec))
    }
}

impl<T> ScaleOps for DMatrix<T>
where
    T: nalgebra::Scalar + Float,
{
    type Mat = Self;
    type Scalar = T;

    fn standardize(
        &self,
        opts: &NormalizeOptions,
    ) -> Result<(Self::Mat, Option<ScalingAnnotation<T>>), NormalizeError> {
        let (yy, stats) = normalize(&dmatrix_to_array(self), opts)?.into_parts();
        Ok((array_to_dmatrix(&yy), stats))
    }

    fn sweep_margin(&self, margin: Margin, center: bool, scale: bool) -> Self::Mat {
        let yy = normalize_owned(dmatrix_to_array(self), margin, center, scale, false).data;
        array_to_dmatrix(&yy)
    }
}
