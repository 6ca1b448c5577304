pub use ndarray::prelude::*;
use rand::Rng;
use rand_distr::Normal;
use rayon::prelude::*;

use crate::annotation::ScalingAnnotation;
use crate::errors::NormalizeError;
use crate::margin_stat::Margin;
use crate::normalize::{normalize, normalize_owned, NormalizeOptions};
use crate::traits::*;
use num_traits::Float;

impl<T> SampleOps for Array2<T>
where
    T: Float + Send,
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

        Ok(Array2::from_shape_vec((dd, nn), rvec)?)
    }

    fn rnorm_with(dd: usize, nn: usize, mean: f64, sd: f64) -> anyhow::Result<Self::Mat> {
        let rvec = sample_normal::<T>(dd * nn, mean, sd)?;
        Ok(Array2::from_shape_vec((dd, nn), rvec)?)
    }
}

impl<T> ScaleOps for Array2<T>
where
    T: Float,
{
    type Mat = Self;
    type Scalar = T;

    fn standardize(
        &self,
        opts: &NormalizeOptions,
    ) -> Result<(Self::Mat, Option<ScalingAnnotation<T>>), NormalizeError> {
        Ok(normalize(self, opts)?.into_parts())
    }

    fn sweep_margin(&self, margin: Margin, center: bool, scale: bool) -> Self::Mat {
        normalize_owned(self.clone(), margin, center, scale, false).data
    }
}

/// Draw `n` values from `N(mean, sd^2)` in parallel
pub(crate) fn sample_normal<T>(n: usize, mean: f64, sd: f64) -> anyhow::Result<Vec<T>>
where
    T: Float + Send,
{
    anyhow::ensure!(
        sd.is_finite() && sd >= 0.0,
        "standard deviation must be finite and non-negative, got {}",
        sd
    );

    let dist = Normal::new(mean, sd)
        .map_err(|e| anyhow::anyhow!("invalid normal N({}, {}^2): {}", mean, sd, e))?;

    Ok((0..n)
        .into_par_iter()
        .map_init(rand::rng, |rng, _| {
            let x: f64 = rng.sample(&dist);
            T::from(x).unwrap_or_else(T::nan)
        })
        .collect())
}
