use crate::annotation::ScalingAnnotation;
use crate::common_io::Delimiter;
use crate::errors::NormalizeError;
use crate::margin_stat::Margin;
use crate::normalize::NormalizeOptions;

/// Center or scale columns and rows
pub trait ScaleOps {
    type Mat;
    type Scalar;

    /// Full routine with selectors; see [`crate::normalize::normalize`]
    fn standardize(
        &self,
        opts: &NormalizeOptions,
    ) -> Result<(Self::Mat, Option<ScalingAnnotation<Self::Scalar>>), NormalizeError>;

    /// `(x - center) / scale` along `margin` without any subsetting
    fn sweep_margin(&self, margin: Margin, center: bool, scale: bool) -> Self::Mat;

    /// Y[,j] = (X[,j] - mean(X[,j])) / sd(X[,j])
    fn scale_columns(&self) -> Self::Mat {
        self.sweep_margin(Margin::Columns, true, true)
    }

    /// Y[i,] = (X[i,] - mean(X[i,])) / sd(X[i,])
    fn scale_rows(&self) -> Self::Mat {
        self.sweep_margin(Margin::Rows, true, true)
    }

    /// Y[,j] = X[,j] - mean(X[,j])
    fn centre_columns(&self) -> Self::Mat {
        self.sweep_margin(Margin::Columns, true, false)
    }

    /// Y[i,] = X[i,] - mean(X[i,])
    fn centre_rows(&self) -> Self::Mat {
        self.sweep_margin(Margin::Rows, true, false)
    }
}

/// Operations to sample random matrices, only works for
/// `nalgebra::DMatrix` and `ndarray::Array2`
pub trait SampleOps {
    type Mat;
    type Scalar;

    /// Sample a matrix from a uniform distribution `U(0,1)`
    fn runif(dd: usize, nn: usize) -> anyhow::Result<Self::Mat>;

    /// Sample a matrix from a normal distribution `N(0,1)`
    fn rnorm(dd: usize, nn: usize) -> anyhow::Result<Self::Mat> {
        Self::rnorm_with(dd, nn, 0.0, 1.0)
    }

    /// Sample a matrix from a normal distribution `N(mean, sd^2)`
    fn rnorm_with(dd: usize, nn: usize, mean: f64, sd: f64) -> anyhow::Result<Self::Mat>;
}

/// Read and write matrices from and to files
pub trait IoOps {
    type Scalar;
    type Mat;

    /// One line per row. `NA`, `NaN` and empty cells are read as NaN.
    fn read_file_delim(
        file: &str,
        delim: impl Into<Delimiter>,
        skip: Option<usize>,
    ) -> anyhow::Result<Self::Mat>;

    fn from_tsv(tsv_file: &str, skip: Option<usize>) -> anyhow::Result<Self::Mat> {
        Self::read_file_delim(tsv_file, "\t", skip)
    }

    fn write_file_delim(&self, file: &str, delim: &str) -> anyhow::Result<()>;

    fn to_tsv(&self, tsv_file: &str) -> anyhow::Result<()> {
        self.write_file_delim(tsv_file, "\t")
    }

    fn to_csv(&self, csv_file: &str) -> anyhow::Result<()> {
        self.write_file_delim(csv_file, ",")
    }
}
