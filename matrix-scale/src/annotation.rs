use crate::common_io::{open_buf_reader, open_buf_writer};
use crate::errors::NormalizeError;
use crate::margin_stat::Margin;
use crate::normalize::{sweep, unsweep};
use ndarray::{Array1, Array2, ArrayBase, Data, Ix2};
use num_traits::Float;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Center and scale vectors that went into a normalized matrix
///
/// A vector is `None` when that step was switched off, in which case
/// it acts as zero (center) or one (scale) when reapplied.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingAnnotation<T> {
    pub margin: Margin,
    pub center: Option<Array1<T>>,
    pub scale: Option<Array1<T>>,
}

/// On-disk form of one statistic. JSON has no NaN or infinity, so
/// those are written as the strings `"NaN"`, `"inf"` and `"-inf"`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StatValue<T> {
    Finite(T),
    Special(Box<str>),
}

impl<T: Float> StatValue<T> {
    fn encode(x: T) -> Self {
        if x.is_finite() {
            StatValue::Finite(x)
        } else if x.is_nan() {
            StatValue::Special("NaN".into())
        } else if x > T::zero() {
            StatValue::Special("inf".into())
        } else {
            StatValue::Special("-inf".into())
        }
    }

    fn decode(self) -> anyhow::Result<T> {
        match self {
            StatValue::Finite(x) => Ok(x),
            StatValue::Special(s) => match s.as_ref() {
                "NaN" | "nan" => Ok(T::nan()),
                "inf" | "+inf" | "Infinity" => Ok(T::infinity()),
                "-inf" | "-Infinity" => Ok(T::neg_infinity()),
                _ => anyhow::bail!("unrecognized statistic value: {:?}", s),
            },
        }
    }
}

#[derive(Serialize, Deserialize)]
struct AnnotationRecord<T> {
    margin: Margin,
    center: Option<Vec<StatValue<T>>>,
    scale: Option<Vec<StatValue<T>>>,
}

impl<T> ScalingAnnotation<T>
where
    T: Float,
{
    /// Number of lanes the annotation covers, if it carries any vector
    pub fn num_lanes(&self) -> Option<usize> {
        self.center
            .as_ref()
            .or(self.scale.as_ref())
            .map(|v| v.len())
    }

    /// Normalize new data with these statistics: `(x - center) / scale`
    /// along the recorded margin
    ///
    /// # Errors
    /// * `NormalizeError::Shape` - the matrix does not have as many
    ///   lanes as the annotation
    ///
    pub fn apply<S>(&self, xx: &ArrayBase<S, Ix2>) -> Result<Array2<T>, NormalizeError>
    where
        S: Data<Elem = T>,
    {
        let (mu, sig) = self.resolve(xx.dim())?;
        Ok(sweep(xx.to_owned(), self.margin, &mu, &sig))
    }

    /// Undo [`ScalingAnnotation::apply`]: `y * scale + center`
    pub fn revert<S>(&self, yy: &ArrayBase<S, Ix2>) -> Result<Array2<T>, NormalizeError>
    where
        S: Data<Elem = T>,
    {
        let (mu, sig) = self.resolve(yy.dim())?;
        Ok(unsweep(yy.to_owned(), self.margin, &mu, &sig))
    }

    fn resolve(&self, dim: (usize, usize)) -> Result<(Array1<T>, Array1<T>), NormalizeError> {
        let nlanes = self.margin.num_lanes(dim);

        for (what, v) in [("center", &self.center), ("scale", &self.scale)] {
            if let Some(v) = v {
                if v.len() != nlanes {
                    return Err(NormalizeError::shape(format!(
                        "{} has {} values, but the matrix has {} {}s",
                        what,
                        v.len(),
                        nlanes,
                        self.margin.name()
                    )));
                }
            }
        }

        let mu = self.center.clone().unwrap_or_else(|| Array1::zeros(nlanes));
        let sig = self.scale.clone().unwrap_or_else(|| Array1::ones(nlanes));
        Ok((mu, sig))
    }
}

impl<T> ScalingAnnotation<T>
where
    T: Float + Serialize + DeserializeOwned,
{
    /// Write the annotation as JSON (gzipped if the name ends with
    /// `.gz`)
    pub fn to_json(&self, file: &str) -> anyhow::Result<()> {
        fn encode<T: Float>(v: &Option<Array1<T>>) -> Option<Vec<StatValue<T>>> {
            v.as_ref()
                .map(|v| v.iter().map(|&x| StatValue::encode(x)).collect())
        }

        let record = AnnotationRecord {
            margin: self.margin,
            center: encode(&self.center),
            scale: encode(&self.scale),
        };

        let mut buf = open_buf_writer(file)?;
        serde_json::to_writer_pretty(&mut buf, &record)?;
        writeln!(buf)?;
        buf.flush()?;
        Ok(())
    }

    pub fn from_json(file: &str) -> anyhow::Result<Self> {
        fn decode<T: Float>(v: Option<Vec<StatValue<T>>>) -> anyhow::Result<Option<Array1<T>>> {
            v.map(|v| {
                v.into_iter()
                    .map(StatValue::decode)
                    .collect::<anyhow::Result<Vec<T>>>()
                    .map(Array1::from)
            })
            .transpose()
        }

        let record: AnnotationRecord<T> = serde_json::from_reader(open_buf_reader(file)?)?;

        let ret = ScalingAnnotation {
            margin: record.margin,
            center: decode(record.center)?,
            scale: decode(record.scale)?,
        };

        if let (Some(c), Some(s)) = (&ret.center, &ret.scale) {
            if c.len() != s.len() {
                anyhow::bail!(
                    "{}: center has {} values but scale has {}",
                    file,
                    c.len(),
                    s.len()
                );
            }
        }
        Ok(ret)
    }
}
