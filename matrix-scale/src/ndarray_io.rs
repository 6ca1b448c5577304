use crate::common_io::{read_lines_of_words_delim, write_lines, Delimiter};
use crate::normalize::matrix_from_rows;
use crate::traits::IoOps;
use ndarray::prelude::*;
use num_traits::Float;
use std::fmt::Display;
use std::str::FromStr;

impl<T> IoOps for Array2<T>
where
    T: Float + FromStr + Send + Display,
{
    type Scalar = T;
    type Mat = Self;

    fn read_file_delim(
        file: &str,
        delim: impl Into<Delimiter>,
        skip: Option<usize>,
    ) -> anyhow::Result<Self::Mat> {
        let hdr_line = match skip {
            Some(skip) => skip as i64,
            None => -1, // no skipping
        };

        let lines_of_words = read_lines_of_words_delim(file, delim, hdr_line)?.lines;

        if lines_of_words.is_empty() {
            return Err(anyhow::anyhow!("No data in file {}", file));
        }

        let rows = lines_of_words
            .iter()
            .enumerate()
            .map(|(i, words)| {
                words
                    .iter()
                    .map(|w| parse_cell::<T>(w))
                    .collect::<Option<Vec<T>>>()
                    .ok_or_else(|| {
                        anyhow::anyhow!("{}: failed to parse data row {}: {}", file, i, words.join(" "))
                    })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(matrix_from_rows(&rows)?)
    }

    fn write_file_delim(&self, file: &str, delim: &str) -> anyhow::Result<()> {
        let lines: Vec<Box<str>> = self
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .map(|x| format!("{}", *x))
                    .collect::<Vec<String>>()
                    .join(delim)
                    .into_boxed_str()
            })
            .collect();
        write_lines(&lines, file)?;
        Ok(())
    }
}

fn parse_cell<T>(word: &str) -> Option<T>
where
    T: Float + FromStr,
{
    match word {
        "" | "NA" | "na" => Some(T::nan()),
        _ => word.parse::<T>().ok(),
    }
}
