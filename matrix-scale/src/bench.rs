use crate::common_io::write_lines;
use indicatif::{ProgressBar, ProgressDrawTarget};
use log::info;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Call `f` `reps` times and record how long each call took. Dropping
/// the result is not timed.
pub fn time_repeated<F, R>(reps: usize, show_progress: bool, mut f: F) -> anyhow::Result<Vec<Duration>>
where
    F: FnMut() -> anyhow::Result<R>,
{
    let pb = ProgressBar::new(reps as u64);

    if !show_progress {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }

    let mut elapsed = Vec::with_capacity(reps);
    for _ in 0..reps {
        let start = Instant::now();
        let out = f()?;
        elapsed.push(start.elapsed());
        black_box(out);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(elapsed)
}

/// Distribution of wall-clock times, in seconds
#[derive(Debug, Clone, PartialEq)]
pub struct TimingSummary {
    pub label: Box<str>,
    pub reps: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub mean: f64,
    pub q3: f64,
    pub max: f64,
}

impl TimingSummary {
    pub fn from_durations(label: &str, durations: &[Duration]) -> anyhow::Result<Self> {
        if durations.is_empty() {
            anyhow::bail!("no timings recorded for {}", label);
        }

        let mut secs: Vec<f64> = durations.iter().map(Duration::as_secs_f64).collect();
        secs.sort_by(|a, b| a.total_cmp(b));

        let reps = secs.len();
        Ok(TimingSummary {
            label: label.into(),
            reps,
            min: secs[0],
            q1: quantile_sorted(&secs, 0.25),
            median: quantile_sorted(&secs, 0.5),
            mean: secs.iter().sum::<f64>() / reps as f64,
            q3: quantile_sorted(&secs, 0.75),
            max: secs[reps - 1],
        })
    }

    pub fn header(sep: &str) -> String {
        ["#method", "reps", "min", "q1", "median", "mean", "q3", "max"].join(sep)
    }

    pub fn to_line(&self, sep: &str) -> String {
        let stats = [self.min, self.q1, self.median, self.mean, self.q3, self.max]
            .iter()
            .map(|x| format!("{:.6e}", x))
            .collect::<Vec<_>>()
            .join(sep);
        format!("{}{}{}{}{}", self.label, sep, self.reps, sep, stats)
    }
}

/// Linear interpolation between the order statistics of `sorted`
/// (`p` is clamped to `[0, 1]`)
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }

    let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Timings of a routine and of the baseline it is compared with
pub struct Comparison {
    pub fast: TimingSummary,
    pub reference: TimingSummary,
    pub fast_elapsed: Vec<Duration>,
    pub reference_elapsed: Vec<Duration>,
}

impl Comparison {
    /// How many times faster the median `fast` call is
    pub fn speedup(&self) -> f64 {
        self.reference.median / self.fast.median
    }

    /// One line per call: `method rep seconds`
    pub fn save(&self, file: &str) -> anyhow::Result<()> {
        let mut lines: Vec<Box<str>> = vec!["#method\trep\tseconds".into()];

        for (summary, elapsed) in [
            (&self.fast, &self.fast_elapsed),
            (&self.reference, &self.reference_elapsed),
        ] {
            lines.extend(elapsed.iter().enumerate().map(|(r, t)| {
                format!("{}\t{}\t{:.9}", summary.label, r, t.as_secs_f64()).into_boxed_str()
            }));
        }

        write_lines(&lines, file)
    }
}

/// Time `fast` and `reference`, `reps` calls each
pub fn compare<F, G, R1, R2>(
    reps: usize,
    show_progress: bool,
    labels: (&str, &str),
    fast: F,
    reference: G,
) -> anyhow::Result<Comparison>
where
    F: FnMut() -> anyhow::Result<R1>,
    G: FnMut() -> anyhow::Result<R2>,
{
    if reps == 0 {
        anyhow::bail!("need at least one repetition");
    }

    info!("timing {} x {}", labels.0, reps);
    let fast_elapsed = time_repeated(reps, show_progress, fast)?;

    info!("timing {} x {}", labels.1, reps);
    let reference_elapsed = time_repeated(reps, show_progress, reference)?;

    let ret = Comparison {
        fast: TimingSummary::from_durations(labels.0, &fast_elapsed)?,
        reference: TimingSummary::from_durations(labels.1, &reference_elapsed)?,
        fast_elapsed,
        reference_elapsed,
    };

    info!(
        "median {:.3e}s vs {:.3e}s ({:.2}x)",
        ret.fast.median,
        ret.reference.median,
        ret.speedup()
    );

    Ok(ret)
}
