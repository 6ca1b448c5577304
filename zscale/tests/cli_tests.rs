use approx::assert_abs_diff_eq;
use matrix_scale::traits::IoOps;
use matrix_scale::ScalingAnnotation;
use ndarray::array;
use std::path::Path;
use std::process::Command;

fn zscale() -> Command {
    Command::new(env!("CARGO_BIN_EXE_zscale"))
}

fn path_str(p: &Path) -> &str {
    p.to_str().unwrap()
}

#[test]
fn scale_then_apply() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let data = dir.path().join("data.tsv");
    let xx = array![[1., 2.], [3., 4.], [5., 6.]];
    xx.to_tsv(path_str(&data))?;

    let out = dir.path().join("res");
    let status = zscale()
        .args(["scale", path_str(&data), "--out", path_str(&out)])
        .status()?;
    assert!(status.success());

    let scaled = dir.path().join("res.scaled.tsv.gz");
    let yy = ndarray::Array2::<f64>::from_tsv(path_str(&scaled), None)?;
    assert_abs_diff_eq!(yy, array![[-1., -1.], [0., 0.], [1., 1.]], epsilon = 1e-12);

    let stats_file = dir.path().join("res.stats.json");
    let stats = ScalingAnnotation::<f64>::from_json(path_str(&stats_file))?;
    assert_abs_diff_eq!(stats.center.unwrap(), array![3., 4.], epsilon = 1e-12);
    assert!(dir.path().join("res.margin.tsv.gz").exists());

    let applied = dir.path().join("applied.tsv");
    let status = zscale()
        .args([
            "apply",
            path_str(&data),
            "--stats",
            path_str(&stats_file),
            "--out",
            path_str(&applied),
        ])
        .status()?;
    assert!(status.success());

    let zz = ndarray::Array2::<f64>::from_tsv(path_str(&applied), None)?;
    assert_abs_diff_eq!(zz, yy, epsilon = 1e-12);
    Ok(())
}

#[test]
fn out_of_range_selection_fails() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let data = dir.path().join("data.tsv");
    array![[1., 2.], [3., 4.]].to_tsv(path_str(&data))?;

    let out = dir.path().join("res");
    let status = zscale()
        .args([
            "scale",
            path_str(&data),
            "--out",
            path_str(&out),
            "--select-rows",
            "0,2",
        ])
        .status()?;
    assert!(!status.success());
    Ok(())
}

#[test]
fn simulate_and_bench() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let sim = dir.path().join("sim.tsv.gz");

    let status = zscale()
        .args(["simulate", "--nrow", "30", "--ncol", "4", "--out", path_str(&sim)])
        .status()?;
    assert!(status.success());
    assert_eq!(
        ndarray::Array2::<f64>::from_tsv(path_str(&sim), None)?.dim(),
        (30, 4)
    );

    let timings = dir.path().join("timings.tsv");
    let output = zscale()
        .args([
            "bench",
            "--nrow",
            "50",
            "--ncol",
            "5",
            "--reps",
            "3",
            "--out",
            path_str(&timings),
        ])
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.lines().any(|l| l.starts_with("normalize\t3\t")));
    assert!(stdout.lines().any(|l| l.starts_with("reference\t3\t")));
    assert!(timings.exists());
    Ok(())
}

#[test]
fn simulate_rejects_negative_sd() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let sim = dir.path().join("sim.tsv");

    let status = zscale()
        .args(["simulate", "--sd=-1", "--out", path_str(&sim)])
        .status()?;
    assert!(!status.success());
    Ok(())
}
