use approx::assert_abs_diff_eq;
use matrix_scale::common_io::{create_temp_dir_file, write_lines};
use matrix_scale::ndarray_util::*;
use matrix_scale::traits::SampleOps;
use matrix_scale::*;

#[test]
fn apply_reproduces_the_normalized_data() -> anyhow::Result<()> {
    let xx = Array2::<f64>::rnorm_with(30, 6, 5.0, 2.0)?;

    for opts in [
        NormalizeOptions::columns(),
        NormalizeOptions::rows(),
        NormalizeOptions::columns().with_center(false),
        NormalizeOptions::rows().with_scale(false),
    ] {
        let out = normalize(&xx, &opts)?;
        let stats = out.stats.unwrap();
        assert_abs_diff_eq!(stats.apply(&xx)?, out.data, epsilon = 1e-12);
    }
    Ok(())
}

#[test]
fn apply_to_new_data() -> anyhow::Result<()> {
    let train = array![[1., 10.], [3., 30.], [5., 50.]];
    let stats = normalize_columns(&train).stats.unwrap();

    let test = array![[7., 20.]];
    // column 0: (7 - 3) / 2, column 1: (20 - 30) / 20
    assert_abs_diff_eq!(stats.apply(&test)?, array![[2., -0.5]], epsilon = 1e-12);
    Ok(())
}

#[test]
fn revert_undoes_apply() -> anyhow::Result<()> {
    let xx = Array2::<f64>::rnorm_with(20, 9, -1.0, 7.0)?;

    let out = normalize(&xx, &NormalizeOptions::rows())?;
    let stats = out.stats.unwrap();

    assert_abs_diff_eq!(stats.revert(&out.data)?, xx, epsilon = 1e-10);
    Ok(())
}

#[test]
fn lane_count_mismatch_is_a_shape_error() -> anyhow::Result<()> {
    let xx = Array2::<f64>::rnorm(10, 4)?;
    let stats = normalize_columns(&xx).stats.unwrap();
    assert_eq!(stats.num_lanes(), Some(4));

    let err = stats.apply(&Array2::<f64>::zeros((10, 5))).unwrap_err();
    assert!(err.is_shape_error());

    // rows do not matter for column statistics
    assert!(stats.apply(&Array2::<f64>::zeros((3, 4))).is_ok());
    Ok(())
}

#[test]
fn empty_annotation_is_identity() -> anyhow::Result<()> {
    let stats = ScalingAnnotation::<f64> {
        margin: Margin::Rows,
        center: None,
        scale: None,
    };
    let xx = Array2::<f64>::rnorm(3, 3)?;
    assert_eq!(stats.num_lanes(), None);
    assert_eq!(stats.apply(&xx)?, xx);
    Ok(())
}

#[test]
fn json_round_trip() -> anyhow::Result<()> {
    let nan = f64::NAN;
    let xx = array![[1., 2., nan], [3., 2., 5.], [5., 2., nan]];
    let stats = normalize_columns(&xx).stats.unwrap();

    let json_file = create_temp_dir_file(".json.gz")?;
    let json_file = json_file.to_str().unwrap();
    stats.to_json(json_file)?;

    let back = ScalingAnnotation::<f64>::from_json(json_file)?;
    assert_eq!(back.margin, Margin::Columns);

    let (c, c_back) = (stats.center.unwrap(), back.center.unwrap());
    let (s, s_back) = (stats.scale.unwrap(), back.scale.unwrap());

    assert_abs_diff_eq!(c, c_back);
    assert_abs_diff_eq!(s[0], s_back[0]);
    // constant column and single observation
    assert_abs_diff_eq!(s_back[1], 0.0);
    assert!(s[2].is_nan() && s_back[2].is_nan());
    Ok(())
}

#[test]
fn json_without_center() -> anyhow::Result<()> {
    let xx = Array2::<f32>::runif(8, 3)?;
    let stats = normalize(&xx, &NormalizeOptions::rows().with_center(false))?
        .stats
        .unwrap();

    let json_file = create_temp_dir_file(".json")?;
    let json_file = json_file.to_str().unwrap();
    stats.to_json(json_file)?;

    let back = ScalingAnnotation::<f32>::from_json(json_file)?;
    assert_eq!(back.margin, Margin::Rows);
    assert!(back.center.is_none());
    assert_abs_diff_eq!(back.scale.unwrap(), stats.scale.unwrap(), epsilon = 1e-6);
    Ok(())
}

#[test]
fn json_keeps_infinite_statistics() -> anyhow::Result<()> {
    let inf = f64::INFINITY;
    // squared deviations overflow in the first column, the second
    // column has an infinite mean
    let xx = array![[1e200, inf], [-1e200, 1.], [0., 2.]];
    let stats = normalize_columns(&xx).stats.unwrap();

    let s = stats.scale.as_ref().unwrap();
    assert!(s[0].is_infinite() && s[1].is_nan());
    assert_eq!(stats.center.as_ref().unwrap()[1], inf);

    let json_file = create_temp_dir_file(".json")?;
    let json_file = json_file.to_str().unwrap();
    stats.to_json(json_file)?;

    let back = ScalingAnnotation::<f64>::from_json(json_file)?;
    let s_back = back.scale.as_ref().unwrap();
    assert_eq!(s_back[0], inf);
    assert!(s_back[1].is_nan());
    assert_eq!(back.center.as_ref().unwrap()[0], 0.0);
    assert_eq!(back.center.as_ref().unwrap()[1], inf);

    let new_x = array![[5., 3.]];
    let yy = stats.apply(&new_x)?;
    let yy_back = back.apply(&new_x)?;
    assert_eq!(yy_back[[0, 0]], 0.0);
    assert_eq!(yy[[0, 0]], yy_back[[0, 0]]);
    assert!(yy[[0, 1]].is_nan() && yy_back[[0, 1]].is_nan());
    Ok(())
}

#[test]
fn json_reads_special_tokens() -> anyhow::Result<()> {
    let json_file = create_temp_dir_file(".json")?;
    let json_file = json_file.to_str().unwrap();

    let lines: Vec<Box<str>> = vec![
        r#"{"margin": "columns", "center": [1.0, "-inf"], "scale": [2.0, "NaN"]}"#.into(),
    ];
    write_lines(&lines, json_file)?;
    let back = ScalingAnnotation::<f64>::from_json(json_file)?;
    assert_eq!(back.center.as_ref().unwrap()[1], f64::NEG_INFINITY);
    assert!(back.scale.as_ref().unwrap()[1].is_nan());

    let lines: Vec<Box<str>> =
        vec![r#"{"margin": "columns", "center": [1.0, "huge"], "scale": null}"#.into()];
    write_lines(&lines, json_file)?;
    assert!(ScalingAnnotation::<f64>::from_json(json_file).is_err());
    Ok(())
}
