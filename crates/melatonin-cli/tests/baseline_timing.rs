use assert_cmd::cargo::cargo_bin_cmd;
use melatonin_lib::{metrics::baseline::Baseline, timing::Timing};
use std::error::Error;
use std::path::PathBuf;

fn data_path(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .join("test_data")
        .join(name)
        .to_string_lossy()
        .to_string()
}

#[test]
fn baseline_command_prints_means() -> Result<(), Box<dyn Error>> {
    let mut cmd = cargo_bin_cmd!("melatonin");
    cmd.args([
        "baseline",
        "--hrv",
        &data_path("hrv_small.csv"),
        "--rhr",
        &data_path("rhr_small.csv"),
        "--resp-rate",
        &data_path("resp_rate_small.csv"),
    ]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let baseline: Baseline = serde_json::from_slice(&out)?;
    assert_eq!(baseline.hrv_mean, 55.0);
    assert_eq!(baseline.rhr_mean, 62.0);
    assert_eq!(baseline.resp_rate_mean, 15.0);
    Ok(())
}

#[test]
fn baseline_command_rejects_empty_series() {
    let mut cmd = cargo_bin_cmd!("melatonin");
    cmd.args([
        "baseline",
        "--hrv",
        &data_path("hrv_small.csv"),
        "--rhr",
        &data_path("empty.csv"),
        "--resp-rate",
        &data_path("resp_rate_small.csv"),
    ]);
    cmd.assert().failure();
}

#[test]
fn timing_wraps_to_next_day() -> Result<(), Box<dyn Error>> {
    let mut cmd = cargo_bin_cmd!("melatonin");
    cmd.args([
        "timing",
        "--sample-time",
        "2024-03-01T23:00:00Z",
        "--target-time",
        "2024-03-02T01:30:00Z",
        "--clock",
        "utc",
    ]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let timing: Timing = serde_json::from_slice(&out)?;
    assert_eq!(timing.remaining_hours, 2.5);
    assert_eq!(timing.target_hour, 1.5);
    Ok(())
}

#[test]
fn timing_keeps_unclamped_minute_fraction() -> Result<(), Box<dyn Error>> {
    let mut cmd = cargo_bin_cmd!("melatonin");
    cmd.args([
        "timing",
        "--sample-time",
        "2024-03-01T22:30:00",
        "--target-time",
        "2024-03-01T22:00:00",
    ]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let timing: Timing = serde_json::from_slice(&out)?;
    assert_eq!(timing.remaining_hours, -0.5);
    Ok(())
}

#[test]
fn timing_rejects_unparseable_target() {
    let mut cmd = cargo_bin_cmd!("melatonin");
    cmd.args([
        "timing",
        "--sample-time",
        "2024-03-01T22:30:00",
        "--target-time",
        "after dinner",
    ]);
    let assert = cmd.assert().failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("cannot parse date-time"));
}
