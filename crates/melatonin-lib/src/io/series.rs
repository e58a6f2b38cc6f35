use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

use crate::signal::{Sample, Series};

/// Load a series from a JSON array of samples or from a CSV with
/// `value`, `timestamp` and optional `quality` columns.
pub fn read_series(path: &Path) -> Result<Series> {
    let is_json = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        read_series_json(path)
    } else {
        read_series_csv(path)
    }
}

pub fn read_series_json(path: &Path) -> Result<Series> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_series_json(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_series_json(text: &str) -> Result<Series> {
    let samples: Vec<Sample> = serde_json::from_str(text)?;
    Ok(samples)
}

pub fn read_series_csv(path: &Path) -> Result<Series> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_series_csv(file).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_series_csv<R: std::io::Read>(reader: R) -> Result<Series> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);
    let headers = reader.headers().context("reading header")?.clone();
    let value_idx = locate_column(&headers, "value")?;
    let ts_idx = locate_column(&headers, "timestamp")?;
    let quality_idx = locate_column(&headers, "quality").ok();

    let mut samples = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.context("reading record")?;
        let value_str = record
            .get(value_idx)
            .ok_or_else(|| anyhow::anyhow!("row {}: missing value", row + 1))?;
        let value = value_str
            .parse::<f64>()
            .with_context(|| format!("row {}: value is not f64: {}", row + 1, value_str))?;
        let timestamp = record
            .get(ts_idx)
            .ok_or_else(|| anyhow::anyhow!("row {}: missing timestamp", row + 1))?
            .to_string();
        let quality = quality_idx
            .and_then(|idx| record.get(idx))
            .unwrap_or_default()
            .to_string();
        samples.push(Sample {
            value,
            timestamp,
            quality,
        });
    }
    Ok(samples)
}

fn locate_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow::anyhow!("missing {} column", name))
}
