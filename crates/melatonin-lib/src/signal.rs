use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// One reading from an upstream biometric source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub value: f64,
    /// ISO-8601 date-time of the reading
    pub timestamp: String,
    #[serde(default)]
    pub quality: String,
}

impl Sample {
    pub fn new(value: f64, timestamp: impl Into<String>) -> Self {
        Self {
            value,
            timestamp: timestamp.into(),
            quality: String::new(),
        }
    }
}

/// Chronological samples, most recent last.
pub type Series = Vec<Sample>;

/// The three signals the processor consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Hrv,
    Rhr,
    RespRate,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Signal::Hrv => "HRV",
            Signal::Rhr => "RHR",
            Signal::RespRate => "respiratory rate",
        };
        f.write_str(name)
    }
}

/// Value column of a series.
pub fn values(series: &[Sample]) -> Vec<f64> {
    series.iter().map(|s| s.value).collect()
}

/// The most recent `len` samples, or the whole series when it is shorter.
pub fn recent(series: &[Sample], len: usize) -> &[Sample] {
    &series[series.len().saturating_sub(len)..]
}

/// One sampling instant across all three signals.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSample<'a> {
    pub hrv: f64,
    pub rhr: f64,
    pub resp_rate: f64,
    /// Timestamp of the HRV reading, which drives the timing arithmetic.
    pub timestamp: &'a str,
}

/// Zip three windows positionally.
///
/// All three windows must have the same length. Otherwise the error names the
/// shortest signal and the first index it cannot supply. Nothing is padded.
pub fn align<'a>(
    hrv: &'a [Sample],
    rhr: &'a [Sample],
    resp_rate: &'a [Sample],
) -> Result<Vec<AlignedSample<'a>>> {
    let expected = hrv.len();
    // Positional access fails first on the shortest companion window.
    let shortest = [(Signal::Rhr, rhr.len()), (Signal::RespRate, resp_rate.len())]
        .into_iter()
        .min_by_key(|(_, len)| *len);
    if let Some((signal, len)) = shortest {
        if len < expected {
            return Err(Error::MisalignedWindow {
                signal,
                index: len,
                len,
            });
        }
    }
    // A longer companion window means HRV is the one that runs out first.
    let longest = rhr.len().max(resp_rate.len());
    if longest > expected {
        return Err(Error::MisalignedWindow {
            signal: Signal::Hrv,
            index: expected,
            len: expected,
        });
    }
    Ok(hrv
        .iter()
        .zip(rhr)
        .zip(resp_rate)
        .map(|((h, r), b)| AlignedSample {
            hrv: h.value,
            rhr: r.value,
            resp_rate: b.value,
            timestamp: h.timestamp.as_str(),
        })
        .collect())
}
