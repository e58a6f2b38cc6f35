use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::signal::{Sample, Signal};

/// Historical means of the three signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub hrv_mean: f64,
    pub rhr_mean: f64,
    pub resp_rate_mean: f64,
}

impl Baseline {
    /// Average each full series. Windowing happens later and does not affect this.
    pub fn from_series(hrv: &[Sample], rhr: &[Sample], resp_rate: &[Sample]) -> Result<Self> {
        Ok(Self {
            hrv_mean: signal_mean(Signal::Hrv, hrv)?,
            rhr_mean: signal_mean(Signal::Rhr, rhr)?,
            resp_rate_mean: signal_mean(Signal::RespRate, resp_rate)?,
        })
    }

    pub fn mean_of(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Hrv => self.hrv_mean,
            Signal::Rhr => self.rhr_mean,
            Signal::RespRate => self.resp_rate_mean,
        }
    }
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of a full series' values, failing loudly when there is no data.
pub fn signal_mean(signal: Signal, series: &[Sample]) -> Result<f64> {
    let values: Vec<f64> = series.iter().map(|s| s.value).collect();
    mean(&values).ok_or(Error::EmptySeries { signal })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Vec<Sample> {
        values
            .iter()
            .map(|v| Sample::new(*v, "2024-03-01T08:00:00"))
            .collect()
    }

    #[test]
    fn mean_is_sum_over_count() {
        let values = [50.0, 55.0, 60.0, 71.5];
        let expected = values.iter().sum::<f64>() / 4.0;
        assert_eq!(mean(&values), Some(expected));
    }

    #[test]
    fn single_element_mean_is_itself() {
        assert_eq!(mean(&[42.25]), Some(42.25));
    }

    #[test]
    fn empty_mean_is_none() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn signal_mean_fails_on_empty_hrv() {
        assert_eq!(
            signal_mean(Signal::Hrv, &[]),
            Err(Error::EmptySeries {
                signal: Signal::Hrv
            })
        );
    }

    #[test]
    fn baseline_averages_each_signal() {
        let b = Baseline::from_series(
            &series(&[50.0, 55.0, 60.0]),
            &series(&[60.0, 62.0, 64.0]),
            &series(&[14.0, 15.0, 16.0]),
        )
        .unwrap();
        assert_eq!(b.hrv_mean, 55.0);
        assert_eq!(b.rhr_mean, 62.0);
        assert_eq!(b.resp_rate_mean, 15.0);
        assert_eq!(b.mean_of(Signal::Rhr), 62.0);
    }

    #[test]
    fn empty_signal_is_reported_by_name() {
        let err = Baseline::from_series(&series(&[1.0]), &series(&[1.0]), &[]).unwrap_err();
        assert_eq!(
            err,
            Error::EmptySeries {
                signal: Signal::RespRate
            }
        );
    }
}
