use serde::{Deserialize, Serialize};

use crate::{
    diagnostics::{DiagnosticSink, LogSink, ProcessEvent},
    dose::{DoseModel, DoseRequest, History, Readings},
    error::{Error, Result},
    metrics::baseline::Baseline,
    signal::{align, recent, values, Sample, Signal},
    timing::{parse_wall_clock, ClockZone, Timing},
};

/// Number of most recent samples turned into records.
pub const DEFAULT_WINDOW: usize = 24;

/// Tunables for [`WindowProcessor`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// How many of the most recent samples to process.
    pub window: usize,
    /// Zone used to read offset-carrying timestamps.
    pub clock: ClockZone,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            clock: ClockZone::Local,
        }
    }
}

impl ProcessorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(Error::InvalidConfig("window must be at least 1".into()));
        }
        self.clock.validate()
    }
}

/// Deviation and dose for one windowed sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    /// Position in the window, counting down to 0 at the most recent sample.
    pub hour: u32,
    pub timestamp: String,
    #[serde(rename = "hrvDiff")]
    pub hrv_diff: f64,
    #[serde(rename = "rhrDiff")]
    pub rhr_diff: f64,
    #[serde(rename = "respRateDiff")]
    pub resp_rate_diff: f64,
    #[serde(rename = "currentHRV")]
    pub current_hrv: f64,
    #[serde(rename = "currentRHR")]
    pub current_rhr: f64,
    #[serde(rename = "currentRespRate")]
    pub current_resp_rate: f64,
    #[serde(rename = "calculatedDose")]
    pub calculated_dose: f64,
}

/// Turns three biometric series into per-sample deviation and dose records.
pub struct WindowProcessor<'s> {
    config: ProcessorConfig,
    sink: &'s dyn DiagnosticSink,
}

impl Default for WindowProcessor<'static> {
    fn default() -> Self {
        Self {
            config: ProcessorConfig::default(),
            sink: &LogSink,
        }
    }
}

impl WindowProcessor<'static> {
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sink: &LogSink,
        })
    }
}

impl<'s> WindowProcessor<'s> {
    /// Route diagnostics to `sink` instead of the log.
    pub fn with_sink<'t>(self, sink: &'t dyn DiagnosticSink) -> WindowProcessor<'t> {
        WindowProcessor {
            config: self.config,
            sink,
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn process<M: DoseModel + ?Sized>(
        &self,
        hrv: &[Sample],
        rhr: &[Sample],
        resp_rate: &[Sample],
        base_dose: f64,
        target_time: &str,
        model: &M,
    ) -> Result<Vec<ProcessedRecord>> {
        self.sink.emit(&ProcessEvent::InputLengths {
            hrv: hrv.len(),
            rhr: rhr.len(),
            resp_rate: resp_rate.len(),
        });

        let baseline = Baseline::from_series(hrv, rhr, resp_rate)?;
        self.sink.emit(&ProcessEvent::Baseline(baseline));

        let recent_hrv = recent(hrv, self.config.window);
        let recent_rhr = recent(rhr, self.config.window);
        let recent_resp = recent(resp_rate, self.config.window);
        self.sink.emit(&ProcessEvent::WindowLengths {
            hrv: recent_hrv.len(),
            rhr: recent_rhr.len(),
            resp_rate: recent_resp.len(),
        });
        let window = align(recent_hrv, recent_rhr, recent_resp)?;

        let target = parse_wall_clock(target_time, self.config.clock)?;

        let hrv_values = values(hrv);
        let rhr_values = values(rhr);
        let resp_values = values(resp_rate);
        let history = History {
            hrv: &hrv_values,
            rhr: &rhr_values,
            resp_rate: &resp_values,
        };

        let last = window.len().saturating_sub(1);
        let mut records = Vec::with_capacity(window.len());
        for (i, sample) in window.iter().enumerate() {
            let current = parse_wall_clock(sample.timestamp, self.config.clock)?;
            let timing = Timing::between(current, target);
            let calculated_dose = model.calculate_dose(&DoseRequest {
                base_dose,
                remaining_hours: timing.remaining_hours,
                target_hour: timing.target_hour,
                historical: history,
                current: Readings {
                    hrv: sample.hrv,
                    rhr: sample.rhr,
                    resp_rate: sample.resp_rate,
                },
            });
            let record = ProcessedRecord {
                hour: (last - i) as u32,
                timestamp: sample.timestamp.to_string(),
                hrv_diff: baseline.mean_of(Signal::Hrv) - sample.hrv,
                rhr_diff: baseline.mean_of(Signal::Rhr) - sample.rhr,
                resp_rate_diff: baseline.mean_of(Signal::RespRate) - sample.resp_rate,
                current_hrv: sample.hrv,
                current_rhr: sample.rhr,
                current_resp_rate: sample.resp_rate,
                calculated_dose,
            };
            self.sink.emit(&ProcessEvent::Record(record.clone()));
            records.push(record);
        }
        Ok(records)
    }
}

/// Process with the default 24-sample window, local clock and log diagnostics.
pub fn process<M: DoseModel + ?Sized>(
    hrv: &[Sample],
    rhr: &[Sample],
    resp_rate: &[Sample],
    base_dose: f64,
    target_time: &str,
    model: &M,
) -> Result<Vec<ProcessedRecord>> {
    WindowProcessor::default().process(hrv, rhr, resp_rate, base_dose, target_time, model)
}
