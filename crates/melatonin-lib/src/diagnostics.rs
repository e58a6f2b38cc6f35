use log::{debug, trace};
use std::sync::Mutex;

use crate::metrics::baseline::Baseline;
use crate::processor::ProcessedRecord;

/// Intermediate state reported while processing. Not part of the output contract.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    InputLengths {
        hrv: usize,
        rhr: usize,
        resp_rate: usize,
    },
    Baseline(Baseline),
    WindowLengths {
        hrv: usize,
        rhr: usize,
        resp_rate: usize,
    },
    Record(ProcessedRecord),
}

pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, event: &ProcessEvent);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, event: &ProcessEvent) {
        match event {
            ProcessEvent::InputLengths {
                hrv,
                rhr,
                resp_rate,
            } => debug!("input lengths: hrv={hrv} rhr={rhr} resp_rate={resp_rate}"),
            ProcessEvent::Baseline(b) => debug!(
                "baseline: hrv={:.3} rhr={:.3} resp_rate={:.3}",
                b.hrv_mean, b.rhr_mean, b.resp_rate_mean
            ),
            ProcessEvent::WindowLengths {
                hrv,
                rhr,
                resp_rate,
            } => debug!("window lengths: hrv={hrv} rhr={rhr} resp_rate={resp_rate}"),
            ProcessEvent::Record(r) => trace!("record: {r:?}"),
        }
    }
}

/// Keeps every event in memory, mostly for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ProcessEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProcessEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, event: &ProcessEvent) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }
}
