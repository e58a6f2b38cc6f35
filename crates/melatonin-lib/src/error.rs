use thiserror::Error;

use crate::signal::Signal;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the dose-window transform. None of them are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{signal} series is empty; no baseline can be computed")]
    EmptySeries { signal: Signal },

    #[error("{signal} window has {len} samples; index {index} is out of range")]
    MisalignedWindow {
        signal: Signal,
        index: usize,
        len: usize,
    },

    #[error("cannot parse date-time {value:?}")]
    InvalidTimestamp { value: String },

    #[error("invalid processor configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_signal() {
        let err = Error::EmptySeries {
            signal: Signal::RespRate,
        };
        assert!(err.to_string().contains("respiratory rate"));

        let err = Error::MisalignedWindow {
            signal: Signal::Rhr,
            index: 20,
            len: 20,
        };
        assert_eq!(
            err.to_string(),
            "RHR window has 20 samples; index 20 is out of range"
        );
    }
}
