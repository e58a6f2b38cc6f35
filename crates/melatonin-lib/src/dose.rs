//! Seam for the dose formula.
//!
//! The processor only knows the shape of the call. Embedding applications supply
//! the formula by implementing [`DoseModel`] or by passing a closure.

/// Full value histories of the three signals.
#[derive(Debug, Clone, Copy)]
pub struct History<'a> {
    pub hrv: &'a [f64],
    pub rhr: &'a [f64],
    pub resp_rate: &'a [f64],
}

/// Readings at the sample being dosed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readings {
    pub hrv: f64,
    pub rhr: f64,
    pub resp_rate: f64,
}

/// Everything a dose model sees for one sample.
#[derive(Debug, Clone, Copy)]
pub struct DoseRequest<'a> {
    pub base_dose: f64,
    /// Hours until the target time. May fall slightly outside `[0, 24)`.
    pub remaining_hours: f64,
    /// Target time of day as a fractional hour.
    pub target_hour: f64,
    pub historical: History<'a>,
    pub current: Readings,
}

/// A pure function from a [`DoseRequest`] to a recommended dose.
pub trait DoseModel {
    fn calculate_dose(&self, request: &DoseRequest<'_>) -> f64;
}

impl<F> DoseModel for F
where
    F: Fn(&DoseRequest<'_>) -> f64,
{
    fn calculate_dose(&self, request: &DoseRequest<'_>) -> f64 {
        self(request)
    }
}

/// Recommends the base dose unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseDoseModel;

impl DoseModel for BaseDoseModel {
    fn calculate_dose(&self, request: &DoseRequest<'_>) -> f64 {
        request.base_dose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(history: History<'a>) -> DoseRequest<'a> {
        DoseRequest {
            base_dose: 3.0,
            remaining_hours: 14.0,
            target_hour: 22.0,
            historical: history,
            current: Readings {
                hrv: 50.0,
                rhr: 60.0,
                resp_rate: 14.0,
            },
        }
    }

    #[test]
    fn base_model_passes_dose_through() {
        let hrv = [50.0, 55.0];
        let history = History {
            hrv: &hrv,
            rhr: &hrv,
            resp_rate: &hrv,
        };
        assert_eq!(BaseDoseModel.calculate_dose(&request(history)), 3.0);
    }

    #[test]
    fn closures_are_models() {
        let hrv = [50.0, 55.0, 60.0];
        let history = History {
            hrv: &hrv,
            rhr: &[],
            resp_rate: &[],
        };
        let model = |r: &DoseRequest<'_>| r.base_dose * r.remaining_hours / 24.0;
        assert_eq!(model.calculate_dose(&request(history)), 1.75);
    }
}
