use serde::{Deserialize, Serialize};

use crate::error::CalcError;

///
/// Evenly spaced samples between two inclusive endpoints.
///
/// # Fields:
/// - `start`: The first sample
/// - `stop`: The last sample
/// - `samples`: The number of samples, including both endpoints
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepAxis {
    pub start: f64,
    pub stop: f64,
    pub samples: usize,
}

impl SweepAxis {
    ///
    /// # Returns:
    /// - The sample values. A single-sample axis holds only `start`, otherwise the last value is
    ///   exactly `stop`.
    ///
    pub fn values(&self) -> Vec<f64> {
        match self.samples {
            0 => vec![],
            1 => vec![self.start],
            n => {
                let step = (self.stop - self.start) / (n - 1) as f64;
                let mut values: Vec<f64> = (0..n).map(|i| self.start + step * i as f64).collect();
                values[n - 1] = self.stop;
                values
            }
        }
    }

    ///
    /// # Returns:
    /// - True if `value` lies between the endpoints, inclusive, in either direction
    ///
    pub fn contains(&self, value: f64) -> bool {
        let (low, high) = if self.start <= self.stop { (self.start, self.stop) } else { (self.stop, self.start) };
        value >= low && value <= high
    }

    ///
    /// Checks the axis has samples and finite endpoints. Endpoints may be zero unless
    /// `strictly_positive` is set, and may never be negative.
    ///
    pub(crate) fn validate(&self, parameter: &'static str, strictly_positive: bool) -> Result<(), CalcError> {
        if self.samples == 0 {
            return Err(CalcError::InvalidInput { parameter, value: 0., reason: "at least one sample" });
        }

        for endpoint in [self.start, self.stop] {
            if strictly_positive {
                crate::error::require_positive(parameter, endpoint)?;
            } else {
                crate::error::require_non_negative(parameter, endpoint)?;
            }
        }

        Ok(())
    }
}
