use thiserror::Error;

///
/// All errors emitted by the calculation chain.
/// The error messages can be displayed to users on the frontend.
///
/// - `InvalidInput`: When a parameter is outside the range the model is defined for, e.g. an
///   angular field of view of 180 degrees or more, or a non-positive length, time or rate
///     Parameters:
///     - `parameter`: The name of the offending parameter
///     - `value`: The value that was supplied
///     - `reason`: What the value was expected to be
/// - `DegenerateGeometry`: When the horizontal field of view extent is zero or negative, so no
///   pixels-per-millimetre value exists
///     Parameters:
///     - `fov_horizontal_mm`: The computed horizontal extent
///
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Invalid {parameter}: {value}, expected {reason}")]
    InvalidInput { parameter: &'static str, value: f64, reason: &'static str },

    #[error("The horizontal field of view is {}mm, which leaves no pixels per millimetre", .fov_horizontal_mm)]
    DegenerateGeometry { fov_horizontal_mm: f64 },
}

///
/// Checks a value is finite and strictly greater than zero.
///
/// # Parameters:
/// - `parameter`: The parameter name, used in the error message
/// - `value`: The value to check
///
/// # Returns:
/// - The value, if it is valid
/// - A `CalcError::InvalidInput` otherwise
///
pub(crate) fn require_positive(parameter: &'static str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() && value > 0. {
        Ok(value)
    } else {
        Err(CalcError::InvalidInput { parameter, value, reason: "a finite value greater than zero" })
    }
}

///
/// Checks a value is finite and not negative. Zero is allowed.
///
pub(crate) fn require_non_negative(parameter: &'static str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() && value >= 0. {
        Ok(value)
    } else {
        Err(CalcError::InvalidInput { parameter, value, reason: "a finite value of zero or more" })
    }
}
