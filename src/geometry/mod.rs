//!
//! Field of view geometry and fall kinematics
//!

pub mod kinematics;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, require_positive};
use crate::setup::SetupParameters;
use crate::units::deg_to_rad;

pub use kinematics::{FallProfile, VelocityChoice, compute_fall_profile};

///
/// Computes the linear extent of the view along one axis, at the working distance, using an ideal
/// pinhole model.
///
/// # Parameters:
/// - `working_distance_mm`: The distance from the camera to the subject plane, in millimetres
/// - `afov_deg`: The full angular field of view along the axis, in degrees, within (0, 180)
///
/// # Returns:
/// - The extent in millimetres, `2 * d * tan(afov / 2)`
/// - A `CalcError::InvalidInput` if the distance is not positive or the angle is outside (0, 180)
///
pub fn compute_field_of_view(working_distance_mm: f64, afov_deg: f64) -> Result<f64, CalcError> {
    require_positive("working distance (mm)", working_distance_mm)?;
    if !(afov_deg.is_finite() && afov_deg > 0. && afov_deg < 180.) {
        return Err(CalcError::InvalidInput {
            parameter: "angular FOV (degrees)",
            value: afov_deg,
            reason: "an angle between 0 and 180 degrees, exclusive",
        });
    }

    Ok(2. * working_distance_mm * deg_to_rad(afov_deg / 2.).tan())
}

///
/// The horizontal and vertical extent of the view at the working distance.
///
/// # Fields:
/// - `horizontal_mm`: The horizontal extent, in millimetres
/// - `vertical_mm`: The vertical extent, in millimetres
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldOfView {
    pub horizontal_mm: f64,
    pub vertical_mm: f64,
}

impl FieldOfView {
    ///
    /// Computes both extents of the field of view from a setup.
    ///
    /// # Returns:
    /// - The `FieldOfView` for the setup
    /// - A `CalcError::InvalidInput` if either angle is 180 degrees or wider
    ///
    pub fn from_setup(setup: &SetupParameters) -> Result<FieldOfView, CalcError> {
        Ok(FieldOfView {
            horizontal_mm: compute_field_of_view(*setup.working_distance_mm(), *setup.horizontal_afov_deg())?,
            vertical_mm: compute_field_of_view(*setup.working_distance_mm(), *setup.vertical_afov_deg())?,
        })
    }

    ///
    /// # Returns:
    /// - The larger of the two extents, in millimetres. The pill falls along this axis.
    ///
    pub fn larger_extent_mm(&self) -> f64 {
        self.horizontal_mm.max(self.vertical_mm)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::SensorResolution;

    #[test]
    fn horizontal_default_fov() {
        let fov = compute_field_of_view(250., 69.).unwrap();
        // 2 * 250 * tan(34.5 deg)
        assert!((fov - 343.64).abs() < 0.1, "got {}", fov);
    }

    #[test]
    fn vertical_default_fov() {
        let fov = compute_field_of_view(250., 42.).unwrap();
        // 2 * 250 * tan(21 deg)
        assert!((fov - 191.93).abs() < 0.1, "got {}", fov);
    }

    #[test]
    fn ninety_degrees_is_twice_the_distance() {
        let fov = compute_field_of_view(100., 90.).unwrap();
        assert!((fov - 200.).abs() < 1e-9);
    }

    #[test]
    fn rejects_degenerate_angles() {
        assert!(matches!(compute_field_of_view(250., 180.), Err(CalcError::InvalidInput { .. })));
        assert!(matches!(compute_field_of_view(250., 0.), Err(CalcError::InvalidInput { .. })));
        assert!(compute_field_of_view(250., 270.).is_err());
        assert!(compute_field_of_view(250., -10.).is_err());
        assert!(compute_field_of_view(250., f64::NAN).is_err());
    }

    #[test]
    fn rejects_non_positive_distance() {
        assert!(compute_field_of_view(0., 69.).is_err());
        assert!(compute_field_of_view(-250., 69.).is_err());
    }

    #[test]
    fn monotonic_in_distance_and_angle() {
        let mut last = 0.;
        for wd in [1., 10., 100., 250., 1000.] {
            let fov = compute_field_of_view(wd, 69.).unwrap();
            assert!(fov > last);
            last = fov;
        }

        let mut last = 0.;
        for angle in [1., 30., 69., 120., 179.] {
            let fov = compute_field_of_view(250., angle).unwrap();
            assert!(fov > last);
            last = fov;
        }
    }

    #[test]
    fn from_default_setup() {
        let fov = FieldOfView::from_setup(&SetupParameters::default_setup()).unwrap();
        assert!((fov.horizontal_mm - 343.64).abs() < 0.1);
        assert!((fov.vertical_mm - 191.93).abs() < 0.1);
        assert_eq!(fov.larger_extent_mm(), fov.horizontal_mm);
    }

    #[test]
    fn wide_setup_angle_fails_here() {
        let setup = SetupParameters::new(250., 10., 200., 42., SensorResolution::new(1920, 1080), 50., 60.).unwrap();
        assert!(FieldOfView::from_setup(&setup).is_err());
    }

    #[test]
    fn larger_extent_picks_vertical_when_rotated() {
        let fov = FieldOfView { horizontal_mm: 191.48, vertical_mm: 344.05 };
        assert_eq!(fov.larger_extent_mm(), 344.05);
    }
}
