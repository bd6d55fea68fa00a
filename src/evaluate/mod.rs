//!
//! Spatial resolution, motion blur and frame budget for a single setup
//!

pub mod report;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, require_non_negative, require_positive};
use crate::geometry::{FallProfile, FieldOfView, VelocityChoice, compute_fall_profile};
use crate::setup::SetupParameters;
use crate::units::{GRAVITY_M_PER_S2, m_to_mm, us_to_s};

///
/// How finely the sensor samples the subject plane.
///
/// # Fields:
/// - `pixels_per_mm`: Pixels across one millimetre of the subject plane
/// - `spatial_resolution_mm_per_px`: Millimetres of the subject plane covered by one pixel
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolutionMetrics {
    pub pixels_per_mm: f64,
    pub spatial_resolution_mm_per_px: f64,
}

///
/// Computes the resolution of the subject plane along the horizontal axis.
///
/// # Parameters:
/// - `sensor_horizontal_px`: The horizontal sensor resolution
/// - `fov_horizontal_mm`: The horizontal field of view extent, in millimetres
///
/// # Returns:
/// - The `ResolutionMetrics`
/// - `CalcError::DegenerateGeometry` if the extent is zero, negative or not finite
/// - `CalcError::InvalidInput` if the sensor has no horizontal pixels
///
pub fn compute_resolution_metrics(sensor_horizontal_px: u32, fov_horizontal_mm: f64) -> Result<ResolutionMetrics, CalcError> {
    if !(fov_horizontal_mm.is_finite() && fov_horizontal_mm > 0.) {
        return Err(CalcError::DegenerateGeometry { fov_horizontal_mm });
    }
    if sensor_horizontal_px == 0 {
        return Err(CalcError::InvalidInput { parameter: "horizontal resolution (px)", value: 0., reason: "at least one pixel" });
    }

    let pixels_per_mm = sensor_horizontal_px as f64 / fov_horizontal_mm;

    Ok(ResolutionMetrics { pixels_per_mm, spatial_resolution_mm_per_px: 1. / pixels_per_mm })
}

///
/// The apparent size of a pill and how far it smears during one exposure.
///
/// # Fields:
/// - `pill_size_px`: The pill diameter, in pixels
/// - `travel_during_exposure_mm`: The distance the pill falls while the shutter is open
/// - `motion_blur_px`: That distance, in pixels
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlurEstimate {
    pub pill_size_px: f64,
    pub travel_during_exposure_mm: f64,
    pub motion_blur_px: f64,
}

///
/// Computes the motion blur of a pill falling at a given velocity. A finer spatial resolution
/// (fewer millimetres per pixel) gives more pixels of blur for the same physical travel.
///
/// # Parameters:
/// - `pill_diameter_mm`: The pill diameter, in millimetres
/// - `spatial_resolution_mm_per_px`: Millimetres per pixel, from `compute_resolution_metrics`
/// - `velocity_m_per_s`: The selected fall velocity
/// - `exposure_time_us`: The exposure duration, in microseconds
///
/// # Returns:
/// - The `BlurEstimate`
/// - A `CalcError::InvalidInput` if the diameter or resolution is not positive, or the velocity or
///   exposure is negative
///
pub fn compute_blur(pill_diameter_mm: f64, spatial_resolution_mm_per_px: f64, velocity_m_per_s: f64, exposure_time_us: f64) -> Result<BlurEstimate, CalcError> {
    require_positive("pill diameter (mm)", pill_diameter_mm)?;
    require_positive("spatial resolution (mm/px)", spatial_resolution_mm_per_px)?;
    require_non_negative("velocity (m/s)", velocity_m_per_s)?;
    require_non_negative("exposure time (us)", exposure_time_us)?;

    let pill_size_px = pill_diameter_mm / spatial_resolution_mm_per_px;
    let travel_during_exposure_mm = m_to_mm(velocity_m_per_s * us_to_s(exposure_time_us));
    let motion_blur_px = travel_during_exposure_mm / spatial_resolution_mm_per_px;

    Ok(BlurEstimate { pill_size_px, travel_during_exposure_mm, motion_blur_px })
}

///
/// Computes how many whole frames can be captured while the pill is in view. Zero is a valid
/// answer and means the pill may pass unseen.
///
/// # Parameters:
/// - `capture_rate_fps`: Frames captured per second
/// - `fall_time_s`: Seconds the pill spends in view
///
/// # Returns:
/// - The number of frames, truncated toward zero
///
pub fn compute_frame_budget(capture_rate_fps: f64, fall_time_s: f64) -> u64 {
    // `as` saturates, so negative or NaN products land on zero
    (capture_rate_fps * fall_time_s).floor() as u64
}

///
/// Every derived quantity for one setup and velocity choice.
///
/// # Fields:
/// - `fov`: The field of view extents
/// - `fall`: The fall kinematics
/// - `velocity_choice`: Which velocity was used downstream
/// - `velocity_m_per_s`: The value of that velocity
/// - `resolution`: Pixels per millimetre and millimetres per pixel
/// - `blur`: Pill size and motion blur
/// - `frames_available`: Frames that can be captured during the fall
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub fov: FieldOfView,
    pub fall: FallProfile,
    pub velocity_choice: VelocityChoice,
    pub velocity_m_per_s: f64,
    pub resolution: ResolutionMetrics,
    pub blur: BlurEstimate,
    pub frames_available: u64,
}

///
/// Runs the full calculation chain for a setup: field of view, fall profile, resolution, blur and
/// frame budget, in that order.
///
/// # Parameters:
/// - `setup`: The validated setup
/// - `velocity_choice`: Which fall velocity to use for the blur calculation
///
/// # Returns:
/// - An `Evaluation` holding every derived quantity
/// - A `CalcError` if the setup lies outside the model's domain, e.g. an angle of 180 degrees or more
///
pub fn evaluate(setup: &SetupParameters, velocity_choice: VelocityChoice) -> Result<Evaluation, CalcError> {
    let fov = FieldOfView::from_setup(setup)?;
    let fall = compute_fall_profile(&fov, GRAVITY_M_PER_S2)?;
    let velocity_m_per_s = fall.velocity(velocity_choice);

    let resolution = compute_resolution_metrics(setup.resolution().horizontal, fov.horizontal_mm)?;
    let blur = compute_blur(*setup.pill_diameter_mm(), resolution.spatial_resolution_mm_per_px, velocity_m_per_s, *setup.exposure_time_us())?;
    let frames_available = compute_frame_budget(*setup.capture_rate_fps(), fall.fall_time_s);

    log::debug!(
        "{:.2}mm/px, {} velocity {:.3}m/s, blur {:.2}px, {} frames",
        resolution.spatial_resolution_mm_per_px, velocity_choice, velocity_m_per_s, blur.motion_blur_px, frames_available
    );
    if frames_available == 0 {
        log::warn!("No frames can be captured during the {:.3}s fall at {}fps", fall.fall_time_s, setup.capture_rate_fps());
    }

    Ok(Evaluation { fov, fall, velocity_choice, velocity_m_per_s, resolution, blur, frames_available })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::SensorResolution;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn default_resolution_metrics() {
        let metrics = compute_resolution_metrics(1920, 344.05).unwrap();
        assert!((metrics.pixels_per_mm - 5.58).abs() < 0.01, "got {}", metrics.pixels_per_mm);
        assert!((metrics.spatial_resolution_mm_per_px - 0.179).abs() < 0.01, "got {}", metrics.spatial_resolution_mm_per_px);
    }

    #[test]
    fn resolution_round_trip_identity() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let px = rng.random_range(1..=8000_u32);
            let fov = rng.random::<f64>() * 5000. + 1e-3;
            let metrics = compute_resolution_metrics(px, fov).unwrap();
            assert!((metrics.pixels_per_mm * metrics.spatial_resolution_mm_per_px - 1.).abs() < 1e-12);
        }
    }

    #[test]
    fn degenerate_fov_is_rejected() {
        assert_eq!(compute_resolution_metrics(1920, 0.), Err(CalcError::DegenerateGeometry { fov_horizontal_mm: 0. }));
        assert!(matches!(compute_resolution_metrics(1920, -3.), Err(CalcError::DegenerateGeometry { .. })));
        assert!(matches!(compute_resolution_metrics(1920, f64::INFINITY), Err(CalcError::DegenerateGeometry { .. })));
        assert!(matches!(compute_resolution_metrics(0, 344.05), Err(CalcError::InvalidInput { .. })));
    }

    #[test]
    fn blur_of_known_values() {
        // 2m/s for 500us is 1mm of travel, at 0.25mm/px that is 4px
        let blur = compute_blur(10., 0.25, 2., 500.).unwrap();
        assert!((blur.travel_during_exposure_mm - 1.).abs() < 1e-12);
        assert!((blur.motion_blur_px - 4.).abs() < 1e-12);
        assert!((blur.pill_size_px - 40.).abs() < 1e-12);
    }

    #[test]
    fn blur_is_zero_when_still() {
        let blur = compute_blur(10., 0.18, 0., 50.).unwrap();
        assert_eq!(blur.motion_blur_px, 0.);
        let blur = compute_blur(10., 0.18, 2.6, 0.).unwrap();
        assert_eq!(blur.motion_blur_px, 0.);
    }

    #[test]
    fn blur_grows_with_exposure_and_velocity() {
        let mut last = -1.;
        for exposure in [0., 1., 10., 50., 200., 1000.] {
            let blur = compute_blur(10., 0.179, 2.6, exposure).unwrap().motion_blur_px;
            assert!(blur >= 0.);
            assert!(blur > last);
            last = blur;
        }

        let mut last = -1.;
        for velocity in [0., 0.5, 1.3, 2.6, 10.] {
            let blur = compute_blur(10., 0.179, velocity, 50.).unwrap().motion_blur_px;
            assert!(blur > last);
            last = blur;
        }
    }

    #[test]
    fn finer_resolution_means_more_blur_pixels() {
        let coarse = compute_blur(10., 0.5, 2.6, 50.).unwrap();
        let fine = compute_blur(10., 0.1, 2.6, 50.).unwrap();
        assert_eq!(coarse.travel_during_exposure_mm, fine.travel_during_exposure_mm);
        assert!(fine.motion_blur_px > coarse.motion_blur_px);
    }

    #[test]
    fn blur_rejects_bad_inputs() {
        assert!(compute_blur(0., 0.18, 2.6, 50.).is_err());
        assert!(compute_blur(10., 0., 2.6, 50.).is_err());
        assert!(compute_blur(10., 0.18, -1., 50.).is_err());
        assert!(compute_blur(10., 0.18, 2.6, -50.).is_err());
    }

    #[test]
    fn frame_budget_exact() {
        assert_eq!(compute_frame_budget(60., 2.), 120);
    }

    #[test]
    fn frame_budget_truncates() {
        assert_eq!(compute_frame_budget(30., 1.7), 51);
        assert_eq!(compute_frame_budget(60., 0.265), 15);
        assert_eq!(compute_frame_budget(30., 0.01), 0);
    }

    #[test]
    fn frame_budget_never_negative() {
        assert_eq!(compute_frame_budget(30., -1.), 0);
        assert_eq!(compute_frame_budget(f64::NAN, 1.), 0);
    }

    #[test]
    fn evaluate_default_setup() {
        let setup = SetupParameters::default_setup();
        let eval = evaluate(&setup, VelocityChoice::Maximum).unwrap();

        assert!((eval.fov.horizontal_mm - 343.64).abs() < 0.1);
        assert!((eval.fall.fall_time_s - 0.2647).abs() < 1e-3);
        assert_eq!(eval.velocity_m_per_s, eval.fall.max_velocity_m_per_s);
        assert!((eval.resolution.pixels_per_mm - 5.58).abs() < 0.01);
        assert_eq!(eval.frames_available, 15);

        // 2.597m/s for 50us is 0.13mm, at 5.59px/mm about 0.73px
        assert!((eval.blur.travel_during_exposure_mm - 0.1299).abs() < 1e-3);
        assert!((eval.blur.motion_blur_px - 0.725).abs() < 0.01);
        assert!((eval.blur.pill_size_px - 55.87).abs() < 0.01);
    }

    #[test]
    fn average_velocity_halves_the_blur() {
        let setup = SetupParameters::default_setup();
        let max = evaluate(&setup, VelocityChoice::Maximum).unwrap();
        let avg = evaluate(&setup, VelocityChoice::Average).unwrap();
        assert!((avg.blur.motion_blur_px * 2. - max.blur.motion_blur_px).abs() < 1e-9);
        assert_eq!(avg.frames_available, max.frames_available);
    }

    #[test]
    fn evaluate_surfaces_wide_angles() {
        let setup = SetupParameters::new(250., 10., 180., 42., SensorResolution::new(1920, 1080), 50., 60.).unwrap();
        assert!(matches!(evaluate(&setup, VelocityChoice::Maximum), Err(CalcError::InvalidInput { .. })));
    }

    #[test]
    fn zero_frames_is_not_an_error() {
        let setup = SetupParameters::new(10., 1., 10., 10., SensorResolution::new(640, 480), 50., 30.).unwrap();
        let eval = evaluate(&setup, VelocityChoice::Average).unwrap();
        assert_eq!(eval.frames_available, 0);
    }
}
