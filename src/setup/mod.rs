//!
//! Physical and sensor setup of the camera rig
//!

pub mod presets;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, require_positive};

///
/// The pixel dimensions of the image sensor.
///
/// # Fields:
/// - `horizontal`: The number of pixels across
/// - `vertical`: The number of pixels down
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorResolution {
    pub horizontal: u32,
    pub vertical: u32,
}

impl SensorResolution {
    pub const fn new(horizontal: u32, vertical: u32) -> SensorResolution {
        SensorResolution { horizontal, vertical }
    }
}

impl std::fmt::Display for SensorResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.horizontal, self.vertical)
    }
}

///
/// A validated container for every input the calculator takes. If an instance exists, all
/// lengths, times and rates are finite and strictly positive, both sensor dimensions are non-zero
/// and both angles lie within (0, 360) degrees.
/// All features have an associated getter function.
///
/// # Fields:
/// - `working_distance_mm`: The distance from the camera to the plane the pills fall through
/// - `pill_diameter_mm`: The diameter of a pill
/// - `horizontal_afov_deg`: The full horizontal angular field of view of the camera
/// - `vertical_afov_deg`: The full vertical angular field of view of the camera
/// - `resolution`: The sensor resolution in pixels
/// - `exposure_time_us`: The exposure duration of a single frame, in microseconds
/// - `capture_rate_fps`: The number of frames captured per second
///
#[derive(getset::Getters, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedSetup")]
#[get = "pub"]
pub struct SetupParameters {
    working_distance_mm: f64,
    pill_diameter_mm: f64,
    horizontal_afov_deg: f64,
    vertical_afov_deg: f64,
    resolution: SensorResolution,
    exposure_time_us: f64,
    capture_rate_fps: f64,
}

impl SetupParameters {
    ///
    /// Creates a new, validated set of setup parameters.
    ///
    /// # Returns:
    /// - A new `SetupParameters` instance
    /// - A `CalcError::InvalidInput` naming the first parameter that was out of range
    ///
    pub fn new(
        working_distance_mm: f64,
        pill_diameter_mm: f64,
        horizontal_afov_deg: f64,
        vertical_afov_deg: f64,
        resolution: SensorResolution,
        exposure_time_us: f64,
        capture_rate_fps: f64,
    ) -> Result<SetupParameters, CalcError> {
        require_positive("working distance (mm)", working_distance_mm)?;
        require_positive("pill diameter (mm)", pill_diameter_mm)?;
        require_setup_angle("horizontal angular FOV (degrees)", horizontal_afov_deg)?;
        require_setup_angle("vertical angular FOV (degrees)", vertical_afov_deg)?;
        if resolution.horizontal == 0 {
            return Err(CalcError::InvalidInput { parameter: "horizontal resolution (px)", value: 0., reason: "at least one pixel" });
        }
        if resolution.vertical == 0 {
            return Err(CalcError::InvalidInput { parameter: "vertical resolution (px)", value: 0., reason: "at least one pixel" });
        }
        require_positive("exposure time (us)", exposure_time_us)?;
        require_positive("capture rate (fps)", capture_rate_fps)?;

        Ok(SetupParameters {
            working_distance_mm,
            pill_diameter_mm,
            horizontal_afov_deg,
            vertical_afov_deg,
            resolution,
            exposure_time_us,
            capture_rate_fps,
        })
    }

    ///
    /// # Returns:
    /// - The setup the calculator starts with: 250mm working distance, 10mm pills, a 69x42 degree
    ///   field of view, a 1920x1080 sensor, 50us exposure at 60fps
    ///
    pub fn default_setup() -> SetupParameters {
        SetupParameters {
            working_distance_mm: 250.,
            pill_diameter_mm: 10.,
            horizontal_afov_deg: 69.,
            vertical_afov_deg: 42.,
            resolution: presets::RESOLUTIONS[presets::DEFAULT_RESOLUTION_IDX],
            exposure_time_us: 50.,
            capture_rate_fps: presets::FRAME_RATES[presets::DEFAULT_FRAME_RATE_IDX],
        }
    }

    ///
    /// Returns a copy of these parameters with a different exposure time, used when exploring a
    /// single parameter from a fixed setup.
    ///
    pub fn with_exposure_time_us(&self, exposure_time_us: f64) -> Result<SetupParameters, CalcError> {
        require_positive("exposure time (us)", exposure_time_us)?;
        Ok(SetupParameters { exposure_time_us, ..self.clone() })
    }

    ///
    /// Returns a copy of these parameters with a different working distance.
    ///
    pub fn with_working_distance_mm(&self, working_distance_mm: f64) -> Result<SetupParameters, CalcError> {
        require_positive("working distance (mm)", working_distance_mm)?;
        Ok(SetupParameters { working_distance_mm, ..self.clone() })
    }
}

/// Setup parameters as read from a file, before validation.
#[derive(Deserialize)]
struct UncheckedSetup {
    working_distance_mm: f64,
    pill_diameter_mm: f64,
    horizontal_afov_deg: f64,
    vertical_afov_deg: f64,
    resolution: SensorResolution,
    exposure_time_us: f64,
    capture_rate_fps: f64,
}

impl TryFrom<UncheckedSetup> for SetupParameters {
    type Error = CalcError;

    fn try_from(raw: UncheckedSetup) -> Result<Self, Self::Error> {
        SetupParameters::new(
            raw.working_distance_mm,
            raw.pill_diameter_mm,
            raw.horizontal_afov_deg,
            raw.vertical_afov_deg,
            raw.resolution,
            raw.exposure_time_us,
            raw.capture_rate_fps,
        )
    }
}

///
/// Checks an angle is within the (0, 360) degree range a setup may hold. The narrower (0, 180)
/// range the field of view formula needs is checked when the field of view is computed.
///
fn require_setup_angle(parameter: &'static str, degrees: f64) -> Result<f64, CalcError> {
    if degrees.is_finite() && degrees > 0. && degrees < 360. {
        Ok(degrees)
    } else {
        Err(CalcError::InvalidInput { parameter, value: degrees, reason: "an angle between 0 and 360 degrees, exclusive" })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn hd() -> SensorResolution {
        SensorResolution::new(1920, 1080)
    }

    #[test]
    fn valid_setup() {
        let setup = SetupParameters::new(250., 10., 69., 42., hd(), 50., 60.).unwrap();
        assert_eq!(*setup.working_distance_mm(), 250.);
        assert_eq!(setup.resolution().horizontal, 1920);
        assert_eq!(setup, SetupParameters::default_setup());
    }

    #[test]
    fn rejects_non_positive_values() {
        assert!(SetupParameters::new(0., 10., 69., 42., hd(), 50., 60.).is_err());
        assert!(SetupParameters::new(250., -1., 69., 42., hd(), 50., 60.).is_err());
        assert!(SetupParameters::new(250., 10., 69., 42., hd(), 0., 60.).is_err());
        assert!(SetupParameters::new(250., 10., 69., 42., hd(), 50., 0.).is_err());
        assert!(SetupParameters::new(250., 10., 69., 42., SensorResolution::new(0, 1080), 50., 60.).is_err());
        assert!(SetupParameters::new(250., 10., 69., 42., SensorResolution::new(1920, 0), 50., 60.).is_err());
    }

    #[test]
    fn angle_range_is_open() {
        assert!(SetupParameters::new(250., 10., 0., 42., hd(), 50., 60.).is_err());
        assert!(SetupParameters::new(250., 10., 69., 360., hd(), 50., 60.).is_err());
        // wide angles are allowed here, the field of view calculation rejects them later
        assert!(SetupParameters::new(250., 10., 200., 42., hd(), 50., 60.).is_ok());
    }

    #[test]
    fn error_names_the_field() {
        let err = SetupParameters::new(250., 10., 69., 42., hd(), -5., 60.).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { parameter: "exposure time (us)", .. }));
    }

    #[test]
    fn with_helpers_validate() {
        let setup = SetupParameters::default_setup();
        assert_eq!(*setup.with_exposure_time_us(100.).unwrap().exposure_time_us(), 100.);
        assert_eq!(*setup.with_working_distance_mm(500.).unwrap().working_distance_mm(), 500.);
        assert!(setup.with_exposure_time_us(0.).is_err());
        assert!(setup.with_working_distance_mm(-1.).is_err());
    }

    #[test]
    fn deserialising_validates() {
        let json = r#"{
            "working_distance_mm": 250.0,
            "pill_diameter_mm": 10.0,
            "horizontal_afov_deg": 69.0,
            "vertical_afov_deg": 42.0,
            "resolution": { "horizontal": 1920, "vertical": 1080 },
            "exposure_time_us": 50.0,
            "capture_rate_fps": 60.0
        }"#;
        let setup: SetupParameters = serde_json::from_str(json).unwrap();
        assert_eq!(setup, SetupParameters::default_setup());

        let bad = json.replace("\"pill_diameter_mm\": 10.0", "\"pill_diameter_mm\": -10.0");
        assert!(serde_json::from_str::<SetupParameters>(&bad).is_err());
    }

    #[test]
    fn serialises_with_the_same_field_names() {
        let setup = SetupParameters::default_setup();
        let json = serde_json::to_string(&setup).unwrap();
        let back: SetupParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, setup);
    }

    #[test]
    fn resolution_display() {
        assert_eq!(hd().to_string(), "1920x1080");
    }
}
