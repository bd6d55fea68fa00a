use super::SensorResolution;

/// Sensor resolutions offered for selection.
pub const RESOLUTIONS: [SensorResolution; 5] = [
    SensorResolution::new(640, 480),
    SensorResolution::new(1280, 720),
    SensorResolution::new(1280, 800),
    SensorResolution::new(1920, 1080),
    SensorResolution::new(3840, 2160),
];

/// Index into `RESOLUTIONS` of the 1920x1080 default.
pub const DEFAULT_RESOLUTION_IDX: usize = 3;

/// Capture rates offered for selection, in frames per second.
pub const FRAME_RATES: [f64; 6] = [30., 60., 90., 120., 240., 25_000.];

/// Index into `FRAME_RATES` of the 60fps default.
pub const DEFAULT_FRAME_RATE_IDX: usize = 1;

///
/// Looks up a preset resolution by its `WIDTHxHEIGHT` label.
///
/// # Parameters:
/// - `label`: A label such as `1280x720`
///
/// # Returns:
/// - The matching preset, if there is one
///
pub fn resolution_by_label(label: &str) -> Option<SensorResolution> {
    RESOLUTIONS.iter().copied().find(|res| res.to_string() == label)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_hd_and_60fps() {
        assert_eq!(RESOLUTIONS[DEFAULT_RESOLUTION_IDX], SensorResolution::new(1920, 1080));
        assert_eq!(FRAME_RATES[DEFAULT_FRAME_RATE_IDX], 60.);
    }

    #[test]
    fn lookup_by_label() {
        assert_eq!(resolution_by_label("1280x800"), Some(SensorResolution::new(1280, 800)));
        assert_eq!(resolution_by_label("1024x768"), None);
    }
}
