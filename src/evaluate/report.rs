use std::fmt;

use super::Evaluation;

///
/// Formats an evaluation as a human-readable report, two decimal places with unit suffixes.
///
impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FOV: {:.2}mm x {:.2}mm", self.fov.horizontal_mm, self.fov.vertical_mm)?;
        writeln!(f, "Pixels per mm: {:.2}", self.resolution.pixels_per_mm)?;
        writeln!(f, "Spatial resolution (mm per pixel): {:.2}mm", self.resolution.spatial_resolution_mm_per_px)?;
        writeln!(f)?;

        writeln!(f, "Pill fall distance (larger FOV dimension): {:.2}mm", self.fall.fall_distance_mm())?;
        writeln!(f, "Pill air time: {:.2}s", self.fall.fall_time_s)?;
        writeln!(f, "Number of frames in this time: {}", self.frames_available)?;
        if self.frames_available == 0 {
            writeln!(f, "  (the pill may fall through the view without being captured)")?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "Velocity: {:.2}m/s ({}; average {:.2}m/s, maximum {:.2}m/s)",
            self.velocity_m_per_s, self.velocity_choice, self.fall.average_velocity_m_per_s, self.fall.max_velocity_m_per_s
        )?;
        writeln!(f, "Pill size: {:.2} pixels", self.blur.pill_size_px)?;
        writeln!(f, "Distance travelled by pill during exposure time: {:.2}mm", self.blur.travel_during_exposure_mm)?;
        write!(f, "Motion blur: {:.2} pixels", self.blur.motion_blur_px)
    }
}
