use serde::{Deserialize, Serialize};

use crate::error::{CalcError, require_positive};
use crate::units::{m_to_mm, mm_to_m};

use super::FieldOfView;

///
/// Which of the two fall velocities the blur calculations use. Has no `Default`, the caller
/// always picks one.
///
/// - `Average`: The mean velocity over the fall through the field of view
/// - `Maximum`: The velocity at the bottom of the field of view
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VelocityChoice {
    Average,
    Maximum,
}

impl std::fmt::Display for VelocityChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VelocityChoice::Average => write!(f, "Average"),
            VelocityChoice::Maximum => write!(f, "Maximum"),
        }
    }
}

impl std::str::FromStr for VelocityChoice {
    type Err = String;

    ///
    /// Parses `average`/`avg` or `maximum`/`max`, ignoring case.
    ///
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "average" | "avg" => Ok(VelocityChoice::Average),
            "maximum" | "max" => Ok(VelocityChoice::Maximum),
            _ => Err(format!("Unknown velocity choice `{}`, expected `average` or `maximum`", s)),
        }
    }
}

///
/// Free-fall kinematics of a pill dropped from rest across the field of view.
///
/// # Fields:
/// - `fall_distance_m`: The distance fallen while in view, in metres
/// - `fall_time_s`: The time spent in view, in seconds
/// - `average_velocity_m_per_s`: The mean velocity while in view
/// - `max_velocity_m_per_s`: The velocity on leaving the view
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallProfile {
    pub fall_distance_m: f64,
    pub fall_time_s: f64,
    pub average_velocity_m_per_s: f64,
    pub max_velocity_m_per_s: f64,
}

impl FallProfile {
    ///
    /// # Parameters:
    /// - `choice`: Which velocity to select
    ///
    /// # Returns:
    /// - The selected velocity, in metres per second
    ///
    pub fn velocity(&self, choice: VelocityChoice) -> f64 {
        match choice {
            VelocityChoice::Average => self.average_velocity_m_per_s,
            VelocityChoice::Maximum => self.max_velocity_m_per_s,
        }
    }

    pub fn fall_distance_mm(&self) -> f64 {
        m_to_mm(self.fall_distance_m)
    }
}

///
/// Computes how long a pill stays in view and how fast it moves. The pill is taken to fall from
/// rest along the larger field of view axis, with no air resistance.
///
/// # Parameters:
/// - `fov`: The field of view extents
/// - `gravity_m_per_s2`: The gravitational acceleration, normally `units::GRAVITY_M_PER_S2`
///
/// # Returns:
/// - The `FallProfile`
/// - A `CalcError::InvalidInput` if the fall distance or gravity is not positive
///
pub fn compute_fall_profile(fov: &FieldOfView, gravity_m_per_s2: f64) -> Result<FallProfile, CalcError> {
    let g = require_positive("gravitational acceleration (m/s^2)", gravity_m_per_s2)?;
    let fall_distance_m = require_positive("fall distance (m)", mm_to_m(fov.larger_extent_mm()))?;

    let fall_time_s = f64::sqrt(2. * fall_distance_m / g);
    let average_velocity_m_per_s = fall_distance_m / fall_time_s;
    let max_velocity_m_per_s = f64::sqrt(2. * g * fall_distance_m);

    log::debug!(
        "fall of {:.4}m takes {:.4}s, average {:.4}m/s, maximum {:.4}m/s",
        fall_distance_m, fall_time_s, average_velocity_m_per_s, max_velocity_m_per_s
    );

    Ok(FallProfile { fall_distance_m, fall_time_s, average_velocity_m_per_s, max_velocity_m_per_s })
}
