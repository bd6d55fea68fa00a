//!
//! Unit conversions. Every conversion between millimetres, metres, microseconds, seconds,
//! degrees and radians in the crate goes through here.
//!

/// Acceleration due to gravity, in metres per second squared.
pub const GRAVITY_M_PER_S2: f64 = 9.81;

/// Millimetres in one metre.
const MM_PER_M: f64 = 1_000.;

/// Microseconds in one second.
const US_PER_S: f64 = 1_000_000.;

///
/// # Parameters:
/// - `mm`: A length in millimetres
///
/// # Returns:
/// - The length in metres
///
pub fn mm_to_m(mm: f64) -> f64 {
    mm / MM_PER_M
}

///
/// # Parameters:
/// - `m`: A length in metres
///
/// # Returns:
/// - The length in millimetres
///
pub fn m_to_mm(m: f64) -> f64 {
    m * MM_PER_M
}

///
/// # Parameters:
/// - `us`: A duration in microseconds
///
/// # Returns:
/// - The duration in seconds
///
pub fn us_to_s(us: f64) -> f64 {
    us / US_PER_S
}

///
/// # Parameters:
/// - `degrees`: An angle in degrees
///
/// # Returns:
/// - The angle in radians
///
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}
