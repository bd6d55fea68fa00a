//!
//! Camera parameter calculator for a falling-pill vision system. Converts a physical and sensor
//! setup into field of view, fall kinematics, spatial resolution and motion blur, and sweeps
//! motion blur over exposure time and spatial resolution for plotting.
//!

pub mod units;
pub mod error;
pub mod setup;
pub mod geometry;
pub mod evaluate;
pub mod sweep;
pub mod config;
pub mod transcribe;
