//!
//! Motion blur surface over exposure time and spatial resolution, for plotting
//!

pub mod axis;

use std::path::Path;

use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::evaluate::Evaluation;
use crate::units::{mm_to_m, us_to_s};

pub use axis::SweepAxis;

/// Samples along each axis of the default sweep.
pub const DEFAULT_SAMPLES: usize = 100;

///
/// The axes a sweep is evaluated over. Neither axis follows the live setup, they are fixed
/// illustrative ranges.
///
/// # Fields:
/// - `exposure_us`: Exposure times, in microseconds
/// - `spatial_resolution_mm_per_px`: Spatial resolutions, in millimetres per pixel
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub exposure_us: SweepAxis,
    pub spatial_resolution_mm_per_px: SweepAxis,
}

impl Default for SweepConfig {
    ///
    /// # Returns:
    /// - 0 to 1000us of exposure against 0.01 to 2.15mm per pixel, 100 samples each
    ///
    fn default() -> Self {
        SweepConfig {
            exposure_us: SweepAxis { start: 0., stop: 1_000., samples: DEFAULT_SAMPLES },
            spatial_resolution_mm_per_px: SweepAxis { start: 0.01, stop: 2.15, samples: DEFAULT_SAMPLES },
        }
    }
}

impl SweepConfig {
    ///
    /// Checks both axes can be evaluated: exposure times may not be negative, spatial resolutions
    /// must be positive, and each axis needs at least one sample.
    ///
    pub fn validate(&self) -> Result<(), CalcError> {
        self.exposure_us.validate("sweep exposure time (us)", false)?;
        self.spatial_resolution_mm_per_px.validate("sweep spatial resolution (mm/px)", true)
    }
}

///
/// One point of a sweep surface.
///
/// # Fields:
/// - `row`: Index along the spatial resolution axis
/// - `col`: Index along the exposure axis
/// - `exposure_us`: The exposure time at this point
/// - `spatial_resolution_mm_per_px`: The spatial resolution at this point
/// - `motion_blur_px`: The motion blur at this point
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepSample {
    pub row: usize,
    pub col: usize,
    pub exposure_us: f64,
    pub spatial_resolution_mm_per_px: f64,
    pub motion_blur_px: f64,
}

///
/// Motion blur sampled over a rectangular grid. Rows follow the spatial resolution axis and
/// columns follow the exposure axis, so `motion_blur_px[row][col]` is the blur at
/// `(exposure_us[col], spatial_resolution_mm_per_px[row])`.
///
/// # Fields:
/// - `velocity_m_per_s`: The fall velocity the surface was generated with
/// - `exposure_us`: The exposure axis samples
/// - `spatial_resolution_mm_per_px`: The spatial resolution axis samples
/// - `motion_blur_px`: The blur values, one row per spatial resolution sample
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepSurface {
    pub velocity_m_per_s: f64,
    pub exposure_us: Vec<f64>,
    pub spatial_resolution_mm_per_px: Vec<f64>,
    pub motion_blur_px: Vec<Vec<f64>>,
}

impl SweepSurface {
    ///
    /// Evaluates motion blur at every grid point. The blur at a point is the distance fallen
    /// during the exposure divided by the length one pixel covers, both in metres.
    ///
    /// # Parameters:
    /// - `config`: The axes to sweep
    /// - `velocity_m_per_s`: The selected fall velocity, which must be the one used for the single
    ///   point evaluation
    ///
    /// # Returns:
    /// - The `SweepSurface`
    /// - A `CalcError::InvalidInput` if an axis or the velocity is invalid
    ///
    pub fn generate(config: &SweepConfig, velocity_m_per_s: f64) -> Result<SweepSurface, CalcError> {
        config.validate()?;
        crate::error::require_non_negative("velocity (m/s)", velocity_m_per_s)?;

        let exposure_us = config.exposure_us.values();
        let spatial_resolution_mm_per_px = config.spatial_resolution_mm_per_px.values();

        let exposure_s: Vec<f64> = exposure_us.iter().map(|us| us_to_s(*us)).collect();
        let motion_blur_px: Vec<Vec<f64>> = spatial_resolution_mm_per_px
            .par_iter()
            .map(|res_mm| {
                let res_m = mm_to_m(*res_mm);
                exposure_s.iter().map(|t| (velocity_m_per_s * t) / res_m).collect()
            })
            .collect();

        log::debug!(
            "generated {}x{} blur surface at {:.3}m/s",
            spatial_resolution_mm_per_px.len(), exposure_us.len(), velocity_m_per_s
        );

        Ok(SweepSurface { velocity_m_per_s, exposure_us, spatial_resolution_mm_per_px, motion_blur_px })
    }

    ///
    /// Generates a surface using the velocity an evaluation selected, so the evaluation's blur
    /// appears on the surface. Logs a warning when the evaluated point lies outside the axes.
    ///
    pub fn for_evaluation(config: &SweepConfig, evaluation: &Evaluation) -> Result<SweepSurface, CalcError> {
        let surface = SweepSurface::generate(config, evaluation.velocity_m_per_s)?;

        let res = evaluation.resolution.spatial_resolution_mm_per_px;
        if !config.spatial_resolution_mm_per_px.contains(res) {
            log::warn!(
                "Spatial resolution {:.3}mm/px is outside the swept range {}..{}mm/px",
                res, config.spatial_resolution_mm_per_px.start, config.spatial_resolution_mm_per_px.stop
            );
        }

        Ok(surface)
    }

    ///
    /// Finds the grid point closest to a given exposure and spatial resolution, taking the nearest
    /// sample along each axis.
    ///
    /// # Parameters:
    /// - `exposure_us`: The exposure time, in microseconds
    /// - `spatial_resolution_mm_per_px`: The spatial resolution, in millimetres per pixel
    ///
    /// # Returns:
    /// - The closest `SweepSample`
    ///
    pub fn nearest_sample(&self, exposure_us: f64, spatial_resolution_mm_per_px: f64) -> SweepSample {
        let col = nearest_index(&self.exposure_us, exposure_us);
        let row = nearest_index(&self.spatial_resolution_mm_per_px, spatial_resolution_mm_per_px);
        self.sample(row, col)
    }

    ///
    /// # Returns:
    /// - The sample at the given row and column. Panics if either is out of range.
    ///
    pub fn sample(&self, row: usize, col: usize) -> SweepSample {
        SweepSample {
            row,
            col,
            exposure_us: self.exposure_us[col],
            spatial_resolution_mm_per_px: self.spatial_resolution_mm_per_px[row],
            motion_blur_px: self.motion_blur_px[row][col],
        }
    }

    ///
    /// # Returns:
    /// - The (rows, columns) dimensions of the grid
    ///
    pub fn shape(&self) -> (usize, usize) {
        (self.spatial_resolution_mm_per_px.len(), self.exposure_us.len())
    }

    ///
    /// Writes the surface to a JSON file, for a plotting front end to render.
    ///
    /// # Parameters:
    /// - `path`: The path of the file to write
    ///
    pub fn write_json(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        std::fs::write(path, json)
    }
}

///
/// # Returns:
/// - The index of the value in `axis` closest to `target`, or 0 for an empty axis
///
fn nearest_index(axis: &[f64], target: f64) -> usize {
    axis.iter()
        .enumerate()
        .min_by_key(|(_, value)| OrderedFloat((*value - target).abs()))
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}
