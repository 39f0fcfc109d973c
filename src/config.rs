//! Run configuration for micromodel synthesis.
//!
//! [`MicromodelConfig`] enumerates every knob of a run: grain geometry,
//! staggered-grid spacing, jitter maxima, pixel resolution, output scaling,
//! random seed, and output path. Validation fails fast before any generation
//! work begins.
use std::path::PathBuf;

use glam::Vec2;

use crate::error::{Error, Result};
use crate::grid::OffsetGrid;

/// Configuration for one synthesis run.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct MicromodelConfig {
    /// Size of the generated domain in domain units, `(x_dim, y_dim)`.
    pub domain_extent: Vec2,
    /// Base grain radius in domain units.
    pub rad: f32,
    /// Row and column spacing of the staggered grid.
    pub stride: f32,
    /// Phase shift applied to odd rows, in `[0, stride)`.
    pub offset: f32,
    /// Maximum absolute integer jitter applied to x positions.
    pub x_dev: u32,
    /// Maximum absolute integer jitter applied to y positions.
    pub y_dev: u32,
    /// Maximum absolute integer jitter applied to radii.
    pub rad_dev: u32,
    /// Rasterization resolution in pixels per domain unit.
    pub pixels_per_unit: f32,
    /// Factor applied to coordinates, radii, and metadata at serialization
    /// time only. The in-memory pipeline always works in domain units.
    pub output_scale: f64,
    /// Seed for the random source; `None` draws one from OS entropy.
    pub seed: Option<u64>,
    /// Target path of the output container. Overwritten if present.
    pub output_path: PathBuf,
}

impl Default for MicromodelConfig {
    fn default() -> Self {
        Self {
            domain_extent: Vec2::new(2400.0, 2400.0),
            rad: 6.0,
            stride: 20.0,
            offset: 10.0,
            x_dev: 6,
            y_dev: 6,
            rad_dev: 3,
            pixels_per_unit: 1.0,
            output_scale: 10.0,
            seed: None,
            output_path: PathBuf::from("image_output.zip"),
        }
    }
}

impl MicromodelConfig {
    /// Creates a new [`MicromodelConfig`] with the specified domain extent.
    pub fn new(domain_extent: Vec2) -> Self {
        Self {
            domain_extent,
            ..Default::default()
        }
    }

    /// Sets the base grain radius.
    pub fn with_rad(mut self, rad: f32) -> Self {
        self.rad = rad;
        self
    }

    /// Sets the grid stride.
    pub fn with_stride(mut self, stride: f32) -> Self {
        self.stride = stride;
        self
    }

    /// Sets the odd-row offset.
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the jitter maxima for x, y, and radius.
    pub fn with_jitter(mut self, x_dev: u32, y_dev: u32, rad_dev: u32) -> Self {
        self.x_dev = x_dev;
        self.y_dev = y_dev;
        self.rad_dev = rad_dev;
        self
    }

    /// Sets the rasterization resolution.
    pub fn with_pixels_per_unit(mut self, pixels_per_unit: f32) -> Self {
        self.pixels_per_unit = pixels_per_unit;
        self
    }

    /// Sets the serialization-time output scale.
    pub fn with_output_scale(mut self, output_scale: f64) -> Self {
        self.output_scale = output_scale;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the output container path.
    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = output_path.into();
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !(self.domain_extent.x > 0.0 && self.domain_extent.x.is_finite())
            || !(self.domain_extent.y > 0.0 && self.domain_extent.y.is_finite())
        {
            return Err(Error::InvalidConfig(
                "domain_extent must be finite and > 0 in both components".into(),
            ));
        }
        if !(self.stride > 0.0 && self.stride.is_finite()) {
            return Err(Error::InvalidConfig("stride must be finite and > 0".into()));
        }
        if !(self.offset >= 0.0 && self.offset < self.stride) {
            return Err(Error::InvalidConfig(
                "offset must lie in [0, stride)".into(),
            ));
        }
        if !(self.rad >= 0.0 && self.rad.is_finite()) {
            return Err(Error::InvalidConfig("rad must be finite and >= 0".into()));
        }
        if !(self.pixels_per_unit > 0.0 && self.pixels_per_unit.is_finite()) {
            return Err(Error::InvalidConfig(
                "pixels_per_unit must be finite and > 0".into(),
            ));
        }
        if !(self.output_scale > 0.0 && self.output_scale.is_finite()) {
            return Err(Error::InvalidConfig(
                "output_scale must be finite and > 0".into(),
            ));
        }

        Ok(())
    }

    /// Builds the placement strategy described by this configuration.
    pub fn offset_grid(&self) -> OffsetGrid {
        OffsetGrid {
            stride: self.stride,
            offset: self.offset,
            x_dev: self.x_dev,
            y_dev: self.y_dev,
            rad: self.rad,
            rad_dev: self.rad_dev,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        assert!(MicromodelConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_stride() {
        let config = MicromodelConfig::default().with_stride(0.0);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig(ref msg)) if msg.contains("stride")
        ));
    }

    #[test]
    fn rejects_offset_outside_stride_range() {
        let config = MicromodelConfig::default().with_stride(10.0).with_offset(10.0);
        assert!(config.validate().is_err());

        let config = MicromodelConfig::default().with_offset(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_domain() {
        let config = MicromodelConfig::new(Vec2::new(0.0, 100.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_scales() {
        let config = MicromodelConfig::default().with_pixels_per_unit(0.0);
        assert!(config.validate().is_err());

        let config = MicromodelConfig::default().with_output_scale(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn builder_round_trips_parameters() {
        let config = MicromodelConfig::new(Vec2::new(40.0, 40.0))
            .with_rad(6.0)
            .with_stride(20.0)
            .with_offset(10.0)
            .with_jitter(0, 0, 0)
            .with_pixels_per_unit(4.0)
            .with_seed(7)
            .with_output_path("out.zip");
        assert!(config.validate().is_ok());
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.pixels_per_unit, 4.0);
        assert_eq!(config.output_path, PathBuf::from("out.zip"));
    }
}
