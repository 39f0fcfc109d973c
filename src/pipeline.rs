//! One-shot synthesis pipeline: generate, rasterize, serialize.
//!
//! [`run`] drives the whole pipeline exactly once per invocation, strictly
//! linear and single-threaded: validate the configuration, seed the random
//! source, place the circle grid, paint the binary mask, and write the
//! container. The rasterization buffer is dropped as soon as the container
//! is on disk.
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::MicromodelConfig;
use crate::container::{write_container, ImageAttributes};
use crate::error::Result;
use crate::raster::rasterize;

/// Summary of a completed run, returned to the caller.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of circles generated.
    pub circles: usize,
    /// Fraction of mask pixels marked solid.
    pub porosity: f64,
    /// Mask width in pixels.
    pub width: usize,
    /// Mask height in pixels.
    pub height: usize,
    /// Path of the written container.
    pub path: std::path::PathBuf,
}

/// Runs the full pipeline for one configuration, producing one container.
///
/// Fails fast on invalid configuration before any generation work; I/O
/// failures during serialization abort the run with the underlying cause.
pub fn run(config: &MicromodelConfig) -> Result<RunSummary> {
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let circles = config.offset_grid().generate(config.domain_extent, &mut rng);
    info!(circles = circles.len(), "grid generated");

    let image = rasterize(&circles, config.domain_extent, config.pixels_per_unit);
    let porosity = image.porosity();
    info!(
        width = image.width,
        height = image.height,
        porosity,
        "mask rasterized"
    );

    let scale = config.output_scale;
    let attributes = ImageAttributes {
        porosity,
        rad: f64::from(config.rad) * scale,
        stride: f64::from(config.stride) * scale,
        offset: f64::from(config.offset) * scale,
        xdevmax: f64::from(config.x_dev) * scale,
        ydevmax: f64::from(config.y_dev) * scale,
        raddevmax: f64::from(config.rad_dev) * scale,
        width: image.width,
        height: image.height,
    };
    write_container(&config.output_path, &circles, &image, &attributes, scale)?;

    Ok(RunSummary {
        circles: circles.len(),
        porosity,
        width: image.width,
        height: image.height,
        path: config.output_path.clone(),
    })
}
