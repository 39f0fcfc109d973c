//! Binary mask rasterization and porosity.
//!
//! Circles are painted into an explicitly allocated pixel buffer as a union
//! of filled disks. The buffer covers `[0, x_dim] x [0, y_dim]` at a
//! configured resolution of `pixels_per_unit`: column `ix` and row `iy` hold
//! the pixel whose domain-space center is `((ix + 0.5) / s, (iy + 0.5) / s)`,
//! with row 0 at domain y = 0. A pixel is solid (1) when its center lies
//! within an inclusive distance `radius` of any circle center; coverage by
//! several disks still counts once.
use glam::Vec2;

use crate::grid::Circle;

/// A row-major binary pixel mask with values in `{0, 1}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryImage {
    /// Number of pixel columns (the x axis of the domain).
    pub width: usize,
    /// Number of pixel rows (the y axis of the domain).
    pub height: usize,
    /// Row-major pixel values, `width * height` entries.
    pub data: Vec<u8>,
}

impl BinaryImage {
    /// Create a new mask of the given size, initializing all pixels to void.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Get the size of the mask as `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get the value at the given pixel indices, returning `0` if out of bounds.
    pub fn get(&self, ix: isize, iy: isize) -> u8 {
        if ix < 0 || iy < 0 || ix >= self.width as isize || iy >= self.height as isize {
            return 0;
        }
        self.data[iy as usize * self.width + ix as usize]
    }

    /// Number of solid pixels.
    pub fn solid_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == 1).count()
    }

    /// Fraction of pixels marked solid; `0.0` for an empty buffer.
    pub fn porosity(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.solid_count() as f64 / self.data.len() as f64
    }
}

/// Rasterizes circles into a binary mask covering the domain.
///
/// The mask is `round(x_dim * s) x round(y_dim * s)` pixels for
/// `s = pixels_per_unit`. Circles reaching past the domain are clipped at
/// the buffer edges; circles entirely outside, and degenerate circles with
/// zero radius, contribute nothing.
pub fn rasterize(circles: &[Circle], domain_extent: Vec2, pixels_per_unit: f32) -> BinaryImage {
    let s = pixels_per_unit;
    let width = (domain_extent.x * s).round().max(0.0) as usize;
    let height = (domain_extent.y * s).round().max(0.0) as usize;
    let mut image = BinaryImage::new(width, height);
    if width == 0 || height == 0 {
        return image;
    }

    for circle in circles {
        let r = circle.radius;
        if r <= 0.0 {
            continue;
        }
        let center = circle.center;

        // Clipped pixel bounding box of the disk.
        let ix_lo = (((center.x - r) * s - 0.5).ceil() as i64).max(0);
        let ix_hi = (((center.x + r) * s - 0.5).floor() as i64).min(width as i64 - 1);
        let iy_lo = (((center.y - r) * s - 0.5).ceil() as i64).max(0);
        let iy_hi = (((center.y + r) * s - 0.5).floor() as i64).min(height as i64 - 1);
        if ix_lo > ix_hi || iy_lo > iy_hi {
            continue;
        }

        let r_sq = r * r;
        for iy in iy_lo..=iy_hi {
            let py = (iy as f32 + 0.5) / s;
            let dy_sq = (py - center.y) * (py - center.y);
            let row = iy as usize * width;
            for ix in ix_lo..=ix_hi {
                let px = (ix as f32 + 0.5) / s;
                let dx = px - center.x;
                if dx * dx + dy_sq <= r_sq {
                    image.data[row + ix as usize] = 1;
                }
            }
        }
    }

    image
}
