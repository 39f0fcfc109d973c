//! Staggered circle-grid generation with position and radius jitter.
//!
//! [`OffsetGrid`] places circular grains on a brick-like grid: rows at
//! multiples of `stride`, two interleaved column sets per row, with odd rows
//! phase-shifted by `offset`. Every center receives independent uniform
//! integer jitter, and every radius is jittered and clamped to be
//! non-negative. Centers may land outside the domain; they are kept here and
//! clipped during rasterization.
use glam::Vec2;
use rand::{Rng, RngCore};

/// A circular grain produced by grid generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    /// Center position in domain units.
    pub center: Vec2,
    /// Radius in domain units, always >= 0.
    pub radius: f32,
}

/// Staggered grid placement.
#[derive(Debug, Clone)]
pub struct OffsetGrid {
    /// Row and column spacing in domain units.
    pub stride: f32,
    /// Phase shift applied to odd rows, in `[0, stride)`.
    pub offset: f32,
    /// Maximum absolute integer jitter on x positions.
    pub x_dev: u32,
    /// Maximum absolute integer jitter on y positions.
    pub y_dev: u32,
    /// Base radius in domain units.
    pub rad: f32,
    /// Maximum absolute integer jitter on radii.
    pub rad_dev: u32,
}

impl OffsetGrid {
    /// Number of row and column base positions for the given domain extent:
    /// multiples of `stride` from 0 through `extent + offset` inclusive.
    pub fn shape(&self, domain_extent: Vec2) -> (usize, usize) {
        if domain_extent.x <= 0.0 || domain_extent.y <= 0.0 {
            return (0, 0);
        }
        let rows = ((domain_extent.x + self.offset) / self.stride).floor() as usize + 1;
        let cols = ((domain_extent.y + self.offset) / self.stride).floor() as usize + 1;
        (rows, cols)
    }

    /// Generates the full set of jittered circles for the given domain.
    ///
    /// The result has exactly `2 * rows * cols` circles (see [`shape`]) in
    /// generation order: for each row, the first column set across all
    /// columns, then the second. Overlapping circles are expected and left
    /// for union rasterization.
    ///
    /// [`shape`]: OffsetGrid::shape
    pub fn generate(&self, domain_extent: Vec2, rng: &mut dyn RngCore) -> Vec<Circle> {
        let (rows, cols) = self.shape(domain_extent);
        if rows == 0 || cols == 0 {
            return Vec::new();
        }

        let mut circles = Vec::with_capacity(2 * rows * cols);

        for row_idx in 0..rows {
            let row = row_idx as f32 * self.stride;

            // Base positions of the two interleaved column sets for this row.
            let (shift_a, shift_b) = if row_idx % 2 == 0 {
                (Vec2::new(0.0, 0.0), Vec2::new(0.0, self.stride))
            } else {
                (
                    Vec2::new(self.offset, self.offset),
                    Vec2::new(-self.offset, -self.offset),
                )
            };

            for shift in [shift_a, shift_b] {
                for col_idx in 0..cols {
                    let col = col_idx as f32 * self.stride;
                    let center = Vec2::new(
                        row + shift.x + jitter(rng, self.x_dev),
                        col + shift.y + jitter(rng, self.y_dev),
                    );
                    let radius = (self.rad + jitter(rng, self.rad_dev)).max(0.0);
                    circles.push(Circle { center, radius });
                }
            }
        }

        circles
    }
}

/// Uniform integer jitter in `[-dev, dev]`.
#[inline]
fn jitter(rng: &mut dyn RngCore, dev: u32) -> f32 {
    if dev == 0 {
        return 0.0;
    }
    let dev = i64::from(dev);
    rng.random_range(-dev..=dev) as f32
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn plain_grid() -> OffsetGrid {
        OffsetGrid {
            stride: 20.0,
            offset: 10.0,
            x_dev: 0,
            y_dev: 0,
            rad: 6.0,
            rad_dev: 0,
        }
    }

    #[test]
    fn count_matches_shape_formula() {
        let grid = OffsetGrid {
            x_dev: 6,
            y_dev: 6,
            rad_dev: 3,
            ..plain_grid()
        };
        let mut rng = StdRng::seed_from_u64(1);

        for (extent, rows, cols) in [
            (Vec2::new(40.0, 40.0), 3, 3),
            (Vec2::new(100.0, 60.0), 6, 4),
            (Vec2::new(19.0, 19.0), 2, 2),
        ] {
            assert_eq!(grid.shape(extent), (rows, cols));
            let circles = grid.generate(extent, &mut rng);
            assert_eq!(circles.len(), 2 * rows * cols);
        }
    }

    #[test]
    fn zero_jitter_grid_is_exactly_enumerable() {
        let grid = plain_grid();
        let mut rng = StdRng::seed_from_u64(0);
        let circles = grid.generate(Vec2::new(40.0, 40.0), &mut rng);

        let expected = [
            // row 0 (even): set A, then set B shifted one stride in y
            (0.0, 0.0),
            (0.0, 20.0),
            (0.0, 40.0),
            (0.0, 20.0),
            (0.0, 40.0),
            (0.0, 60.0),
            // row 20 (odd): set A shifted +offset, set B shifted -offset
            (30.0, 10.0),
            (30.0, 30.0),
            (30.0, 50.0),
            (10.0, -10.0),
            (10.0, 10.0),
            (10.0, 30.0),
            // row 40 (even)
            (40.0, 0.0),
            (40.0, 20.0),
            (40.0, 40.0),
            (40.0, 20.0),
            (40.0, 40.0),
            (40.0, 60.0),
        ];

        assert_eq!(circles.len(), expected.len());
        for (circle, &(x, y)) in circles.iter().zip(expected.iter()) {
            assert_eq!(circle.center, Vec2::new(x, y));
            assert_eq!(circle.radius, 6.0);
        }
    }

    #[test]
    fn jitter_stays_within_configured_maxima() {
        let grid = OffsetGrid {
            x_dev: 6,
            y_dev: 4,
            rad_dev: 3,
            ..plain_grid()
        };
        let extent = Vec2::new(100.0, 100.0);
        let mut rng = StdRng::seed_from_u64(42);

        let jittered = grid.generate(extent, &mut rng);
        let mut rng = StdRng::seed_from_u64(7);
        let base = plain_grid().generate(extent, &mut rng);

        for (circle, base) in jittered.iter().zip(base.iter()) {
            assert!((circle.center.x - base.center.x).abs() <= 6.0);
            assert!((circle.center.y - base.center.y).abs() <= 4.0);
            assert!((circle.radius - base.radius).abs() <= 3.0);
        }
    }

    #[test]
    fn radii_are_clamped_to_non_negative() {
        let grid = OffsetGrid {
            rad: 1.0,
            rad_dev: 5,
            ..plain_grid()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let circles = grid.generate(Vec2::new(200.0, 200.0), &mut rng);

        assert!(circles.iter().all(|c| c.radius >= 0.0));
        // With rad_dev well above rad, some draws must have hit the clamp.
        assert!(circles.iter().any(|c| c.radius == 0.0));
    }

    #[test]
    fn generate_returns_empty_for_non_positive_extent() {
        let grid = plain_grid();
        let mut rng = StdRng::seed_from_u64(9);
        assert!(grid.generate(Vec2::new(0.0, 40.0), &mut rng).is_empty());
        assert!(grid.generate(Vec2::new(40.0, -1.0), &mut rng).is_empty());
    }

    #[test]
    fn same_seed_reproduces_identical_grids() {
        let grid = OffsetGrid {
            x_dev: 6,
            y_dev: 6,
            rad_dev: 3,
            ..plain_grid()
        };
        let extent = Vec2::new(120.0, 120.0);

        let a = grid.generate(extent, &mut StdRng::seed_from_u64(11));
        let b = grid.generate(extent, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }
}
