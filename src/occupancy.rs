//! Occupancy mask generation
//!
//! Thresholds the gradient noise field under a linear radial falloff, producing a
//! roughly disc-shaped island of `true` (land) cells.

use crate::noise_field::GradientNoise;
use crate::tilemap::Tilemap;

/// Fixed constants of the occupancy mask.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskParams {
    /// A cell is land iff `noise * falloff > threshold`
    pub threshold: f64,
    /// Third noise coordinate, constant across the grid
    pub z_plane: f64,
}

impl Default for MaskParams {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            z_plane: 0.8,
        }
    }
}

/// Linear radial falloff: 1 at the centre, 0 at distance `size / 2`, negative beyond.
pub fn radial_falloff(x: usize, y: usize, size: usize) -> f64 {
    let half = size as f64 / 2.0;
    let dy = y as f64 - half;
    let dx = x as f64 - half;
    1.0 - (dx * dx + dy * dy).sqrt() / half
}

/// Generate a `size` x `size` land mask for `seed` with the default constants.
pub fn generate_occupancy(size: usize, seed: i64) -> Tilemap<bool> {
    generate_occupancy_with(size, seed, &MaskParams::default())
}

/// Generate a land mask with explicit constants.
///
/// Noise is sampled at `(row / size * seed, col / size * seed, z_plane)`, so the
/// seed acts as the frequency of the pattern across the grid.
pub fn generate_occupancy_with(size: usize, seed: i64, params: &MaskParams) -> Tilemap<bool> {
    let noise = GradientNoise::reference();
    let mut mask = Tilemap::square(size, false);
    if size == 0 {
        return mask;
    }

    let n = size as f64;
    let s = seed as f64;
    for y in 0..size {
        for x in 0..size {
            let value = noise.sample(y as f64 / n * s, x as f64 / n * s, params.z_plane);
            let scaled = value * radial_falloff(x, y, size);
            if scaled > params.threshold {
                mask.set(x, y, true);
            }
        }
    }

    mask
}
