//! Procedural terrain heightfield
//!
//! The ground is a pure function of (x, z): two octaves of seeded Perlin
//! noise, scaled and offset so most of the map sits slightly above the
//! water level. Mesh generation, collision, spawning, projectile
//! grounding and minimap placement all sample this one function, so it
//! must be deterministic for a given seed.

use serde::{Deserialize, Serialize};

/// Spatial frequency of the broad terrain shape
const BASE_SCALE: f32 = 0.05;
/// Spatial frequency of the surface detail octave
const DETAIL_SCALE: f32 = 0.2;
/// Detail octave amplitude relative to the base octave
const DETAIL_AMPLITUDE: f32 = 0.35;
/// Overall vertical scale
const HEIGHT_SCALE: f32 = 3.0;
/// Vertical offset lifting most terrain above the water plane
const HEIGHT_OFFSET: f32 = 0.25;
/// Finite-difference probe distance for slope estimation
const SLOPE_PROBE: f32 = 0.8;

/// Seeded terrain heightfield
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeightField {
    seed: u64,
}

impl HeightField {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Ground height at a world position. Pure and total over the plane.
    pub fn height(&self, x: f32, z: f32) -> f32 {
        let base = perlin_2d(x * BASE_SCALE, z * BASE_SCALE, self.seed);
        let detail = DETAIL_AMPLITUDE * perlin_2d(x * DETAIL_SCALE, z * DETAIL_SCALE, self.seed);
        HEIGHT_SCALE * (base + detail) + HEIGHT_OFFSET
    }

    /// Local steepness, estimated by finite differences: sample +x and +z
    /// at a small offset and take the gradient magnitude.
    pub fn slope(&self, x: f32, z: f32) -> f32 {
        let h = self.height(x, z);
        let dx = self.height(x + SLOPE_PROBE, z) - h;
        let dz = self.height(x, z + SLOPE_PROBE) - h;
        (dx * dx + dz * dz).sqrt() / SLOPE_PROBE
    }

    /// Sample the full map square on a regular grid for mesh building.
    /// Rows run along +x, outer loop along +z, matching the index layout
    /// the presentation layer triangulates.
    pub fn sample_grid(&self, half_size: f32, segments: u32) -> TerrainGrid {
        let side = segments as usize + 1;
        let mut heights = Vec::with_capacity(side * side);
        let mut min_height = f32::INFINITY;
        let mut max_height = f32::NEG_INFINITY;

        for i in 0..side {
            let z = ((i as f32 / segments as f32) * 2.0 - 1.0) * half_size;
            for j in 0..side {
                let x = ((j as f32 / segments as f32) * 2.0 - 1.0) * half_size;
                let y = self.height(x, z);
                min_height = min_height.min(y);
                max_height = max_height.max(y);
                heights.push(y);
            }
        }

        TerrainGrid {
            segments,
            half_size,
            heights,
            min_height,
            max_height,
        }
    }
}

/// Heightfield sampled over the map square at a fixed resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainGrid {
    pub segments: u32,
    pub half_size: f32,
    /// Row-major heights, (segments+1)^2 entries
    pub heights: Vec<f32>,
    pub min_height: f32,
    pub max_height: f32,
}

impl TerrainGrid {
    /// Height at grid coordinates (row along z, column along x)
    pub fn at(&self, row: u32, col: u32) -> f32 {
        self.heights[(row * (self.segments + 1) + col) as usize]
    }
}

// Seeded gradient-hash Perlin noise. Output stays in roughly [-1, 1].

fn hash_2d(x: i32, y: i32, seed: u64) -> u64 {
    let mut h = seed;
    h = h.wrapping_add(x as u64).wrapping_mul(6364136223846793005);
    h = h.wrapping_add(y as u64).wrapping_mul(6364136223846793005);
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51afd7ed558ccd);
    h ^= h >> 33;
    h
}

fn grad_dot(hash: u64, fx: f32, fy: f32) -> f32 {
    match hash & 3 {
        0 => fx + fy,
        1 => -fx + fy,
        2 => fx - fy,
        3 => -fx - fy,
        _ => unreachable!(),
    }
}

fn perlin_2d(x: f32, y: f32, seed: u64) -> f32 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    // Smoothstep fade
    let u = fx * fx * (3.0 - 2.0 * fx);
    let v = fy * fy * (3.0 - 2.0 * fy);

    let n00 = grad_dot(hash_2d(x0, y0, seed), fx, fy);
    let n10 = grad_dot(hash_2d(x0 + 1, y0, seed), fx - 1.0, fy);
    let n01 = grad_dot(hash_2d(x0, y0 + 1, seed), fx, fy - 1.0);
    let n11 = grad_dot(hash_2d(x0 + 1, y0 + 1, seed), fx - 1.0, fy - 1.0);

    let nx0 = n00 + u * (n10 - n00);
    let nx1 = n01 + u * (n11 - n01);
    nx0 + v * (nx1 - nx0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_height_deterministic() {
        let field = HeightField::new(42);
        let a = field.height(17.3, -42.9);
        let b = field.height(17.3, -42.9);
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_changes_terrain() {
        let a = HeightField::new(42);
        let b = HeightField::new(43);
        // Sample a handful of points; at least one must differ
        let differs = (0..10).any(|i| {
            let x = i as f32 * 13.7;
            a.height(x, x * 0.5) != b.height(x, x * 0.5)
        });
        assert!(differs);
    }

    #[test]
    fn test_slope_finite_and_nonnegative() {
        let field = HeightField::new(7);
        for i in 0..50 {
            let x = i as f32 * 7.9 - 180.0;
            let s = field.slope(x, -x);
            assert!(s.is_finite());
            assert!(s >= 0.0);
        }
    }

    #[test]
    fn test_sample_grid_matches_point_queries() {
        let field = HeightField::new(42);
        let grid = field.sample_grid(200.0, 8);
        assert_eq!(grid.heights.len(), 81);
        // Corner (row 0, col 0) is (-200, -200)
        assert_eq!(grid.at(0, 0), field.height(-200.0, -200.0));
        // Center of an 8-segment grid is (0, 0)
        assert_eq!(grid.at(4, 4), field.height(0.0, 0.0));
        assert!(grid.min_height <= grid.max_height);
    }

    proptest! {
        #[test]
        fn prop_two_fields_same_seed_agree(
            x in -500.0f32..500.0,
            z in -500.0f32..500.0,
            seed in any::<u64>(),
        ) {
            let a = HeightField::new(seed);
            let b = HeightField::new(seed);
            prop_assert_eq!(a.height(x, z), b.height(x, z));
        }

        #[test]
        fn prop_height_finite(x in -1000.0f32..1000.0, z in -1000.0f32..1000.0) {
            let field = HeightField::new(42);
            prop_assert!(field.height(x, z).is_finite());
        }
    }
}
