//! Static obstacle placement and queries
//!
//! World population scatters cylindrical obstacles over the terrain with
//! rejection sampling: candidates underwater, on steep slopes, or too
//! close to the player start are thrown away. Each accepted obstacle's
//! bounding cylinder is derived from the template footprint after its
//! randomized scale, and never changes afterwards.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::terrain::HeightField;
use crate::consts::{MAP_HALF_SIZE, SPAWN_MARGIN, WATER_LEVEL};

/// Attempts per requested obstacle before placement gives up
const TRIES_PER_OBSTACLE: u32 = 30;

/// Collision/visual footprint of the obstacle model at unit scale,
/// provided by the environment alongside the loaded asset
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ObstacleTemplate {
    pub radius: f32,
    pub height: f32,
}

impl Default for ObstacleTemplate {
    fn default() -> Self {
        Self {
            radius: 2.2,
            height: 6.0,
        }
    }
}

/// An immutable cylindrical collider
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    pub center_x: f32,
    pub center_z: f32,
    pub y_min: f32,
    pub y_max: f32,
    pub radius: f32,
}

impl Obstacle {
    /// Horizontal center
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x, self.center_z)
    }
}

/// The static collection of placed obstacles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleSet {
    obstacles: Vec<Obstacle>,
}

impl ObstacleSet {
    /// Scatter up to `count` obstacles. Each candidate draws a position and
    /// a footprint scale from the world RNG; rejected candidates still
    /// consume a try, so placement terminates after `30 * count` attempts.
    pub fn place(
        field: &HeightField,
        rng: &mut Pcg32,
        template: ObstacleTemplate,
        count: u32,
        max_slope: f32,
        player_start: Vec2,
        start_clearance: f32,
    ) -> Self {
        let mut obstacles = Vec::with_capacity(count as usize);
        let max_tries = count * TRIES_PER_OBSTACLE;
        let mut tries = 0;

        while obstacles.len() < count as usize && tries < max_tries {
            tries += 1;
            let pos = random_xz(rng);
            let ground = field.height(pos.x, pos.y);

            if ground <= WATER_LEVEL {
                continue;
            }
            if field.slope(pos.x, pos.y) > max_slope {
                continue;
            }
            if pos.distance(player_start) < start_clearance {
                continue;
            }

            // Randomized footprint: uniform base scale plus a vertical
            // stretch, applied to the template's unit-scale cylinder
            let base_scale = rng.random_range(0.2..0.55);
            let stretch = rng.random_range(0.85..1.35);
            let radius = template.radius * base_scale;
            let height = template.height * base_scale * stretch;

            if !radius.is_finite() || radius < 1e-4 || height < 1e-4 {
                // Degenerate footprint, skip rather than register an
                // unhittable collider
                continue;
            }

            obstacles.push(Obstacle {
                center_x: pos.x,
                center_z: pos.y,
                y_min: ground,
                y_max: ground + height,
                radius,
            });
        }

        log::info!(
            "Placed {} obstacles ({} candidates tried)",
            obstacles.len(),
            tries
        );
        Self { obstacles }
    }

    /// Obstacles whose vertical extent overlaps [y_min, y_max]
    pub fn query(&self, y_min: f32, y_max: f32) -> impl Iterator<Item = &Obstacle> {
        self.obstacles
            .iter()
            .filter(move |o| y_max >= o.y_min && y_min <= o.y_max)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    #[cfg(test)]
    pub fn from_vec(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }
}

/// Uniform random point inside the map square, keeping the spawn margin
/// from the edge. Shared by obstacle placement and enemy spawning.
pub fn random_xz(rng: &mut Pcg32) -> Vec2 {
    let lo = -MAP_HALF_SIZE + SPAWN_MARGIN;
    let hi = MAP_HALF_SIZE - SPAWN_MARGIN;
    Vec2::new(rng.random_range(lo..hi), rng.random_range(lo..hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_placement_respects_filters() {
        let field = HeightField::new(42);
        let mut rng = Pcg32::seed_from_u64(1);
        let start = Vec2::ZERO;
        let set = ObstacleSet::place(
            &field,
            &mut rng,
            ObstacleTemplate::default(),
            40,
            0.6,
            start,
            6.0,
        );

        assert!(!set.is_empty());
        for o in set.iter() {
            let ground = field.height(o.center_x, o.center_z);
            assert!(ground > WATER_LEVEL);
            assert!(field.slope(o.center_x, o.center_z) <= 0.6);
            assert!(o.center().distance(start) >= 6.0);
            assert!(o.y_max > o.y_min);
            assert!(o.radius > 0.0);
        }
    }

    #[test]
    fn test_placement_deterministic() {
        let field = HeightField::new(42);
        let mut rng_a = Pcg32::seed_from_u64(9);
        let mut rng_b = Pcg32::seed_from_u64(9);
        let template = ObstacleTemplate::default();
        let a = ObstacleSet::place(&field, &mut rng_a, template, 20, 0.6, Vec2::ZERO, 6.0);
        let b = ObstacleSet::place(&field, &mut rng_b, template, 20, 0.6, Vec2::ZERO, 6.0);

        assert_eq!(a.len(), b.len());
        for (oa, ob) in a.iter().zip(b.iter()) {
            assert_eq!(oa.center_x, ob.center_x);
            assert_eq!(oa.radius, ob.radius);
        }
    }

    #[test]
    fn test_query_vertical_overlap_round_trip() {
        let obstacle = Obstacle {
            center_x: 1.0,
            center_z: 2.0,
            y_min: 1.0,
            y_max: 4.0,
            radius: 0.5,
        };
        let set = ObstacleSet::from_vec(vec![obstacle]);

        // Overlapping range returns it
        assert_eq!(set.query(3.5, 8.0).count(), 1);
        // Range touching the top edge still overlaps
        assert_eq!(set.query(4.0, 5.0).count(), 1);
        // Disjoint range does not
        assert_eq!(set.query(4.5, 9.0).count(), 0);
        assert_eq!(set.query(-2.0, 0.5).count(), 0);
    }

    #[test]
    fn test_random_xz_within_margin() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..100 {
            let p = random_xz(&mut rng);
            assert!(p.x.abs() <= MAP_HALF_SIZE - SPAWN_MARGIN);
            assert!(p.y.abs() <= MAP_HALF_SIZE - SPAWN_MARGIN);
        }
    }
}
