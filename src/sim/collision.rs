//! Collision resolution against cylindrical obstacles
//!
//! Player and enemies share one routine: for every obstacle whose vertical
//! extent overlaps the agent, push the agent radially out of the cylinder
//! by the penetration depth. Obstacles are resolved sequentially in query
//! order rather than as a simultaneous system; resting against two
//! obstacles at once can leave minor residual penetration, which is
//! acceptable for obstacles placed with generous spacing.

use glam::Vec2;

use super::obstacles::Obstacle;

/// Nudge past exact contact so the same overlap does not re-trigger from
/// floating-point equality at the boundary
const PUSH_EPSILON: f32 = 1e-3;

/// Push a circular agent out of every overlapping obstacle.
///
/// `pos` is the agent's horizontal (x, z) position, `vertical` its
/// [y_min, y_max] extent. Obstacles outside that vertical range are
/// skipped. Returns the corrected horizontal position.
pub fn resolve_cylinders<'a>(
    pos: Vec2,
    agent_radius: f32,
    vertical: (f32, f32),
    obstacles: impl Iterator<Item = &'a Obstacle>,
) -> Vec2 {
    let mut out = pos;

    for obstacle in obstacles {
        if vertical.1 < obstacle.y_min || vertical.0 > obstacle.y_max {
            continue;
        }

        let delta = out - obstacle.center();
        let min_dist = obstacle.radius + agent_radius;
        let dist_sq = delta.length_squared();

        if dist_sq < min_dist * min_dist {
            let dist = dist_sq.sqrt();
            let push = (min_dist - dist) + PUSH_EPSILON;
            let dir = if dist > 1e-6 {
                delta / dist
            } else {
                // Agent exactly on the obstacle axis: pick a fixed direction
                // rather than dividing by zero
                Vec2::X
            };
            out += dir * push;
        }
    }

    out
}

/// Containment test used for projectile impacts: is the point inside the
/// obstacle cylinder, inflated by the projectile's own radius? No push-back.
pub fn point_in_cylinder(pos: glam::Vec3, probe_radius: f32, obstacle: &Obstacle) -> bool {
    if pos.y < obstacle.y_min || pos.y > obstacle.y_max {
        return false;
    }
    let dx = pos.x - obstacle.center_x;
    let dz = pos.z - obstacle.center_z;
    let rr = obstacle.radius + probe_radius;
    dx * dx + dz * dz <= rr * rr
}
