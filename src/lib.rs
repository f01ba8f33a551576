//! Ember Siege - wave-survival action game simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, physics, projectiles, enemy AI)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, asset loading, camera framing and input wiring are external
//! collaborators: the simulation consumes an input snapshot plus a camera
//! pose each tick and exposes positions, health and animation state back.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec3;

/// World configuration constants
pub mod consts {
    /// Maximum simulation step per frame (seconds). Larger elapsed times
    /// are clamped so frame hitches cannot destabilize the integration.
    pub const MAX_TICK_DT: f32 = 0.05;

    /// Half-size of the square map: the world spans [-HALF, +HALF] on x and z
    pub const MAP_HALF_SIZE: f32 = 200.0;
    /// Agents are clamped this far inside the map edge
    pub const MAP_EDGE_CLAMP: f32 = 0.1;
    /// Spawn sampling keeps this margin from the map edge
    pub const SPAWN_MARGIN: f32 = 8.0;
    /// Terrain mesh sampling resolution (grid is SEGMENTS+1 per side)
    pub const TERRAIN_SEGMENTS: u32 = 400;
    /// Heights at or below this are considered underwater
    pub const WATER_LEVEL: f32 = 0.05;
    /// Default terrain noise seed
    pub const DEFAULT_SEED: u64 = 42;

    /// Player collision radius
    pub const PLAYER_RADIUS: f32 = 0.25;
    /// Look pitch is clamped to this magnitude (radians)
    pub const MAX_PITCH: f32 = 0.8;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 28.0;
    pub const PROJECTILE_LIFETIME: f32 = 6.0;
    pub const PROJECTILE_RADIUS: f32 = 0.06;
    /// Projectiles above this height expire
    pub const PROJECTILE_CEILING: f32 = 200.0;
    /// Projectiles may travel this far past the map edge before expiring
    pub const PROJECTILE_BOUNDS_MARGIN: f32 = 5.0;

    /// Enemy hit-test radius for projectile impacts
    pub const ENEMY_HIT_RADIUS: f32 = 2.0;
    /// Enemy collision radius against obstacles and the player
    pub const ENEMY_RADIUS: f32 = 0.3;
}

/// Wrap an angle to (-PI, PI]
#[inline]
pub fn wrap_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle > PI {
        angle -= 2.0 * PI;
    }
    while angle <= -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Horizontal forward vector for a heading angle
#[inline]
pub fn heading_forward(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Horizontal right vector for a heading angle (perpendicular to forward)
#[inline]
pub fn heading_right(yaw: f32) -> Vec3 {
    let f = heading_forward(yaw);
    Vec3::new(f.z, 0.0, -f.x)
}

/// Look direction for a heading plus pitch (unit length)
#[inline]
pub fn look_direction(yaw: f32, pitch: f32) -> Vec3 {
    let cp = pitch.cos();
    Vec3::new(yaw.sin() * cp, pitch.sin(), yaw.cos() * cp).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_wrap_angle_range() {
        for raw in [-7.0, -PI, -0.5, 0.0, 0.5, PI, 7.0, 100.0] {
            let w = wrap_angle(raw);
            assert!(w > -PI && w <= PI, "wrap_angle({raw}) = {w} out of range");
        }
    }

    #[test]
    fn test_wrap_angle_identity_in_range() {
        assert!((wrap_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((wrap_angle(-3.0) - (-3.0)).abs() < 1e-6);
    }

    #[test]
    fn test_heading_basis_orthogonal() {
        for yaw in [0.0, 0.7, -2.1, PI] {
            let f = heading_forward(yaw);
            let r = heading_right(yaw);
            assert!(f.dot(r).abs() < 1e-6);
            assert!((f.length() - 1.0).abs() < 1e-6);
            assert!((r.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_look_direction_pitch() {
        let d = look_direction(0.0, 0.0);
        assert!((d - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-6);
        let up = look_direction(0.0, 0.5);
        assert!(up.y > 0.0);
    }
}
