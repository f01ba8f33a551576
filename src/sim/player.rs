//! Player locomotion and vertical physics
//!
//! Horizontal intent comes from the input snapshot and the current
//! heading; the result is pushed out of obstacles, clamped to the map,
//! then gravity and ground snapping run on the vertical axis.

use glam::Vec2;

use super::collision::resolve_cylinders;
use super::state::{TickInput, World};
use crate::consts::{MAP_EDGE_CLAMP, MAP_HALF_SIZE, MAX_PITCH};
use crate::{heading_forward, heading_right, wrap_angle};

/// Advance the player one tick: look, move, resolve, fall, jump.
pub fn update_locomotion(world: &mut World, input: &TickInput, dt: f32) {
    let World {
        player,
        obstacles,
        terrain,
        tuning,
        ..
    } = world;

    // Look input. Yaw wraps, pitch clamps.
    player.yaw = wrap_angle(player.yaw + input.look_dx);
    player.pitch = (player.pitch + input.look_dy).clamp(-MAX_PITCH, MAX_PITCH);

    let forward = heading_forward(player.yaw);
    let right = heading_right(player.yaw);

    let speed_mult = if input.sprinting() {
        tuning.sprint_multiplier
    } else {
        1.0
    };
    let step = tuning.player_speed * speed_mult * dt;

    let mut movement = Vec2::ZERO;
    if input.move_forward {
        movement += Vec2::new(forward.x, forward.z) * step;
    }
    if input.move_backward {
        movement -= Vec2::new(forward.x, forward.z) * step;
    }
    if input.move_left {
        movement += Vec2::new(right.x, right.z) * step;
    }
    if input.move_right {
        movement -= Vec2::new(right.x, right.z) * step;
    }

    let proposed = Vec2::new(player.pos.x, player.pos.z) + movement;
    let vertical = (player.pos.y - player.radius, player.pos.y + player.radius);
    let resolved = resolve_cylinders(
        proposed,
        player.radius,
        vertical,
        obstacles.query(vertical.0, vertical.1),
    );

    let limit = MAP_HALF_SIZE - MAP_EDGE_CLAMP;
    player.pos.x = resolved.x.clamp(-limit, limit);
    player.pos.z = resolved.y.clamp(-limit, limit);

    // Vertical integration and ground snap
    player.vertical_vel += tuning.gravity * dt;
    player.pos.y += player.vertical_vel * dt;

    let ground = terrain.height(player.pos.x, player.pos.z) + player.radius;
    if player.pos.y <= ground {
        player.pos.y = ground;
        player.vertical_vel = 0.0;
        player.grounded = true;
    } else {
        player.grounded = false;
    }

    // Jump only from the ground
    if input.jump && player.grounded {
        player.vertical_vel = tuning.jump_speed;
        player.grounded = false;
        player.anim_timers.jump = tuning.jump_anim_window;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::heading_forward;
    use crate::sim::obstacles::ObstacleSet;

    /// World on seed 42 with obstacles cleared, so movement tests are not
    /// perturbed by terrain population
    fn open_world() -> World {
        let mut world = World::new(42, Tuning::default());
        world.obstacles = ObstacleSet::default();
        world
    }

    #[test]
    fn test_forward_displacement_matches_speed() {
        let mut world = open_world();
        let start = world.player.pos;
        let input = TickInput {
            move_forward: true,
            ..Default::default()
        };
        let dt = 0.016;
        update_locomotion(&mut world, &input, dt);

        let moved = Vec2::new(
            world.player.pos.x - start.x,
            world.player.pos.z - start.z,
        );
        let expected = world.tuning.player_speed * dt;
        assert!((moved.length() - expected).abs() < 1e-4);

        let fwd = heading_forward(world.player.yaw);
        let along = moved.dot(Vec2::new(fwd.x, fwd.z));
        assert!((along - expected).abs() < 1e-4);
    }

    #[test]
    fn test_sprint_multiplies_displacement() {
        let mut world = open_world();
        let start = world.player.pos;
        let input = TickInput {
            move_forward: true,
            sprint: true,
            ..Default::default()
        };
        let dt = 0.016;
        update_locomotion(&mut world, &input, dt);

        let moved = Vec2::new(
            world.player.pos.x - start.x,
            world.player.pos.z - start.z,
        )
        .length();
        let expected = world.tuning.player_speed * world.tuning.sprint_multiplier * dt;
        assert!((moved - expected).abs() < 1e-4);
    }

    #[test]
    fn test_sprint_without_direction_is_inert() {
        let mut world = open_world();
        let start = world.player.pos;
        let input = TickInput {
            sprint: true,
            ..Default::default()
        };
        update_locomotion(&mut world, &input, 0.016);
        assert_eq!(world.player.pos.x, start.x);
        assert_eq!(world.player.pos.z, start.z);
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut world = open_world();
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        update_locomotion(&mut world, &input, 0.016);
        assert!(!world.player.grounded);
        assert!(world.player.vertical_vel > 0.0);

        // Airborne: a second jump trigger is ignored
        let vel_before = world.player.vertical_vel;
        update_locomotion(&mut world, &input, 0.016);
        assert!(world.player.vertical_vel < vel_before);
    }

    #[test]
    fn test_falls_back_to_ground() {
        let mut world = open_world();
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        update_locomotion(&mut world, &input, 0.016);

        // Integrate until landing; jump apex is well under a second
        let idle = TickInput::default();
        for _ in 0..200 {
            update_locomotion(&mut world, &idle, 0.016);
        }
        assert!(world.player.grounded);
        let ground =
            world.terrain.height(world.player.pos.x, world.player.pos.z) + world.player.radius;
        assert!((world.player.pos.y - ground).abs() < 1e-5);
    }

    #[test]
    fn test_position_clamped_to_map() {
        let mut world = open_world();
        world.player.pos.x = MAP_HALF_SIZE - 0.2;
        world.player.yaw = std::f32::consts::FRAC_PI_2; // facing +x
        let input = TickInput {
            move_forward: true,
            sprint: true,
            ..Default::default()
        };
        for _ in 0..60 {
            update_locomotion(&mut world, &input, 0.05);
        }
        assert!(world.player.pos.x <= MAP_HALF_SIZE - MAP_EDGE_CLAMP + 1e-5);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut world = open_world();
        let input = TickInput {
            look_dy: 10.0,
            ..Default::default()
        };
        update_locomotion(&mut world, &input, 0.016);
        assert!(world.player.pitch <= MAX_PITCH);
    }

    #[test]
    fn test_yaw_wraps() {
        let mut world = open_world();
        let input = TickInput {
            look_dx: 5.0,
            ..Default::default()
        };
        for _ in 0..10 {
            update_locomotion(&mut world, &input, 0.016);
        }
        assert!(world.player.yaw > -std::f32::consts::PI);
        assert!(world.player.yaw <= std::f32::consts::PI);
    }

    #[test]
    fn test_pushed_out_of_obstacle() {
        use crate::sim::obstacles::Obstacle;

        let mut world = open_world();
        let y = world.player.pos.y;
        world.obstacles = ObstacleSet::from_vec(vec![Obstacle {
            center_x: world.player.pos.x + 0.3,
            center_z: world.player.pos.z,
            y_min: y - 1.0,
            y_max: y + 1.0,
            radius: 0.5,
        }]);

        update_locomotion(&mut world, &TickInput::default(), 0.016);
        let dist = Vec2::new(
            world.player.pos.x - (world.obstacles.iter().next().unwrap().center_x),
            world.player.pos.z - world.obstacles.iter().next().unwrap().center_z,
        )
        .length();
        assert!(dist >= 0.5 + world.player.radius);
    }
}
