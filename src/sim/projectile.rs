//! Projectile simulation and hit detection
//!
//! Projectiles fly straight at fixed speed. Each tick every live round is
//! integrated and then checked, in order, against the ground, obstacle
//! cylinders, its own expiry (lifetime, map bounds, height ceiling), and
//! finally the live enemies. The first check that fires retires the
//! round; a projectile damages at most one enemy.

use glam::Vec3;

use super::collision::point_in_cylinder;
use super::enemy::kill_enemy;
use super::state::{AimMode, CameraPose, Projectile, World};
use crate::consts::*;
use crate::{heading_forward, look_direction};

/// Clearance kept between a grounded projectile origin and the terrain
const GROUND_MARGIN: f32 = 0.02;
/// Forward offset of the third-person muzzle from the player center
const MUZZLE_FORWARD: f32 = 0.35;
/// Height of the third-person muzzle above the player center
const MUZZLE_RAISE: f32 = 0.28;

/// Attempt to fire. Refused while the cooldown runs or the sprint flag is
/// held. On success the shot cooldown and the one-shot action animation
/// window both start.
pub fn try_fire(world: &mut World, mode: AimMode, camera: &CameraPose, sprint_held: bool) -> bool {
    if world.player.shoot_cooldown > 0.0 || sprint_held {
        return false;
    }

    let (origin, dir) = match mode {
        AimMode::FirstPerson => (camera.position, camera.direction.normalize_or_zero()),
        AimMode::ThirdPerson => {
            let player = &world.player;
            let forward = heading_forward(player.yaw);
            let mut origin = player.pos + forward * (player.radius + MUZZLE_FORWARD);
            origin.y = player.pos.y + MUZZLE_RAISE;

            // Aiming downhill the muzzle can end up inside the terrain;
            // lift it back above the ground
            let ground = world.terrain.height(origin.x, origin.z);
            origin.y = origin.y.max(ground + PROJECTILE_RADIUS + GROUND_MARGIN);

            (origin, look_direction(player.yaw, 0.0))
        }
    };

    if dir == Vec3::ZERO {
        return false;
    }

    let id = world.next_entity_id();
    world.projectiles.push(Projectile {
        id,
        pos: origin,
        vel: dir * PROJECTILE_SPEED,
        remaining_life: PROJECTILE_LIFETIME,
    });

    world.player.shoot_cooldown = world.tuning.shoot_cooldown;
    world.player.anim_timers.action = world.tuning.action_anim_window;
    true
}

/// Advance every projectile and resolve impacts for one tick.
pub fn step(world: &mut World, dt: f32) {
    let bounty = world.kill_score();
    let World {
        projectiles,
        enemies,
        obstacles,
        terrain,
        enemy_assets,
        tuning,
        score,
        ..
    } = world;

    projectiles.retain_mut(|p| {
        p.pos += p.vel * dt;
        p.remaining_life -= dt;

        // Ground impact
        let ground = terrain.height(p.pos.x, p.pos.z) + PROJECTILE_RADIUS + GROUND_MARGIN;
        if p.pos.y <= ground {
            return false;
        }

        // Obstacle impact: pure containment, no push-back
        if obstacles
            .iter()
            .any(|o| point_in_cylinder(p.pos, PROJECTILE_RADIUS, o))
        {
            return false;
        }

        // Expiry: lifetime, horizontal bounds, height ceiling
        let bound = MAP_HALF_SIZE + PROJECTILE_BOUNDS_MARGIN;
        if p.remaining_life <= 0.0
            || p.pos.x.abs() > bound
            || p.pos.z.abs() > bound
            || p.pos.y > PROJECTILE_CEILING
        {
            return false;
        }

        // First live enemy in spawn order within the hit distance takes
        // one point of damage; dead enemies are excluded from new hits
        let threshold = PROJECTILE_RADIUS + ENEMY_HIT_RADIUS;
        let hit = enemies
            .iter_mut()
            .filter(|e| !e.dead)
            .find(|e| e.pos.distance(p.pos) < threshold);

        if let Some(enemy) = hit {
            enemy.hp = enemy.hp.saturating_sub(1);
            if enemy.hp == 0 && kill_enemy(enemy, enemy_assets, tuning) {
                *score += bounty;
            }
            return false;
        }

        true
    });
}
