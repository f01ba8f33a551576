//! Per-frame simulation tick
//!
//! One step per rendered frame, elapsed time clamped so frame hitches
//! cannot blow up the integration. Order within a tick: player
//! locomotion, fire intent, projectiles, cooldown countdowns, enemy
//! waves and AI, then animation selection from the post-physics state.

use super::animation::select_player_anim;
use super::state::{AimMode, CameraPose, TickInput, World};
use super::{enemy, player, projectile};
use crate::consts::MAX_TICK_DT;

/// Advance the world by one frame's elapsed time.
pub fn tick(world: &mut World, input: &TickInput, camera: &CameraPose, aim: AimMode, dt: f32) {
    let dt = dt.min(MAX_TICK_DT);
    world.elapsed += dt as f64;

    player::update_locomotion(world, input, dt);

    if input.fire {
        projectile::try_fire(world, aim, camera, input.sprint);
    }
    projectile::step(world, dt);

    world.player.shoot_cooldown = (world.player.shoot_cooldown - dt).max(0.0);
    world.player.hurt_cooldown = (world.player.hurt_cooldown - dt).max(0.0);

    enemy::update_enemies(world, dt);

    // Animation follows physics: one-shot windows first, locomotion after
    let selected = select_player_anim(
        &mut world.player.anim_timers,
        dt,
        input.moving(),
        input.backward_only(),
        input.sprinting(),
    );
    if world.player.clips.loaded(selected) {
        world
            .player
            .anim
            .transition(selected, world.tuning.anim_fade);
    }
    world.player.anim.advance(dt);
}
