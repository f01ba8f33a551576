//! Enemy waves and pursuit AI
//!
//! A spawn-interval timer fires waves of `enemies_per_wave + wave` enemies
//! at random map locations. Every live enemy walks straight at the player,
//! resolves against obstacles with the shared push-out, snaps to the
//! ground, and deals contact damage gated by the player's
//! hurt-invulnerability window.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::animation::{Animator, EnemyAnim};
use super::collision::resolve_cylinders;
use super::obstacles::random_xz;
use super::state::{Enemy, World};
use crate::consts::ENEMY_RADIUS;
use crate::tuning::Tuning;

/// Collision/visual footprint of the enemy model, delivered by the
/// environment when the asset finishes loading
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub height: f32,
    pub hit_radius: f32,
}

impl Default for EnemyTemplate {
    fn default() -> Self {
        Self {
            height: 1.6,
            hit_radius: crate::consts::ENEMY_HIT_RADIUS,
        }
    }
}

/// Readiness flags for the enemy model and its animation clips.
/// Spawning is gated on the template plus the walk clip.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EnemyAssets {
    pub template: Option<EnemyTemplate>,
    pub idle_loaded: bool,
    pub walk_loaded: bool,
    pub die_loaded: bool,
}

impl EnemyAssets {
    /// Everything loaded, for tests and headless runs
    pub fn all_loaded() -> Self {
        Self {
            template: Some(EnemyTemplate::default()),
            idle_loaded: true,
            walk_loaded: true,
            die_loaded: true,
        }
    }

    pub fn ready(&self) -> bool {
        self.template.is_some() && self.walk_loaded
    }
}

/// Wave spawn scheduling. The wave counter is the only wave entity;
/// each elapsed interval spawns a batch and increments it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WaveDirector {
    pub spawn_timer: f32,
    pub wave: u32,
    /// The first wave fires the moment assets become ready, not on the
    /// first interval elapse
    pub first_wave_spawned: bool,
}

/// Health-bar color band shown above an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthBand {
    Green,
    Yellow,
    Red,
}

/// Health-bar visual state: width proportional to remaining health,
/// color banded by it. Billboarding toward the camera is the
/// presentation layer's concern.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HealthBar {
    pub width_frac: f32,
    pub band: HealthBand,
}

impl Enemy {
    /// Health bar for rendering, `None` once the enemy is dead
    pub fn health_bar(&self) -> Option<HealthBar> {
        if self.dead {
            return None;
        }
        let band = if self.hp <= 1 {
            HealthBand::Red
        } else if self.hp < self.hp_max {
            HealthBand::Yellow
        } else {
            HealthBand::Green
        };
        Some(HealthBar {
            width_frac: (self.hp as f32 / self.hp_max as f32).max(0.001),
            band,
        })
    }
}

/// Run the spawn timer and all per-enemy AI for one tick.
pub fn update_enemies(world: &mut World, dt: f32) {
    run_spawner(world, dt);

    let World {
        player,
        enemies,
        obstacles,
        terrain,
        tuning,
        ..
    } = world;

    let player_xz = Vec2::new(player.pos.x, player.pos.z);

    for enemy in enemies.iter_mut() {
        enemy.anim.advance(dt);

        if enemy.dead {
            enemy.remove_timer -= dt;
            continue;
        }

        // Face and step toward the player's horizontal position
        let to_player = player_xz - Vec2::new(enemy.pos.x, enemy.pos.z);
        let dir = to_player.normalize_or_zero();
        if dir != Vec2::ZERO {
            enemy.yaw = crate::wrap_angle(dir.x.atan2(dir.y));
        }

        let proposed =
            Vec2::new(enemy.pos.x, enemy.pos.z) + dir * tuning.enemy_speed * dt;
        let vertical = (enemy.pos.y - ENEMY_RADIUS, enemy.pos.y + ENEMY_RADIUS);
        let corrected = resolve_cylinders(
            proposed,
            ENEMY_RADIUS,
            vertical,
            obstacles.query(vertical.0, vertical.1),
        );
        enemy.pos.x = corrected.x;
        enemy.pos.z = corrected.y;
        enemy.pos.y = terrain.height(enemy.pos.x, enemy.pos.z);

        // Contact damage, suppressed during the hurt window
        let dist = enemy.pos.distance(player.pos);
        if dist < player.radius + ENEMY_RADIUS && player.hurt_cooldown <= 0.0 {
            player.hp = player.hp.saturating_sub(1);
            player.hurt_cooldown = tuning.hurt_window;
            log::info!("Player hit by enemy {} (hp {})", enemy.id, player.hp);
        }
    }

    // Dead enemies leave the live set once their death window elapses
    enemies.retain(|e| !e.dead || e.remove_timer > 0.0);
}

/// Advance the spawn timer; fire a wave when it elapses and assets are
/// ready. The very first wave fires immediately at readiness.
fn run_spawner(world: &mut World, dt: f32) {
    if world.enemy_assets.ready() && !world.director.first_wave_spawned {
        world.director.first_wave_spawned = true;
        world.director.spawn_timer = 0.0;
        spawn_wave(world);
        world.director.wave += 1;
        return;
    }

    world.director.spawn_timer += dt;
    if world.director.spawn_timer >= world.tuning.spawn_interval {
        world.director.spawn_timer = 0.0;
        if world.enemy_assets.ready() {
            spawn_wave(world);
            world.director.wave += 1;
        } else {
            // Not-ready is not a failure; the next interval retries
            log::info!("Enemy assets not ready; wave deferred");
        }
    }
}

/// Spawn `enemies_per_wave + wave` enemies at random locations, dropped
/// from slightly above the ground.
fn spawn_wave(world: &mut World) {
    let wave = world.director.wave;
    let count = world.tuning.enemies_per_wave + wave;
    let player_xz = Vec2::new(world.player.pos.x, world.player.pos.z);

    for _ in 0..count {
        let pos = random_xz(&mut world.rng);
        let ground = world.terrain.height(pos.x, pos.y);
        let id = world.next_entity_id();

        // Enemies start walking the moment they exist; idle is the
        // fallback when the walk clip is missing
        let mut anim: Animator<EnemyAnim> = Animator::new();
        if world.enemy_assets.walk_loaded {
            anim.transition(EnemyAnim::Walk, world.tuning.anim_fade);
        } else if world.enemy_assets.idle_loaded {
            anim.transition(EnemyAnim::Idle, world.tuning.anim_fade);
        }

        let to_player = player_xz - pos;
        let yaw = crate::wrap_angle(to_player.x.atan2(to_player.y));

        world.enemies.push(Enemy {
            id,
            pos: Vec3::new(pos.x, ground + world.tuning.spawn_drop_height, pos.y),
            yaw,
            hp: world.tuning.enemy_max_hp,
            hp_max: world.tuning.enemy_max_hp,
            dead: false,
            remove_timer: 0.0,
            anim,
        });
    }

    log::info!("Wave {} spawned {} enemies", wave + 1, count);
}

/// Mark an enemy dead: one-shot death clip, health bar hidden, removal
/// scheduled. Idempotent; a second call on a dead enemy is a no-op.
pub fn kill_enemy(enemy: &mut Enemy, assets: &EnemyAssets, tuning: &Tuning) -> bool {
    if enemy.dead {
        return false;
    }

    enemy.dead = true;
    enemy.remove_timer = tuning.corpse_linger;
    if assets.die_loaded {
        enemy.anim.transition(EnemyAnim::Die, tuning.death_fade);
    }
    log::info!("Enemy {} killed", enemy.id);
    true
}
