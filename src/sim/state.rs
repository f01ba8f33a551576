//! World state and core simulation types
//!
//! All mutable simulation state lives in one `World` passed into each
//! subsystem, so there is no hidden coupling and every subsystem can be
//! exercised in isolation.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::animation::{Animator, EnemyAnim, PlayerAnim, PlayerAnimTimers, PlayerClips};
use super::enemy::{EnemyAssets, WaveDirector};
use super::obstacles::{ObstacleSet, ObstacleTemplate};
use super::terrain::HeightField;
use crate::consts::*;
use crate::tuning::Tuning;

/// Input-intent snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub sprint: bool,
    /// Jump trigger (edge, not level)
    pub jump: bool,
    /// Special-action trigger (ranged attack)
    pub fire: bool,
    /// Yaw delta from look input, radians
    pub look_dx: f32,
    /// Pitch delta from look input, radians
    pub look_dy: f32,
}

impl TickInput {
    /// Any directional input held
    pub fn moving(&self) -> bool {
        self.move_forward || self.move_backward || self.move_left || self.move_right
    }

    /// Backing up without also pressing forward
    pub fn backward_only(&self) -> bool {
        self.move_backward && !self.move_forward
    }

    /// Sprint only takes effect while a direction is held
    pub fn sprinting(&self) -> bool {
        self.sprint && self.moving()
    }
}

/// Camera pose handed in by the presentation layer each tick, used for
/// first-person projectile origins. Read-only to the simulation.
#[derive(Debug, Clone, Copy)]
pub struct CameraPose {
    pub position: Vec3,
    pub direction: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.5, 0.0),
            direction: Vec3::Z,
        }
    }
}

/// Which origin a projectile spawns from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AimMode {
    /// Offset in front of and slightly above the player, horizontal aim
    ThirdPerson,
    /// Camera position and direction
    FirstPerson,
}

/// The player agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
    pub vertical_vel: f32,
    pub grounded: bool,
    pub hp: u8,
    pub hp_max: u8,
    /// Hurt-invulnerability countdown; contact damage is suppressed while positive
    pub hurt_cooldown: f32,
    /// Shot cooldown countdown
    pub shoot_cooldown: f32,
    pub anim: Animator<PlayerAnim>,
    pub anim_timers: PlayerAnimTimers,
    pub clips: PlayerClips,
}

impl Player {
    fn new(terrain: &HeightField, hp_max: u8) -> Self {
        let ground = terrain.height(0.0, 0.0);
        Self {
            pos: Vec3::new(0.0, ground + PLAYER_RADIUS, 0.0),
            yaw: -std::f32::consts::FRAC_PI_2,
            pitch: 0.0,
            radius: PLAYER_RADIUS,
            vertical_vel: 0.0,
            grounded: true,
            hp: hp_max,
            hp_max,
            hurt_cooldown: 0.0,
            shoot_cooldown: 0.0,
            anim: Animator::new(),
            anim_timers: PlayerAnimTimers::default(),
            clips: PlayerClips::all_loaded(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }
}

/// A pursuing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec3,
    pub yaw: f32,
    pub hp: u8,
    pub hp_max: u8,
    pub dead: bool,
    /// Once dead, seconds until removal from the live set
    pub remove_timer: f32,
    pub anim: Animator<EnemyAnim>,
}

/// A live projectile, exclusively owned by the projectile system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec3,
    pub vel: Vec3,
    pub remaining_life: f32,
}

impl Projectile {
    /// Unit facing along the velocity, for the presentation layer to
    /// orient the projectile model
    pub fn facing(&self) -> Vec3 {
        self.vel.normalize_or_zero()
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub terrain: HeightField,
    pub obstacles: ObstacleSet,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub director: WaveDirector,
    pub enemy_assets: EnemyAssets,
    pub score: u64,
    /// Seconds of simulated time since start, accumulated from ticks
    pub elapsed: f64,
    next_id: u32,
}

impl World {
    /// Build a fresh world: terrain from the seed, obstacles scattered,
    /// player at the start position resting on the ground.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let terrain = HeightField::new(seed);
        let mut rng = Pcg32::seed_from_u64(seed);
        let player = Player::new(&terrain, tuning.player_max_hp);
        let obstacles = ObstacleSet::place(
            &terrain,
            &mut rng,
            ObstacleTemplate::default(),
            tuning.obstacle_count,
            tuning.max_obstacle_slope,
            Vec2::new(player.pos.x, player.pos.z),
            tuning.player_start_clearance,
        );

        Self {
            seed,
            rng,
            tuning,
            terrain,
            obstacles,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            director: WaveDirector::default(),
            enemy_assets: EnemyAssets::default(),
            score: 0,
            elapsed: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Score awarded for a kill right now: `floor(10 * elapsed_minutes)`
    pub fn kill_score(&self) -> u64 {
        let minutes = self.elapsed / 60.0;
        (10.0 * minutes).floor() as u64
    }
}
