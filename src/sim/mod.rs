//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One clamped step per rendered frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod animation;
pub mod collision;
pub mod enemy;
pub mod obstacles;
pub mod player;
pub mod projectile;
pub mod state;
pub mod terrain;
pub mod tick;

pub use animation::{Animator, EnemyAnim, PlayerAnim, PlayerAnimTimers, PlayerClips};
pub use collision::{point_in_cylinder, resolve_cylinders};
pub use enemy::{EnemyAssets, EnemyTemplate, HealthBand, HealthBar, WaveDirector, kill_enemy};
pub use obstacles::{Obstacle, ObstacleSet, ObstacleTemplate};
pub use state::{AimMode, CameraPose, Enemy, Player, Projectile, TickInput, World};
pub use terrain::{HeightField, TerrainGrid};
pub use tick::tick;
