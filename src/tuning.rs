//! Game balance tuning
//!
//! Every gameplay rate and timer that a designer might touch lives here,
//! so the frontend can persist an edited table and hand it back to the
//! simulation as JSON.

use serde::{Deserialize, Serialize};

/// Data-driven balance constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    // === Player ===
    /// Horizontal base speed (units/sec)
    pub player_speed: f32,
    /// Speed multiplier while sprinting with a direction held
    pub sprint_multiplier: f32,
    /// Downward acceleration (units/sec^2, negative)
    pub gravity: f32,
    /// Upward velocity applied on jump
    pub jump_speed: f32,
    pub player_max_hp: u8,
    /// Seconds of invulnerability after contact damage
    pub hurt_window: f32,
    /// Seconds between shots
    pub shoot_cooldown: f32,

    // === Enemies ===
    /// Seconds between wave spawns
    pub spawn_interval: f32,
    /// Wave n spawns `enemies_per_wave + n` enemies
    pub enemies_per_wave: u32,
    /// Pursuit speed (units/sec)
    pub enemy_speed: f32,
    pub enemy_max_hp: u8,
    /// Seconds a dead enemy lingers for its death animation
    pub corpse_linger: f32,
    /// Enemies drop from this far above the ground at spawn
    pub spawn_drop_height: f32,

    // === Obstacles ===
    /// How many obstacles world population attempts to place
    pub obstacle_count: u32,
    /// Reject placement candidates steeper than this
    pub max_obstacle_slope: f32,
    /// Reject placement candidates closer than this to the player start
    pub player_start_clearance: f32,

    // === Animation ===
    /// Cross-fade duration between animation tracks (seconds)
    pub anim_fade: f32,
    /// Faster fade into the enemy death clip
    pub death_fade: f32,
    /// One-shot window for the jump clip
    pub jump_anim_window: f32,
    /// One-shot window for the special-action clip
    pub action_anim_window: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 12.0,
            sprint_multiplier: 1.7,
            gravity: -25.0,
            jump_speed: 8.0,
            player_max_hp: 5,
            hurt_window: 1.0,
            shoot_cooldown: 0.8,

            spawn_interval: 10.0,
            enemies_per_wave: 5,
            enemy_speed: 1.2,
            enemy_max_hp: 3,
            corpse_linger: 5.0,
            spawn_drop_height: 5.0,

            obstacle_count: 150,
            max_obstacle_slope: 0.6,
            player_start_clearance: 6.0,

            anim_fade: 0.2,
            death_fade: 0.15,
            jump_anim_window: 1.0,
            action_anim_window: 2.0,
        }
    }
}

impl Tuning {
    /// Parse a tuning table from JSON. Falls back to defaults on a malformed
    /// table so a bad edit can never brick the game.
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Malformed tuning table ({e}); using defaults");
                Self::default()
            }
        }
    }

    /// Serialize for persistence by the frontend
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
