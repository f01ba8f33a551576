//! Animation state machines for player and enemies
//!
//! The simulation only decides *which* track plays and how tracks blend;
//! sampling skeletal clips is the presentation layer's job. A track is
//! either looping (idle, run) or one-shot (jump, action, die); one-shot
//! clips clamp on their final frame until a new state replaces them.

use serde::{Deserialize, Serialize};

/// Player animation tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAnim {
    Idle,
    Run,
    Backward,
    Jump,
    Action,
}

/// Enemy animation tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyAnim {
    Idle,
    Walk,
    Die,
}

/// A track fading out while its replacement fades in
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FadingTrack<S> {
    pub state: S,
    pub remaining: f32,
}

/// Cross-fading track player, one per agent.
///
/// Shared between player and enemies; the state enum is the only thing
/// that differs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Animator<S> {
    current: Option<S>,
    fade_out: Option<FadingTrack<S>>,
    clip_time: f32,
}

impl<S: Copy + PartialEq> Animator<S> {
    pub fn new() -> Self {
        Self {
            current: None,
            fade_out: None,
            clip_time: 0.0,
        }
    }

    /// Currently playing track, if any clip has started
    pub fn current(&self) -> Option<S> {
        self.current
    }

    /// Track still fading out from the last transition, with seconds left
    pub fn fading(&self) -> Option<FadingTrack<S>> {
        self.fade_out
    }

    /// Seconds since the current track started
    pub fn clip_time(&self) -> f32 {
        self.clip_time
    }

    /// Switch tracks with a cross-fade. Requesting the active track is a
    /// no-op, so callers can request their desired state every tick.
    pub fn transition(&mut self, to: S, fade: f32) {
        if self.current == Some(to) {
            return;
        }
        if let Some(previous) = self.current {
            self.fade_out = Some(FadingTrack {
                state: previous,
                remaining: fade,
            });
        }
        self.current = Some(to);
        self.clip_time = 0.0;
    }

    /// Advance clip time and the fade-out countdown
    pub fn advance(&mut self, dt: f32) {
        self.clip_time += dt;
        if let Some(fade) = &mut self.fade_out {
            fade.remaining -= dt;
            if fade.remaining <= 0.0 {
                self.fade_out = None;
            }
        }
    }
}

impl<S: Copy + PartialEq> Default for Animator<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot countdowns layered above the player's locomotion state.
/// Action outranks jump; both outrank movement-derived tracks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerAnimTimers {
    pub action: f32,
    pub jump: f32,
}

/// Select the player track for this tick, decrementing whichever one-shot
/// window is active. Sprinting with movement cancels a pending action
/// window so the sprint cycle starts without waiting it out.
pub fn select_player_anim(
    timers: &mut PlayerAnimTimers,
    dt: f32,
    moving: bool,
    backward_only: bool,
    sprinting: bool,
) -> PlayerAnim {
    if timers.action > 0.0 {
        timers.action -= dt;
        if !(sprinting && moving) {
            return PlayerAnim::Action;
        }
        timers.action = 0.0;
    }

    if timers.jump > 0.0 {
        timers.jump -= dt;
        return PlayerAnim::Jump;
    }

    if backward_only {
        PlayerAnim::Backward
    } else if moving {
        PlayerAnim::Run
    } else {
        PlayerAnim::Idle
    }
}

/// Which player clips the environment has finished loading
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerClips {
    pub idle: bool,
    pub run: bool,
    pub backward: bool,
    pub jump: bool,
    pub action: bool,
}

impl PlayerClips {
    pub fn all_loaded() -> Self {
        Self {
            idle: true,
            run: true,
            backward: true,
            jump: true,
            action: true,
        }
    }

    pub fn loaded(&self, anim: PlayerAnim) -> bool {
        match anim {
            PlayerAnim::Idle => self.idle,
            PlayerAnim::Run => self.run,
            PlayerAnim::Backward => self.backward,
            PlayerAnim::Jump => self.jump,
            PlayerAnim::Action => self.action,
        }
    }
}
