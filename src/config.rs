//! Tunable game parameters
//!
//! Loaded as part of [`crate::Settings`]; every field has a default so a partial JSON
//! object is enough to override a single value.

use serde::{Deserialize, Serialize};

use crate::consts::{BOSS_SIZE, BOSS_WAVE};
use crate::error::SettingsError;

/// Smallest screen the spawner and the boss fit in
pub const MIN_SCREEN_WIDTH: i32 = BOSS_SIZE as i32;
pub const MIN_SCREEN_HEIGHT: i32 = 100;

/// How the difficulty multiplier is written onto enemy stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyOverlay {
    /// Overwrite speed and max health of every live slot at the start of each tick
    #[default]
    PerTick,
    /// Apply once when a wave spawns
    AtSpawn,
}

/// Arena, pool and timing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    /// Sprite frame size; the submarine body and hitbox derive from it
    pub frame_width: i32,
    pub frame_height: i32,
    /// Seconds between heavy shots
    pub heavy_bullet_cooldown: f32,
    /// Seconds between shooter enemy shots
    pub shooter_cooldown: f32,
    /// Seconds between boss shots
    pub boss_shoot_cooldown: f32,
    /// Enemy pool capacity
    pub max_enemies: usize,
    /// Enemy bullet pool capacity
    pub max_enemy_bullets: usize,
    pub difficulty_overlay: DifficultyOverlay,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 600,
            screen_height: 800,
            frame_width: 64,
            frame_height: 64,
            heavy_bullet_cooldown: 3.0,
            shooter_cooldown: 1.5,
            boss_shoot_cooldown: 0.5,
            max_enemies: 50,
            max_enemy_bullets: 50,
            difficulty_overlay: DifficultyOverlay::PerTick,
        }
    }
}

impl GameConfig {
    /// Reject configs the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.frame_width <= 0 || self.frame_height <= 0 {
            return Err(SettingsError::InvalidConfig(format!(
                "frame size {}x{} must be positive",
                self.frame_width, self.frame_height
            )));
        }
        let cooldowns = [
            ("heavy_bullet_cooldown", self.heavy_bullet_cooldown),
            ("shooter_cooldown", self.shooter_cooldown),
            ("boss_shoot_cooldown", self.boss_shoot_cooldown),
        ];
        for (name, value) in cooldowns {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::InvalidConfig(format!(
                    "{name} must be a positive number of seconds, got {value}"
                )));
            }
        }
        // The fourth wave spawns 20 enemies
        let largest_wave = (BOSS_WAVE as usize - 1) * 5;
        if self.max_enemies < largest_wave {
            return Err(SettingsError::InvalidConfig(format!(
                "max_enemies must be at least {largest_wave}, got {}",
                self.max_enemies
            )));
        }
        if self.max_enemy_bullets == 0 {
            return Err(SettingsError::InvalidConfig(
                "max_enemy_bullets must be non-zero".into(),
            ));
        }
        // Spawn rows run from y = 50 to half the screen height
        if self.screen_height < MIN_SCREEN_HEIGHT || self.screen_width < MIN_SCREEN_WIDTH {
            return Err(SettingsError::InvalidConfig(format!(
                "screen {}x{} smaller than the {}x{} minimum",
                self.screen_width, self.screen_height, MIN_SCREEN_WIDTH, MIN_SCREEN_HEIGHT
            )));
        }
        if self.screen_width < self.frame_width * 2 || self.screen_height < self.frame_height * 3 {
            return Err(SettingsError::InvalidConfig(format!(
                "screen {}x{} too small for {}x{} frames",
                self.screen_width, self.screen_height, self.frame_width, self.frame_height
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> f32 {
        self.screen_width as f32
    }

    pub fn height(&self) -> f32 {
        self.screen_height as f32
    }
}
