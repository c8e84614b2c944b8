//! Submarine Strike - a wave-based submarine arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, waves)
//! - `run`: Top-level screen state machine and best-time hand-off
//! - `best_times`: Per-difficulty fastest clear times
//! - `config` / `settings`: Tunable game parameters and player preferences

pub mod best_times;
pub mod config;
pub mod error;
pub mod run;
pub mod settings;
pub mod sim;

pub use best_times::{BestTimes, BestTimesStore, FileStore, MemoryStore};
pub use config::{DifficultyOverlay, GameConfig};
pub use error::{PersistenceError, SettingsError};
pub use run::{MenuCommand, RunController, RunInput, Screen};
pub use settings::Settings;

/// Game constants that are not exposed as configuration
pub mod consts {
    /// Reference frame rate the per-tick quantities were tuned at
    pub const REFERENCE_HZ: f32 = 60.0;
    /// Fixed simulation timestep at the reference rate
    pub const SIM_DT: f32 = 1.0 / REFERENCE_HZ;

    /// Submarine defaults
    pub const SUB_BASE_SPEED: i32 = 200;
    pub const SUB_MAX_HEALTH: i32 = 100;
    pub const SUB_MAX_ENERGY: f32 = 100.0;
    /// Extra speed while boosting
    pub const BOOST_SPEED_BONUS: i32 = 5;
    /// Energy drained per reference tick of boosting
    pub const BOOST_DRAIN_PER_TICK: f32 = 1.0;

    /// Player bullets
    pub const PLAYER_BULLET_SLOTS: usize = 10;
    pub const LIGHT_SHOT_SIZE: (f32, f32) = (5.0, 10.0);
    pub const LIGHT_SHOT_DAMAGE: i32 = 1;
    pub const HEAVY_SHOT_SIZE: (f32, f32) = (100.0, 100.0);
    pub const HEAVY_SHOT_X_OFFSET: f32 = 25.0;
    pub const HEAVY_SHOT_DAMAGE: i32 = 3;
    /// Upward travel per reference tick
    pub const PLAYER_BULLET_STEP: f32 = 10.0;

    /// Enemy bullets
    pub const BOSS_SHOT_SIZE: (f32, f32) = (10.0, 10.0);
    pub const SHOOTER_SHOT_SIZE: (f32, f32) = (5.0, 10.0);
    /// Downward travel per reference tick
    pub const ENEMY_BULLET_STEP: f32 = 5.0;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 64.0;
    pub const ENEMY_BASE_SPEED: i32 = 2;
    pub const SHOOTER_STEP: f32 = 2.0;
    pub const BOSS_SIZE: f32 = 200.0;
    pub const BOSS_MAX_HEALTH: i32 = 50;
    pub const BOSS_SPEED: i32 = 2;
    pub const BOSS_WAVE: u32 = 5;
    /// Distance after which the animation phase counter wraps
    pub const ANIMATION_CYCLE: f32 = 30.0;

    /// Combat economy
    pub const CONTACT_DAMAGE: i32 = 20;
    pub const ENEMY_BULLET_DAMAGE: i32 = 10;
    pub const KILL_SCORE: u32 = 10;
    pub const KILL_ENERGY: f32 = 25.0;
    pub const LIFESTEAL_HEAL: i32 = 10;
}

/// Scale factor converting a per-reference-tick quantity to the given timestep
#[inline]
pub fn frame_scale(dt: f32) -> f32 {
    dt * consts::REFERENCE_HZ
}
