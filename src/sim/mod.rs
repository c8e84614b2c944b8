//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep, scaled against the 60 Hz reference tick
//! - Seeded RNG only
//! - Stable iteration order (by slot index)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;
pub mod update;
pub mod wave;

pub use autopilot::autopilot_input;
pub use collision::{CollisionReport, resolve_collisions};
pub use rect::Rect;
pub use state::{
    BuffChoice, Buffs, Difficulty, Enemy, EnemyBullet, EnemyBullets, EnemyRole, GameEvent,
    PlayerBullet, PlayerBullets, RunState, ShotKind, Submarine,
};
pub use tick::{TickOutcome, tick};
pub use update::{TickInput, update_entities};
pub use wave::{Checkpoint, WaveProgress, check_wave_clear, reset_enemies, resume_after_checkpoint};
