//! Wave progression: spawning, clear detection and buff checkpoints

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{BuffChoice, Enemy, EnemyRole, GameEvent, RunState};
use crate::config::DifficultyOverlay;
use crate::consts::*;

/// Buff checkpoints between waves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Checkpoint {
    /// After wave 2
    First,
    /// After wave 4, before the boss
    Second,
}

impl Checkpoint {
    pub fn offers(&self) -> [BuffChoice; 2] {
        match self {
            Checkpoint::First => [BuffChoice::Lifesteal, BuffChoice::UnlimitedSpecial],
            Checkpoint::Second => [BuffChoice::UnlimitedEnergy, BuffChoice::FullHeal],
        }
    }

    pub fn offers_choice(&self, choice: BuffChoice) -> bool {
        self.offers().contains(&choice)
    }
}

/// What happened when the wave director looked at the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveProgress {
    /// Enemies remain
    InProgress,
    /// Wave cleared, next wave spawned
    Advanced { wave: u32 },
    /// Wave cleared, waiting on a buff choice
    Checkpoint(Checkpoint),
    /// Final wave has no successor; the boss kill ends the run
    Final,
}

/// Top edge of the regular spawn band
const SPAWN_TOP: i32 = 50;

/// Live enemy slots for a wave
pub fn live_enemy_count(wave: u32) -> usize {
    if wave == BOSS_WAVE { 1 } else { wave as usize * 5 }
}

/// Spawn the enemies for `state.wave` and clear every other slot
pub fn reset_enemies(state: &mut RunState) {
    let wave = state.wave;
    let (sw, sh) = (state.config.screen_width, state.config.screen_height);

    if wave == BOSS_WAVE {
        for enemy in state.enemies.iter_mut() {
            enemy.active = false;
            enemy.role = EnemyRole::Normal;
        }
        if let Some(boss) = state.enemies.first_mut() {
            *boss = Enemy {
                rect: Rect::new(
                    sw as f32 / 2.0 - BOSS_SIZE / 2.0,
                    50.0,
                    BOSS_SIZE,
                    BOSS_SIZE,
                ),
                speed: BOSS_SPEED,
                health: BOSS_MAX_HEALTH,
                max_health: BOSS_MAX_HEALTH,
                active: true,
                role: EnemyRole::Boss { shoot_timer: 0.0 },
                direction: 1,
                distance_moved: 0.0,
            };
        }
        log::info!("Wave {}: boss spawned", wave);
    } else {
        let live = state.live_enemy_count();
        let max_health = wave as i32;
        // Collapse to a single spawn point on screens smaller than the spawn band
        let x_max = (sw - 40).max(0);
        let y_max = (sh / 2).max(SPAWN_TOP);
        for (i, enemy) in state.enemies.iter_mut().enumerate() {
            if i >= live {
                enemy.active = false;
                continue;
            }
            let x = state.rng.random_range(0..=x_max) as f32;
            let y = state.rng.random_range(SPAWN_TOP..=y_max) as f32;
            let (role, direction) = if wave >= 3 && state.rng.random_range(0..5) == 0 {
                let direction = if state.rng.random_bool(0.5) { 1 } else { -1 };
                (EnemyRole::Shooter { shoot_timer: 0.0 }, direction)
            } else {
                (EnemyRole::Normal, 1)
            };
            *enemy = Enemy {
                rect: Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
                speed: ENEMY_BASE_SPEED,
                health: max_health,
                max_health,
                active: true,
                role,
                direction,
                distance_moved: 0.0,
            };
        }
        let shooters = state.enemies[..live]
            .iter()
            .filter(|e| e.role.is_shooter())
            .count();
        log::info!("Wave {}: spawned {} enemies", wave, live);
        log::debug!("Wave {}: {} shooters", wave, shooters);
    }

    if state.config.difficulty_overlay == DifficultyOverlay::AtSpawn {
        apply_difficulty(state);
        for enemy in state.enemies.iter_mut().filter(|e| e.active) {
            enemy.max_health = enemy.max_health.max(enemy.health);
        }
    }

    state.events.push(GameEvent::WaveStarted { wave });
}

/// Overwrite speed and max health of every live slot with the difficulty value
pub fn apply_difficulty(state: &mut RunState) {
    let value = state.difficulty.multiplier();
    let live = state.live_enemy_count();
    for enemy in &mut state.enemies[..live] {
        enemy.speed = value;
        enemy.max_health = value;
    }
}

/// True when no live slot is active
pub fn is_wave_cleared(state: &RunState) -> bool {
    let live = state.live_enemy_count();
    !state.enemies[..live].iter().any(|e| e.active)
}

/// Check for a cleared wave and advance or pause at a checkpoint
pub fn check_wave_clear(state: &mut RunState) -> WaveProgress {
    if !is_wave_cleared(state) {
        return WaveProgress::InProgress;
    }

    match state.wave {
        2 => {
            state.events.push(GameEvent::WaveCleared { wave: 2 });
            WaveProgress::Checkpoint(Checkpoint::First)
        }
        4 => {
            state.events.push(GameEvent::WaveCleared { wave: 4 });
            WaveProgress::Checkpoint(Checkpoint::Second)
        }
        wave if wave < BOSS_WAVE => {
            state.events.push(GameEvent::WaveCleared { wave });
            state.wave += 1;
            state.submarine.speed += 1;
            reset_enemies(state);
            WaveProgress::Advanced { wave: state.wave }
        }
        _ => WaveProgress::Final,
    }
}

/// Leave a checkpoint: next wave, fresh spawn, no speed bonus
pub fn resume_after_checkpoint(state: &mut RunState) {
    state.wave += 1;
    reset_enemies(state);
}
