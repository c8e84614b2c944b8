//! Run state and combat entity types
//!
//! Everything the simulation mutates during a run lives in [`RunState`]. The render
//! collaborator reads it through `Serialize`; only the RNG is left out of snapshots.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::GameConfig;
use crate::consts::*;

/// Difficulty tier chosen at level select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Stat value written onto enemies (speed and max health)
    pub fn multiplier(&self) -> i32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Slot in the best-times record
    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }
}

/// The player's submarine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submarine {
    /// Visual body, clamped to the screen
    pub body: Rect,
    /// Collision rectangle, follows the body
    pub hitbox: Rect,
    /// Hitbox top relative to body top
    pub hitbox_offset_y: f32,
    /// Pixels per second
    pub speed: i32,
    pub health: i32,
    pub max_health: i32,
    /// 0..=100, spent by boosting
    pub energy: f32,
    pub facing_left: bool,
    /// Seconds until the next heavy shot is allowed
    pub heavy_cooldown: f32,
}

impl Submarine {
    pub fn new(config: &GameConfig) -> Self {
        let (sw, sh) = (config.width(), config.height());
        let (fw, fh) = (config.frame_width as f32, config.frame_height as f32);
        let body = Rect::new(sw / 2.0 - fw / 2.0, sh - 120.0, fw, fh * 2.0);
        let hitbox = Rect::new(sw / 2.0 - fw / 4.0, sh - 100.0, fw * 1.5, fh * 1.5);
        let mut sub = Self {
            body,
            hitbox,
            hitbox_offset_y: hitbox.top() - body.top(),
            speed: SUB_BASE_SPEED,
            health: SUB_MAX_HEALTH,
            max_health: SUB_MAX_HEALTH,
            energy: SUB_MAX_ENERGY,
            facing_left: false,
            heavy_cooldown: 0.0,
        };
        sub.body.clamp_inside(sw, sh);
        sub.recenter_hitbox();
        sub
    }

    /// Center the hitbox horizontally under the body, keep its vertical offset
    pub fn recenter_hitbox(&mut self) {
        self.hitbox.pos.x = self.body.left() + (self.body.size.x - self.hitbox.size.x) / 2.0;
        self.hitbox.pos.y = self.body.top() + self.hitbox_offset_y;
    }

    /// Top-left of a shot of the given width leaving the nose
    pub fn muzzle(&self, shot_width: f32) -> Vec2 {
        Vec2::new(
            self.body.left() + self.body.size.x / 2.0 - shot_width / 2.0,
            self.body.top(),
        )
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn kill(&mut self) {
        self.health = 0;
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn restore_health(&mut self) {
        self.health = self.max_health;
    }

    pub fn gain_energy(&mut self, amount: f32) {
        self.energy = (self.energy + amount).clamp(0.0, SUB_MAX_ENERGY);
    }

    pub fn drain_energy(&mut self, amount: f32) {
        self.energy = (self.energy - amount).clamp(0.0, SUB_MAX_ENERGY);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// Player shot kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShotKind {
    #[default]
    Light,
    /// Special attack, gated by a cooldown
    Heavy,
}

impl ShotKind {
    pub fn damage(&self) -> i32 {
        match self {
            ShotKind::Light => LIGHT_SHOT_DAMAGE,
            ShotKind::Heavy => HEAVY_SHOT_DAMAGE,
        }
    }
}

/// A player bullet slot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerBullet {
    pub rect: Rect,
    pub active: bool,
    pub damage: i32,
    pub kind: ShotKind,
}

/// Frames in the heavy shot animation
pub const HEAVY_ANIM_FRAMES: u8 = 5;
/// Seconds per heavy shot animation frame
pub const HEAVY_ANIM_FRAME_TIME: f32 = 0.1;

/// Fixed ring of player bullets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBullets {
    pub slots: Vec<PlayerBullet>,
    /// Next slot a shot is written to
    pub cursor: usize,
    /// Heavy shot animation phase
    pub heavy_frame: u8,
    pub heavy_frame_time: f32,
}

impl PlayerBullets {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![PlayerBullet::default(); capacity],
            cursor: 0,
            heavy_frame: 0,
            heavy_frame_time: 0.0,
        }
    }

    /// Write a shot into the cursor slot.
    ///
    /// The shot is dropped if that slot is still in flight; the cursor only moves
    /// past slots it has written.
    pub fn fire(&mut self, rect: Rect, kind: ShotKind) -> bool {
        let slot = &mut self.slots[self.cursor];
        if slot.active {
            return false;
        }
        *slot = PlayerBullet {
            rect,
            active: true,
            damage: kind.damage(),
            kind,
        };
        self.cursor = (self.cursor + 1) % self.slots.len();
        if kind == ShotKind::Heavy {
            self.heavy_frame = 0;
            self.heavy_frame_time = 0.0;
        }
        true
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|b| b.active).count()
    }

    pub fn clear(&mut self) {
        *self = Self::new(self.slots.len());
    }
}

/// Enemy behaviour, with the per-role firing timer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum EnemyRole {
    /// Bounces vertically, never fires
    #[default]
    Normal,
    /// Strafes horizontally and fires on a cooldown
    Shooter { shoot_timer: f32 },
    /// Final wave; strafes and fires rapidly, contact is lethal
    Boss { shoot_timer: f32 },
}

impl EnemyRole {
    pub fn is_boss(&self) -> bool {
        matches!(self, EnemyRole::Boss { .. })
    }

    pub fn is_shooter(&self) -> bool {
        matches!(self, EnemyRole::Shooter { .. })
    }
}

/// An enemy slot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    /// Pixels per reference tick
    pub speed: i32,
    pub health: i32,
    pub max_health: i32,
    pub active: bool,
    pub role: EnemyRole,
    /// +1 or -1 along the role's movement axis
    pub direction: i32,
    /// Animation phase, wraps at 30
    pub distance_moved: f32,
}

/// An enemy bullet slot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub rect: Rect,
    pub active: bool,
}

/// Fixed pool of enemy bullets, first-free allocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBullets {
    pub slots: Vec<EnemyBullet>,
}

impl EnemyBullets {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![EnemyBullet::default(); capacity],
        }
    }

    /// Activate the first free slot; returns false when the pool is exhausted
    pub fn spawn(&mut self, rect: Rect) -> bool {
        match self.slots.iter_mut().find(|b| !b.active) {
            Some(slot) => {
                slot.rect = rect;
                slot.active = true;
                true
            }
            None => false,
        }
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|b| b.active).count()
    }
}

/// Run-scoped modifiers picked at buff checkpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buffs {
    /// Heal on every kill
    pub lifesteal: bool,
    /// Heavy shot ignores its cooldown
    pub unlimited_special: bool,
    /// Boost never drains energy
    pub unlimited_energy: bool,
}

/// Choices offered at buff checkpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffChoice {
    Lifesteal,
    UnlimitedSpecial,
    UnlimitedEnergy,
    /// One-off full heal, sets no flag
    FullHeal,
}

/// Gameplay events emitted during a tick (for audio/visual feedback)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { kind: ShotKind },
    EnemyFired { boss: bool },
    SubmarineHit { damage: i32 },
    EnemyKilled { role: EnemyRole },
    BossDefeated,
    WaveCleared { wave: u32 },
    WaveStarted { wave: u32 },
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunState {
    pub config: GameConfig,
    pub seed: u64,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    pub difficulty: Difficulty,
    /// Current wave, 1-based
    pub wave: u32,
    pub score: u32,
    /// Seconds spent playing this run
    pub elapsed: f32,
    pub time_ticks: u64,
    pub submarine: Submarine,
    pub bullets: PlayerBullets,
    pub enemies: Vec<Enemy>,
    pub enemy_bullets: EnemyBullets,
    pub buffs: Buffs,
    /// Set once when the final boss dies
    pub victory: bool,
    /// Events from the latest tick
    pub events: Vec<GameEvent>,
}

impl RunState {
    /// Fresh run at wave 1 with the first wave spawned
    pub fn new(config: GameConfig, difficulty: Difficulty, seed: u64) -> Self {
        let mut state = Self {
            submarine: Submarine::new(&config),
            bullets: PlayerBullets::new(PLAYER_BULLET_SLOTS),
            enemies: vec![Enemy::default(); config.max_enemies],
            enemy_bullets: EnemyBullets::new(config.max_enemy_bullets),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            difficulty,
            wave: 1,
            score: 0,
            elapsed: 0.0,
            time_ticks: 0,
            buffs: Buffs::default(),
            victory: false,
            events: Vec::new(),
        };
        super::wave::reset_enemies(&mut state);
        state
    }

    /// Number of enemy slots in play for the current wave
    pub fn live_enemy_count(&self) -> usize {
        super::wave::live_enemy_count(self.wave).min(self.enemies.len())
    }

    pub fn active_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.active).count()
    }

    pub fn is_boss_wave(&self) -> bool {
        self.wave == BOSS_WAVE
    }

    /// Apply a checkpoint reward
    pub fn apply_buff(&mut self, choice: BuffChoice) {
        match choice {
            BuffChoice::Lifesteal => self.buffs.lifesteal = true,
            BuffChoice::UnlimitedSpecial => self.buffs.unlimited_special = true,
            BuffChoice::UnlimitedEnergy => {
                self.buffs.unlimited_energy = true;
                self.submarine.energy = SUB_MAX_ENERGY;
            }
            BuffChoice::FullHeal => self.submarine.restore_health(),
        }
        log::info!("Buff chosen: {:?}", choice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_defaults() {
        let state = RunState::new(GameConfig::default(), Difficulty::Easy, 7);
        assert_eq!(state.wave, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.submarine.health, 100);
        assert_eq!(state.submarine.energy, 100.0);
        assert_eq!(state.submarine.speed, SUB_BASE_SPEED);
        assert_eq!(state.enemies.len(), 50);
        assert_eq!(state.active_enemy_count(), 5);
        assert_eq!(state.buffs, Buffs::default());
    }

    #[test]
    fn test_hitbox_centered_under_body() {
        let sub = Submarine::new(&GameConfig::default());
        assert!((sub.hitbox.center().x - sub.body.center().x).abs() < 0.001);
        assert_eq!(sub.hitbox_offset_y, 20.0);
        assert_eq!(sub.hitbox.top(), sub.body.top() + 20.0);
        assert!(sub.body.is_inside(600.0, 800.0));
    }

    #[test]
    fn test_submarine_health_and_energy_clamp() {
        let mut sub = Submarine::new(&GameConfig::default());
        sub.take_damage(250);
        assert_eq!(sub.health, 0);
        sub.heal(500);
        assert_eq!(sub.health, sub.max_health);
        sub.drain_energy(300.0);
        assert_eq!(sub.energy, 0.0);
        sub.gain_energy(80.0);
        sub.gain_energy(80.0);
        assert_eq!(sub.energy, 100.0);
    }

    #[test]
    fn test_bullet_ring_drops_shot_into_busy_slot() {
        let mut pool = PlayerBullets::new(2);
        let r = Rect::new(0.0, 100.0, 5.0, 10.0);
        assert!(pool.fire(r, ShotKind::Light));
        assert!(pool.fire(r, ShotKind::Heavy));
        assert_eq!(pool.cursor, 0);
        // Slot 0 is still flying
        assert!(!pool.fire(r, ShotKind::Light));
        assert_eq!(pool.cursor, 0);
        assert_eq!(pool.slots[1].damage, HEAVY_SHOT_DAMAGE);

        pool.slots[0].active = false;
        assert!(pool.fire(r, ShotKind::Light));
        assert_eq!(pool.cursor, 1);
    }

    #[test]
    fn test_enemy_bullet_pool_exhaustion() {
        let mut pool = EnemyBullets::new(2);
        let r = Rect::new(0.0, 0.0, 5.0, 10.0);
        assert!(pool.spawn(r));
        assert!(pool.spawn(r));
        assert!(!pool.spawn(r));
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn test_difficulty_values() {
        assert_eq!(Difficulty::Medium.multiplier(), 2);
        assert_eq!(Difficulty::Hard.index(), 2);
        assert_eq!(Difficulty::Easy.as_str(), "Easy");
    }

    #[test]
    fn test_unlimited_energy_buff_refills() {
        let mut state = RunState::new(GameConfig::default(), Difficulty::Easy, 1);
        state.submarine.energy = 12.0;
        state.apply_buff(BuffChoice::UnlimitedEnergy);
        assert!(state.buffs.unlimited_energy);
        assert_eq!(state.submarine.energy, 100.0);

        state.submarine.health = 30;
        state.apply_buff(BuffChoice::FullHeal);
        assert_eq!(state.submarine.health, 100);
        assert!(!state.buffs.lifesteal);
    }
}
