//! Entity update: movement, firing and per-role enemy behaviour
//!
//! Per-frame quantities (bullet travel, enemy steps, boost drain) are defined per
//! reference tick and scaled by `dt * 60`, so a 60 Hz caller sees exactly those values.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{
    Enemy, EnemyBullets, EnemyRole, GameEvent, HEAVY_ANIM_FRAME_TIME, HEAVY_ANIM_FRAMES, RunState,
    ShotKind,
};
use crate::config::GameConfig;
use crate::consts::*;
use crate::frame_scale;

/// Player intent for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Horizontal speed boost (held)
    pub boost: bool,
    /// Light shot (edge-triggered)
    pub fire_light: bool,
    /// Heavy shot (edge-triggered)
    pub fire_heavy: bool,
    /// Pause toggle (edge-triggered)
    pub pause: bool,
}

impl TickInput {
    /// -1, 0 or +1 along x
    pub fn horizontal(&self) -> i32 {
        self.right as i32 - self.left as i32
    }

    /// -1, 0 or +1 along y (down is positive)
    pub fn vertical(&self) -> i32 {
        self.down as i32 - self.up as i32
    }
}

/// Advance every entity by one tick
pub fn update_entities(state: &mut RunState, input: &TickInput, dt: f32) {
    move_submarine(state, input, dt);
    fire_weapons(state, input, dt);
    advance_player_bullets(state, dt);
    advance_enemies(state, dt);
    advance_enemy_bullets(state, dt);
}

/// Integrate submarine movement, boost and energy drain
pub fn move_submarine(state: &mut RunState, input: &TickInput, dt: f32) {
    let (width, height) = (state.config.width(), state.config.height());
    let unlimited_energy = state.buffs.unlimited_energy;
    let sub = &mut state.submarine;

    if input.left {
        sub.facing_left = true;
    }
    if input.right {
        sub.facing_left = false;
    }

    let horizontal = input.horizontal();
    let vertical = input.vertical();

    let mut horizontal_speed = sub.speed;
    if input.boost && horizontal != 0 && (unlimited_energy || sub.energy > 0.0) {
        horizontal_speed += BOOST_SPEED_BONUS;
        if !unlimited_energy {
            sub.drain_energy(BOOST_DRAIN_PER_TICK * frame_scale(dt));
        }
    }

    sub.body.pos.x += horizontal as f32 * horizontal_speed as f32 * dt;
    sub.body.pos.y += vertical as f32 * sub.speed as f32 * dt;
    sub.body.clamp_inside(width, height);
    sub.recenter_hitbox();
}

/// Count down the heavy cooldown and spawn shots on fire edges
pub fn fire_weapons(state: &mut RunState, input: &TickInput, dt: f32) {
    let sub = &mut state.submarine;
    sub.heavy_cooldown = (sub.heavy_cooldown - dt).max(0.0);

    if input.fire_light {
        let (w, h) = LIGHT_SHOT_SIZE;
        let muzzle = sub.muzzle(w);
        if state.bullets.fire(Rect::new(muzzle.x, muzzle.y, w, h), ShotKind::Light) {
            state.events.push(GameEvent::ShotFired { kind: ShotKind::Light });
        }
    }

    let unlimited_special = state.buffs.unlimited_special;
    if input.fire_heavy && (sub.heavy_cooldown <= 0.0 || unlimited_special) {
        let (w, h) = HEAVY_SHOT_SIZE;
        let muzzle = sub.muzzle(w);
        let rect = Rect::new(muzzle.x + HEAVY_SHOT_X_OFFSET, muzzle.y, w, h);
        if state.bullets.fire(rect, ShotKind::Heavy) {
            if !unlimited_special {
                sub.heavy_cooldown = state.config.heavy_bullet_cooldown;
            }
            state.events.push(GameEvent::ShotFired { kind: ShotKind::Heavy });
        }
    }
}

/// Move player bullets up, retire those above the screen, animate heavy shots
pub fn advance_player_bullets(state: &mut RunState, dt: f32) {
    let step = PLAYER_BULLET_STEP * frame_scale(dt);
    let pool = &mut state.bullets;
    let mut heavy_in_flight = false;

    for bullet in pool.slots.iter_mut().filter(|b| b.active) {
        bullet.rect.pos.y -= step;
        if bullet.rect.top() < 0.0 {
            bullet.active = false;
        } else if bullet.kind == ShotKind::Heavy {
            heavy_in_flight = true;
        }
    }

    if heavy_in_flight {
        pool.heavy_frame_time += dt;
        if pool.heavy_frame_time >= HEAVY_ANIM_FRAME_TIME {
            pool.heavy_frame_time = 0.0;
            pool.heavy_frame = (pool.heavy_frame + 1) % HEAVY_ANIM_FRAMES;
        }
    }
}

/// Move and fire every active enemy in the live range
pub fn advance_enemies(state: &mut RunState, dt: f32) {
    let live = state.live_enemy_count();
    let config = &state.config;
    for enemy in state.enemies[..live].iter_mut().filter(|e| e.active) {
        enemy.advance(config, dt);
        if enemy.try_fire(config, &mut state.enemy_bullets, dt) {
            state.events.push(GameEvent::EnemyFired {
                boss: enemy.role.is_boss(),
            });
        }
    }
}

/// Move enemy bullets down and retire those below the screen
pub fn advance_enemy_bullets(state: &mut RunState, dt: f32) {
    let step = ENEMY_BULLET_STEP * frame_scale(dt);
    let height = state.config.height();
    for bullet in state.enemy_bullets.slots.iter_mut().filter(|b| b.active) {
        bullet.rect.pos.y += step;
        if bullet.rect.top() > height {
            bullet.active = false;
        }
    }
}

impl Enemy {
    /// Move one tick according to role
    pub fn advance(&mut self, config: &GameConfig, dt: f32) {
        let scale = frame_scale(dt);
        match self.role {
            EnemyRole::Boss { .. } => {
                self.rect.pos.x += (self.direction * self.speed) as f32 * scale;
                self.bounce_horizontal(config.width());
            }
            EnemyRole::Shooter { .. } => {
                self.rect.pos.x += self.direction as f32 * SHOOTER_STEP * scale;
                self.bounce_horizontal(config.width());
            }
            EnemyRole::Normal => {
                self.rect.pos.y += (self.direction * self.speed) as f32 * scale;
                if self.rect.bottom() >= config.height() {
                    self.direction = -1;
                } else if self.rect.top() <= 0.0 {
                    self.direction = 1;
                }
            }
        }

        self.distance_moved += (self.speed * self.direction).abs() as f32 * scale;
        if self.distance_moved >= ANIMATION_CYCLE {
            self.distance_moved = 0.0;
        }
    }

    // Direction points back into the screen after touching a wall
    fn bounce_horizontal(&mut self, width: f32) {
        if self.rect.left() <= 0.0 {
            self.direction = 1;
        } else if self.rect.right() >= width {
            self.direction = -1;
        }
    }

    /// Tick the firing timer; spawn a bullet below the enemy when it expires.
    ///
    /// The timer stays expired while the pool is full, so the shot goes out as soon as
    /// a slot frees up.
    pub fn try_fire(&mut self, config: &GameConfig, pool: &mut EnemyBullets, dt: f32) -> bool {
        let (timer, cooldown, (w, h)) = match &mut self.role {
            EnemyRole::Normal => return false,
            EnemyRole::Shooter { shoot_timer } => {
                (shoot_timer, config.shooter_cooldown, SHOOTER_SHOT_SIZE)
            }
            EnemyRole::Boss { shoot_timer } => {
                (shoot_timer, config.boss_shoot_cooldown, BOSS_SHOT_SIZE)
            }
        };

        *timer -= dt;
        if *timer > 0.0 {
            return false;
        }

        let x = self.rect.center().x - w / 2.0;
        let fired = pool.spawn(Rect::new(x, self.rect.bottom(), w, h));
        if fired {
            *timer = cooldown;
        }
        fired
    }
}
