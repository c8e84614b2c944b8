//! Collision detection and resolution
//!
//! Runs once per tick after movement. The three passes run in a fixed order:
//! submarine vs enemies, player bullets vs enemies, enemy bullets vs submarine.

use super::state::{EnemyRole, GameEvent, RunState};
use crate::consts::*;

/// Summary of one resolution pass (for logging and tests)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Submarine touching an enemy
    pub contacts: u32,
    /// Enemy bullets that hit the submarine
    pub shots_taken: u32,
    pub kills: u32,
    pub bullet_hits: u32,
    pub boss_defeated: bool,
}

/// Run all collision passes in order
pub fn resolve_collisions(state: &mut RunState) -> CollisionReport {
    let mut report = CollisionReport::default();
    submarine_vs_enemies(state, &mut report);
    bullets_vs_enemies(state, &mut report);
    enemy_bullets_vs_submarine(state, &mut report);
    report
}

/// Contact damage. On the boss wave contact is lethal and the enemy survives.
pub fn submarine_vs_enemies(state: &mut RunState, report: &mut CollisionReport) {
    let boss_wave = state.is_boss_wave();
    let RunState {
        submarine,
        enemies,
        events,
        ..
    } = state;

    for enemy in enemies.iter_mut().filter(|e| e.active) {
        if !submarine.hitbox.overlaps(&enemy.rect) {
            continue;
        }
        report.contacts += 1;
        if boss_wave {
            events.push(GameEvent::SubmarineHit {
                damage: submarine.health,
            });
            submarine.kill();
        } else {
            submarine.take_damage(CONTACT_DAMAGE);
            enemy.active = false;
            events.push(GameEvent::SubmarineHit {
                damage: CONTACT_DAMAGE,
            });
        }
    }
}

/// Player shots. A shot is consumed on its first tick of contact but damages every
/// enemy it overlaps in that tick.
pub fn bullets_vs_enemies(state: &mut RunState, report: &mut CollisionReport) {
    let boss_wave = state.is_boss_wave();
    let RunState {
        submarine,
        bullets,
        enemies,
        buffs,
        score,
        victory,
        events,
        ..
    } = state;

    let mut killed: Vec<EnemyRole> = Vec::new();

    for bullet in bullets.slots.iter_mut().filter(|b| b.active) {
        let mut hit = false;
        for enemy in enemies.iter_mut().filter(|e| e.active) {
            if !bullet.rect.overlaps(&enemy.rect) {
                continue;
            }
            hit = true;
            report.bullet_hits += 1;
            enemy.health -= bullet.damage;
            if enemy.health <= 0 {
                enemy.active = false;
                killed.push(enemy.role);
            }
        }
        if hit {
            bullet.active = false;
        }
    }

    for role in killed {
        report.kills += 1;
        *score += KILL_SCORE;
        submarine.gain_energy(KILL_ENERGY);
        if buffs.lifesteal {
            submarine.heal(LIFESTEAL_HEAL);
        }
        events.push(GameEvent::EnemyKilled { role });

        if boss_wave && role.is_boss() && !*victory {
            *victory = true;
            report.boss_defeated = true;
            events.push(GameEvent::BossDefeated);
            log::info!("Boss defeated");
        }
    }
}

/// Enemy shots against the hitbox
pub fn enemy_bullets_vs_submarine(state: &mut RunState, report: &mut CollisionReport) {
    let RunState {
        submarine,
        enemy_bullets,
        events,
        ..
    } = state;

    for bullet in enemy_bullets.slots.iter_mut().filter(|b| b.active) {
        if bullet.rect.overlaps(&submarine.hitbox) {
            bullet.active = false;
            submarine.take_damage(ENEMY_BULLET_DAMAGE);
            report.shots_taken += 1;
            events.push(GameEvent::SubmarineHit {
                damage: ENEMY_BULLET_DAMAGE,
            });
        }
    }
}
