//! One simulation tick of active play
//!
//! Order: difficulty overlay, entity update, collisions, outcome, wave director.

use super::collision::resolve_collisions;
use super::state::RunState;
use super::update::{TickInput, update_entities};
use super::wave::{Checkpoint, WaveProgress, apply_difficulty, check_wave_clear};
use crate::config::DifficultyOverlay;

/// Result of a tick, consumed by the run controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Play continues
    Continue,
    /// Final boss destroyed
    Victory,
    /// Submarine destroyed
    Defeat,
    /// Wave cleared at a buff checkpoint
    Checkpoint(Checkpoint),
}

/// Advance the run by one tick of active play
pub fn tick(state: &mut RunState, input: &TickInput, dt: f32) -> TickOutcome {
    state.events.clear();

    if state.config.difficulty_overlay == DifficultyOverlay::PerTick {
        apply_difficulty(state);
    }

    state.time_ticks += 1;
    state.elapsed += dt;

    update_entities(state, input, dt);
    let report = resolve_collisions(state);
    if report.kills > 0 {
        log::debug!(
            "Tick {}: {} kills, score {}",
            state.time_ticks,
            report.kills,
            state.score
        );
    }

    // A boss kill wins even if the same tick was fatal
    if state.victory {
        return TickOutcome::Victory;
    }
    if state.submarine.is_dead() {
        log::info!(
            "Submarine destroyed on wave {} after {:.2}s",
            state.wave,
            state.elapsed
        );
        return TickOutcome::Defeat;
    }

    match check_wave_clear(state) {
        WaveProgress::Checkpoint(checkpoint) => TickOutcome::Checkpoint(checkpoint),
        WaveProgress::Advanced { wave } => {
            log::info!("Wave {} begins", wave);
            TickOutcome::Continue
        }
        WaveProgress::InProgress | WaveProgress::Final => TickOutcome::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::consts::SIM_DT;
    use crate::sim::rect::Rect;
    use crate::sim::state::{Difficulty, EnemyRole};
    use crate::sim::wave::reset_enemies;
    use proptest::prelude::*;

    fn park_enemies_away(state: &mut RunState) {
        // Far from the submarine and from each other's bullets
        for (i, enemy) in state.enemies.iter_mut().filter(|e| e.active).enumerate() {
            enemy.rect = Rect::new(10.0 + 70.0 * (i % 8) as f32, 60.0, 64.0, 64.0);
            enemy.role = EnemyRole::Normal;
        }
    }

    #[test]
    fn test_tick_accumulates_time() {
        let mut state = RunState::new(GameConfig::default(), Difficulty::Easy, 5);
        park_enemies_away(&mut state);
        for _ in 0..60 {
            assert_eq!(tick(&mut state, &TickInput::default(), SIM_DT), TickOutcome::Continue);
        }
        assert_eq!(state.time_ticks, 60);
        assert!((state.elapsed - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_per_tick_overlay_sets_enemy_speed() {
        let mut state = RunState::new(GameConfig::default(), Difficulty::Hard, 5);
        park_enemies_away(&mut state);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.enemies[..5].iter().all(|e| e.speed == 3 && e.max_health == 3));
    }

    #[test]
    fn test_kill_in_same_tick_as_fire() {
        let mut state = RunState::new(GameConfig::default(), Difficulty::Easy, 5);
        park_enemies_away(&mut state);
        // Put an enemy right above the muzzle
        let muzzle = state.submarine.muzzle(5.0);
        state.enemies[0].rect = Rect::new(muzzle.x - 30.0, muzzle.y - 60.0, 64.0, 64.0);
        state.enemies[0].direction = -1;

        let input = TickInput {
            fire_light: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(!state.enemies[0].active);
        assert!(!state.bullets.slots[0].active);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_clearing_wave_one_advances() {
        let mut state = RunState::new(GameConfig::default(), Difficulty::Easy, 5);
        state.enemies.iter_mut().for_each(|e| e.active = false);
        assert_eq!(tick(&mut state, &TickInput::default(), SIM_DT), TickOutcome::Continue);
        assert_eq!(state.wave, 2);
        assert_eq!(state.active_enemy_count(), 10);
    }

    #[test]
    fn test_clearing_wave_two_hits_checkpoint() {
        let mut state = RunState::new(GameConfig::default(), Difficulty::Easy, 5);
        state.wave = 2;
        reset_enemies(&mut state);
        state.enemies.iter_mut().for_each(|e| e.active = false);
        assert_eq!(
            tick(&mut state, &TickInput::default(), SIM_DT),
            TickOutcome::Checkpoint(Checkpoint::First)
        );
    }

    #[test]
    fn test_death_ends_run() {
        let mut state = RunState::new(GameConfig::default(), Difficulty::Easy, 5);
        park_enemies_away(&mut state);
        state.submarine.health = 10;
        let hitbox = state.submarine.hitbox;
        state
            .enemy_bullets
            .spawn(Rect::new(hitbox.left() + 20.0, hitbox.top() + 20.0, 5.0, 10.0));
        assert_eq!(tick(&mut state, &TickInput::default(), SIM_DT), TickOutcome::Defeat);
    }

    #[test]
    fn test_victory_beats_same_tick_death() {
        let mut state = RunState::new(GameConfig::default(), Difficulty::Easy, 5);
        state.wave = 5;
        reset_enemies(&mut state);
        state.enemies[0].health = 1;
        state.enemies[0].role = EnemyRole::Boss { shoot_timer: 10.0 };
        let boss_rect = state.enemies[0].rect;
        state.bullets.fire(
            Rect::new(boss_rect.center().x, boss_rect.center().y, 5.0, 10.0),
            crate::sim::state::ShotKind::Light,
        );
        state.submarine.health = 10;
        let hitbox = state.submarine.hitbox;
        state
            .enemy_bullets
            .spawn(Rect::new(hitbox.left() + 20.0, hitbox.top() + 20.0, 5.0, 10.0));

        assert_eq!(tick(&mut state, &TickInput::default(), SIM_DT), TickOutcome::Victory);
        assert_eq!(state.submarine.health, 0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = RunState::new(GameConfig::default(), Difficulty::Medium, 99999);
        let mut state2 = RunState::new(GameConfig::default(), Difficulty::Medium, 99999);

        let inputs = [
            TickInput {
                left: true,
                fire_light: true,
                ..Default::default()
            },
            TickInput {
                up: true,
                boost: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                fire_heavy: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input, SIM_DT);
                tick(&mut state2, input, SIM_DT);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.submarine.health, state2.submarine.health);
        assert_eq!(state1.submarine.body, state2.submarine.body);
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.rect, b.rect);
            assert_eq!(a.active, b.active);
        }
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<[bool; 7]>()).prop_map(|b| TickInput {
            up: b[0],
            down: b[1],
            left: b[2],
            right: b[3],
            boost: b[4],
            fire_light: b[5],
            fire_heavy: b[6],
            pause: false,
        })
    }

    proptest! {
        #[test]
        fn prop_submarine_invariants_hold(
            seed in any::<u64>(),
            wave in 1u32..=5,
            inputs in prop::collection::vec(arb_input(), 1..300),
        ) {
            let mut state = RunState::new(GameConfig::default(), Difficulty::Hard, seed);
            state.wave = wave;
            reset_enemies(&mut state);
            for input in &inputs {
                let outcome = tick(&mut state, input, SIM_DT);
                let sub = &state.submarine;
                prop_assert!(sub.health >= 0 && sub.health <= sub.max_health);
                prop_assert!(sub.energy >= 0.0 && sub.energy <= 100.0);
                prop_assert!(sub.body.is_inside(600.0, 800.0));
                if outcome != TickOutcome::Continue {
                    break;
                }
            }
        }

        #[test]
        fn prop_bullets_only_appear_when_fired(
            seed in any::<u64>(),
            inputs in prop::collection::vec(arb_input(), 1..120),
        ) {
            let mut state = RunState::new(GameConfig::default(), Difficulty::Easy, seed);
            for input in &inputs {
                let before: Vec<bool> = state.bullets.slots.iter().map(|b| b.active).collect();
                let outcome = tick(&mut state, input, SIM_DT);
                let newly_active = state
                    .bullets
                    .slots
                    .iter()
                    .zip(&before)
                    .filter(|(b, was)| b.active && !**was)
                    .count();
                let fired = (input.fire_light as usize) + (input.fire_heavy as usize);
                prop_assert!(newly_active <= fired);
                if outcome != TickOutcome::Continue {
                    break;
                }
            }
        }
    }
}
