//! Demo pilot that plays the game from the state alone
//!
//! Used by the headless driver and by the long-running tests. It reads the state
//! without touching the RNG, so a seeded run stays reproducible.

use super::rect::Rect;
use super::state::RunState;
use super::update::TickInput;

/// Horizontal slack before the pilot bothers to steer
const AIM_TOLERANCE: f32 = 6.0;
/// Distance at which the pilot boosts toward its target
const BOOST_DISTANCE: f32 = 150.0;
/// How far above the hitbox an incoming shot counts as a threat
const THREAT_RANGE: f32 = 120.0;

/// Build the input for the given tick
pub fn autopilot_input(state: &RunState, tick: u64) -> TickInput {
    let mut input = TickInput::default();
    let sub = &state.submarine;
    let center_x = sub.body.center().x;

    // Dodge the closest enemy shot heading into the hitbox
    let threat = state
        .enemy_bullets
        .slots
        .iter()
        .filter(|b| b.active && is_threat(&b.rect, &sub.hitbox))
        .max_by(|a, b| {
            a.rect
                .bottom()
                .partial_cmp(&b.rect.bottom())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(bullet) = threat {
        if bullet.rect.center().x >= center_x {
            input.left = true;
        } else {
            input.right = true;
        }
        input.boost = true;
    } else if let Some(target) = nearest_target(state, center_x) {
        let dx = target - center_x;
        if dx > AIM_TOLERANCE {
            input.right = true;
        } else if dx < -AIM_TOLERANCE {
            input.left = true;
        }
        input.boost = dx.abs() > BOOST_DISTANCE;
    }

    // Keep clear of enemies drifting down toward the hull
    let crowded = state.enemies.iter().any(|e| {
        e.active
            && e.rect.bottom() > sub.hitbox.top() - 40.0
            && e.rect.right() > sub.hitbox.left()
            && e.rect.left() < sub.hitbox.right()
    });
    if crowded {
        input.down = true;
    }

    // Fire edges need a release between presses
    input.fire_light = tick % 2 == 0;
    input.fire_heavy = sub.heavy_cooldown <= 0.0 || state.buffs.unlimited_special;

    input
}

/// Center x of the enemy closest to `x`, preferring the lowest one on ties
fn nearest_target(state: &RunState, x: f32) -> Option<f32> {
    state
        .enemies
        .iter()
        .filter(|e| e.active)
        .min_by(|a, b| {
            let da = (a.rect.center().x - x).abs() - a.rect.bottom() * 0.01;
            let db = (b.rect.center().x - x).abs() - b.rect.bottom() * 0.01;
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.rect.center().x)
}

fn is_threat(shot: &Rect, hitbox: &Rect) -> bool {
    shot.bottom() <= hitbox.top()
        && hitbox.top() - shot.bottom() < THREAT_RANGE
        && shot.right() > hitbox.left() - 10.0
        && shot.left() < hitbox.right() + 10.0
}
