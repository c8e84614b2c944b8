//! Full run scenarios driven through the controller

use submarine_strike::consts::SIM_DT;
use submarine_strike::sim::{
    BuffChoice, Checkpoint, Difficulty, Rect, ShotKind, autopilot_input, reset_enemies,
};
use submarine_strike::{
    BestTimesStore, FileStore, MemoryStore, MenuCommand, RunController, RunInput, Screen, Settings,
};

fn seeded_settings(seed: u64) -> Settings {
    Settings {
        seed: Some(seed),
        ..Default::default()
    }
}

fn start<S: BestTimesStore>(ctl: &mut RunController<S>, difficulty: Difficulty) {
    ctl.frame(&RunInput::command(MenuCommand::Confirm), SIM_DT);
    let screen = ctl.frame(
        &RunInput::command(MenuCommand::SelectDifficulty(difficulty)),
        SIM_DT,
    );
    assert_eq!(screen, Screen::Playing);
}

fn clear_wave<S: BestTimesStore>(ctl: &mut RunController<S>) -> Screen {
    ctl.state_mut()
        .enemies
        .iter_mut()
        .for_each(|e| e.active = false);
    ctl.frame(&RunInput::default(), SIM_DT)
}

#[test]
fn walk_every_wave_to_victory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lowestTime.txt");
    let mut ctl = RunController::new(seeded_settings(21), FileStore::new(&path));
    start(&mut ctl, Difficulty::Easy);

    assert_eq!(clear_wave(&mut ctl), Screen::Playing);
    assert_eq!(ctl.state().wave, 2);
    assert_eq!(ctl.state().submarine.speed, 201);

    assert_eq!(clear_wave(&mut ctl), Screen::BuffSelection(Checkpoint::First));
    let screen = ctl.frame(
        &RunInput::command(MenuCommand::ChooseBuff(BuffChoice::UnlimitedSpecial)),
        SIM_DT,
    );
    assert_eq!(screen, Screen::Playing);
    assert_eq!(ctl.state().wave, 3);
    assert!(ctl.state().buffs.unlimited_special);

    assert_eq!(clear_wave(&mut ctl), Screen::Playing);
    assert_eq!(ctl.state().wave, 4);
    assert_eq!(ctl.state().active_enemy_count(), 20);

    assert_eq!(clear_wave(&mut ctl), Screen::BuffSelection(Checkpoint::Second));
    ctl.state_mut().submarine.health = 40;
    ctl.frame(
        &RunInput::command(MenuCommand::ChooseBuff(BuffChoice::FullHeal)),
        SIM_DT,
    );
    assert_eq!(ctl.state().wave, 5);
    assert_eq!(ctl.state().submarine.health, 100);
    assert!(ctl.state().enemies[0].role.is_boss());
    // Checkpoints do not speed the submarine up
    assert_eq!(ctl.state().submarine.speed, 202);

    let state = ctl.state_mut();
    state.enemies[0].health = 1;
    let center = state.enemies[0].rect.center();
    state
        .bullets
        .fire(Rect::new(center.x, center.y, 5.0, 10.0), ShotKind::Light);
    assert_eq!(ctl.frame(&RunInput::default(), SIM_DT), Screen::Victory);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Easy: "));
    assert_eq!(text.lines().count(), 3);

    // A second controller reads the record back
    let elapsed = ctl.state().elapsed;
    let again = RunController::new(seeded_settings(21), FileStore::new(&path));
    let stored = again.best_times().get(Difficulty::Easy);
    assert!((stored - elapsed).abs() < 0.01);
}

#[test]
fn same_seed_same_run() {
    fn play(seed: u64) -> (u32, u32, i32, u64) {
        let mut ctl = RunController::new(seeded_settings(seed), MemoryStore::default());
        start(&mut ctl, Difficulty::Medium);
        let mut frame = 0;
        while ctl.screen() == Screen::Playing && frame < 3_000 {
            let input = autopilot_input(ctl.state(), frame);
            ctl.frame(&RunInput::controls(input), SIM_DT);
            frame += 1;
        }
        let state = ctl.state();
        (state.wave, state.score, state.submarine.health, state.time_ticks)
    }

    assert_eq!(play(77), play(77));
}

#[test]
fn autopilot_makes_progress() {
    let mut ctl = RunController::new(seeded_settings(5), MemoryStore::default());
    start(&mut ctl, Difficulty::Easy);
    let mut frame = 0;
    while ctl.screen() == Screen::Playing && frame < 6_000 {
        let input = autopilot_input(ctl.state(), frame);
        ctl.frame(&RunInput::controls(input), SIM_DT);
        frame += 1;
    }
    assert!(ctl.state().score > 0);
}

#[test]
fn abandoned_run_restarts_clean() {
    let mut ctl = RunController::new(seeded_settings(8), MemoryStore::default());
    start(&mut ctl, Difficulty::Hard);
    for _ in 0..30 {
        ctl.frame(&RunInput::default(), SIM_DT);
    }
    ctl.state_mut().buffs.lifesteal = true;

    let pause = RunInput::controls(submarine_strike::sim::TickInput {
        pause: true,
        ..Default::default()
    });
    assert_eq!(ctl.frame(&pause, SIM_DT), Screen::Paused);
    assert_eq!(
        ctl.frame(&RunInput::command(MenuCommand::Cancel), SIM_DT),
        Screen::LevelSelect
    );
    ctl.frame(
        &RunInput::command(MenuCommand::SelectDifficulty(Difficulty::Easy)),
        SIM_DT,
    );

    let state = ctl.state();
    assert_eq!(state.difficulty, Difficulty::Easy);
    assert_eq!(state.elapsed, 0.0);
    assert_eq!(state.time_ticks, 0);
    assert!(!state.buffs.lifesteal);
    assert_eq!(state.bullets.active_count(), 0);
    assert_eq!(state.enemy_bullets.active_count(), 0);
}

#[test]
fn boss_wave_spawn_from_reset() {
    let mut ctl = RunController::new(seeded_settings(3), MemoryStore::default());
    start(&mut ctl, Difficulty::Easy);
    let state = ctl.state_mut();
    state.wave = 5;
    reset_enemies(state);
    assert_eq!(state.live_enemy_count(), 1);
    assert_eq!(state.active_enemy_count(), 1);
    assert_eq!(state.enemies[0].rect, Rect::new(200.0, 50.0, 200.0, 200.0));
}
