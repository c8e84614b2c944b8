//! Top-level screen state machine
//!
//! Owns the run state, the settings and the best-times store. A frontend calls
//! [`RunController::frame`] once per displayed frame with the player's intent and
//! renders whatever [`Screen`] comes back.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::best_times::{BestTimes, BestTimesStore};
use crate::settings::Settings;
use crate::sim::{
    BuffChoice, Checkpoint, Difficulty, RunState, TickInput, TickOutcome, resume_after_checkpoint,
    tick,
};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Menu,
    Options,
    LevelSelect,
    Playing,
    Paused,
    BuffSelection(Checkpoint),
    Victory,
    GameOver,
    /// Terminal
    Exit,
}

/// Discrete menu actions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MenuCommand {
    Confirm,
    Cancel,
    OpenOptions,
    SelectDifficulty(Difficulty),
    ChooseBuff(BuffChoice),
    SetVolume(f32),
}

/// Everything the player asked for this frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunInput {
    pub controls: TickInput,
    pub command: Option<MenuCommand>,
}

impl RunInput {
    pub fn command(command: MenuCommand) -> Self {
        Self {
            controls: TickInput::default(),
            command: Some(command),
        }
    }

    pub fn controls(controls: TickInput) -> Self {
        Self {
            controls,
            command: None,
        }
    }
}

pub struct RunController<S: BestTimesStore> {
    screen: Screen,
    settings: Settings,
    /// Where Options changes are written back, if anywhere
    settings_path: Option<PathBuf>,
    settings_dirty: bool,
    store: S,
    best: BestTimes,
    state: RunState,
    base_seed: u64,
    runs_started: u64,
}

impl<S: BestTimesStore> RunController<S> {
    /// Start at the main menu. Best times are read once here.
    pub fn new(settings: Settings, mut store: S) -> Self {
        let best = store.load().unwrap_or_else(|e| {
            log::error!("{e}; starting with no best times");
            BestTimes::default()
        });
        let base_seed = settings.seed.unwrap_or_else(rand::random);
        let state = RunState::new(settings.game.clone(), Difficulty::default(), base_seed);
        Self {
            screen: Screen::Menu,
            settings,
            settings_path: None,
            settings_dirty: false,
            store,
            best,
            state,
            base_seed,
            runs_started: 0,
        }
    }

    /// Save settings to `path` whenever the Options screen is left after a change
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Direct access to the run, for debug tooling
    pub fn state_mut(&mut self) -> &mut RunState {
        &mut self.state
    }

    pub fn best_times(&self) -> &BestTimes {
        &self.best
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Advance one frame and return the screen to show
    pub fn frame(&mut self, input: &RunInput, dt: f32) -> Screen {
        let command = input.command;
        let next = match self.screen {
            Screen::Menu => match command {
                Some(MenuCommand::Confirm) => Screen::LevelSelect,
                Some(MenuCommand::OpenOptions) => Screen::Options,
                Some(MenuCommand::Cancel) => Screen::Exit,
                _ => Screen::Menu,
            },
            Screen::Options => match command {
                Some(MenuCommand::SetVolume(volume)) => {
                    self.settings.set_volume(volume);
                    self.settings_dirty = true;
                    log::info!("Music volume set to {:.2}", self.settings.music_volume);
                    Screen::Options
                }
                Some(MenuCommand::Cancel | MenuCommand::Confirm) => {
                    self.save_settings();
                    Screen::Menu
                }
                _ => Screen::Options,
            },
            Screen::LevelSelect => match command {
                Some(MenuCommand::SelectDifficulty(difficulty)) => {
                    self.start_run(difficulty);
                    Screen::Playing
                }
                Some(MenuCommand::Cancel) => Screen::Menu,
                _ => Screen::LevelSelect,
            },
            Screen::Playing => {
                if input.controls.pause {
                    Screen::Paused
                } else {
                    self.play(&input.controls, dt)
                }
            }
            Screen::Paused => match command {
                _ if input.controls.pause => Screen::Playing,
                Some(MenuCommand::Confirm) => Screen::Playing,
                Some(MenuCommand::Cancel) => {
                    log::info!("Run abandoned on wave {}", self.state.wave);
                    Screen::LevelSelect
                }
                _ => Screen::Paused,
            },
            Screen::BuffSelection(checkpoint) => match command {
                Some(MenuCommand::ChooseBuff(choice)) if checkpoint.offers_choice(choice) => {
                    self.state.apply_buff(choice);
                    resume_after_checkpoint(&mut self.state);
                    Screen::Playing
                }
                Some(MenuCommand::ChooseBuff(choice)) => {
                    log::debug!("{:?} is not offered at {:?}", choice, checkpoint);
                    self.screen
                }
                _ => self.screen,
            },
            Screen::Victory => match command {
                Some(MenuCommand::Confirm) => {
                    self.persist();
                    self.reset();
                    Screen::LevelSelect
                }
                Some(MenuCommand::Cancel) => Screen::Exit,
                _ => Screen::Victory,
            },
            Screen::GameOver => match command {
                Some(MenuCommand::Confirm) => {
                    self.reset();
                    Screen::LevelSelect
                }
                Some(MenuCommand::Cancel) => Screen::Exit,
                _ => Screen::GameOver,
            },
            Screen::Exit => Screen::Exit,
        };

        if next != self.screen {
            log::debug!("Screen {:?} -> {:?}", self.screen, next);
        }
        self.screen = next;
        next
    }

    fn play(&mut self, controls: &TickInput, dt: f32) -> Screen {
        match tick(&mut self.state, controls, dt) {
            TickOutcome::Continue => Screen::Playing,
            TickOutcome::Checkpoint(checkpoint) => {
                log::info!("Wave {} cleared, choose a buff", self.state.wave);
                Screen::BuffSelection(checkpoint)
            }
            TickOutcome::Defeat => Screen::GameOver,
            TickOutcome::Victory => {
                self.enter_victory();
                Screen::Victory
            }
        }
    }

    fn enter_victory(&mut self) {
        let difficulty = self.state.difficulty;
        let elapsed = self.state.elapsed;
        log::info!(
            "Victory on {} in {:.2}s, score {}",
            difficulty.as_str(),
            elapsed,
            self.state.score
        );
        if self.best.record(difficulty, elapsed) {
            log::info!("New best time for {}", difficulty.as_str());
            self.persist();
        }
    }

    /// Write all three records; a failure keeps the in-memory values
    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.best) {
            log::error!("{e}");
        }
    }

    fn save_settings(&mut self) {
        if !self.settings_dirty {
            return;
        }
        self.settings_dirty = false;
        if let Some(path) = &self.settings_path {
            if let Err(e) = self.settings.save(path) {
                log::error!("{e}");
            }
        }
    }

    fn start_run(&mut self, difficulty: Difficulty) {
        let seed = self.base_seed.wrapping_add(self.runs_started);
        self.runs_started += 1;
        self.state = RunState::new(self.settings.game.clone(), difficulty, seed);
        log::info!(
            "Run {} started on {} (seed {})",
            self.runs_started,
            difficulty.as_str(),
            seed
        );
    }

    fn reset(&mut self) {
        self.state = RunState::new(
            self.settings.game.clone(),
            self.state.difficulty,
            self.state.seed,
        );
    }
}
