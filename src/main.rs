//! Submarine Strike headless entry point
//!
//! Plays one run with the autopilot and logs the outcome. The first argument picks the
//! difficulty (`easy`, `medium` or `hard`). Set `RUST_LOG=info` to follow along.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::{Parser, ValueEnum};
    use serde::Serialize;

    use submarine_strike::consts::SIM_DT;
    use submarine_strike::settings::SETTINGS_FILE;
    use submarine_strike::sim::{BuffChoice, Checkpoint, Difficulty, autopilot_input};
    use submarine_strike::{FileStore, MenuCommand, RunController, RunInput, Screen, Settings};

    #[derive(Parser, Debug)]
    #[command(name = "submarine-strike")]
    #[command(about = "Play one Submarine Strike run with the autopilot and report the outcome")]
    struct Cli {
        /// Difficulty tier
        #[arg(value_enum, default_value_t = CliDifficulty::Easy)]
        difficulty: CliDifficulty,
        /// Override the RNG seed from the settings file
        #[arg(long)]
        seed: Option<u64>,
        /// Settings file
        #[arg(long, default_value = SETTINGS_FILE)]
        settings: PathBuf,
        /// Give up after this many frames (default: ten simulated minutes)
        #[arg(long, default_value_t = 60 * 60 * 10)]
        max_frames: u64,
    }

    #[derive(Clone, Copy, Debug, ValueEnum)]
    enum CliDifficulty {
        Easy,
        Medium,
        Hard,
    }

    impl From<CliDifficulty> for Difficulty {
        fn from(value: CliDifficulty) -> Self {
            match value {
                CliDifficulty::Easy => Difficulty::Easy,
                CliDifficulty::Medium => Difficulty::Medium,
                CliDifficulty::Hard => Difficulty::Hard,
            }
        }
    }

    #[derive(Debug, Serialize)]
    struct RunSummary {
        outcome: Screen,
        difficulty: Difficulty,
        wave: u32,
        score: u32,
        elapsed: f32,
        best_time: Option<f32>,
        frames: u64,
    }

    pub fn run() {
        let Cli {
            difficulty,
            seed,
            settings: settings_path,
            max_frames,
        } = Cli::parse();
        let difficulty = Difficulty::from(difficulty);

        let mut settings = Settings::load_or_default(&settings_path);
        if seed.is_some() {
            settings.seed = seed;
        }
        let store = FileStore::new(&settings.best_times_path);
        let mut controller = RunController::new(settings, store).with_settings_path(settings_path);

        controller.frame(&RunInput::command(MenuCommand::Confirm), SIM_DT);
        controller.frame(
            &RunInput::command(MenuCommand::SelectDifficulty(difficulty)),
            SIM_DT,
        );

        let mut frames = 0;
        while frames < max_frames {
            let input = match controller.screen() {
                Screen::Playing => RunInput::controls(autopilot_input(controller.state(), frames)),
                Screen::BuffSelection(checkpoint) => RunInput::command(MenuCommand::ChooseBuff(
                    pick_buff(checkpoint, controller.state().submarine.health),
                )),
                _ => break,
            };
            controller.frame(&input, SIM_DT);
            frames += 1;
        }

        let state = controller.state();
        let summary = RunSummary {
            outcome: controller.screen(),
            difficulty,
            wave: state.wave,
            score: state.score,
            elapsed: state.elapsed,
            best_time: controller
                .best_times()
                .is_set(difficulty)
                .then(|| controller.best_times().get(difficulty)),
            frames,
        };
        match serde_json::to_string(&summary) {
            Ok(json) => log::info!("Run finished: {json}"),
            Err(e) => log::error!("Could not encode run summary: {e}"),
        }

        // Hand the victory screen back to level select so the record is written again
        if controller.screen() == Screen::Victory {
            controller.frame(&RunInput::command(MenuCommand::Confirm), SIM_DT);
        }
    }

    /// Lifesteal early; before the boss, heal if hurt
    fn pick_buff(checkpoint: Checkpoint, health: i32) -> BuffChoice {
        let [first, second] = checkpoint.offers();
        match checkpoint {
            Checkpoint::First => first,
            Checkpoint::Second if health < 60 => second,
            Checkpoint::Second => first,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Submarine Strike (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Frontends drive RunController directly
}
