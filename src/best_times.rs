//! Fastest clear time per difficulty
//!
//! Stored as three `"<Name>: <seconds>"` lines in a fixed order (Easy, Medium, Hard).
//! Lower is better; an unset record holds `f32::MAX`.

use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::sim::Difficulty;

/// Best times, indexed by [`Difficulty::index`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestTimes {
    pub times: [f32; 3],
}

impl Default for BestTimes {
    fn default() -> Self {
        Self {
            times: [Self::UNSET; 3],
        }
    }
}

impl BestTimes {
    /// Sentinel for a difficulty that has never been won
    pub const UNSET: f32 = f32::MAX;

    pub fn get(&self, difficulty: Difficulty) -> f32 {
        self.times[difficulty.index()]
    }

    pub fn is_set(&self, difficulty: Difficulty) -> bool {
        self.get(difficulty) < Self::UNSET
    }

    /// Store `elapsed` if it beats the current record. Returns true on improvement.
    pub fn record(&mut self, difficulty: Difficulty, elapsed: f32) -> bool {
        let slot = &mut self.times[difficulty.index()];
        if elapsed < *slot {
            *slot = elapsed;
            true
        } else {
            false
        }
    }

    /// Parse the line format. Missing or malformed entries stay unset.
    pub fn parse(text: &str) -> Self {
        let mut best = Self::default();
        for line in text.lines() {
            let Some((name, value)) = line.split_once(':') else {
                continue;
            };
            let Some(difficulty) = Difficulty::ALL
                .into_iter()
                .find(|d| d.as_str() == name.trim())
            else {
                continue;
            };
            match value.trim().parse::<f32>() {
                Ok(v) if v.is_finite() && v >= 0.0 => best.times[difficulty.index()] = v,
                _ => log::warn!("Ignoring malformed best time for {}: {:?}", name.trim(), value),
            }
        }
        best
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for difficulty in Difficulty::ALL {
            let _ = writeln!(out, "{}: {:.2}", difficulty.as_str(), self.get(difficulty));
        }
        out
    }
}

/// Where best times are kept
pub trait BestTimesStore {
    fn load(&mut self) -> Result<BestTimes, PersistenceError>;
    /// Overwrite all three records
    fn save(&mut self, times: &BestTimes) -> Result<(), PersistenceError>;
}

/// Line-oriented text file
#[derive(Debug, Clone)]
pub struct FileStore {
    pub path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl BestTimesStore for FileStore {
    fn load(&mut self) -> Result<BestTimes, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                log::info!("Loaded best times from {}", self.path.display());
                Ok(BestTimes::parse(&text))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No best times at {}, starting fresh", self.path.display());
                Ok(BestTimes::default())
            }
            Err(source) => Err(PersistenceError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&mut self, times: &BestTimes) -> Result<(), PersistenceError> {
        fs::write(&self.path, times.to_text()).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })?;
        log::info!("Best times saved to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store for tests and frontends without a filesystem
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub times: BestTimes,
    /// Successful saves so far
    pub saves: usize,
    /// Make every save fail
    pub fail_writes: bool,
}

impl BestTimesStore for MemoryStore {
    fn load(&mut self) -> Result<BestTimes, PersistenceError> {
        Ok(self.times)
    }

    fn save(&mut self, times: &BestTimes) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::Write {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::other("writes disabled"),
            });
        }
        self.times = *times;
        self.saves += 1;
        Ok(())
    }
}
