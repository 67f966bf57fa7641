//! Run configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::{AnimalKind, Status};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("tick delay must be at least 1ms")]
    ZeroTick,
    #[error("duration {duration_ms}ms is shorter than one {tick_ms}ms tick")]
    DurationBelowTick { duration_ms: u64, tick_ms: u64 },
    #[error("actor pool needs at least one worker")]
    NoWorkers,
}

/// How actors are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// Bounded worker pool against the wall clock.
    Pool { workers: usize },
    /// Single thread, round-robin, virtual clock. Reproducible with a seed.
    Stepped,
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule::Pool { workers: 4 }
    }
}

/// When an animal actor stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitPolicy {
    /// Stop on death or at the deadline, whichever comes first.
    #[default]
    Prompt,
    /// A dead animal keeps its scheduling slot, idling, until the deadline.
    Linger,
}

impl ExitPolicy {
    pub fn should_exit(self, status: Status, expired: bool) -> bool {
        match self {
            ExitPolicy::Prompt => expired || status == Status::Dead,
            ExitPolicy::Linger => expired,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Rows (x length)
    pub width: usize,
    /// Columns (y length)
    pub height: usize,
    pub hunters: usize,
    /// One seed animal per entry
    pub animals: Vec<AnimalKind>,
    pub duration_ms: u64,
    pub tick_ms: u64,
    pub seed: Option<u64>,
    pub schedule: Schedule,
    pub exit_policy: ExitPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            hunters: 2,
            animals: AnimalKind::ALL.to_vec(),
            duration_ms: 1000,
            tick_ms: 1,
            seed: None,
            schedule: Schedule::default(),
            exit_policy: ExitPolicy::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.duration_ms < self.tick_ms {
            return Err(ConfigError::DurationBelowTick {
                duration_ms: self.duration_ms,
                tick_ms: self.tick_ms,
            });
        }
        if let Schedule::Pool { workers: 0 } = self.schedule {
            return Err(ConfigError::NoWorkers);
        }
        Ok(())
    }

    /// Length of the run in scheduler ticks.
    pub fn ticks(&self) -> u64 {
        self.duration_ms / self.tick_ms.max(1)
    }
}
