//! Simulation World - main orchestrator

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::arena::EntityArena;
use crate::clock::ShutdownToken;
use crate::components::*;
use crate::config::{ExitPolicy, Schedule, SimConfig};
use crate::error::SimError;
use crate::grid::Grid;
use crate::report::GridReport;
use crate::runner::{self, ActorPool, RunStats};
use crate::systems::{Actor, AnimalActor, HunterActor};

/// Shared state every actor steps against.
pub struct Habitat {
    pub grid: Grid,
    pub arena: EntityArena,
    pub exit_policy: ExitPolicy,
}

impl Habitat {
    pub fn new(grid: Grid, exit_policy: ExitPolicy) -> Self {
        Self {
            grid,
            arena: EntityArena::new(),
            exit_policy,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HunterTally {
    pub hunter: u32,
    pub points: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub stats: RunStats,
    pub hunters: Vec<HunterTally>,
    pub elapsed_ms: u64,
}

pub struct SimulationWorld {
    pub habitat: Habitat,
    pub config: SimConfig,
    rng: ChaCha8Rng,
    animals: Vec<AnimalId>,
    hunters: Vec<HunterId>,
}

impl SimulationWorld {
    /// Validate `config` and lay out the grid. Nothing is placed yet.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let grid = Grid::initialize(config.width, config.height, &mut rng);

        Ok(Self {
            habitat: Habitat::new(grid, config.exit_policy),
            config,
            rng,
            animals: Vec::new(),
            hunters: Vec::new(),
        })
    }

    /// Place the configured seed animals and hunters on random cells
    pub fn seed_population(&mut self) {
        let Habitat { grid, arena, .. } = &self.habitat;

        for kind in &self.config.animals {
            let at = grid.random_location(&mut self.rng);
            let id = arena.spawn_animal(*kind, at);
            grid.place(arena, id, at);
            debug!(animal = id.index(), ?kind, ?at, "seeded animal");
            self.animals.push(id);
        }

        for _ in 0..self.config.hunters {
            let at = grid.random_location(&mut self.rng);
            let id = arena.spawn_hunter(at);
            grid.place(arena, id, at);
            debug!(hunter = id.index(), ?at, "seeded hunter");
            self.hunters.push(id);
        }
    }

    /// Launch one actor per seeded entity and wait until every actor,
    /// newborns included, has finished.
    pub fn run(&mut self) -> Result<RunOutcome, SimError> {
        let started = Instant::now();
        let token = match self.config.schedule {
            Schedule::Stepped => ShutdownToken::stepped(self.config.ticks()),
            Schedule::Pool { .. } => {
                ShutdownToken::wall(Duration::from_millis(self.config.duration_ms))
            }
        };

        info!(
            width = self.config.width,
            height = self.config.height,
            animals = self.animals.len(),
            hunters = self.hunters.len(),
            schedule = ?self.config.schedule,
            "simulation starting"
        );

        let actors: Vec<Actor> = self
            .animals
            .iter()
            .map(|id| Actor::from(AnimalActor::new(*id, token.clone())))
            .chain(
                self.hunters
                    .iter()
                    .map(|id| Actor::from(HunterActor::new(*id, token.clone()))),
            )
            .collect();

        let stats = match self.config.schedule {
            Schedule::Stepped => runner::run_stepped(&self.habitat, &token, actors, &mut self.rng),
            Schedule::Pool { workers } => {
                let seeded: Vec<_> = actors
                    .into_iter()
                    .map(|actor| (actor, ChaCha8Rng::seed_from_u64(self.rng.gen())))
                    .collect();
                ActorPool::new(workers, Duration::from_millis(self.config.tick_ms))
                    .run(&self.habitat, seeded)?
            }
        };

        // A sweep can land after its victim's actor already stopped at the deadline
        let orphans = self.habitat.arena.release_dead();
        if orphans > 0 {
            debug!(orphans, "released dead animals left by finished actors");
        }

        let outcome = RunOutcome {
            stats,
            hunters: self.hunter_tallies(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            elapsed_ms = outcome.elapsed_ms,
            steps = outcome.stats.steps,
            births = outcome.stats.births,
            peak_actors = outcome.stats.peak_actors,
            "simulation finished"
        );
        for tally in &outcome.hunters {
            info!(hunter = tally.hunter, points = tally.points, "hunter result");
        }
        Ok(outcome)
    }

    pub fn hunter_tallies(&self) -> Vec<HunterTally> {
        self.hunters
            .iter()
            .map(|id| HunterTally {
                hunter: id.index(),
                points: self.habitat.arena.points(*id),
            })
            .collect()
    }

    pub fn report(&self) -> GridReport {
        GridReport::capture(&self.habitat)
    }

    pub fn seeded_animals(&self) -> &[AnimalId] {
        &self.animals
    }

    pub fn seeded_hunters(&self) -> &[HunterId] {
        &self.hunters
    }
}
