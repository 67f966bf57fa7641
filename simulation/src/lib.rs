//! WildGrid Simulation Engine
//!
//! Predator/prey simulation on a grid of independently locked sites.
//! Every animal and hunter is its own actor; nesting animals breed new
//! actors while the run is under way.

pub mod arena;
pub mod clock;
pub mod components;
pub mod config;
pub mod error;
pub mod grid;
pub mod report;
pub mod runner;
pub mod systems;
pub mod world;

pub use components::*;
pub use config::{ExitPolicy, Schedule, SimConfig};
pub use error::SimError;
pub use report::GridReport;
pub use world::{Habitat, RunOutcome, SimulationWorld};
