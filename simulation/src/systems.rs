//! Actor systems - one iteration of an animal or hunter per step
//!
//! Schedulers own the actors and call `step` once per tick; the per-tick
//! delay lives in the scheduler, not here.

pub mod animal;
pub mod birth;
pub mod death;
pub mod hunter;

pub use animal::{AnimalActor, Lineage};
pub use birth::{nest, Offspring};
pub use death::{winter, Wintering};
pub use hunter::{hunt, HunterActor};

use rand::Rng;

use crate::world::Habitat;

#[derive(Debug)]
pub enum Actor {
    Animal(AnimalActor),
    Hunter(HunterActor),
}

/// What the scheduler should do after a step.
#[derive(Debug)]
pub enum Step {
    Continue,
    /// Keep running and also schedule a newborn.
    Spawned(Actor),
    Finished,
}

impl Actor {
    pub fn step<R: Rng + ?Sized>(&mut self, habitat: &Habitat, rng: &mut R) -> Step {
        match self {
            Actor::Animal(animal) => animal.step(habitat, rng),
            Actor::Hunter(hunter) => hunter.step(habitat, rng),
        }
    }
}

impl From<AnimalActor> for Actor {
    fn from(actor: AnimalActor) -> Self {
        Actor::Animal(actor)
    }
}

impl From<HunterActor> for Actor {
    fn from(actor: HunterActor) -> Self {
        Actor::Hunter(actor)
    }
}
