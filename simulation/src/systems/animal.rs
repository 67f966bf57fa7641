//! Animal actor
//!
//! Each step looks at the kind of site the animal stands on:
//! NESTING breeds, FEEDING may wander off, WINTERING may migrate or kill.
//! A parent that has bred waits, without blocking a thread, until its
//! newborn's actor finishes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use tracing::trace;

use super::{birth, death, Actor, Step};
use crate::clock::ShutdownToken;
use crate::components::{AnimalId, Location, SiteKind, Status};
use crate::world::Habitat;

/// Chance per step that a feeding animal moves on
const FEEDING_DEPARTURE_RATE: f64 = 0.2;

/// Settles once the owning actor is dropped.
#[derive(Debug, Clone, Default)]
pub struct Lineage(Arc<AtomicBool>);

impl Lineage {
    pub fn is_settled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn settle(&self) {
        self.0.store(true, Ordering::Release);
    }
}

#[derive(Debug)]
enum Phase {
    Roaming,
    /// Parked until the newborn's actor finishes
    Nesting { child: Lineage },
}

#[derive(Debug)]
pub struct AnimalActor {
    id: AnimalId,
    token: ShutdownToken,
    phase: Phase,
    lineage: Lineage,
}

impl AnimalActor {
    pub fn new(id: AnimalId, token: ShutdownToken) -> Self {
        Self {
            id,
            token,
            phase: Phase::Roaming,
            lineage: Lineage::default(),
        }
    }

    pub fn lineage(&self) -> Lineage {
        self.lineage.clone()
    }

    pub fn is_nesting(&self) -> bool {
        matches!(self.phase, Phase::Nesting { .. })
    }

    pub fn step<R: Rng + ?Sized>(&mut self, habitat: &Habitat, rng: &mut R) -> Step {
        let status = habitat.arena.status(self.id);
        if habitat.exit_policy.should_exit(status, self.token.is_expired()) {
            if status == Status::Dead {
                habitat.arena.release(self.id);
            }
            return Step::Finished;
        }
        if status == Status::Dead {
            return Step::Continue;
        }

        if let Phase::Nesting { child } = &self.phase {
            if !child.is_settled() {
                return Step::Continue;
            }
            self.phase = Phase::Roaming;
        }

        let Some(here) = habitat.arena.location_of(self.id.0) else {
            return Step::Finished;
        };

        match habitat.grid.site(here).kind() {
            SiteKind::Nesting => match birth::nest(habitat, self.id, here, rng) {
                Some(offspring) => {
                    trace!(
                        parent = self.id.index(),
                        child = offspring.id.index(),
                        to = ?offspring.destination,
                        "parked on newborn"
                    );
                    let child = AnimalActor::new(offspring.id, self.token.clone());
                    self.phase = Phase::Nesting {
                        child: child.lineage(),
                    };
                    Step::Spawned(Actor::Animal(child))
                }
                None => Step::Continue,
            },
            SiteKind::Feeding => {
                if let Some(to) = forage(habitat, self.id, here, rng) {
                    trace!(animal = self.id.index(), from = ?here, ?to, "left feeding site");
                }
                Step::Continue
            }
            SiteKind::Wintering => {
                death::winter(habitat, self.id, here, rng);
                Step::Continue
            }
        }
    }
}

impl Drop for AnimalActor {
    fn drop(&mut self) {
        self.lineage.settle();
    }
}

/// Occasionally leave a feeding site for a random cell.
/// Returns the new location, if the animal moved.
fn forage<R: Rng + ?Sized>(
    habitat: &Habitat,
    id: AnimalId,
    here: Location,
    rng: &mut R,
) -> Option<Location> {
    if rng.gen::<f64>() > FEEDING_DEPARTURE_RATE {
        return None;
    }
    // Not listed any more means a hunter got here first.
    if !habitat.grid.site(here).lock().evict(id) {
        return None;
    }
    Some(habitat.grid.teleport(&habitat.arena, id, rng))
}
