//! Hunter actor
//!
//! Every step a hunter kills everything at its site, leaves, and teleports
//! to a random cell. Hunters never die; they stop at the deadline.

use rand::Rng;
use tracing::debug;

use super::Step;
use crate::clock::ShutdownToken;
use crate::components::{HunterId, Location};
use crate::world::Habitat;

#[derive(Debug)]
pub struct HunterActor {
    id: HunterId,
    token: ShutdownToken,
}

impl HunterActor {
    pub fn new(id: HunterId, token: ShutdownToken) -> Self {
        Self { id, token }
    }

    pub fn step<R: Rng + ?Sized>(&mut self, habitat: &Habitat, rng: &mut R) -> Step {
        if self.token.is_expired() {
            return Step::Finished;
        }
        let Some(here) = habitat.arena.location_of(self.id.0) else {
            return Step::Finished;
        };

        hunt(habitat, self.id, here);
        habitat.grid.teleport(&habitat.arena, self.id, rng);
        Step::Continue
    }
}

/// Kill every animal listed at `here`, credit the hunter, and take the
/// hunter off the site. Returns the number of kills.
pub fn hunt(habitat: &Habitat, hunter: HunterId, here: Location) -> u64 {
    let mut occupants = habitat.grid.site(here).lock();

    let victims = occupants.take_animals();
    let kills = victims.len() as u64;
    if kills > 0 {
        habitat.arena.mark_dead(&victims);
        let points = habitat.arena.add_points(hunter, kills);
        debug!(hunter = hunter.index(), at = ?here, kills, points, "kill sweep");
    }

    occupants.evict(hunter);
    kills
}
