//! Death System
//!
//! Wintering: an animal either migrates to a random cell or dies where it
//! stands. The removal happens under the site's own lock, the same lock
//! hunters sweep under.

use rand::Rng;
use tracing::debug;

use crate::components::{AnimalId, Location};
use crate::world::Habitat;

/// Chance per step that a wintering animal survives and migrates
const WINTER_SURVIVAL_RATE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wintering {
    Migrated(Location),
    Perished,
    /// Already swept from the site by a hunter
    Absent,
}

pub fn winter<R: Rng + ?Sized>(
    habitat: &Habitat,
    id: AnimalId,
    here: Location,
    rng: &mut R,
) -> Wintering {
    let survives = rng.gen::<f64>() <= WINTER_SURVIVAL_RATE;

    let mut occupants = habitat.grid.site(here).lock();
    if !occupants.evict(id) {
        return Wintering::Absent;
    }

    if survives {
        drop(occupants);
        Wintering::Migrated(habitat.grid.teleport(&habitat.arena, id, rng))
    } else {
        habitat.arena.mark_dead(&[id]);
        debug!(animal = id.index(), at = ?here, "animal died wintering");
        Wintering::Perished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{AnimalKind, SiteKind, Status};
    use crate::config::ExitPolicy;
    use crate::grid::Grid;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_winter_outcomes() {
        let mut migrated = 0;
        let mut perished = 0;

        for seed in 0..64 {
            let habitat =
                Habitat::new(Grid::from_fn(1, 1, |_| SiteKind::Wintering), ExitPolicy::Prompt);
            let here = Location::default();
            let id = habitat.arena.spawn_animal(AnimalKind::Bear, here);
            habitat.grid.place(&habitat.arena, id, here);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            match winter(&habitat, id, here, &mut rng) {
                Wintering::Migrated(to) => {
                    migrated += 1;
                    assert_eq!(to, here);
                    assert_eq!(habitat.arena.status(id), Status::Alive);
                    assert_eq!(habitat.grid.census(), (1, 0));
                }
                Wintering::Perished => {
                    perished += 1;
                    assert_eq!(habitat.arena.status(id), Status::Dead);
                    assert_eq!(habitat.grid.census(), (0, 0));
                }
                Wintering::Absent => panic!("animal was listed"),
            }
        }

        assert!(migrated > 0 && perished > 0, "{} migrated, {} perished", migrated, perished);
    }

    #[test]
    fn test_absent_animal_is_untouched() {
        let habitat = Habitat::new(Grid::from_fn(1, 1, |_| SiteKind::Wintering), ExitPolicy::Prompt);
        let id = habitat.arena.spawn_animal(AnimalKind::Bird, Location::default());
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        assert_eq!(winter(&habitat, id, Location::default(), &mut rng), Wintering::Absent);
        assert_eq!(habitat.arena.status(id), Status::Alive);
    }
}
