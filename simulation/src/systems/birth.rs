//! Birth System
//!
//! Nesting: a newborn of the parent's kind appears at the parent's site,
//! then is teleported to a random cell.

use rand::Rng;
use tracing::debug;

use crate::components::{AnimalId, Location};
use crate::world::Habitat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offspring {
    pub id: AnimalId,
    /// None when a hunter swept the newborn before it could leave
    pub destination: Option<Location>,
}

/// Breed `parent` at `here`. Returns None when the parent is no longer
/// listed at its site (a hunter swept it).
pub fn nest<R: Rng + ?Sized>(
    habitat: &Habitat,
    parent: AnimalId,
    here: Location,
    rng: &mut R,
) -> Option<Offspring> {
    let kind = habitat.arena.animal_kind(parent)?;
    let site = habitat.grid.site(here);

    let child = {
        let mut occupants = site.lock();
        if !occupants.contains(parent) {
            return None;
        }
        let child = habitat.arena.spawn_animal(kind, here);
        occupants.admit(child);
        child
    };

    let destination = if site.lock().evict(child) {
        Some(habitat.grid.teleport(&habitat.arena, child, rng))
    } else {
        None
    };

    debug!(
        parent = parent.index(),
        child = child.index(),
        ?kind,
        birthplace = ?here,
        ?destination,
        "animal born"
    );

    Some(Offspring {
        id: child,
        destination,
    })
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
    fn test_newborn_inherits_kind() {
        let habitat = Habitat::new(Grid::from_fn(4, 4, |_| SiteKind::Nesting), ExitPolicy::Prompt);
        let here = Location::new(2, 3);
        let parent = habitat.arena.spawn_animal(AnimalKind::Panda, here);
        habitat.grid.place(&habitat.arena, parent, here);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let offspring = nest(&habitat, parent, here, &mut rng).unwrap();

        assert_eq!(habitat.arena.animal_kind(offspring.id), Some(AnimalKind::Panda));
        assert_eq!(habitat.arena.status(offspring.id), Status::Alive);

        let destination = offspring.destination.unwrap();
        assert!(habitat.grid.contains(destination));
        assert_eq!(habitat.arena.location_of(offspring.id.0), Some(destination));

        // Listed exactly once, at its destination
        assert_eq!(habitat.grid.census(), (2, 0));
        assert!(habitat.grid.site(destination).lock().contains(offspring.id));
    }

    #[test]
    fn test_newborn_starts_beside_parent() {
        let habitat = Habitat::new(Grid::from_fn(1, 1, |_| SiteKind::Nesting), ExitPolicy::Prompt);
        let here = Location::default();
        let parent = habitat.arena.spawn_animal(AnimalKind::Bird, here);
        habitat.grid.place(&habitat.arena, parent, here);
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let offspring = nest(&habitat, parent, here, &mut rng).unwrap();

        // One cell: the relocation lands back where it was born
        assert_eq!(offspring.destination, Some(here));
        let site = habitat.grid.site(here).lock();
        assert_eq!(site.animals().len(), 2);
        assert!(site.contains(parent));
        assert!(site.contains(offspring.id));
    }

    #[test]
    fn test_swept_parent_does_not_breed() {
        let habitat = Habitat::new(Grid::from_fn(1, 1, |_| SiteKind::Nesting), ExitPolicy::Prompt);
        let here = Location::default();
        let parent = habitat.arena.spawn_animal(AnimalKind::Bear, here);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        assert_eq!(nest(&habitat, parent, here, &mut rng), None);
        assert_eq!(habitat.arena.len(), 1);
    }
}
