//! Entity arena - owns every animal and hunter
//!
//! Sites and actors refer to entities by id only. Components are read under
//! the shared lock and mutated under the exclusive one. Callers may hold a
//! site lock while touching the arena, never the other way round.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use hecs::{Entity, World};

use crate::components::*;

#[derive(Default)]
pub struct EntityArena {
    world: RwLock<World>,
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, World> {
        self.world.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, World> {
        self.world.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn spawn_animal(&self, kind: AnimalKind, at: Location) -> AnimalId {
        AnimalId(self.write().spawn((Animal { kind }, Status::Alive, at)))
    }

    pub fn spawn_hunter(&self, at: Location) -> HunterId {
        HunterId(self.write().spawn((Hunter::default(), at)))
    }

    pub fn animal_kind(&self, id: AnimalId) -> Option<AnimalKind> {
        self.read().get::<&Animal>(id.0).ok().map(|a| a.kind)
    }

    /// Status of an animal; released animals read as dead.
    pub fn status(&self, id: AnimalId) -> Status {
        self.read()
            .get::<&Status>(id.0)
            .map(|s| *s)
            .unwrap_or(Status::Dead)
    }

    pub fn location_of(&self, entity: Entity) -> Option<Location> {
        self.read().get::<&Location>(entity).ok().map(|l| *l)
    }

    /// Only the grid writes locations, while it holds the destination site's lock.
    pub(crate) fn set_location(&self, entity: Entity, at: Location) {
        if let Ok(mut location) = self.write().get::<&mut Location>(entity) {
            *location = at;
        }
    }

    pub(crate) fn mark_dead(&self, ids: &[AnimalId]) {
        let world = self.write();
        for id in ids {
            if let Ok(mut status) = world.get::<&mut Status>(id.0) {
                *status = Status::Dead;
            }
        }
    }

    /// Credit a hunter and return its new total.
    pub(crate) fn add_points(&self, id: HunterId, kills: u64) -> u64 {
        match self.write().get::<&mut Hunter>(id.0) {
            Ok(mut hunter) => {
                hunter.points += kills;
                hunter.points
            }
            Err(_) => 0,
        }
    }

    pub fn points(&self, id: HunterId) -> u64 {
        self.read().get::<&Hunter>(id.0).map(|h| h.points).unwrap_or(0)
    }

    /// Drop a dead animal's storage. Must only be called once no site lists it.
    pub fn release(&self, id: AnimalId) {
        let _ = self.write().despawn(id.0);
    }

    /// Despawn every animal still marked dead. Returns how many went.
    /// Only call once no actor is running.
    pub(crate) fn release_dead(&self) -> usize {
        let mut world = self.write();
        let dead: Vec<Entity> = world
            .query::<&Status>()
            .iter()
            .filter(|(_, status)| **status == Status::Dead)
            .map(|(entity, _)| entity)
            .collect();
        for entity in &dead {
            let _ = world.despawn(*entity);
        }
        dead.len()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.read().contains(entity)
    }

    pub fn len(&self) -> usize {
        self.read().len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
