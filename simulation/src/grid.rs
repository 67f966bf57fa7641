//! Grid / Site store
//!
//! A fixed-size 2D grid of sites. Each site owns one mutex guarding both of
//! its rosters; every roster mutation in the crate goes through that lock.

use std::sync::{Mutex, MutexGuard, PoisonError};

use hecs::Entity;
use rand::Rng;

use crate::arena::EntityArena;
use crate::components::*;

// ============================================================================
// Occupants
// ============================================================================

/// Anything a site can list: animals or hunters.
pub trait Occupant: Copy + PartialEq {
    fn entity(self) -> Entity;
    fn roster(occupants: &mut Occupants) -> &mut Vec<Self>;
    fn listed(occupants: &Occupants) -> &[Self];
}

impl Occupant for AnimalId {
    fn entity(self) -> Entity {
        self.0
    }

    fn roster(occupants: &mut Occupants) -> &mut Vec<Self> {
        &mut occupants.animals
    }

    fn listed(occupants: &Occupants) -> &[Self] {
        &occupants.animals
    }
}

impl Occupant for HunterId {
    fn entity(self) -> Entity {
        self.0
    }

    fn roster(occupants: &mut Occupants) -> &mut Vec<Self> {
        &mut occupants.hunters
    }

    fn listed(occupants: &Occupants) -> &[Self] {
        &occupants.hunters
    }
}

/// Rosters of a site. The recorded counts are the roster lengths.
#[derive(Debug, Default)]
pub struct Occupants {
    animals: Vec<AnimalId>,
    hunters: Vec<HunterId>,
}

impl Occupants {
    pub fn animals(&self) -> &[AnimalId] {
        &self.animals
    }

    pub fn hunters(&self) -> &[HunterId] {
        &self.hunters
    }

    pub fn admit<E: Occupant>(&mut self, entity: E) {
        E::roster(self).push(entity);
    }

    /// Remove by identity with swap-with-last compaction.
    /// Returns false when the entity is not listed here.
    pub fn evict<E: Occupant>(&mut self, entity: E) -> bool {
        let roster = E::roster(self);
        match roster.iter().position(|e| *e == entity) {
            Some(index) => {
                roster.swap_remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains<E: Occupant>(&self, entity: E) -> bool {
        E::listed(self).contains(&entity)
    }

    /// Empty the animal roster, handing back everyone that was listed.
    pub fn take_animals(&mut self) -> Vec<AnimalId> {
        std::mem::take(&mut self.animals)
    }
}

// ============================================================================
// Site
// ============================================================================

#[derive(Debug)]
pub struct Site {
    kind: SiteKind,
    location: Location,
    occupants: Mutex<Occupants>,
}

impl Site {
    fn new(kind: SiteKind, location: Location) -> Self {
        Self {
            kind,
            location,
            occupants: Mutex::new(Occupants::default()),
        }
    }

    pub fn kind(&self) -> SiteKind {
        self.kind
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn lock(&self) -> MutexGuard<'_, Occupants> {
        self.occupants.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Grid
// ============================================================================

#[derive(Debug)]
pub struct Grid {
    x_len: usize,
    y_len: usize,
    sites: Vec<Site>,
}

impl Grid {
    /// Build a grid, drawing each site's kind from `rng` row by row.
    pub fn initialize<R: Rng + ?Sized>(x_len: usize, y_len: usize, rng: &mut R) -> Self {
        Self::from_fn(x_len, y_len, |_| SiteKind::from_draw(rng.gen::<f64>()))
    }

    /// Build a grid with explicitly chosen site kinds.
    pub fn from_fn(x_len: usize, y_len: usize, mut kind_at: impl FnMut(Location) -> SiteKind) -> Self {
        let mut sites = Vec::with_capacity(x_len * y_len);
        for x in 0..x_len {
            for y in 0..y_len {
                let location = Location::new(x, y);
                sites.push(Site::new(kind_at(location), location));
            }
        }
        Self { x_len, y_len, sites }
    }

    pub fn x_len(&self) -> usize {
        self.x_len
    }

    pub fn y_len(&self) -> usize {
        self.y_len
    }

    pub fn contains(&self, at: Location) -> bool {
        at.x < self.x_len && at.y < self.y_len
    }

    /// Locations only ever come from this grid, so indexing is in bounds.
    pub fn site(&self, at: Location) -> &Site {
        &self.sites[at.x * self.y_len + at.y]
    }

    pub fn sites(&self) -> impl Iterator<Item = &Site> {
        self.sites.iter()
    }

    /// Row `x` of the grid, left to right.
    pub fn row(&self, x: usize) -> &[Site] {
        &self.sites[x * self.y_len..(x + 1) * self.y_len]
    }

    pub fn random_location<R: Rng + ?Sized>(&self, rng: &mut R) -> Location {
        Location::new(rng.gen_range(0..self.x_len), rng.gen_range(0..self.y_len))
    }

    /// List `entity` at `at` and point its location there, under that site's lock.
    pub fn place<E: Occupant>(&self, arena: &EntityArena, entity: E, at: Location) {
        let mut occupants = self.site(at).lock();
        occupants.admit(entity);
        arena.set_location(entity.entity(), at);
    }

    /// Relocation protocol: teleport to a uniformly random cell anywhere on
    /// the grid. Only the destination is locked; the caller must already
    /// have evicted the entity from its previous site.
    pub fn teleport<E: Occupant, R: Rng + ?Sized>(
        &self,
        arena: &EntityArena,
        entity: E,
        rng: &mut R,
    ) -> Location {
        let destination = self.random_location(rng);
        self.place(arena, entity, destination);
        destination
    }

    /// Sum of roster lengths over all sites: (animals, hunters).
    pub fn census(&self) -> (usize, usize) {
        self.sites.iter().fold((0, 0), |(animals, hunters), site| {
            let occupants = site.lock();
            (animals + occupants.animals().len(), hunters + occupants.hunters().len())
        })
    }
}
