//! Components for WildGrid entities and sites
//!
//! Animals and hunters are stored as component bundles in the entity arena;
//! sites carry a `SiteKind` fixed at grid construction.

use hecs::Entity;
use serde::{Deserialize, Serialize};

// ============================================================================
// Identity
// ============================================================================

/// Arena handle of an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimalId(pub Entity);

/// Arena handle of a hunter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HunterId(pub Entity);

impl AnimalId {
    pub fn index(self) -> u32 {
        self.0.id()
    }
}

impl HunterId {
    pub fn index(self) -> u32 {
        self.0.id()
    }
}

// ============================================================================
// Animal Components
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimalKind {
    Bear,
    Bird,
    Panda,
}

impl AnimalKind {
    pub const ALL: [AnimalKind; 3] = [AnimalKind::Bear, AnimalKind::Bird, AnimalKind::Panda];

    /// Position in report tallies: BEAR 0, BIRD 1, PANDA 2.
    pub fn ordinal(self) -> usize {
        match self {
            AnimalKind::Bear => 0,
            AnimalKind::Bird => 1,
            AnimalKind::Panda => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Alive,
    Dead,
}

#[derive(Debug, Clone, Copy)]
pub struct Animal {
    pub kind: AnimalKind,
}

// ============================================================================
// Hunter Components
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct Hunter {
    /// Number of animals this hunter has killed
    pub points: u64,
}

// ============================================================================
// Shared Components
// ============================================================================

/// Cell coordinates; `x` indexes rows, `y` indexes columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    pub x: usize,
    pub y: usize,
}

impl Location {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Sites
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteKind {
    Feeding,
    Nesting,
    Wintering,
}

impl SiteKind {
    /// Integer encoding used by the grid report.
    pub fn ordinal(self) -> u8 {
        match self {
            SiteKind::Feeding => 0,
            SiteKind::Nesting => 1,
            SiteKind::Wintering => 2,
        }
    }

    /// Weighted draw from a uniform sample `r` in [0, 1).
    pub fn from_draw(r: f64) -> Self {
        if r < 0.33 {
            SiteKind::Wintering
        } else if r < 0.66 {
            SiteKind::Feeding
        } else {
            SiteKind::Nesting
        }
    }
}
