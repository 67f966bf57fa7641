//! Grid report
//!
//! One line per grid row, one `|kind-{bears,birds,pandas}{hunters}|`
//! segment per cell. Each cell is read under its own site lock.
//! No spaces anywhere in a segment, e.g. `|0-{1,0,2}{3}|`.

use std::fmt;

use serde::Serialize;

use crate::components::SiteKind;
use crate::world::{Habitat, RunOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellTally {
    pub site: SiteKind,
    /// Live animals by kind ordinal: bears, birds, pandas
    pub animals: [u32; 3],
    pub hunters: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridReport {
    pub rows: Vec<Vec<CellTally>>,
}

impl GridReport {
    pub fn capture(habitat: &Habitat) -> Self {
        let grid = &habitat.grid;
        let rows = (0..grid.x_len())
            .map(|x| {
                grid.row(x)
                    .iter()
                    .map(|site| {
                        let occupants = site.lock();
                        let mut animals = [0u32; 3];
                        for id in occupants.animals() {
                            if let Some(kind) = habitat.arena.animal_kind(*id) {
                                animals[kind.ordinal()] += 1;
                            }
                        }
                        CellTally {
                            site: site.kind(),
                            animals,
                            hunters: occupants.hunters().len() as u32,
                        }
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn animal_total(&self) -> u32 {
        self.cells().map(|c| c.animals.iter().sum::<u32>()).sum()
    }

    pub fn hunter_total(&self) -> u32 {
        self.cells().map(|c| c.hunters).sum()
    }

    pub fn cells(&self) -> impl Iterator<Item = &CellTally> {
        self.rows.iter().flatten()
    }
}

impl fmt::Display for CellTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [bears, birds, pandas] = self.animals;
        write!(
            f,
            "|{}-{{{},{},{}}}{{{}}}|",
            self.site.ordinal(),
            bears,
            birds,
            pandas,
            self.hunters
        )
    }
}

impl fmt::Display for GridReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}

/// Machine-readable end-of-run document.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub report: &'a GridReport,
    pub outcome: &'a RunOutcome,
}
