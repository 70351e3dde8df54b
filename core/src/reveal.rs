use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Bounds applied to every cascade. The cell budget is drawn from `min_cells..=max_cells` once per reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeLimits {
    pub min_cells: CellCount,
    pub max_cells: CellCount,
    pub max_depth: u8,
}

impl CascadeLimits {
    pub const fn fixed(max_cells: CellCount, max_depth: u8) -> Self {
        Self {
            min_cells: max_cells,
            max_cells,
            max_depth,
        }
    }

    pub fn sample(&self, rng: &mut SmallRng) -> CascadeBudget {
        use rand::prelude::*;

        let low = self.min_cells.min(self.max_cells);
        let max_cells = rng.random_range(low..=self.max_cells);
        CascadeBudget {
            max_cells,
            max_depth: self.max_depth,
        }
    }
}

impl Default for CascadeLimits {
    fn default() -> Self {
        Self {
            min_cells: 12,
            max_cells: 15,
            max_depth: 3,
        }
    }
}

/// Concrete limits for a single cascade.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CascadeBudget {
    /// Cells the cascade may reveal, not counting the origin.
    pub max_cells: CellCount,
    /// Furthest BFS distance from the origin that may be revealed.
    pub max_depth: u8,
}

impl CascadeBudget {
    pub const UNLIMITED: Self = Self {
        max_cells: CellCount::MAX,
        max_depth: u8::MAX,
    };
}

/// How a cell changed, as the presentation layer should render it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellUpdate {
    Empty(u8),
    Reward,
    /// The hazard the player revealed.
    Detonated,
    /// Hazard surfaced because all its safe neighbors are revealed.
    Pulsing,
    /// Hazard shown after the game was lost.
    Exposed,
}

impl CellUpdate {
    /// Whether the cell became revealed, as opposed to only visible.
    pub const fn is_reveal(self) -> bool {
        matches!(self, Self::Empty(_) | Self::Reward | Self::Detonated)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub coords: Coord3,
    pub update: CellUpdate,
}

impl CellChange {
    pub const fn new(coords: Coord3, update: CellUpdate) -> Self {
        Self { coords, update }
    }
}

/// Outcome of a reveal plus every cell it changed: the direct reveal first, then cascade reveals, then pulses.
#[derive(Clone, Debug, PartialEq)]
pub struct Reveal {
    pub outcome: RevealOutcome,
    pub changes: Vec<CellChange>,
}

impl Reveal {
    fn unchanged() -> Self {
        Self {
            outcome: RevealOutcome::AlreadyRevealed,
            changes: Vec::new(),
        }
    }

    /// Number of cells this reveal marked as revealed.
    pub fn revealed_count(&self) -> CellCount {
        self.changes
            .iter()
            .filter(|change| change.update.is_reveal())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }
}

impl Grid {
    /// Reveals a cell, cascading over zero-count empty cells within `budget`.
    pub fn reveal(&mut self, coords: Coord3, budget: CascadeBudget) -> Result<Reveal> {
        use RevealOutcome::*;

        let coords = self.validate_coords(coords)?;
        let cell = self[coords];

        if cell.revealed {
            return Ok(Reveal::unchanged());
        }
        self.cell_mut(coords).revealed = true;

        let mut changes = Vec::new();
        let outcome = match cell.kind {
            CellKind::Hazard => {
                log::debug!("Hazard revealed at {:?}", coords);
                changes.push(CellChange::new(coords, CellUpdate::Detonated));
                return Ok(Reveal {
                    outcome: HitHazard,
                    changes,
                });
            }
            CellKind::Reward => {
                log::debug!("Reward revealed at {:?}", coords);
                changes.push(CellChange::new(coords, CellUpdate::Reward));
                FoundReward
            }
            CellKind::Empty => {
                let count = cell.neighbor_hazards;
                log::debug!("Empty revealed at {:?}, hazard count: {}", coords, count);
                changes.push(CellChange::new(coords, CellUpdate::Empty(count)));
                if count == 0 {
                    self.cascade(coords, budget, &mut changes);
                }
                RevealedEmpty(count)
            }
        };

        self.activate_pulses(&mut changes);

        Ok(Reveal { outcome, changes })
    }

    /// Hidden, non-pulsing hazards, to be surfaced once the game is lost.
    pub fn exposed_hazards(&self) -> Vec<CellChange> {
        self.iter()
            .filter(|(_, cell)| cell.is_hazard() && !cell.revealed && !cell.pulsing)
            .map(|(coords, _)| CellChange::new(coords, CellUpdate::Exposed))
            .collect()
    }

    fn cascade(&mut self, origin: Coord3, budget: CascadeBudget, changes: &mut Vec<CellChange>) {
        let mut visited = BTreeSet::from([origin]);
        let mut to_visit = VecDeque::from([(origin, 0u8)]);
        let mut revealed: CellCount = 0;

        log::trace!("Starting cascade from {:?}, budget: {:?}", origin, budget);

        while let Some((visit_coords, depth)) = to_visit.pop_front() {
            if depth >= budget.max_depth {
                continue;
            }

            for pos in self.iter_neighbors(visit_coords) {
                if revealed >= budget.max_cells {
                    log::trace!("Cascade from {:?} stopped after {} cells", origin, revealed);
                    return;
                }

                if !visited.insert(pos) {
                    continue;
                }

                let cell = self[pos];
                if cell.revealed || cell.kind != CellKind::Empty {
                    continue;
                }

                self.cell_mut(pos).revealed = true;
                revealed += 1;
                changes.push(CellChange::new(pos, CellUpdate::Empty(cell.neighbor_hazards)));
                log::trace!(
                    "Cascade revealed {:?} at depth {}, hazard count: {}",
                    pos,
                    depth + 1,
                    cell.neighbor_hazards
                );

                if cell.neighbor_hazards == 0 {
                    to_visit.push_back((pos, depth + 1));
                }
            }
        }
    }

    /// Full rescan: a hazard pulses once every safe face neighbor is revealed.
    fn activate_pulses(&mut self, changes: &mut Vec<CellChange>) {
        let candidates: Vec<Coord3> = self
            .iter()
            .filter(|(_, cell)| cell.is_hazard() && !cell.revealed && !cell.pulsing)
            .map(|(coords, _)| coords)
            .collect();

        for coords in candidates {
            let mut safe_neighbors = self
                .iter_neighbors(coords)
                .filter(|&pos| !self[pos].is_hazard())
                .peekable();
            // a hazard walled in by other hazards never pulses
            let surfaced =
                safe_neighbors.peek().is_some() && safe_neighbors.all(|pos| self[pos].revealed);

            if surfaced {
                log::trace!("Hazard at {:?} is now pulsing", coords);
                self.cell_mut(coords).pulsing = true;
                changes.push(CellChange::new(coords, CellUpdate::Pulsing));
            }
        }
    }
}
