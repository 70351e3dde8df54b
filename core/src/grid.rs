use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cubic voxel grid, owning every cell of a single game.
///
/// Deserializing rebuilds counts from cell kinds and rejects anything but a cube.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    cells: Array3<Cell>,
    hazard_count: CellCount,
    reward_count: CellCount,
}

impl Grid {
    /// Builds a grid from a cubic kind mask, computing neighbor hazard counts.
    pub(crate) fn from_kinds(kinds: &Array3<CellKind>) -> Self {
        let mut cells = kinds.map(|&kind| Cell {
            kind,
            ..Cell::default()
        });

        let mut hazard_count: CellCount = 0;
        let mut reward_count: CellCount = 0;
        for kind in kinds.iter() {
            match kind {
                CellKind::Hazard => hazard_count = hazard_count.saturating_add(1),
                CellKind::Reward => reward_count = reward_count.saturating_add(1),
                CellKind::Empty => {}
            }
        }

        for (idx, &kind) in kinds.indexed_iter() {
            if kind == CellKind::Hazard {
                continue;
            }
            let coords = to_coords(idx);
            let count = kinds
                .iter_neighbors(coords)
                .filter(|&pos| kinds[pos.to_nd_index()] == CellKind::Hazard)
                .count();
            // at most 6 face neighbors
            cells[coords.to_nd_index()].neighbor_hazards = count as u8;
        }

        Self {
            cells,
            hazard_count,
            reward_count,
        }
    }

    /// Builds a fixed layout, useful for scripted games and tests.
    pub fn from_coords(side: Coord, hazards: &[Coord3], rewards: &[Coord3]) -> Result<Self> {
        if side == 0 || side > MAX_SIDE {
            return Err(GameError::InvalidConfiguration);
        }

        let dim = usize::from(side);
        let mut kinds: Array3<CellKind> = Array3::default([dim, dim, dim]);

        for &coords in hazards {
            check_bounds(coords, side)?;
            kinds[coords.to_nd_index()] = CellKind::Hazard;
        }
        for &coords in rewards {
            check_bounds(coords, side)?;
            let slot = &mut kinds[coords.to_nd_index()];
            if *slot == CellKind::Hazard {
                return Err(GameError::InvalidConfiguration);
            }
            *slot = CellKind::Reward;
        }

        Ok(Self::from_kinds(&kinds))
    }

    pub fn validate_coords(&self, coords: Coord3) -> Result<Coord3> {
        check_bounds(coords, self.side())
    }

    pub fn side(&self) -> Coord {
        let (side, _, _) = self.cells.dim();
        side as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        cube(self.side())
    }

    pub fn hazard_count(&self) -> CellCount {
        self.hazard_count
    }

    pub fn reward_count(&self) -> CellCount {
        self.reward_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.hazard_count
    }

    pub fn cell(&self, coords: Coord3) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// All cells with their coordinates, x-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coord3, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|(idx, cell)| (to_coords(idx), cell))
    }

    /// Coordinates of every hazard, revealed or not.
    pub fn hazard_coords(&self) -> Vec<Coord3> {
        self.iter()
            .filter(|(_, cell)| cell.is_hazard())
            .map(|(coords, _)| coords)
            .collect()
    }

    pub fn count_kind(&self, kind: CellKind) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.kind == kind)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.revealed)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord3) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord3) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }
}

/// Wire shape of a [`Grid`], stored counts are ignored and recomputed.
#[derive(Deserialize)]
struct RawGrid {
    cells: Array3<Cell>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GameError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        let (x, y, z) = raw.cells.dim();
        if x == 0 || x != y || x != z || x > usize::from(MAX_SIDE) {
            return Err(GameError::InvalidGridShape);
        }

        let kinds = raw.cells.map(|cell| cell.kind);
        let mut grid = Self::from_kinds(&kinds);
        for (cell, stored) in grid.cells.iter_mut().zip(raw.cells.iter()) {
            cell.revealed = stored.revealed;
            cell.pulsing = stored.pulsing && stored.is_hazard();
        }
        Ok(grid)
    }
}

impl Index<Coord3> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord3) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

fn check_bounds(coords: Coord3, side: Coord) -> Result<Coord3> {
    if coords.0 < side && coords.1 < side && coords.2 < side {
        Ok(coords)
    } else {
        Err(GameError::OutOfBounds)
    }
}

fn to_coords((x, y, z): (usize, usize, usize)) -> Coord3 {
    (x as Coord, y as Coord, z as Coord)
}
