use serde::{Deserialize, Serialize};

/// What a cell holds, fixed once the grid is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Reward,
    Hazard,
}

impl Default for CellKind {
    fn default() -> Self {
        Self::Empty
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) kind: CellKind,
    pub(crate) revealed: bool,
    pub(crate) neighbor_hazards: u8,
    pub(crate) pulsing: bool,
}

impl Cell {
    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Hazards among the face neighbors, always 0 for hazards themselves.
    pub const fn neighbor_hazards(&self) -> u8 {
        self.neighbor_hazards
    }

    pub const fn is_pulsing(&self) -> bool {
        self.pulsing
    }

    pub const fn is_hazard(&self) -> bool {
        matches!(self.kind, CellKind::Hazard)
    }

    /// Player-visible state of this cell.
    pub const fn view(&self) -> CellView {
        match (self.revealed, self.kind) {
            (false, CellKind::Hazard) if self.pulsing => CellView::Pulsing,
            (false, _) => CellView::Hidden,
            (true, CellKind::Empty) => CellView::Empty(self.neighbor_hazards),
            (true, CellKind::Reward) => CellView::Reward,
            (true, CellKind::Hazard) => CellView::Hazard,
        }
    }
}

/// Canonical player-visible state, what a presentation layer should draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Pulsing,
    Empty(u8),
    Reward,
    Hazard,
}

impl CellView {}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
