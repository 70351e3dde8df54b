use ndarray::Array3;

/// Single coordinate axis used for the grid side and positions.
pub type Coord = u8;

/// Count type used for hazard/reward counts and total-cell counts.
pub type CellCount = u16;

/// Three-dimensional coordinates `(x, y, z)`.
pub type Coord3 = (Coord, Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord3 {
    type Output = [usize; 3];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into(), self.2.into()]
    }
}

/// Largest cube side whose cell count still fits in `CellCount`.
pub const MAX_SIDE: Coord = 40;

/// Number of cells in a cube of side `side`, saturating past `MAX_SIDE`.
pub const fn cube(side: Coord) -> CellCount {
    let side = side as CellCount;
    side.saturating_mul(side).saturating_mul(side)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord3) -> NeighborIter;
}

impl<T> NeighborIterExt for Array3<T> {
    fn iter_neighbors(&self, index: Coord3) -> NeighborIter {
        let (side, _, _) = self.dim();
        NeighborIter::new(index, side.try_into().unwrap_or(Coord::MAX))
    }
}

/// Face-adjacent displacements, in expansion order.
const DISPLACEMENTS: [(i8, i8, i8); 6] = [
    (-1, 0, 0),
    (1, 0, 0),
    (0, -1, 0),
    (0, 1, 0),
    (0, 0, -1),
    (0, 0, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains inside the cube.
fn apply_delta(coords: Coord3, delta: (i8, i8, i8), side: Coord) -> Option<Coord3> {
    let (x, y, z) = coords;
    let (dx, dy, dz) = delta;

    let next_x = x.checked_add_signed(dx)?;
    let next_y = y.checked_add_signed(dy)?;
    let next_z = z.checked_add_signed(dz)?;

    if next_x >= side || next_y >= side || next_z >= side {
        return None;
    }

    Some((next_x, next_y, next_z))
}

/// Iterates the in-bounds face neighbors of a cell, always in the same order.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord3,
    side: Coord,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord3, side: Coord) -> Self {
        Self {
            center,
            side,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord3;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.side);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
