use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts, total-tile counts and flat tile indices.
pub type CellCount = u16;

/// Two-dimensional coordinates `(col, row)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Row-major `[row, col]`, matching the flat tile order.
    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Dimensions of a row-major tile sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub cols: Coord,
    pub rows: Coord,
}

impl GridShape {
    pub const fn new(cols: Coord, rows: Coord) -> Self {
        Self { cols, rows }
    }

    pub const fn total_tiles(self) -> CellCount {
        mult(self.cols, self.rows)
    }

    pub const fn contains(self, index: CellCount) -> bool {
        index < self.total_tiles()
    }

    pub fn coords(self, index: CellCount) -> Coord2 {
        let cols = CellCount::from(self.cols.max(1));
        // both fit a Coord as long as index is in range
        ((index % cols) as Coord, (index / cols) as Coord)
    }

    pub fn index_of(self, (col, row): Coord2) -> Option<CellCount> {
        if col < self.cols && row < self.rows {
            let cols = CellCount::from(self.cols);
            Some(CellCount::from(row) * cols + CellCount::from(col))
        } else {
            None
        }
    }

    pub fn neighbors(self, index: CellCount) -> NeighborIter {
        NeighborIter::new(index, self)
    }
}

/// Neighbour indices of `index` on a `cols × rows` grid.
pub fn neighbors(index: CellCount, cols: Coord, rows: Coord) -> NeighborIter {
    GridShape::new(cols, rows).neighbors(index)
}

/// `(dcol, drow)`, row above first, then the same row, then the row below.
const DISPLACEMENTS: [(i16, i16); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `index`, returning a value only when it stays on the grid without wrapping rows.
fn apply_delta(index: CellCount, delta: (i16, i16), shape: GridShape) -> Option<CellCount> {
    let (dcol, drow) = delta;
    let cols = CellCount::from(shape.cols);
    if cols == 0 {
        return None;
    }

    let next_col = (index % cols).checked_add_signed(dcol)?;
    if next_col >= cols {
        return None;
    }

    let next = i32::from(index) + i32::from(drow) * i32::from(cols) + i32::from(dcol);
    CellCount::try_from(next)
        .ok()
        .filter(|&next| shape.contains(next))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: CellCount,
    shape: GridShape,
    index: u8,
}

impl NeighborIter {
    fn new(center: CellCount, shape: GridShape) -> Self {
        Self {
            center,
            shape,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellCount;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.shape);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
