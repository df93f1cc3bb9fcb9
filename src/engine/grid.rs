/// A single square of the board, addressed as `(row, col)` from the
/// top-left corner.
///
/// Coordinates are signed so that a proposed move can point one step off the
/// board before [`Grid::wrap`] folds it back on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Cell {
    pub(crate) row: i32,
    pub(crate) col: i32,
}

impl Cell {
    pub(crate) fn new(row: i32, col: i32) -> Cell {
        Cell { row, col }
    }

    /// Return the cell one unit away in the direction of `(row_delta,
    /// col_delta)`.  The result may lie outside the grid.
    pub(crate) fn offset(self, (row_delta, col_delta): (i32, i32)) -> Cell {
        Cell {
            row: self.row + row_delta,
            col: self.col + col_delta,
        }
    }
}

/// Board dimensions with toroidal topology: both edges of each axis are
/// glued to their opposites.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    pub(crate) rows: i32,
    pub(crate) cols: i32,
}

impl Grid {
    pub(crate) fn new(rows: i32, cols: i32) -> Grid {
        Grid { rows, cols }
    }

    /// Fold an arbitrary cell onto the torus.  Euclidean remainder gives the
    /// same rule on both axes for both under- and overflow.
    pub(crate) fn wrap(self, cell: Cell) -> Cell {
        Cell {
            row: cell.row.rem_euclid(self.rows),
            col: cell.col.rem_euclid(self.cols),
        }
    }

    pub(crate) fn contains(self, cell: Cell) -> bool {
        (0..self.rows).contains(&cell.row) && (0..self.cols).contains(&cell.col)
    }

    /// The cell new snakes start on
    pub(crate) fn center(self) -> Cell {
        Cell {
            row: self.rows / 2,
            col: self.cols / 2,
        }
    }

    /// Iterate over every cell on the grid in row-major order
    pub(crate) fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell { row, col }))
    }
}
