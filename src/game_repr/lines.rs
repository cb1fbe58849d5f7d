//! Precomputed lines through every cell.
//!
//! Each cell lies on exactly four lines: its row, its column, its left
//! diagonal and its right diagonal. Diagonal cells are stored in row-major
//! order, so a cell's position inside a diagonal depends only on its row and
//! the diagonal index.

use super::cell::{Coord, BOARD_WIDTH, MIDDLE_DIAGONAL};
use once_cell::sync::Lazy;
use smallvec::SmallVec;

/// An ordered line of cells with the position of the cell it was built for.
#[derive(Debug, Clone)]
pub struct Line {
    cells: SmallVec<[Coord; BOARD_WIDTH]>,
    cursor: usize,
}

impl Line {
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cells strictly after the cursor, walking away from it.
    /// Empty when the cursor is the last cell of the line.
    pub fn forward(&self) -> impl Iterator<Item = &Coord> {
        self.cells[self.cursor + 1..].iter()
    }

    /// Cells strictly before the cursor, walking away from it.
    /// Empty when the cursor is the first cell of the line.
    pub fn backward(&self) -> impl Iterator<Item = &Coord> {
        self.cells[..self.cursor].iter().rev()
    }
}

/// Position of the cell in `row` inside diagonal `diag` (either family).
fn diagonal_position(diag: u8, row: usize) -> usize {
    if diag > MIDDLE_DIAGONAL {
        row + MIDDLE_DIAGONAL as usize - diag as usize
    } else {
        row
    }
}

fn build_lines(coord: Coord) -> [Line; 4] {
    let row = Line {
        cells: (0..BOARD_WIDTH).map(|c| Coord::new(coord.row(), c)).collect(),
        cursor: coord.col(),
    };
    let col = Line {
        cells: (0..BOARD_WIDTH).map(|r| Coord::new(r, coord.col())).collect(),
        cursor: coord.row(),
    };
    let left = Line {
        cells: Coord::all()
            .filter(|c| c.left_diagonal() == coord.left_diagonal())
            .collect(),
        cursor: diagonal_position(coord.left_diagonal(), coord.row()),
    };
    let right = Line {
        cells: Coord::all()
            .filter(|c| c.right_diagonal() == coord.right_diagonal())
            .collect(),
        cursor: diagonal_position(coord.right_diagonal(), coord.row()),
    };
    [row, col, left, right]
}

static LINES: Lazy<Vec<[Line; 4]>> = Lazy::new(|| Coord::all().map(build_lines).collect());

/// The row, column, left diagonal and right diagonal through `coord`.
pub fn lines_through(coord: Coord) -> &'static [Line; 4] {
    &LINES[coord.index()]
}
