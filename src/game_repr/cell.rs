use std::fmt;

/// Width and height of the board.
pub const BOARD_WIDTH: usize = 8;

/// Index of the longest diagonal in either diagonal family.
pub const MIDDLE_DIAGONAL: u8 = 7;

/// Number of diagonals in each family (0..15).
pub const DIAGONAL_COUNT: usize = 2 * BOARD_WIDTH - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    /// Moves first. Conventionally drawn black.
    A,
    B,
}

impl PlayerId {
    pub fn opponent(&self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    pub fn to_occupant(&self) -> Occupant {
        Occupant::Player(*self)
    }

    pub fn to_char(&self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.to_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Occupant {
    #[default]
    Empty,
    Player(PlayerId),
}

impl Occupant {
    pub fn is_empty(&self) -> bool {
        *self == Occupant::Empty
    }

    pub fn is(&self, player: PlayerId) -> bool {
        *self == Occupant::Player(player)
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Occupant::Empty),
            'A' | 'a' => Some(Occupant::Player(PlayerId::A)),
            'B' | 'b' => Some(Occupant::Player(PlayerId::B)),
            _ => None,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Occupant::Empty => '.',
            Occupant::Player(player) => player.to_char(),
        }
    }
}

/// A board coordinate. Both components are always in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Build a coordinate.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside `0..8`. Coordinates come from a fixed
    /// 8x8 grid, so an out-of-range value is a bug in the caller.
    pub fn new(row: usize, col: usize) -> Self {
        assert!(
            row < BOARD_WIDTH && col < BOARD_WIDTH,
            "invalid coordinate ({row}, {col}): must be within 0..{BOARD_WIDTH}"
        );
        Self {
            row: row as u8,
            col: col as u8,
        }
    }

    /// Checked variant of [`Coord::new`].
    pub fn try_new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_WIDTH && col < BOARD_WIDTH {
            Some(Self::new(row, col))
        } else {
            None
        }
    }

    /// Coordinate for a row-major index in `0..64`.
    pub fn from_index(idx: usize) -> Self {
        Self::new(idx / BOARD_WIDTH, idx % BOARD_WIDTH)
    }

    pub fn row(&self) -> usize {
        self.row as usize
    }

    pub fn col(&self) -> usize {
        self.col as usize
    }

    /// Row-major index in `0..64`.
    pub fn index(&self) -> usize {
        self.row() * BOARD_WIDTH + self.col()
    }

    /// Every coordinate on the board, row-major.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_WIDTH * BOARD_WIDTH).map(Coord::from_index)
    }

    /// `7 - col + row`: cells sharing this value lie on one top-left to bottom-right diagonal.
    pub fn left_diagonal(&self) -> u8 {
        MIDDLE_DIAGONAL - self.col + self.row
    }

    /// `col + row`: cells sharing this value lie on one top-right to bottom-left diagonal.
    pub fn right_diagonal(&self) -> u8 {
        self.col + self.row
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A single board position.
///
/// Diagonal indices are derived once at construction and never change; only
/// the occupant is mutable, and only through [`Board`](super::Board).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    coord: Coord,
    occupant: Occupant,
    left_diagonal: u8,
    right_diagonal: u8,
}

impl Cell {
    pub fn new(coord: Coord) -> Self {
        Self {
            coord,
            occupant: Occupant::Empty,
            left_diagonal: coord.left_diagonal(),
            right_diagonal: coord.right_diagonal(),
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn row(&self) -> usize {
        self.coord.row()
    }

    pub fn col(&self) -> usize {
        self.coord.col()
    }

    pub fn occupant(&self) -> Occupant {
        self.occupant
    }

    pub fn left_diagonal(&self) -> u8 {
        self.left_diagonal
    }

    pub fn right_diagonal(&self) -> u8 {
        self.right_diagonal
    }

    pub(crate) fn set_occupant(&mut self, occupant: Occupant) {
        self.occupant = occupant;
    }
}
