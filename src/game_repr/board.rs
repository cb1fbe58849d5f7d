use super::cell::{Cell, Coord, Occupant, PlayerId, BOARD_WIDTH};
use super::lines::lines_through;
use super::score::Score;
use crate::error::GameError;
use smallvec::SmallVec;
use std::fmt;

/// Cells that a placement would flip, in scan order.
pub type CaptureChain = SmallVec<[Coord; 24]>;

/// Cells changed by one placement, the placed cell first.
pub type ChangeSet = SmallVec<[TileChange; 24]>;

/// One cell mutation, returned to callers in place of a view callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileChange {
    pub coord: Coord,
    pub occupant: Occupant,
}

/// The 8x8 reversi grid.
///
/// The board owns every [`Cell`] and is the only thing allowed to change an
/// occupant. All queries are pure; [`Board::apply_move`] is the single
/// mutating rules operation and reports exactly what it changed.
///
/// # Usage
///
/// ```rust
/// use reversi_engine::game_repr::{Board, Coord, PlayerId};
///
/// let mut board = Board::new();
/// let target = Coord::new(2, 4);
/// assert!(board.is_legal_move(target, PlayerId::A));
///
/// let changes = board.apply_move(target, PlayerId::A).unwrap();
/// assert_eq!(changes.len(), 2); // placed cell plus one flip
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_WIDTH]; BOARD_WIDTH],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a board with the standard opening position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.initialize();
        board
    }

    /// Create a board with every cell empty.
    pub fn empty() -> Self {
        let cells = std::array::from_fn(|row| std::array::from_fn(|col| Cell::new(Coord::new(row, col))));
        Self { cells }
    }

    /// Build a position from text.
    ///
    /// The layout is 64 cells written row by row as `.`, `A` or `B`.
    /// Whitespace and `/` separators are ignored.
    ///
    /// ```rust
    /// use reversi_engine::game_repr::Board;
    ///
    /// let board = Board::from_layout(
    ///     "........ / ........ / ........ / ...AB... / ...BA... / ........ / ........ / ........",
    /// ).unwrap();
    /// assert_eq!(board, Board::new());
    /// ```
    pub fn from_layout(layout: &str) -> Result<Self, GameError> {
        let symbols: Vec<char> = layout
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();

        if symbols.len() != BOARD_WIDTH * BOARD_WIDTH {
            return Err(GameError::InvalidLayout {
                reason: format!("expected 64 cells, found {}", symbols.len()),
            });
        }

        let mut board = Self::empty();
        for (idx, symbol) in symbols.into_iter().enumerate() {
            let occupant = Occupant::from_char(symbol).ok_or_else(|| GameError::InvalidLayout {
                reason: format!("unexpected symbol '{symbol}' at cell {idx}"),
            })?;
            board.set(Coord::from_index(idx), occupant);
        }
        Ok(board)
    }

    /// Reset every cell and place the four-cell opening.
    pub fn initialize(&mut self) {
        for coord in Coord::all() {
            self.set(coord, Occupant::Empty);
        }
        self.set(Coord::new(3, 3), Occupant::Player(PlayerId::A));
        self.set(Coord::new(3, 4), Occupant::Player(PlayerId::B));
        self.set(Coord::new(4, 3), Occupant::Player(PlayerId::B));
        self.set(Coord::new(4, 4), Occupant::Player(PlayerId::A));
    }

    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[coord.row()][coord.col()]
    }

    pub fn occupant(&self, coord: Coord) -> Occupant {
        self.cell(coord).occupant()
    }

    /// All cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    /// Occupancy grid indexed `[row][col]`.
    pub fn occupants(&self) -> [[Occupant; BOARD_WIDTH]; BOARD_WIDTH] {
        std::array::from_fn(|row| std::array::from_fn(|col| self.cells[row][col].occupant()))
    }

    fn set(&mut self, coord: Coord, occupant: Occupant) {
        self.cells[coord.row()][coord.col()].set_occupant(occupant);
    }

    /// Whether `player` may place at `coord`: the cell must be empty and the
    /// placement must flip at least one tile.
    pub fn is_legal_move(&self, coord: Coord, player: PlayerId) -> bool {
        if !self.occupant(coord).is_empty() {
            return false;
        }
        !self.capture_chain(coord, player).is_empty()
    }

    /// Every tile a placement by `player` at `coord` would flip.
    ///
    /// Scans the row, column and both diagonals through `coord`, outward in
    /// both directions. A direction contributes its run of opponent tiles only
    /// when the run is closed by one of `player`'s tiles.
    pub fn capture_chain(&self, coord: Coord, player: PlayerId) -> CaptureChain {
        let mut chain = CaptureChain::new();
        for line in lines_through(coord) {
            self.scan_direction(line.forward(), player, &mut chain);
            self.scan_direction(line.backward(), player, &mut chain);
        }
        chain
    }

    fn scan_direction<'a>(
        &self,
        cells: impl Iterator<Item = &'a Coord>,
        player: PlayerId,
        chain: &mut CaptureChain,
    ) {
        let mut run: SmallVec<[Coord; BOARD_WIDTH]> = SmallVec::new();
        for &coord in cells {
            match self.occupant(coord) {
                Occupant::Empty => return,
                occupant if occupant.is(player) => {
                    chain.extend(run);
                    return;
                }
                Occupant::Player(_) => run.push(coord),
            }
        }
        // reached the edge without a closing tile
    }

    /// Place a tile for `player` and flip the capture chain.
    ///
    /// The move is re-validated against the current position; an illegal move
    /// leaves the board untouched and returns [`GameError::IllegalMove`].
    pub fn apply_move(&mut self, coord: Coord, player: PlayerId) -> Result<ChangeSet, GameError> {
        if !self.occupant(coord).is_empty() {
            return Err(GameError::IllegalMove { coord, player });
        }
        let chain = self.capture_chain(coord, player);
        if chain.is_empty() {
            return Err(GameError::IllegalMove { coord, player });
        }

        let occupant = player.to_occupant();
        let mut changes = ChangeSet::new();

        self.set(coord, occupant);
        changes.push(TileChange { coord, occupant });

        for flipped in chain {
            self.set(flipped, occupant);
            changes.push(TileChange { coord: flipped, occupant });
        }

        log::debug!("{player} placed at {coord}, flipped {}", changes.len() - 1);
        Ok(changes)
    }

    /// Whether `player` has at least one legal placement.
    pub fn has_any_legal_move(&self, player: PlayerId) -> bool {
        Coord::all().any(|coord| self.is_legal_move(coord, player))
    }

    /// All legal placements for `player`, row-major.
    pub fn legal_moves(&self, player: PlayerId) -> SmallVec<[Coord; 32]> {
        Coord::all().filter(|&coord| self.is_legal_move(coord, player)).collect()
    }

    pub fn count(&self, player: PlayerId) -> u8 {
        self.cells().filter(|cell| cell.occupant().is(player)).count() as u8
    }

    pub fn empty_count(&self) -> u8 {
        self.cells().filter(|cell| cell.occupant().is_empty()).count() as u8
    }

    /// Direct cell tally for both players.
    pub fn score(&self) -> Score {
        Score::new(self.count(PlayerId::A), self.count(PlayerId::B))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell.occupant().to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
