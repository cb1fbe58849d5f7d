use super::*;
use crate::error::GameError;

// ==================== HELPER FUNCTIONS ====================

/// Helper function to build a board from a layout, panicking on typos
pub fn board_from(layout: &str) -> Board {
    Board::from_layout(layout).expect("test layout should parse")
}

/// Helper function to collect and sort flipped coordinates
pub fn sorted_chain(board: &Board, row: usize, col: usize, player: PlayerId) -> Vec<Coord> {
    let mut chain: Vec<Coord> = board.capture_chain(Coord::new(row, col), player).into_iter().collect();
    chain.sort();
    chain
}

/// Helper function to list coordinates from (row, col) pairs
pub fn coords(pairs: &[(usize, usize)]) -> Vec<Coord> {
    let mut out: Vec<Coord> = pairs.iter().map(|&(r, c)| Coord::new(r, c)).collect();
    out.sort();
    out
}

// ==================== TEST MODULES ====================
