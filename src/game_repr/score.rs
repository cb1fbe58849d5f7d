use super::cell::PlayerId;
use std::fmt;

/// Final outcome of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Player(PlayerId),
    Tie,
}

/// Occupied-cell tally for both players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub a: u8,
    pub b: u8,
}

impl Score {
    pub fn new(a: u8, b: u8) -> Self {
        Self { a, b }
    }

    pub fn of(&self, player: PlayerId) -> u8 {
        match player {
            PlayerId::A => self.a,
            PlayerId::B => self.b,
        }
    }

    /// Strictly greater count wins; equal counts are a tie.
    pub fn winner(&self) -> Winner {
        use std::cmp::Ordering;
        match self.a.cmp(&self.b) {
            Ordering::Greater => Winner::Player(PlayerId::A),
            Ordering::Less => Winner::Player(PlayerId::B),
            Ordering::Equal => Winner::Tie,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A {} - {} B", self.a, self.b)
    }
}
