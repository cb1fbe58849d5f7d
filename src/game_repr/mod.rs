mod board;
mod cell;
mod lines;
mod score;

#[cfg(test)]
mod tests;

pub use board::*;
pub use cell::*;
pub use lines::{lines_through, Line};
pub use score::*;
