use serde::{Deserialize, Serialize};

/// Directional class of a labeled observation
///
/// Encoded as a two-element one-hot vector: `Up = (1, 0)`, `Down = (0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Number of one-hot channels
    pub const CLASSES: usize = 2;

    /// Classify a filter response by its sign
    ///
    /// Strictly positive responses are `Up`; zero (and NaN) fall to `Down`.
    pub fn from_response(response: f64) -> Self {
        if response > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    /// Position of the hot channel
    pub fn class_index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
        }
    }

    /// One-hot encoding
    pub fn one_hot(&self) -> [f64; 2] {
        match self {
            Direction::Up => [1.0, 0.0],
            Direction::Down => [0.0, 1.0],
        }
    }

    /// Returns the opposite direction
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}
