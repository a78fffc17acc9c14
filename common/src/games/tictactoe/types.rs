use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    /// X moves first and is the side whose score the search maximizes.
    pub fn is_maximizer(&self) -> bool {
        *self == Mark::X
    }

    pub fn for_side(is_maximizing: bool) -> Mark {
        if is_maximizing { Mark::X } else { Mark::O }
    }

    pub fn symbol(&self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(format!("Expected \"<row> <col>\", got \"{}\"", s.trim()));
        }

        let row = parts[0]
            .parse::<usize>()
            .map_err(|e| format!("Invalid row \"{}\": {}", parts[0], e))?;
        let col = parts[1]
            .parse::<usize>()
            .map_err(|e| format!("Invalid column \"{}\": {}", parts[1], e))?;

        let position = Position::new(row, col);
        if !position.is_in_bounds() {
            return Err(format!(
                "Position {} is outside the {}x{} board",
                position, BOARD_SIZE, BOARD_SIZE
            ));
        }
        Ok(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    XWon,
    OWon,
    Draw,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        *self != GameStatus::InProgress
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstPlayerMode {
    Human,
    Engine,
    Random,
}

impl FromStr for FirstPlayerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(FirstPlayerMode::Human),
            "engine" => Ok(FirstPlayerMode::Engine),
            "random" => Ok(FirstPlayerMode::Random),
            other => Err(format!(
                "Unknown first player mode \"{}\" (expected human, engine or random)",
                other
            )),
        }
    }
}
