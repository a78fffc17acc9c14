use std::fmt;

use super::types::{BOARD_SIZE, Mark, Position};
use super::win_detector::check_win;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Mark::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn from_rows(cells: [[Mark; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn rows(&self) -> &[[Mark; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn get(&self, pos: Position) -> Mark {
        self.cells[pos.row][pos.col]
    }

    /// Caller must check the cell is empty first.
    pub fn place(&mut self, pos: Position, mark: Mark) {
        debug_assert!(self.is_empty(pos), "cell {} is already occupied", pos);
        debug_assert!(mark != Mark::Empty, "cannot place an empty mark");
        self.cells[pos.row][pos.col] = mark;
    }

    /// Clears a cell placed by the search while backtracking.
    pub fn undo(&mut self, pos: Position) {
        self.cells[pos.row][pos.col] = Mark::Empty;
    }

    pub fn reset(&mut self) {
        self.cells = [[Mark::Empty; BOARD_SIZE]; BOARD_SIZE];
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos) != Mark::Empty
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Mark::Empty
    }

    pub fn has_any_empty_cell(&self) -> bool {
        self.cells
            .iter()
            .any(|row| row.iter().any(|&cell| cell == Mark::Empty))
    }

    pub fn available_moves(&self) -> Vec<Position> {
        Position::all().filter(|&pos| self.is_empty(pos)).collect()
    }

    pub fn mark_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Mark::Empty)
            .count()
    }

    pub fn winner(&self) -> Option<Mark> {
        check_win(&self.cells)
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || !self.has_any_empty_cell()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(|mark| mark.to_string()).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
