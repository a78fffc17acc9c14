use rand::Rng;

use crate::config::Validate;
use crate::log;
use super::board::Board;
use super::bot_controller::{SearchStats, calculate_best_move_with_stats};
use super::settings::{OpponentMode, TicTacToeSettings};
use super::types::{FirstPlayerMode, GameStatus, Mark, Position};

#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    board: Board,
    settings: TicTacToeSettings,
    engine_mark: Option<Mark>,
    current_mark: Mark,
    status: GameStatus,
    last_move: Option<Position>,
    last_stats: Option<SearchStats>,
}

impl TicTacToeGameState {
    pub fn new(settings: TicTacToeSettings) -> Result<Self, String> {
        settings
            .validate()
            .map_err(|e| format!("Invalid game settings: {}", e))?;

        let mut state = Self {
            board: Board::new(),
            settings,
            engine_mark: None,
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            last_move: None,
            last_stats: None,
        };
        state.reset();
        Ok(state)
    }

    /// Clears the board and decides again who moves first.
    pub fn reset(&mut self) {
        self.board.reset();
        self.current_mark = Mark::X;
        self.status = GameStatus::InProgress;
        self.last_move = None;
        self.last_stats = None;
        self.engine_mark = match self.settings.opponent {
            OpponentMode::Human => None,
            OpponentMode::Engine => Some(resolve_engine_mark(self.settings.first_player)),
        };

        match self.engine_mark {
            Some(mark) => log!("New game, engine plays {}", mark),
            None => log!("New game, two human players"),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn engine_mark(&self) -> Option<Mark> {
        self.engine_mark
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    /// Search statistics of the most recent engine move in this game.
    pub fn last_stats(&self) -> Option<SearchStats> {
        self.last_stats
    }

    pub fn winner(&self) -> Option<Mark> {
        match self.status {
            GameStatus::XWon => Some(Mark::X),
            GameStatus::OWon => Some(Mark::O),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }

    pub fn is_engine_turn(&self) -> bool {
        !self.is_over() && self.engine_mark == Some(self.current_mark)
    }

    pub fn place_mark(&mut self, pos: Position) -> Result<(), String> {
        if self.is_over() {
            return Err("Game is already over".to_string());
        }

        if self.is_engine_turn() {
            return Err("Not your turn".to_string());
        }

        if !pos.is_in_bounds() {
            return Err("Position out of bounds".to_string());
        }

        if self.board.is_occupied(pos) {
            return Err("Cell is already marked".to_string());
        }

        log!("{} placed at {}", self.current_mark, pos);
        self.apply_move(pos);
        Ok(())
    }

    pub fn play_engine_move(&mut self) -> Result<Position, String> {
        if self.is_over() {
            return Err("Game is already over".to_string());
        }

        if !self.is_engine_turn() {
            return Err("Not the engine's turn".to_string());
        }

        let mut stats = SearchStats::default();
        let best_move =
            calculate_best_move_with_stats(&mut self.board, self.current_mark.is_maximizer(), &mut stats);
        let pos = best_move
            .position
            .ok_or_else(|| "Engine found no move on a non-terminal board".to_string())?;

        log!(
            "Engine {} chose {} with value {} ({} nodes, {} cutoffs)",
            self.current_mark,
            pos,
            best_move.value,
            stats.nodes_visited,
            stats.cutoffs
        );

        self.last_stats = Some(stats);
        self.apply_move(pos);
        Ok(pos)
    }

    fn apply_move(&mut self, pos: Position) {
        self.board.place(pos, self.current_mark);
        self.last_move = Some(pos);

        self.check_game_over();

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }
    }

    fn switch_turn(&mut self) {
        self.current_mark = if self.current_mark == Mark::X {
            Mark::O
        } else {
            Mark::X
        };
    }

    fn check_game_over(&mut self) {
        if let Some(winner_mark) = self.board.winner() {
            self.status = match winner_mark {
                Mark::X => GameStatus::XWon,
                Mark::O => GameStatus::OWon,
                Mark::Empty => unreachable!(),
            };
            log!("Game over, {} wins", winner_mark);
            return;
        }

        if !self.board.has_any_empty_cell() {
            self.status = GameStatus::Draw;
            log!("Game over, draw");
        }
    }
}

fn resolve_engine_mark(first_player: FirstPlayerMode) -> Mark {
    match first_player {
        FirstPlayerMode::Human => Mark::O,
        FirstPlayerMode::Engine => Mark::X,
        FirstPlayerMode::Random => {
            if rand::rng().random_bool(0.5) {
                Mark::X
            } else {
                Mark::O
            }
        }
    }
}
