mod board;
mod bot_controller;
mod game_state;
mod settings;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{
    BestMove, SearchStats, WIN_SCORE, calculate_best_move, calculate_best_move_with_stats, minimax,
};
pub use game_state::TicTacToeGameState;
pub use settings::{OpponentMode, TicTacToeSettings};
pub use types::{BOARD_SIZE, FirstPlayerMode, GameStatus, Mark, Position};
pub use win_detector::check_win;
