use super::types::{BOARD_SIZE, Mark};

/// Diagonals are checked before rows and columns. A diagonal win reports the
/// center cell and a row or column win at index `i` reports cell `(i, i)`.
/// Both cells lie on every line that can report them, so the reported mark is
/// always the mark of the completed line.
pub fn check_win(board: &[[Mark; BOARD_SIZE]; BOARD_SIZE]) -> Option<Mark> {
    let mut main_diagonal_wins = true;
    let mut secondary_diagonal_wins = true;
    for i in 1..BOARD_SIZE {
        let last = BOARD_SIZE - 1;
        main_diagonal_wins = main_diagonal_wins
            && board[i][i] != Mark::Empty
            && board[i][i] == board[i - 1][i - 1];
        secondary_diagonal_wins = secondary_diagonal_wins
            && board[i][last - i] != Mark::Empty
            && board[i][last - i] == board[i - 1][last - i + 1];
    }
    if main_diagonal_wins || secondary_diagonal_wins {
        return Some(board[1][1]);
    }

    for i in 0..BOARD_SIZE {
        let mut row_wins = true;
        let mut col_wins = true;
        for j in 1..BOARD_SIZE {
            row_wins = row_wins && board[i][j] != Mark::Empty && board[i][j - 1] == board[i][j];
            col_wins = col_wins && board[j][i] != Mark::Empty && board[j - 1][i] == board[j][i];
        }
        if row_wins || col_wins {
            return Some(board[i][i]);
        }
    }

    None
}
