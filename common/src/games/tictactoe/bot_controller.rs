use super::board::Board;
use super::types::{Mark, Position};

pub const WIN_SCORE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMove {
    pub value: i32,
    /// `None` when the board was already terminal.
    pub position: Option<Position>,
}

impl BestMove {
    fn terminal(value: i32) -> Self {
        Self {
            value,
            position: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub cutoffs: u64,
}

pub fn calculate_best_move(board: &mut Board, is_maximizing: bool) -> BestMove {
    minimax(board, is_maximizing, 0, i32::MIN, i32::MAX)
}

pub fn calculate_best_move_with_stats(
    board: &mut Board,
    is_maximizing: bool,
    stats: &mut SearchStats,
) -> BestMove {
    search(board, is_maximizing, 0, i32::MIN, i32::MAX, stats)
}

/// Minimax with alpha-beta pruning. X maximizes, O minimizes.
///
/// Every exploratory placement is undone before the next candidate is tried
/// and before returning, including on a cutoff, so `board` is unchanged when
/// this returns.
pub fn minimax(
    board: &mut Board,
    is_maximizing: bool,
    depth: i32,
    alpha: i32,
    beta: i32,
) -> BestMove {
    let mut stats = SearchStats::default();
    search(board, is_maximizing, depth, alpha, beta, &mut stats)
}

fn search(
    board: &mut Board,
    is_maximizing: bool,
    depth: i32,
    mut alpha: i32,
    mut beta: i32,
    stats: &mut SearchStats,
) -> BestMove {
    stats.nodes_visited += 1;

    match board.winner() {
        Some(Mark::X) => return BestMove::terminal(WIN_SCORE - depth),
        Some(Mark::O) => return BestMove::terminal(depth - WIN_SCORE),
        _ => {}
    }

    if !board.has_any_empty_cell() {
        return BestMove::terminal(0);
    }

    let mut best_move = BestMove {
        value: if is_maximizing { i32::MIN } else { i32::MAX },
        position: None,
    };
    let mark = Mark::for_side(is_maximizing);

    for pos in Position::all() {
        if board.is_occupied(pos) {
            continue;
        }

        board.place(pos, mark);
        let current = search(board, !is_maximizing, depth + 1, alpha, beta, stats);
        board.undo(pos);

        let improves = if is_maximizing {
            current.value > best_move.value
        } else {
            current.value < best_move.value
        };
        if improves {
            best_move = BestMove {
                value: current.value,
                position: Some(pos),
            };
        }

        if is_maximizing {
            alpha = alpha.max(best_move.value);
        } else {
            beta = beta.min(best_move.value);
        }

        if beta <= alpha {
            stats.cutoffs += 1;
            return best_move;
        }
    }

    best_move
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const E: Mark = Mark::Empty;
    const X: Mark = Mark::X;
    const O: Mark = Mark::O;

    /// Plain minimax without pruning, same scoring and tie-break.
    fn exhaustive_minimax(board: &mut Board, is_maximizing: bool, depth: i32) -> BestMove {
        match board.winner() {
            Some(Mark::X) => return BestMove::terminal(WIN_SCORE - depth),
            Some(Mark::O) => return BestMove::terminal(depth - WIN_SCORE),
            _ => {}
        }
        if !board.has_any_empty_cell() {
            return BestMove::terminal(0);
        }

        let mark = Mark::for_side(is_maximizing);
        let mut best = BestMove {
            value: if is_maximizing { i32::MIN } else { i32::MAX },
            position: None,
        };
        for pos in board.available_moves() {
            board.place(pos, mark);
            let value = exhaustive_minimax(board, !is_maximizing, depth + 1).value;
            board.undo(pos);
            if (is_maximizing && value > best.value) || (!is_maximizing && value < best.value) {
                best = BestMove {
                    value,
                    position: Some(pos),
                };
            }
        }
        best
    }

    /// Every board reachable from the empty board by alternating play, X first,
    /// paired with whether X is to move.
    fn reachable_boards() -> Vec<(Board, bool)> {
        fn visit(
            board: &mut Board,
            x_to_move: bool,
            seen: &mut HashSet<Board>,
            out: &mut Vec<(Board, bool)>,
        ) {
            if !seen.insert(*board) {
                return;
            }
            out.push((*board, x_to_move));
            if board.is_terminal() {
                return;
            }
            for pos in board.available_moves() {
                board.place(pos, Mark::for_side(x_to_move));
                visit(board, !x_to_move, seen, out);
                board.undo(pos);
            }
        }

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        visit(&mut Board::new(), true, &mut seen, &mut out);
        out
    }

    #[test]
    fn test_reachable_board_count() {
        assert_eq!(reachable_boards().len(), 5478);
    }

    #[test]
    fn test_empty_board_is_a_draw_and_opens_in_corner() {
        let mut board = Board::new();
        let best = calculate_best_move(&mut board, true);

        assert_eq!(best.value, 0);
        assert_eq!(best.position, Some(Position::new(0, 0)));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_takes_immediate_win() {
        #[rustfmt::skip]
        let mut board = Board::from_rows([
            [X, X, E],
            [O, O, E],
            [E, E, E],
        ]);
        let best = calculate_best_move(&mut board, true);

        assert_eq!(best.position, Some(Position::new(0, 2)));
        assert_eq!(best.value, WIN_SCORE - 1);
    }

    #[test]
    fn test_minimizer_takes_immediate_win() {
        #[rustfmt::skip]
        let mut board = Board::from_rows([
            [X, X, E],
            [O, O, E],
            [X, E, E],
        ]);
        let best = calculate_best_move(&mut board, false);

        assert_eq!(best.position, Some(Position::new(1, 2)));
        assert_eq!(best.value, 1 - WIN_SCORE);
    }

    #[test]
    fn test_minimizer_blocks_open_row() {
        #[rustfmt::skip]
        let mut board = Board::from_rows([
            [X, X, E],
            [E, O, E],
            [E, E, E],
        ]);
        let best = calculate_best_move(&mut board, false);

        assert_eq!(best.position, Some(Position::new(0, 2)));
    }

    #[test]
    fn test_prefers_faster_win() {
        // (2, 2) wins now; (0, 2) would also force a win but later.
        #[rustfmt::skip]
        let mut board = Board::from_rows([
            [X, E, E],
            [O, X, E],
            [O, E, E],
        ]);
        let best = calculate_best_move(&mut board, true);

        assert_eq!(best.value, WIN_SCORE - 1);
        assert_eq!(best.position, Some(Position::new(2, 2)));
    }

    #[test]
    fn test_terminal_board_returns_no_move() {
        #[rustfmt::skip]
        let mut won = Board::from_rows([
            [X, X, X],
            [O, O, E],
            [E, E, E],
        ]);
        assert_eq!(
            calculate_best_move(&mut won, false),
            BestMove { value: WIN_SCORE, position: None }
        );

        #[rustfmt::skip]
        let mut lost = Board::from_rows([
            [O, O, O],
            [X, X, E],
            [X, E, E],
        ]);
        assert_eq!(
            minimax(&mut lost, true, 3, i32::MIN, i32::MAX),
            BestMove { value: 3 - WIN_SCORE, position: None }
        );

        #[rustfmt::skip]
        let mut drawn = Board::from_rows([
            [X, O, X],
            [X, O, O],
            [O, X, X],
        ]);
        assert_eq!(
            calculate_best_move(&mut drawn, true),
            BestMove { value: 0, position: None }
        );
    }

    #[test]
    fn test_search_leaves_board_unchanged() {
        for (board, x_to_move) in reachable_boards() {
            let mut searched = board;
            calculate_best_move(&mut searched, x_to_move);
            assert_eq!(searched, board);
        }
    }

    #[test]
    fn test_narrow_window_leaves_board_unchanged_and_bounds_value() {
        for (board, x_to_move) in reachable_boards() {
            if board.is_terminal() {
                continue;
            }
            let mut exhaustive_board = board;
            let exact = exhaustive_minimax(&mut exhaustive_board, x_to_move, 0).value;

            for (alpha, beta) in [(-1, 1), (0, 1), (-9, -5), (5, 9)] {
                let mut searched = board;
                let result = minimax(&mut searched, x_to_move, 0, alpha, beta);
                assert_eq!(searched, board, "window ({}, {}):\n{}", alpha, beta, board);

                let pos = result.position.expect("non-terminal board must yield a move");
                assert!(board.is_empty(pos));

                if exact <= alpha {
                    assert!(result.value <= alpha, "fail low expected:\n{}", board);
                } else if exact >= beta {
                    assert!(result.value >= beta, "fail high expected:\n{}", board);
                } else {
                    assert_eq!(result.value, exact, "board:\n{}", board);
                }
            }
        }
    }

    #[test]
    fn test_pruning_matches_exhaustive_value() {
        for (board, x_to_move) in reachable_boards() {
            if board.is_terminal() {
                continue;
            }
            let mut pruned_board = board;
            let mut exhaustive_board = board;
            let pruned = calculate_best_move(&mut pruned_board, x_to_move);
            let exhaustive = exhaustive_minimax(&mut exhaustive_board, x_to_move, 0);

            assert_eq!(pruned.value, exhaustive.value, "board:\n{}", board);
            assert!(pruned.position.is_some());
        }
    }

    #[test]
    fn test_chosen_move_achieves_reported_value() {
        for (board, x_to_move) in reachable_boards() {
            if board.is_terminal() {
                continue;
            }
            let mut scratch = board;
            let best = calculate_best_move(&mut scratch, x_to_move);
            let pos = best.position.expect("non-terminal board must yield a move");
            assert!(board.is_empty(pos));

            scratch.place(pos, Mark::for_side(x_to_move));
            let reply = exhaustive_minimax(&mut scratch, !x_to_move, 1);
            assert_eq!(reply.value, best.value, "board:\n{}", board);
        }
    }

    #[test]
    fn test_search_is_deterministic() {
        #[rustfmt::skip]
        let board = Board::from_rows([
            [X, E, E],
            [E, O, E],
            [E, E, E],
        ]);
        let mut first_board = board;
        let mut second_board = board;
        let first = calculate_best_move(&mut first_board, true);
        let second = calculate_best_move(&mut second_board, true);
        assert_eq!(first, second);
    }

    #[test]
    fn test_stats_do_not_change_result() {
        let mut board = Board::new();
        let mut stats = SearchStats::default();
        let with_stats = calculate_best_move_with_stats(&mut board, true, &mut stats);

        assert_eq!(with_stats, calculate_best_move(&mut board, true));
        assert!(stats.nodes_visited > 0);
        assert!(stats.cutoffs > 0);
    }

    #[test]
    fn test_pruning_visits_fewer_nodes_than_full_tree() {
        // The unpruned game tree from the empty board has 549946 nodes.
        let mut board = Board::new();
        let mut stats = SearchStats::default();
        calculate_best_move_with_stats(&mut board, true, &mut stats);

        assert!(stats.nodes_visited < 549_946);
    }
}
