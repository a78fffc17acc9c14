use std::io::{BufRead, Write};

use common::games::tictactoe::{BOARD_SIZE, Board, GameStatus, TicTacToeGameState};
use common::log;

use crate::command::ConsoleCommand;

const HELP: &str = "Commands: \"<row> <col>\" places a mark (0-based), \"new\" starts a new game, \"quit\" exits.";

pub struct Console<R: BufRead, W: Write> {
    input: R,
    output: W,
    show_engine_stats: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, show_engine_stats: bool) -> Self {
        Self {
            input,
            output,
            show_engine_stats,
        }
    }

    /// Runs rounds until the player quits or input ends.
    pub fn run(&mut self, game: &mut TicTacToeGameState) -> Result<(), String> {
        self.write_line(HELP)?;
        self.render(game.board())?;

        loop {
            if game.is_engine_turn() {
                let pos = game.play_engine_move()?;
                self.write_line(&format!("Engine ({}) plays {}", game.board().get(pos), pos))?;
                if self.show_engine_stats
                    && let Some(stats) = game.last_stats()
                {
                    self.write_line(&format!(
                        "  searched {} nodes, {} cutoffs",
                        stats.nodes_visited, stats.cutoffs
                    ))?;
                }
                self.render(game.board())?;
                self.report_game_over(game)?;
                continue;
            }

            if game.is_over() {
                self.prompt("Type \"new\" for a new game or \"quit\" to exit: ")?;
            } else {
                self.prompt(&format!("{} to move: ", game.current_mark()))?;
            }

            let Some(line) = self.read_line()? else {
                log!("Input closed");
                return Ok(());
            };
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<ConsoleCommand>() {
                Ok(ConsoleCommand::Place(pos)) => {
                    if let Err(e) = game.place_mark(pos) {
                        self.write_line(&e)?;
                        continue;
                    }
                    self.render(game.board())?;
                    self.report_game_over(game)?;
                }
                Ok(ConsoleCommand::NewGame) => {
                    game.reset();
                    self.render(game.board())?;
                }
                Ok(ConsoleCommand::Help) => self.write_line(HELP)?,
                Ok(ConsoleCommand::Quit) => return Ok(()),
                Err(e) => self.write_line(&e)?,
            }
        }
    }

    fn report_game_over(&mut self, game: &TicTacToeGameState) -> Result<(), String> {
        let message = match game.status() {
            GameStatus::InProgress => return Ok(()),
            GameStatus::Draw => "Draw!".to_string(),
            GameStatus::XWon | GameStatus::OWon => {
                let winner = game.winner().map(|mark| mark.to_string()).unwrap_or_default();
                if game.engine_mark() == game.winner() {
                    format!("Engine ({}) wins", winner)
                } else {
                    format!("Player {} wins", winner)
                }
            }
        };
        self.write_line(&message)
    }

    fn render(&mut self, board: &Board) -> Result<(), String> {
        let header: Vec<String> = (0..BOARD_SIZE).map(|col| col.to_string()).collect();
        self.write_line(&format!("  {}", header.join(" ")))?;
        for (row, cells) in board.rows().iter().enumerate() {
            let cells: Vec<String> = cells.iter().map(|mark| mark.to_string()).collect();
            self.write_line(&format!("{} {}", row, cells.join(" ")))?;
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<(), String> {
        write!(self.output, "{}", text).map_err(|e| format!("Failed to write output: {}", e))?;
        self.output
            .flush()
            .map_err(|e| format!("Failed to flush output: {}", e))
    }

    fn write_line(&mut self, text: &str) -> Result<(), String> {
        writeln!(self.output, "{}", text).map_err(|e| format!("Failed to write output: {}", e))
    }

    fn read_line(&mut self) -> Result<Option<String>, String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| format!("Failed to read input: {}", e))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
