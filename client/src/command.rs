use std::str::FromStr;

use common::games::tictactoe::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Place(Position),
    NewGame,
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" | "n" => Ok(ConsoleCommand::NewGame),
            "help" | "h" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "q" | "exit" => Ok(ConsoleCommand::Quit),
            other => other.parse::<Position>().map(ConsoleCommand::Place),
        }
    }
}
