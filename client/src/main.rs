mod command;
mod config;
mod console;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use common::games::tictactoe::{FirstPlayerMode, OpponentMode, TicTacToeGameState};
use common::{log, logger};

use config::{Config, get_config_manager, get_config_path};
use console::Console;

#[derive(Parser)]
#[command(name = "tictactoe", version, about = "Tic-tac-toe against a perfect-play engine")]
struct Args {
    /// Path to the YAML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Who moves first: human, engine or random
    #[arg(long)]
    first_player: Option<FirstPlayerMode>,

    /// Play against another human instead of the engine
    #[arg(long, conflicts_with = "first_player")]
    hotseat: bool,

    /// Print search statistics after each engine move
    #[arg(long)]
    show_stats: bool,

    /// Write diagnostic log lines to stderr
    #[arg(long)]
    verbose: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

fn load_config(path: PathBuf) -> Config {
    let manager = get_config_manager(path.clone());
    match manager.get_config() {
        Ok(config) => {
            log!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            eprintln!("{}; using default settings", e);
            Config::default()
        }
    }
}

fn apply_overrides(args: &Args, config: &mut Config) {
    if let Some(first_player) = args.first_player {
        config.game.first_player = first_player;
    }
    if args.hotseat {
        config.game.opponent = OpponentMode::Human;
        config.game.first_player = FirstPlayerMode::Human;
    }
    if args.show_stats {
        config.show_engine_stats = true;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);
    log!("Tic-tac-toe {}", common::version::VERSION);

    let mut config = load_config(args.config.clone().unwrap_or_else(get_config_path));
    apply_overrides(&args, &mut config);

    let mut game = TicTacToeGameState::new(config.game)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(stdin.lock(), stdout.lock(), config.show_engine_stats).run(&mut game)?;

    log!("Exiting");
    Ok(())
}
