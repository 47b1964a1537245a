use hangman::cli::{Cli, CliInterface, parse_cli};
use hangman::logging::init_logging;
use hangman::storage::{FileStore, GameStore, MemoryStore};
use hangman::tui::TuiInterface;
use hangman::wordbank::{RngPicker, WordPicker};
use hangman::{GameEngine, game_loop};
use std::io;

fn main() {
    let cli = parse_cli();

    if let Err(e) = init_logging(cli.log_file.as_deref(), !cli.plain) {
        eprintln!("Failed to open log file: {e}");
        return;
    }

    let picker = match cli.seed {
        Some(seed) => RngPicker::seeded(seed),
        None => RngPicker::from_entropy(),
    };

    if cli.no_save {
        run(&cli, MemoryStore::new(), picker);
        return;
    }

    match cli.state_file.clone().or_else(FileStore::default_path) {
        Some(path) => {
            log::info!("Using save file {}", path.display());
            run(&cli, FileStore::new(path), picker);
        }
        None => {
            log::warn!("No data directory available, the game will not be saved");
            run(&cli, MemoryStore::new(), picker);
        }
    }
}

fn run<S: GameStore, P: WordPicker>(cli: &Cli, store: S, picker: P) {
    let mut engine = GameEngine::start(store, picker);

    if cli.plain {
        let mut interface = CliInterface::new(io::stdin().lock()).show_word(cli.show_word);
        game_loop(&mut engine, &mut interface);
        return;
    }

    match TuiInterface::new(cli.show_word) {
        Ok(mut interface) => game_loop(&mut engine, &mut interface),
        Err(e) => eprintln!("Failed to start the terminal interface: {e}"),
    }
}
