use crate::engine::{GameInterface, UserAction};
use crate::game_state::{ALPHABET, GameState, INITIAL_TRIES, Outcome};
use crate::input::key_action;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// Hangman in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use the line-based interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Where the game is saved (defaults to the local data directory)
    #[arg(long = "state-file", value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Keep the game in memory only
    #[arg(long = "no-save", conflicts_with = "state_file")]
    pub no_save: bool,

    /// Seed for word selection, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Show the hidden word next to the tries counter
    #[arg(long = "show-word")]
    pub show_word: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// Line-mode input/output

pub enum LineInput {
    Key(char),
    Reset,
    Exit,
    Invalid,
}

pub fn read_line_input<R: BufRead>(reader: &mut R) -> LineInput {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => return LineInput::Exit,
        Ok(_) => {}
    }
    let input = input.trim();

    let mut chars = input.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return LineInput::Key(c);
    }

    match input.to_ascii_lowercase().as_str() {
        "exit" | "quit" => LineInput::Exit,
        "new" | "reset" => LineInput::Reset,
        _ => LineInput::Invalid,
    }
}

fn keyboard_line(state: &GameState) -> String {
    ALPHABET
        .iter()
        .map(|&c| if state.is_letter_used(c) { '·' } else { c })
        .collect::<String>()
}

pub fn render_state(state: &GameState, show_word: bool) -> String {
    let mut out = String::new();
    if show_word {
        out.push_str(&format!("Word: {}\n", state.chosen_word()));
    }
    out.push_str(&format!("Tries left: {}/{INITIAL_TRIES}\n", state.tries()));

    match state.outcome() {
        Some(outcome) => {
            let banner = match outcome {
                Outcome::Won => "You won!",
                Outcome::Lost => "You lost!",
            };
            out.push_str(&format!("{banner}\n"));
            out.push_str(&format!("The word was: {}\n", state.chosen_word()));
            out.push_str("Type 'new' to play again or 'exit' to quit.");
        }
        None => {
            out.push_str(&format!("\n  {}\n\n", state.masked_word()));
            out.push_str(&format!("Letters: {}\n", keyboard_line(state)));
            out.push_str(&format!("Used: {}\n", state.used_letters_text()));
            out.push_str("Enter a letter ('new' restarts, 'exit' quits):");
        }
    }
    out
}

/// Line-based [`GameInterface`] over any `BufRead`.
pub struct CliInterface<R: BufRead> {
    reader: R,
    show_word: bool,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            show_word: false,
        }
    }

    #[must_use]
    pub fn show_word(mut self, show_word: bool) -> Self {
        self.show_word = show_word;
        self
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_state(&mut self, state: &GameState) {
        println!("\n{}", render_state(state, self.show_word));
    }

    fn read_action(&mut self, state: &GameState) -> Option<UserAction> {
        match read_line_input(&mut self.reader) {
            LineInput::Key(c) => {
                let action = key_action(c, state.is_game_over());
                if action.is_none() {
                    println!("The game is over. Type 'new' to play again.");
                }
                action
            }
            LineInput::Reset => Some(UserAction::Reset),
            LineInput::Exit => Some(UserAction::Exit),
            LineInput::Invalid => {
                println!("Please enter a single letter.");
                None
            }
        }
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }
}
