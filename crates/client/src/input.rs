//! Parses the player's typed lines into runtime commands.

use game_core::Command;

/// One line of player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Play(Command),
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("type a number, `buy <item>`, `close`, `help` or `quit`")]
    Unrecognized,

    #[error("which item? usage: buy <item>")]
    MissingItem,

    #[error("{0} is out of range")]
    OutOfRange(String),
}

pub const HELP: &str = "\
Commands:
  <number>     answer the current problem
  buy <item>   buy an item while the shop is open
  close        leave the shop
  help         show this text
  quit         exit (progress is saved after each win and in the shop)";

/// Parses a trimmed input line. Empty lines yield `None`.
pub fn parse(line: &str) -> Option<Result<Input, InputError>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut words = line.split_whitespace();
    let head = words.next()?.to_ascii_lowercase();

    let parsed = match head.as_str() {
        "quit" | "exit" | "q" => Ok(Input::Quit),
        "help" | "?" => Ok(Input::Help),
        "close" | "leave" => Ok(Input::Play(Command::CloseShop)),
        "buy" => match words.next() {
            Some(id) => Ok(Input::Play(Command::PurchaseItem { id: id.to_string() })),
            None => Err(InputError::MissingItem),
        },
        _ => parse_answer(line),
    };
    Some(parsed)
}

fn parse_answer(line: &str) -> Result<Input, InputError> {
    let is_number = line
        .strip_prefix('-')
        .unwrap_or(line)
        .chars()
        .all(|c| c.is_ascii_digit());
    if !is_number || line == "-" {
        return Err(InputError::Unrecognized);
    }

    line.parse::<i32>()
        .map(|value| Input::Play(Command::SubmitAnswer { value }))
        .map_err(|_| InputError::OutOfRange(line.to_string()))
}
