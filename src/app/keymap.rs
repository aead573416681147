//! Command mapping for the dirscope front end.
//!
//! Maps one input line to a [Command]. Each command has a few aliases, the same way
//! several keys can trigger one action.

use crate::core::error::SortError;
use crate::core::sort::SortKey;

use thiserror::Error;

/// One front-end command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Enter(String),
    Back,
    Sort(SortKey),
    Toggle,
    Pwd,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Sort(#[from] SortError),
}

impl Command {
    /// Parses a line. Blank lines yield `Ok(None)`.
    #[rustfmt::skip]
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        let cmd = match word {
            "ls" | "l"                => Command::List,
            "cd" | "open" | "o"       => Command::Enter(required(rest, "cd")?.to_string()),
            "back" | "b" | ".."       => Command::Back,
            "sort" | "s"              => Command::Sort(required(rest, "sort")?.parse()?),
            "toggle" | "t" | "u"      => Command::Toggle,
            "pwd"                     => Command::Pwd,
            "help" | "?"              => Command::Help,
            "quit" | "q" | "exit"     => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(cmd))
    }
}

fn required<'a>(arg: &'a str, cmd: &'static str) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument(cmd))
    } else {
        Ok(arg)
    }
}
