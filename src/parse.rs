use crate::{
    command::Command,
    redirect::Redirect,
    tokenize::{self, PIPE_DELIMITER},
};

pub const BACKGROUND_MARKER: &str = "&";

/// How one input line is to be executed. Only one transformation applies per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Simple(Command),
    Piped(Command, Command),
    Redirected(Command, Redirect),
    Background(Command),
}

#[cfg(test)]
impl ParsedLine {
    /// The command whose program runs first.
    pub fn first(&self) -> &Command {
        match self {
            Self::Simple(command)
            | Self::Piped(command, _)
            | Self::Redirected(command, _)
            | Self::Background(command) => command,
        }
    }
}

pub fn parse(line: &str) -> ParsedLine {
    let stages = tokenize::split(line, PIPE_DELIMITER);
    // Only one pipe is supported, stages after the second are dropped.
    if let [first, second, ..] = stages.as_slice() {
        return ParsedLine::Piped(Command::from_line(first), Command::from_line(second));
    }

    let mut command = Command::from_line(line);

    if command.last() == Some(BACKGROUND_MARKER) {
        command.terminate_at(command.len() - 1);
        return ParsedLine::Background(command);
    }

    match Redirect::strip_from(&mut command) {
        Some(redirect) => ParsedLine::Redirected(command, redirect),
        None => ParsedLine::Simple(command),
    }
}
