//! Console command vocabulary.

use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0:?}")]
    Unknown(String),
}

/// One line of console input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Config,
    ZoomIn,
    ZoomOut,
    Up,
    Down,
    Left,
    Right,
    SetRightAscension,
    SetDeclination,
    SetViewingAngle,
    Show,
    Exit,
}

impl Command {
    pub const ALL: [Command; 13] = [
        Command::Help,
        Command::Config,
        Command::ZoomIn,
        Command::ZoomOut,
        Command::Up,
        Command::Down,
        Command::Left,
        Command::Right,
        Command::SetRightAscension,
        Command::SetDeclination,
        Command::SetViewingAngle,
        Command::Show,
        Command::Exit,
    ];

    /// Text typed to issue the command
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Config => "config",
            Command::ZoomIn => "zoom in",
            Command::ZoomOut => "zoom out",
            Command::Up => "up",
            Command::Down => "down",
            Command::Left => "left",
            Command::Right => "right",
            Command::SetRightAscension => "set right ascension",
            Command::SetDeclination => "set declination",
            Command::SetViewingAngle => "set viewing angle",
            Command::Show => "show",
            Command::Exit => "exit",
        }
    }

    /// One-line description for the command listing
    pub fn summary(&self) -> &'static str {
        match self {
            Command::Help => "Guides you through the viewer and its commands.",
            Command::Config => "Shows the current right ascension, declination and viewing angle.",
            Command::ZoomIn => "Makes the viewing angle smaller, down to about 11 degrees.",
            Command::ZoomOut => "Makes the viewing angle bigger, up to 90 degrees.",
            Command::Up => "Turns the view north, stopping at +90 degrees.",
            Command::Down => "Turns the view south, stopping at -90 degrees.",
            Command::Left => "Turns the view toward increasing right ascension.",
            Command::Right => "Turns the view toward decreasing right ascension.",
            Command::SetRightAscension => "Sets the right ascension in hours and minutes.",
            Command::SetDeclination => "Sets the declination in degrees.",
            Command::SetViewingAngle => "Sets the viewing angle in degrees.",
            Command::Show => "Draws the sky for the current view.",
            Command::Exit => "Leaves the viewer.",
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        Command::ALL
            .into_iter()
            .find(|command| command.keyword() == text)
            .ok_or_else(|| CommandError::Unknown(text.to_string()))
    }
}

/// Follow-up answer to `help`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    About,
    Commands,
}

impl FromStr for HelpTopic {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "about" => Ok(HelpTopic::About),
            "commands" => Ok(HelpTopic::Commands),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Follow-up answer to `exit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
}

impl FromStr for Confirmation {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "y" => Ok(Confirmation::Yes),
            "n" => Ok(Confirmation::No),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
