//! Keyboard input to player commands.

use shared::protocol::PlayerCommand;
use thiserror::Error;

pub const HELP: &str =
    "commands: n/next, p/prev, space/play/pause/toggle, r/reset, speed <ms>, +/- slower/faster, h/help, q/quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(PlayerCommand),
    /// Move the delay this many slider notches; positive is slower.
    Nudge(i64),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command '{0}', type 'help' for the list")]
    Unknown(String),
    #[error("speed expects milliseconds, got '{0}'")]
    BadSpeed(String),
}

pub fn parse_input(line: &str) -> Result<Input, InputError> {
    // A bare space toggles playback, so only trim line endings first.
    let line = line.trim_end_matches(['\r', '\n']);
    if line == " " {
        return Ok(Input::Command(PlayerCommand::TogglePlay));
    }

    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(Input::Command(PlayerCommand::Next));
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "n" | "next" => PlayerCommand::Next,
        "p" | "prev" | "previous" => PlayerCommand::Previous,
        "t" | "toggle" => PlayerCommand::TogglePlay,
        "play" => PlayerCommand::Play,
        "pause" => PlayerCommand::Pause,
        "r" | "reset" => PlayerCommand::Reset,
        "s" | "speed" => {
            let raw = words.next().unwrap_or_default();
            let ms = raw
                .parse::<u64>()
                .map_err(|_| InputError::BadSpeed(raw.to_string()))?;
            PlayerCommand::SetSpeed { ms }
        }
        "+" | "slower" => return Ok(Input::Nudge(1)),
        "-" | "faster" => return Ok(Input::Nudge(-1)),
        "h" | "help" | "?" => return Ok(Input::Help),
        "q" | "quit" | "exit" => return Ok(Input::Quit),
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(Input::Command(command))
}

pub fn command_name(command: &PlayerCommand) -> &'static str {
    match command {
        PlayerCommand::Next => "next",
        PlayerCommand::Previous => "previous",
        PlayerCommand::TogglePlay => "toggle_play",
        PlayerCommand::Play => "play",
        PlayerCommand::Pause => "pause",
        PlayerCommand::Reset => "reset",
        PlayerCommand::SetSpeed { .. } => "set_speed",
    }
}
