//! Parsing of lines typed by the user.
//!
//! Lines starting with `/` are commands; anything else is a chat message.

use hiroma_server::infrastructure::dto::websocket::ClientMessage;

use crate::error::CommandError;

/// What a typed line asks the client to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Send an event to the server
    Event(ClientMessage),
    /// Show the command list locally
    Help,
}

/// Help text shown for `/help`
pub const HELP: &str = "\
Commands:
  /name <name>       set your display name
  /join <room_id>    join a room (leaving the current one)
  /rooms             list rooms
  /typing on|off     tell the room you are typing
  /help              show this help
Anything else is sent as a message to the current room.";

/// Parse one line of user input.
///
/// The line is expected to be trimmed and non-empty.
pub fn parse_input(line: &str) -> Result<Input, CommandError> {
    let Some(command) = line.strip_prefix('/') else {
        return Ok(Input::Event(ClientMessage::SendMessage {
            text: line.to_string(),
        }));
    };

    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (command, ""),
    };

    match name {
        "name" if argument.is_empty() => Err(CommandError::MissingArgument("/name <name>")),
        "name" => Ok(Input::Event(ClientMessage::Identify {
            name: argument.to_string(),
        })),
        "join" if argument.is_empty() => Err(CommandError::MissingArgument("/join <room_id>")),
        "join" => Ok(Input::Event(ClientMessage::Join {
            room_id: argument.to_string(),
        })),
        "rooms" => Ok(Input::Event(ClientMessage::ListRooms)),
        "typing" => match argument {
            "on" => Ok(Input::Event(ClientMessage::Typing { flag: true })),
            "off" => Ok(Input::Event(ClientMessage::Typing { flag: false })),
            "" => Err(CommandError::MissingArgument("/typing on|off")),
            other => Err(CommandError::InvalidTypingFlag(other.to_string())),
        },
        "help" => Ok(Input::Help),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}
