//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server refused the display name given on startup
    #[error("Name rejected ({code}): {message}")]
    NameRejected { code: String, message: String },

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors in a line typed by the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Usage: {0}")]
    MissingArgument(&'static str),

    #[error("Typing flag must be 'on' or 'off', got '{0}'")]
    InvalidTypingFlag(String),

    #[error("Unknown command '/{0}'. Type /help for the list of commands")]
    UnknownCommand(String),
}
