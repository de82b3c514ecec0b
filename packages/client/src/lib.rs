//! Hiroma CLI chat client.
//!
//! Connects to a Hiroma server over WebSocket, identifies, joins a room, and
//! relays lines typed on stdin as chat messages.

pub mod command;
pub mod domain;
pub mod error;
pub mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::{ClientOptions, run_client};
