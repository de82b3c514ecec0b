//! Hiroma chat relay server library.
//!
//! Clients connect over WebSocket, claim a display name, join one room at a
//! time, and exchange messages broadcast to everyone in the same room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
