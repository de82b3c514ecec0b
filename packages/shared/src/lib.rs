//! Utilities shared by the Hiroma server and client.

pub mod logger;
pub mod time;
