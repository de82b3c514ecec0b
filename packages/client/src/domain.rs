//! Client-side decisions kept free of I/O.
//!
//! Which server errors end the client for good, and how long the client keeps
//! trying to get back to the relay after the connection drops.

use std::time::Duration;

use crate::error::ClientError;

/// Error codes that mean the requested display name can never be accepted
const NAME_REJECTION_CODES: [&str; 3] = ["NameTaken", "NameEmpty", "AlreadyIdentified"];

/// Check if an `error` event code rejects the display name.
pub fn is_name_rejection(code: &str) -> bool {
    NAME_REJECTION_CODES.contains(&code)
}

/// How the client retries after losing the connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            interval: Duration::from_secs(5),
        }
    }
}

impl ReconnectPolicy {
    /// A rejected name is final: reconnecting would be rejected again.
    pub fn is_fatal(error: &ClientError) -> bool {
        matches!(error, ClientError::NameRejected { .. })
    }

    /// `failures` counts the connection losses so far, including the latest one.
    pub fn should_retry(&self, error: &ClientError, failures: u32) -> bool {
        !Self::is_fatal(error) && failures < self.max_attempts
    }
}
