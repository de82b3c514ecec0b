//! Client execution logic with reconnection support.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::{
    domain::ReconnectPolicy,
    error::ClientError,
    session::{Profile, run_client_session},
    ui::spawn_line_reader,
};

/// Connection settings given on the command line
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// WebSocket endpoint, e.g. `ws://127.0.0.1:5000/ws`
    pub url: String,
    /// Display name to identify with on connect
    pub name: Option<String>,
    /// Room to join on connect
    pub room: Option<String>,
    pub reconnect: ReconnectPolicy,
}

/// Run sessions until the user quits, reconnecting with the last known profile
pub async fn run_client(options: ClientOptions) -> Result<(), ClientError> {
    let ClientOptions {
        url,
        name,
        room,
        reconnect,
    } = options;

    let profile = Arc::new(Mutex::new(Profile { name, room }));
    let mut input_rx = spawn_line_reader();
    let mut failures = 0;

    loop {
        tracing::info!(
            "Connecting to {} (attempt {}/{})",
            url,
            failures + 1,
            reconnect.max_attempts
        );

        let error = match run_client_session(&url, profile.clone(), &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Input closed, leaving");
                return Ok(());
            }
            Err(e) => e,
        };

        if ReconnectPolicy::is_fatal(&error) {
            tracing::error!("{}", error);
            tracing::error!("Pick another name with --name and try again.");
            return Err(error);
        }

        tracing::warn!("Connection lost: {}", error);
        failures += 1;

        if !reconnect.should_retry(&error, failures) {
            tracing::error!("Gave up after {} attempts", reconnect.max_attempts);
            return Err(error);
        }

        tracing::info!("Reconnecting in {:?}...", reconnect.interval);
        tokio::time::sleep(reconnect.interval).await;
    }
}
