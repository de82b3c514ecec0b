//! WebSocket client session management.

use std::sync::Arc;

use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use hiroma_server::infrastructure::dto::websocket::{ClientMessage, ServerMessage};
use tokio::{
    net::TcpStream,
    sync::{Mutex, mpsc},
};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use crate::{
    command::{HELP, Input, parse_input},
    domain::is_name_rejection,
    error::ClientError,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Identity carried across reconnects
///
/// Updated from `identified` / `joined_room` events so that a reconnect
/// restores whatever name and room the user ended up with.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub name: Option<String>,
    pub room: Option<String>,
}

/// Run the WebSocket client session
///
/// # Returns
///
/// * `Ok(())` - the user closed the input (Ctrl+C / Ctrl+D)
/// * `Err(ClientError)` - the connection was lost or the name was rejected
pub async fn run_client_session(
    url: &str,
    profile: Arc<Mutex<Profile>>,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    println!(
        "\nType messages and press Enter to send. Type /help for commands. Press Ctrl+C to exit.\n"
    );

    let (mut write, read) = ws_stream.split();

    // Identify and join with the last known profile
    let (name, room) = {
        let profile = profile.lock().await;
        (profile.name.clone(), profile.room.clone())
    };
    let awaiting_identify = name.is_some();
    if let Some(name) = name {
        send_event(&mut write, &ClientMessage::Identify { name }).await?;
    }
    if let Some(room_id) = room {
        send_event(&mut write, &ClientMessage::Join { room_id }).await?;
    }
    redisplay_prompt();

    // Spawn a task to handle incoming events
    let mut read_task = tokio::spawn(read_loop(read, profile, awaiting_identify));

    // Forward user input until it closes, or until the read side ends the session
    tokio::select! {
        read_result = &mut read_task => {
            Err(read_result.unwrap_or_else(|e| ClientError::ConnectionError(e.to_string())))
        }
        write_result = write_loop(&mut write, input_rx) => {
            read_task.abort();
            write_result
        }
    }
}

async fn send_event(
    write: &mut SplitSink<WsStream, Message>,
    event: &ClientMessage,
) -> Result<(), ClientError> {
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize event: {}", e);
            return Ok(());
        }
    };

    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}

async fn write_loop(
    write: &mut SplitSink<WsStream, Message>,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    while let Some(line) = input_rx.recv().await {
        match parse_input(&line) {
            Ok(Input::Event(event)) => send_event(write, &event).await?,
            Ok(Input::Help) => print!("\n{}\n", HELP),
            Err(e) => print!("\n{}\n", e),
        }
        redisplay_prompt();
    }

    Ok(())
}

/// Render incoming events until the connection ends
///
/// Returns the reason the session ended.
async fn read_loop(
    mut read: SplitStream<WsStream>,
    profile: Arc<Mutex<Profile>>,
    mut awaiting_identify: bool,
) -> ClientError {
    while let Some(message) = read.next().await {
        match message {
            Ok(Message::Text(text)) => {
                let Ok(event) = serde_json::from_str::<ServerMessage>(text.as_str()) else {
                    print!("{}", MessageFormatter::format_raw_message(text.as_str()));
                    redisplay_prompt();
                    continue;
                };

                let me = {
                    let mut profile = profile.lock().await;
                    match &event {
                        ServerMessage::Identified { name } => {
                            awaiting_identify = false;
                            profile.name = Some(name.clone());
                        }
                        ServerMessage::JoinedRoom { room_id, .. } => {
                            profile.room = Some(room_id.clone());
                        }
                        ServerMessage::Error { code, message }
                            if awaiting_identify && is_name_rejection(code) =>
                        {
                            return ClientError::NameRejected {
                                code: code.clone(),
                                message: message.clone(),
                            };
                        }
                        _ => {}
                    }
                    profile.name.clone()
                };

                print!("{}", MessageFormatter::format_event(&event, me.as_deref()));
                redisplay_prompt();
            }
            Ok(Message::Binary(data)) => {
                print!("{}", MessageFormatter::format_binary_message(data.len()));
                redisplay_prompt();
            }
            Ok(Message::Close(_)) => {
                tracing::info!("Server closed the connection");
                break;
            }
            Err(e) => {
                tracing::warn!("WebSocket read error: {}", e);
                break;
            }
            _ => {}
        }
    }

    ClientError::ConnectionError("Connection lost".to_string())
}
