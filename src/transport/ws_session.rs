use crate::session::SessionBroadcaster;
use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use uuid::Uuid;

pub async fn handle_socket(
    socket: WebSocket,
    broadcaster: Arc<SessionBroadcaster>,
    requested_name: Option<String>,
) {
    let (mut sender, mut receiver) = socket.split();
    let connection_id = Uuid::new_v4().to_string();
    let (player, mut io) = broadcaster
        .register_connection(&connection_id, requested_name.as_deref())
        .await;
    tracing::info!(connection_id = %connection_id, player_name = %player.name, "connection opened");

    let writer_id = connection_id.clone();
    let send_task = tokio::spawn(async move {
        loop {
            io.wait_for_update().await;
            for payload in io.drain_ready() {
                if let Err(error) = sender.send(Message::Text(payload)).await {
                    tracing::debug!(connection_id = %writer_id, %error, "socket write failed");
                    return;
                }
            }
        }
    });

    while let Some(result) = receiver.next().await {
        let Ok(message) = result else { break };
        match message {
            Message::Text(text) => {
                let outcome = broadcaster.handle_text(&connection_id, &text).await;
                tracing::trace!(connection_id = %connection_id, ?outcome, "move handled");
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    broadcaster.unregister_connection(&connection_id).await;
    send_task.abort();
}
