use crate::game::engine::{GameEngine, MoveOutcome, Outbound};
use crate::game::geometry::GridSize;
use crate::game::types::Player;
use crate::protocol::{decode_move_intent, GameStateMessage, ServerEvent};
use crate::shared::names::sanitize_player_name;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};

mod io;

pub use io::{LatestFrame, SessionIo};

#[derive(Debug)]
struct SessionEntry {
    player_id: String,
    events: UnboundedSender<String>,
    state: Arc<LatestFrame>,
}

/// Live connections keyed by connection id, each bound to one player.
///
/// Created once at startup and shared by the engine (as its outbound sink)
/// and the broadcaster. Targeted events are queued per connection; state
/// broadcasts overwrite a single slot, so a connection that stops reading
/// holds at most one pending state.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, SessionEntry>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(
        &self,
        connection_id: &str,
        player_id: &str,
        events: UnboundedSender<String>,
        state: Arc<LatestFrame>,
    ) {
        self.sessions.insert(
            connection_id.to_string(),
            SessionEntry {
                player_id: player_id.to_string(),
                events,
                state,
            },
        );
    }

    fn remove(&self, connection_id: &str) -> Option<String> {
        self.sessions
            .remove(connection_id)
            .map(|(_, entry)| entry.player_id)
    }

    pub fn player_for(&self, connection_id: &str) -> Option<String> {
        self.sessions
            .get(connection_id)
            .map(|entry| entry.player_id.clone())
    }

    pub fn lookup_connection(&self, player_id: &str) -> Option<String> {
        self.sessions
            .iter()
            .find(|entry| entry.player_id == player_id)
            .map(|entry| entry.key().clone())
    }

    pub fn connection_count(&self) -> usize {
        self.sessions.len()
    }

    fn send_event(&self, connection_id: &str, payload: String) {
        let Some(entry) = self.sessions.get(connection_id) else {
            tracing::debug!(connection_id, "send target is gone");
            return;
        };
        if entry.events.send(payload).is_err() {
            tracing::warn!(connection_id, "failed to queue message for connection");
        }
    }
}

impl Outbound for SessionRegistry {
    fn broadcast_state(&self, state: &GameStateMessage) {
        let payload = match state.to_json() {
            Ok(payload) => payload,
            Err(error) => {
                tracing::error!(%error, "failed to serialize game state");
                return;
            }
        };
        for entry in self.sessions.iter() {
            if entry.events.is_closed() {
                tracing::debug!(connection_id = %entry.key(), "skipping state for closed connection");
                continue;
            }
            entry.state.store(payload.clone());
        }
        tracing::debug!(connections = self.sessions.len(), "game state broadcast");
    }

    fn notify(&self, player_id: &str, event: &ServerEvent) {
        let Some(connection_id) = self.lookup_connection(player_id) else {
            tracing::warn!(player_id, "no connection for player notification");
            return;
        };
        match event.to_json() {
            Ok(payload) => self.send_event(&connection_id, payload),
            Err(error) => tracing::error!(%error, player_id, "failed to serialize notification"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ServerStats {
    pub players: usize,
    pub connections: usize,
}

/// Connection lifecycle and fan-out on top of the engine.
pub struct SessionBroadcaster {
    engine: Arc<GameEngine>,
    registry: Arc<SessionRegistry>,
}

impl SessionBroadcaster {
    pub fn new(grid: GridSize) -> Self {
        let registry = Arc::new(SessionRegistry::new());
        let engine = Arc::new(GameEngine::new(grid, registry.clone()));
        Self { engine, registry }
    }

    #[cfg(test)]
    pub fn with_engine(engine: Arc<GameEngine>, registry: Arc<SessionRegistry>) -> Self {
        Self { engine, registry }
    }

    /// Joins a player for a freshly opened connection and returns the
    /// connection's outbound side. The welcome is queued before the
    /// connection becomes visible to broadcasts, so it is always the first
    /// message; the current state follows it.
    pub async fn register_connection(
        &self,
        connection_id: &str,
        requested_name: Option<&str>,
    ) -> (Player, SessionIo) {
        let fallback = format!("Player{connection_id}");
        let name = requested_name
            .map(|value| sanitize_player_name(value, &fallback))
            .unwrap_or(fallback);

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let state = Arc::new(LatestFrame::new());

        let welcome = ServerEvent::Welcome {
            player_id: connection_id.to_string(),
            name: name.clone(),
            grid: self.engine.grid(),
        };
        match welcome.to_json() {
            Ok(payload) => {
                // The receiver is still held here, so this cannot fail.
                let _ = events_tx.send(payload);
            }
            Err(error) => tracing::error!(%error, connection_id, "failed to serialize welcome"),
        }

        self.registry
            .insert(connection_id, connection_id, events_tx, Arc::clone(&state));
        let player = self.engine.join(connection_id, name).await;

        // Stored under the world lock: any later broadcast overwrites it with
        // a newer state, never the other way round.
        self.engine
            .with_snapshot(|snapshot| match snapshot.to_json() {
                Ok(payload) => state.store(payload),
                Err(error) => {
                    tracing::error!(%error, connection_id, "failed to serialize game state")
                }
            })
            .await;

        (player, SessionIo::new(events_rx, state))
    }

    pub async fn unregister_connection(&self, connection_id: &str) {
        let Some(player_id) = self.registry.remove(connection_id) else { return };
        self.engine.leave(&player_id).await;
        tracing::info!(connection_id, "connection closed");
    }

    pub fn lookup_connection(&self, player_id: &str) -> Option<String> {
        self.registry.lookup_connection(player_id)
    }

    pub async fn broadcast_state(&self) {
        let state = self.engine.snapshot().await;
        self.registry.broadcast_state(&state);
    }

    pub fn notify(&self, player_id: &str, event: &ServerEvent) {
        self.registry.notify(player_id, event);
    }

    /// Applies a move intent carried by an inbound text frame.
    pub async fn handle_text(&self, connection_id: &str, text: &str) -> MoveOutcome {
        let Some(player_id) = self.registry.player_for(connection_id) else {
            return MoveOutcome::NoLiveSnake;
        };
        let direction = decode_move_intent(text);
        self.engine.apply_move(&player_id, direction.as_deref()).await
    }

    pub async fn stats(&self) -> ServerStats {
        ServerStats {
            players: self.engine.player_count().await,
            connections: self.registry.connection_count(),
        }
    }
}
