use anyhow::Context;
use axum::{
  extract::{Query, State, WebSocketUpgrade},
  http::Method,
  response::IntoResponse,
  routing::get,
  Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use grid_snake_server::config::ServerConfig;
use grid_snake_server::session::SessionBroadcaster;
use grid_snake_server::transport;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
struct AppState {
  broadcaster: Arc<SessionBroadcaster>,
}

#[derive(Debug, Serialize)]
struct OkResponse {
  ok: bool,
}

#[derive(Debug, Serialize)]
struct StatsResponse {
  players: usize,
  connections: usize,
}

#[derive(Debug, Deserialize)]
struct ConnectQuery {
  name: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let config = ServerConfig::from_env()?;
  let state = Arc::new(AppState {
    broadcaster: Arc::new(SessionBroadcaster::new(config.grid)),
  });

  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET])
    .allow_headers(Any);

  let app: Router = Router::new()
    .route("/api/health", get(health))
    .route("/api/stats", get(stats))
    .route("/game", get(ws_handler))
    .layer(cors)
    .with_state(state);

  let address = format!("0.0.0.0:{}", config.port);
  tracing::info!(
    grid_width = config.grid.width(),
    grid_height = config.grid.height(),
    "listening on {address}"
  );

  let listener = tokio::net::TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  axum::serve(listener, app).await?;

  Ok(())
}

async fn health() -> impl IntoResponse {
  Json(OkResponse { ok: true })
}

async fn stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let stats = state.broadcaster.stats().await;
  Json(StatsResponse {
    players: stats.players,
    connections: stats.connections,
  })
}

async fn ws_handler(
  ws: WebSocketUpgrade,
  Query(query): Query<ConnectQuery>,
  State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
  let broadcaster = Arc::clone(&state.broadcaster);
  ws.on_upgrade(move |socket| transport::ws_session::handle_socket(socket, broadcaster, query.name))
}
