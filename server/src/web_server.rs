use std::future::Future;
use std::path::Path;

use axum::Router;
use axum::routing::{get, post};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use xenotic_engine::{GameService, log};

use crate::handlers;
use crate::server_config::ServerConfig;

#[derive(Clone)]
pub struct WebServerState {
    pub service: GameService,
}

impl WebServerState {
    pub fn new(service: GameService) -> Self {
        Self { service }
    }
}

pub fn build_router(state: WebServerState, static_files_path: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/api/new-game", post(handlers::new_game))
        .route("/api/make-move", post(handlers::make_move))
        .route("/api/ai-first-move", post(handlers::ai_first_move))
        .route("/api/game-state", get(handlers::game_state))
        .route("/api/reset-game", post(handlers::reset_game))
        .route("/api/change-difficulty", post(handlers::change_difficulty))
        .route("/api/stats", get(handlers::stats));

    let app = match static_files_path {
        Some(path) => api.fallback_service(ServeDir::new(path)),
        None => api,
    };

    app.layer(cors).with_state(state)
}

pub async fn run_web_server<F>(
    state: WebServerState,
    config: &ServerConfig,
    shutdown_signal: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state, config.static_files_path.as_deref());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    log!("Web server listening on {}", listener.local_addr()?);
    if let Some(path) = &config.static_files_path {
        log!("Serving static files from {}", path.display());
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}
