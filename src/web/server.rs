use axum::{
    http::{header, Method},
    Router,
};
use log::info;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::web::api::{create_router, AppState, DEFAULT_MAX_REQUEST_NODES};

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
    pub enable_cors: bool,
    pub max_sessions: usize,
    /// Upper bound on `node_count` in `/api/distances` requests
    pub max_request_nodes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3005,
            static_dir: "web".to_string(),
            enable_cors: true,
            max_sessions: 1000,
            max_request_nodes: DEFAULT_MAX_REQUEST_NODES,
        }
    }
}

impl ServerConfig {
    /// Applies `PATH_ENGINE_STATIC_DIR`, `PATH_ENGINE_MAX_SESSIONS` and
    /// `PATH_ENGINE_MAX_REQUEST_NODES` on top of the defaults. Unparseable
    /// values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var("PATH_ENGINE_STATIC_DIR") {
            config.static_dir = dir;
        }
        if let Some(max) = std::env::var("PATH_ENGINE_MAX_SESSIONS")
            .ok()
            .and_then(|value| value.parse().ok())
        {
            config.max_sessions = max;
        }
        if let Some(max) = std::env::var("PATH_ENGINE_MAX_REQUEST_NODES")
            .ok()
            .and_then(|value| value.parse().ok())
        {
            config.max_request_nodes = max;
        }
        config
    }
}

/// Builds the full application: API routes, static frontend and CORS
pub fn build_app(config: &ServerConfig) -> Router {
    let app_state =
        AppState::new(config.max_sessions).with_max_request_nodes(config.max_request_nodes);

    let app = Router::new()
        .merge(create_router())
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(app_state);

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

        app.layer(ServiceBuilder::new().layer(cors).into_inner())
    } else {
        app
    }
}

/// Start the web server with custom configuration
pub async fn start_server_with_config(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_app(&config);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("path engine server listening on http://{}", addr);
    info!("serving static files from {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

