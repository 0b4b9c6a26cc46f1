//! HTTP surface over the listing → diagram transform

pub mod router;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use repo_ray_core::TransformConfig;
use serde::{Deserialize, Serialize};

pub use router::create_router;

/// Where the server listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 7890,
        }
    }
}

/// Shared, read-only state handed to every request.
#[derive(Debug, Clone, Default)]
pub struct ServerState {
    pub transform: TransformConfig,
}

impl ServerState {
    pub fn new(transform: TransformConfig) -> Self {
        ServerState { transform }
    }
}

pub struct RepoRayServer {
    state: Arc<ServerState>,
    config: ServerConfig,
}

impl RepoRayServer {
    pub fn new(transform: TransformConfig, config: ServerConfig) -> Self {
        RepoRayServer {
            state: Arc::new(ServerState::new(transform)),
            config,
        }
    }

    pub fn state(&self) -> Arc<ServerState> {
        Arc::clone(&self.state)
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(self) -> anyhow::Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already-bound listener.
    pub async fn serve(self, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
        tracing::info!("Repo-Ray listening on http://{}", listener.local_addr()?);
        axum::serve(listener, create_router(self.state)).await?;
        Ok(())
    }
}
