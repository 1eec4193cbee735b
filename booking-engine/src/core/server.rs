//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::future::Future;
use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::api::{ApiState, build_app};
use crate::core::{Config, Result, ServerError};

/// HTTP Server
pub struct Server {
    config: Config,
    state: ApiState,
}

impl Server {
    pub fn new(config: Config, state: ApiState) -> Self {
        Self { config, state }
    }

    /// Serve on `0.0.0.0:HTTP_PORT` until Ctrl-C
    pub async fn run(&self) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        tracing::info!("Booking store listening on {}", addr);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };
        serve(listener, self.state.clone(), shutdown).await
    }
}

/// Serve the store API on an already bound listener
pub async fn serve(
    listener: TcpListener,
    state: ApiState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
