//! HTTP endpoint exposing the registry at `/metrics`

use std::future::Future;
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};
use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tracing::info;

use crate::error::{Error, Result};
use crate::metrics::{Registry, CONTENT_TYPE};

pub const METRICS_PATH: &str = "/metrics";

pub fn router(registry: Arc<Registry>) -> Router {
    Router::new()
        .route(METRICS_PATH, get(metrics))
        .with_state(registry)
}

async fn metrics(State(registry): State<Arc<Registry>>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, CONTENT_TYPE)], registry.render())
}

/// Bind `addr` (`host:port`, names resolved) for the metrics endpoint.
pub fn bind(addr: &str) -> Result<TcpListener> {
    let addrs: Vec<SocketAddr> = addr.to_socket_addrs()?.collect();
    let listener = TcpListener::bind(&addrs[..])?;
    listener.set_nonblocking(true)?;
    Ok(listener)
}

/// Serve `/metrics` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, registry: Arc<Registry>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    let local_addr = listener.local_addr()?;
    let server = axum::Server::from_tcp(listener).map_err(|e| Error::Server(Box::new(e)))?;
    info!(address = %local_addr, path = METRICS_PATH, "serving metrics");

    server
        .serve(router(registry).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::Server(Box::new(e)))
}
