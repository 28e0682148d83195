//! Server entry points — build and run the tonic server for a registry.
//!
//! Embedders assemble a [`ToolRegistry`], freeze it behind an `Arc`, and
//! hand it to [`serve`] (or [`serve_with_shutdown`] when they control the
//! shutdown signal themselves). Listen address and message-size cap come
//! from [`ServerConfig`].

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;

use crate::grpc::ToolServiceImpl;
use crate::proto::tool_service_server::ToolServiceServer;
use crate::tools::ToolRegistry;
use crate::types::{Error, Result, ServerConfig};

fn parse_listen_addr(config: &ServerConfig) -> Result<SocketAddr> {
    config.listen_addr.parse().map_err(|e| {
        Error::validation(format!(
            "Invalid listen address '{}': {}",
            config.listen_addr, e
        ))
    })
}

fn tool_service(
    registry: Arc<ToolRegistry>,
    config: &ServerConfig,
) -> ToolServiceServer<ToolServiceImpl> {
    ToolServiceServer::new(ToolServiceImpl::new(registry))
        .max_decoding_message_size(config.max_message_bytes)
        .max_encoding_message_size(config.max_message_bytes)
}

/// Serve the registry's tools until the server fails.
pub async fn serve(registry: Arc<ToolRegistry>, config: &ServerConfig) -> Result<()> {
    let addr = parse_listen_addr(config)?;

    tracing::info!(
        %addr,
        tools = registry.len(),
        "ToolService gRPC server starting"
    );

    Server::builder()
        .add_service(tool_service(registry, config))
        .serve(addr)
        .await?;

    Ok(())
}

/// Serve until `signal` resolves, then shut down gracefully.
pub async fn serve_with_shutdown<F>(
    registry: Arc<ToolRegistry>,
    config: &ServerConfig,
    signal: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send,
{
    let addr = parse_listen_addr(config)?;

    tracing::info!(
        %addr,
        tools = registry.len(),
        "ToolService gRPC server starting (graceful shutdown armed)"
    );

    Server::builder()
        .add_service(tool_service(registry, config))
        .serve_with_shutdown(addr, signal)
        .await?;

    tracing::info!("ToolService gRPC server stopped");
    Ok(())
}
