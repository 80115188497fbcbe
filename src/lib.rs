//! Dompet is a small proxy service and analysis library for a personal
//! finance and reminder dashboard whose records live in Notion databases.
//!
//! The HTTP server exposes three stateless endpoints that translate JSON
//! request bodies into Notion's typed-property page shape and forward query
//! results back as flat records. The [aggregation] module provides the pure
//! filter/group/sum pipeline that dashboard views run over a fetched record
//! set.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

pub mod aggregation;
mod app_state;
pub mod endpoints;
mod envelope;
mod error;
mod logging;
pub mod notion;
pub mod reminder;
mod routing;
pub mod schema;
pub mod transaction;

pub use app_state::AppState;
pub use envelope::{CreateResponse, ErrorBody, ListResponse};
pub use error::Error;
pub use logging::logging_middleware;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
