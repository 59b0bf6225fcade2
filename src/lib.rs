//! Chama AI is a web app for running a chama: an informal savings and
//! lending group.
//!
//! This library provides a server that directly serves HTML pages for tracking
//! contributions, loans, members and notifications, plus a small JSON API for
//! creating accounts and obtaining tokens.

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod acknowledge;
mod alert;
mod app_state;
mod auth;
mod contribution;
mod dashboard;
mod endpoints;
mod error;
mod html;
mod insights;
mod internal_server_error;
mod landing;
mod loan;
mod logging;
mod member;
mod navigation;
mod not_found;
mod notification;
mod profit_sharing;
mod query;
mod reports;
mod repository;
mod routing;
mod store;
mod table;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
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
