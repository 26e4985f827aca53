//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, the notification worker, and
//! the Axum server lifecycle.

use crate::application::services::{AuthService, LinkService};
use crate::config::Config;
use crate::domain::link_event::LinkEvent;
use crate::infrastructure::notify::{
    LinkNotifier, NullNotifier, WebhookNotifier, run_notification_worker,
};
use crate::infrastructure::persistence::{PgLinkRepository, migrations};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// How long shutdown waits for queued notifications to be delivered.
const WORKER_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens the connection pool with the configured limits.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

fn build_notifier(config: &Config) -> Result<Arc<dyn LinkNotifier>> {
    match &config.webhook_url {
        Some(url) => {
            let notifier = WebhookNotifier::new(url.clone(), config.webhook_timeout())
                .context("Failed to build webhook client")?;
            tracing::info!("Notifications enabled (webhook)");
            Ok(Arc::new(notifier))
        }
        None => {
            tracing::info!("Notifications disabled (NullNotifier)");
            Ok(Arc::new(NullNotifier::new()))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Schema migrations (baselining a legacy schema first)
/// - Background notification worker
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - A migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    migrations::run(&pool)
        .await
        .context("Failed to migrate")?;

    let notifier = build_notifier(&config)?;
    let (event_tx, event_rx) = mpsc::channel::<LinkEvent>(config.notification_queue_capacity);
    let worker = tokio::spawn(run_notification_worker(event_rx, notifier));
    tracing::info!("Notification worker started");

    let link_repository = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let state = AppState {
        link_service: Arc::new(LinkService::new(link_repository, event_tx.clone())),
        auth_service: Arc::new(AuthService::new(config.auth_settings()?)),
        notification_sender: event_tx,
    };

    let app = app_router(state, &config.cors_allowed_origins);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router, and with it every event sender, is gone once serve returns.
    match tokio::time::timeout(WORKER_DRAIN_TIMEOUT, worker).await {
        Ok(Ok(())) => tracing::info!("Notification worker drained"),
        Ok(Err(e)) => tracing::error!(error = %e, "Notification worker panicked"),
        Err(_) => tracing::warn!("Notification worker did not drain in time; pending events dropped"),
    }

    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
