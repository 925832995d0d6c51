//! HTTP front end for walkin.
//!
//! The application is a handful of server-rendered screens. Every request
//! reloads the collections from disk and redraws the active screen; the only
//! in-memory state is the desk's [`Session`].

pub mod handlers;
pub mod render;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::routing::{get, post};
use axum::Router;
use chrono::{Local, NaiveDateTime};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::branding;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::session::Session;
use crate::storage::Store;

use render::Header;

/// Shared state of the web application.
#[derive(Debug)]
pub struct AppState {
    config: Config,
    store: Store,
    session: Mutex<Session>,
}

impl AppState {
    /// Build the state for a configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            store: Store::from_config(&config),
            session: Mutex::new(Session::new()),
            config,
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The data collections.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Lock the desk session.
    pub fn session(&self) -> MutexGuard<'_, Session> {
        // Session updates are single assignments, so a poisoned lock still
        // holds a consistent value
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The page heading, checking for a logo on disk.
    #[must_use]
    pub fn header(&self) -> Header {
        Header {
            has_logo: branding::find_logo(&self.config.asset_dir()).is_some(),
            title: self.config.branding.title.clone(),
        }
    }

    /// Current local wall-clock time.
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/intake", post(handlers::submit_intake))
        .route("/backend", post(handlers::open_backend))
        .route("/login", post(handlers::login))
        .route("/nav/queue", post(handlers::show_queue))
        .route("/nav/customers", post(handlers::show_customers))
        .route("/nav/public", post(handlers::show_public))
        .route("/logout", post(handlers::logout))
        .route("/queue/{id}/assign", post(handlers::assign))
        .route("/queue/clear", post(handlers::clear_queue))
        .route("/customers/clear", post(handlers::clear_customers))
        .route("/customers/export.csv", get(handlers::export_customers))
        .route("/logo", get(handlers::logo))
        .with_state(state)
}

/// Run the web application until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.bind_addr()?;
    if config.uses_default_password() {
        warn!("backend password is the shipped default; set auth.password or WALKIN_AUTH__PASSWORD");
    }

    let state = Arc::new(AppState::new(config));
    info!(
        queue = %state.config().queue_path().display(),
        customers = %state.config().customers_path().display(),
        "using data files"
    );

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::server(format!("failed to bind {addr}: {e}")))?;
    info!("listening on http://{addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::server(e.to_string()))?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
