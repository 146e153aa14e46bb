//! HTTP layer exposing the dashboard views and static UI.

pub mod routes;
pub mod session;
pub mod types;

use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

use crate::{
    config::Settings,
    data::{client::DiseaseClient, snapshot::Snapshot},
};

use self::session::Session;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub client: DiseaseClient,
    pub session: Arc<RwLock<Session>>,
    region_requests: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(settings: Settings, client: DiseaseClient, snapshot: Snapshot) -> Self {
        Self {
            settings,
            client,
            session: Arc::new(RwLock::new(Session::new(snapshot))),
            region_requests: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Ticket for a region change; only the latest ticket may install its result.
    pub(crate) fn next_region_ticket(&self) -> u64 {
        self.region_requests.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// A newer request that later fails still supersedes this one, so the previous region stays.
    pub(crate) fn is_latest_region_ticket(&self, ticket: u64) -> bool {
        self.region_requests.load(Ordering::SeqCst) == ticket
    }
}

pub fn router(state: AppState) -> Router {
    let static_dir = ServeDir::new("src/ui/static");
    let api = Router::new()
        .route("/countries", get(routes::list_countries))
        .route("/summary", get(routes::get_summary))
        .route("/table", get(routes::get_table))
        .route("/table/sort/:field", post(routes::sort_table))
        .route("/chart", get(routes::get_chart).post(routes::update_chart))
        .route("/country/:name", post(routes::select_country))
        .route("/refresh", post(routes::refresh));

    let router = Router::new().nest("/api", api);
    #[cfg(feature = "askama")]
    let router = router.route("/", get(crate::ui::dashboard));

    router
        .fallback_service(static_dir)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Start the server with the cached snapshot, or a live one when nothing is cached.
/// A failed fetch starts the dashboard empty rather than aborting.
pub async fn serve(settings: Settings, host: String, port: u16) -> Result<()> {
    let client = DiseaseClient::new(&settings)?;
    let snapshot = match Snapshot::load_or_fetch(&settings, &client).await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!(error = %format!("{err:#}"), "no data available at startup");
            Snapshot::empty()
        }
    };
    let state = AppState::new(settings, client, snapshot);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving covid-info dashboard");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_region_request_supersedes_older_one() {
        let settings = Settings::for_dir(std::env::temp_dir(), "http://127.0.0.1:9");
        let client = DiseaseClient::new(&settings).unwrap();
        let state = AppState::new(settings, client, Snapshot::empty());

        let first = state.next_region_ticket();
        assert!(state.is_latest_region_ticket(first));
        let second = state.next_region_ticket();
        assert!(!state.is_latest_region_ticket(first));
        assert!(state.is_latest_region_ticket(second));
    }
}
