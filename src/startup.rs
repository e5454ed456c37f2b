use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::MatchedPath,
    http::{HeaderValue, Request},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::configuration::{CorsSettings, Settings};
use crate::routes::{check_health, submit};
use crate::store::{MongoSubmissionStore, SharedStore, SubmissionStore};

/// Shared across every request. The store handle is built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    pub fn new(store: impl SubmissionStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

pub async fn get_app_state(configuration: &Settings) -> Result<AppState, anyhow::Error> {
    let store = MongoSubmissionStore::connect(&configuration.database).await?;

    Ok(AppState::new(store))
}

pub fn cors_layer(settings: &CorsSettings) -> Result<CorsLayer, anyhow::Error> {
    if settings.allows_any_origin() {
        if settings.allow_credentials {
            anyhow::bail!("CORS credentials cannot be allowed together with a wildcard origin");
        }

        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = settings
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS origin `{}`", origin))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(settings.allow_credentials))
}

pub fn router(app_state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/submit/", post(submit))
        .route("/submit", post(submit))
        .with_state(app_state)
        .route("/health_check", get(check_health))
        .layer(cors)
        .layer(
            // Refer to https://github.com/tokio-rs/axum/blob/main/examples/tracing-aka-logging/Cargo.toml
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str);
                tracing::info_span!(
                    "Starting HTTP request",
                    method = ?request.method(),
                    path,
                    request_id = %Uuid::new_v4(),
                )
            }),
        )
}

pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining in-flight requests");
}
