use crate::gate::{FlagSource, MaintenanceGate, MaintenanceLayer, MaintenanceService};
use anyhow::Result;
use axum::{
    body::Body,
    extract::{OriginalUri, Request},
    http::{HeaderName, HeaderValue},
    routing::get,
    Extension, Router, ServiceExt,
};
use std::{path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use tower::{Layer, ServiceBuilder};
use tower_http::{
    request_id::PropagateRequestIdLayer, services::ServeDir, set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{debug_span, info, Span};
use ulid::Ulid;

pub mod handlers;

use self::handlers::{pages, AuthProviders};

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub auth_providers: AuthProviders,
    pub assets_dir: Option<PathBuf>,
}

/// Routes of the site, without the maintenance gate.
pub fn router(config: &SiteConfig, flag: Arc<dyn FlagSource>) -> Router {
    let mut router = Router::new()
        .route("/", get(pages::home))
        .route("/signin", get(pages::signin))
        .route("/privacy", get(pages::privacy))
        .route("/terms", get(pages::terms))
        .route("/cookies", get(pages::cookies))
        .route(crate::gate::MAINTENANCE_PATH, get(pages::maintenance))
        .route("/api/auth/providers", get(handlers::providers))
        .route(
            "/_internal/health",
            get(handlers::health).options(handlers::health),
        );

    if let Some(dir) = &config.assets_dir {
        router = router.nest_service("/_internal/static", ServeDir::new(dir));
    }

    router
        .fallback(pages::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span)),
        )
        .layer(Extension(Arc::new(config.auth_providers.clone())))
        .layer(Extension(flag))
}

/// The full site: router wrapped by the maintenance gate.
///
/// # Errors
/// Returns an error if the gate cannot be built
pub fn app(config: &SiteConfig, flag: Arc<dyn FlagSource>) -> Result<MaintenanceService<Router>> {
    let gate = MaintenanceGate::standard(flag.clone())?;

    Ok(MaintenanceLayer::new(gate).layer(router(config, flag)))
}

/// Serve the site until Ctrl-C or SIGTERM.
/// # Errors
/// Returns an error if the server fails to start
pub async fn new(port: u16, config: SiteConfig, flag: Arc<dyn FlagSource>) -> Result<()> {
    let app = app(&config, flag)?;

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Gracefully shutdown");
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let headers = request.headers();
    let path = request.uri().path();
    let original_path = request
        .extensions()
        .get::<OriginalUri>()
        .map_or(path, |original| original.0.path());
    let request_id = headers
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, original_path, ?headers, request_id)
}
