mod cli;

pub use cli::App;

use crate::lookup::DomainLookup;
use crate::prelude::{eprintln, *};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, Method},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use domain_checker_core::display::DisplayRecord;
use domain_checker_core::lookup::LookupQuery;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};

/// The single lookup route
pub const LOOKUP_PATH: &str = "/api/domain-lookup";

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let lookup = Arc::new(DomainLookup::new(global.whois_config())?);
    let addr = f!("{}:{}", app.host, app.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Server running at http://{}", addr);
    if global.verbose {
        eprintln!("Server running at http://{}", addr);
        eprintln!("Lookup endpoint: http://{}{}", addr, LOOKUP_PATH);
    }

    axum::serve(listener, router(lookup))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

/// Build the application router around a shared orchestrator
pub fn router(lookup: Arc<DomainLookup>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(LOOKUP_PATH, get(lookup_handler).fallback(not_found))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .with_state(lookup)
}

async fn lookup_handler(
    State(lookup): State<Arc<DomainLookup>>,
    query: Result<Query<LookupQuery>, QueryRejection>,
) -> Result<Json<DisplayRecord>, Error> {
    let Query(query) = query.map_err(|rejection| {
        log::warn!("Rejected query string: {}", rejection.body_text());
        Error::InvalidQuery(rejection.body_text())
    })?;

    let record = lookup.lookup(&query).await?;

    Ok(Json(record))
}

async fn not_found() -> Error {
    Error::NotFound
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    log::error!("Unexpected fault while handling request: {}", detail);

    Error::Internal(detail).into_response()
}
