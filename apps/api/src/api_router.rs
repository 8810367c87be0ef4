use axum::Router;
use axum::routing::get;
use backdate_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;
mod host_routes;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let cors_layer = cors::build_cors_layer(frontend_url)?;
    let host_routes = host_routes::build_host_routes(app_state.clone());

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(host_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
