use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};

use crate::state::AppState;
use crate::{handlers, middleware};

pub(super) fn build_host_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/hooks/document-events",
            post(handlers::hooks::document_event_handler),
        )
        .route(
            "/api/doctypes/date-fields",
            get(handlers::metadata::list_date_fields_handler),
        )
        .route(
            "/api/doctypes/{doctype}/fields",
            put(handlers::host_sync::sync_doctype_fields_handler),
        )
        .route(
            "/api/subjects/{subject}/roles",
            put(handlers::host_sync::sync_subject_roles_handler),
        )
        .route(
            "/api/settings/backdate-permission",
            get(handlers::settings::get_backdate_settings_handler)
                .put(handlers::settings::save_backdate_settings_handler),
        )
        .route_layer(from_fn_with_state(app_state, middleware::require_hook_auth))
}
