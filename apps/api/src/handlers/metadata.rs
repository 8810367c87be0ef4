use axum::Json;
use axum::extract::{Query, State};

use crate::dto::{DateFieldResponse, DateFieldsQuery};
use crate::state::AppState;

pub async fn list_date_fields_handler(
    State(state): State<AppState>,
    Query(query): Query<DateFieldsQuery>,
) -> Json<Vec<DateFieldResponse>> {
    let doctype_name = query.doctype_name.unwrap_or_default();
    let fields = state
        .date_field_service
        .list_date_fields(doctype_name.as_str())
        .await;

    Json(fields.into_iter().map(DateFieldResponse::from).collect())
}
