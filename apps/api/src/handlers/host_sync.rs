use axum::Json;
use axum::extract::{Path, State};

use crate::dto::{
    DocTypeFieldResponse, SubjectRolesResponse, SyncDocTypeFieldsRequest, SyncSubjectRolesRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn sync_doctype_fields_handler(
    State(state): State<AppState>,
    Path(doctype): Path<String>,
    Json(payload): Json<SyncDocTypeFieldsRequest>,
) -> ApiResult<Json<Vec<DocTypeFieldResponse>>> {
    let fields = state
        .host_sync_service
        .sync_doctype_fields(
            doctype.as_str(),
            payload.fields.into_iter().map(Into::into).collect(),
        )
        .await?;

    Ok(Json(fields.into_iter().map(DocTypeFieldResponse::from).collect()))
}

pub async fn sync_subject_roles_handler(
    State(state): State<AppState>,
    Path(subject): Path<String>,
    Json(payload): Json<SyncSubjectRolesRequest>,
) -> ApiResult<Json<SubjectRolesResponse>> {
    let roles = state
        .host_sync_service
        .sync_subject_roles(subject.as_str(), payload.roles)
        .await?;

    Ok(Json(SubjectRolesResponse { subject, roles }))
}
