use std::str::FromStr;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use backdate_core::{AppError, UserIdentity};
use backdate_domain::{DocumentEvent, SubjectDocument};

use crate::dto::{DocumentEventRequest, DocumentEventResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// Runs the lifecycle hook for one document event. A blocked save answers
/// `422` so the host can abort its transaction with the returned message.
pub async fn document_event_handler(
    State(state): State<AppState>,
    Json(payload): Json<DocumentEventRequest>,
) -> ApiResult<(StatusCode, Json<DocumentEventResponse>)> {
    let event = DocumentEvent::from_str(payload.event.trim())?;

    let subject = payload.user.trim();
    if subject.is_empty() {
        return Err(AppError::Validation("hook payload requires the acting user".to_owned()).into());
    }
    let actor = UserIdentity::from_subject(subject);
    let document = SubjectDocument::from_host_payload(payload.document)?;

    let decision = state
        .backdate_validation_service
        .handle_document_event(&actor, &document, event)
        .await?;

    let status = if decision.is_allowed() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };

    Ok((status, Json(DocumentEventResponse::from(decision))))
}
