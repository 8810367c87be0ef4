use axum::Json;
use axum::extract::State;
use backdate_core::{AppError, UserIdentity};
use backdate_domain::BackdateRuleInput;

use crate::dto::{BackdateSettingsResponse, SaveBackdateSettingsRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn get_backdate_settings_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<BackdateSettingsResponse>> {
    let settings = state.backdate_settings_service.get_settings().await?;
    Ok(Json(BackdateSettingsResponse::from(&settings)))
}

pub async fn save_backdate_settings_handler(
    State(state): State<AppState>,
    Json(payload): Json<SaveBackdateSettingsRequest>,
) -> ApiResult<Json<BackdateSettingsResponse>> {
    let updated_by = payload.updated_by.trim();
    if updated_by.is_empty() {
        return Err(AppError::Validation("updated_by must not be empty".to_owned()).into());
    }
    let actor = UserIdentity::from_subject(updated_by);

    let rows = payload
        .permission_details
        .into_iter()
        .map(BackdateRuleInput::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let settings = state
        .backdate_settings_service
        .save_settings(&actor, rows)
        .await?;

    Ok(Json(BackdateSettingsResponse::from(&settings)))
}
