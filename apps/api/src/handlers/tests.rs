use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use backdate_application::Clock;
use backdate_core::AppError;
use backdate_infrastructure::InMemoryBackdateRepository;
use chrono::NaiveDate;
use serde_json::json;

use super::health::health_handler;
use super::hooks::document_event_handler;
use super::host_sync::{sync_doctype_fields_handler, sync_subject_roles_handler};
use super::metadata::list_date_fields_handler;
use super::settings::{get_backdate_settings_handler, save_backdate_settings_handler};
use crate::api_services::{RepositorySet, assemble_app_state};
use crate::dto::{
    BackdateRuleRequest, DateFieldResponse, DateFieldsQuery, DocumentEventRequest,
    PublishedFieldRequest, SaveBackdateSettingsRequest, SyncDocTypeFieldsRequest,
    SyncSubjectRolesRequest,
};
use crate::error::ApiError;
use crate::state::AppState;

struct FixedClock(NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

fn test_state() -> AppState {
    let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap_or_else(|| unreachable!());
    assemble_app_state(
        RepositorySet::in_memory(Arc::new(InMemoryBackdateRepository::new())),
        Arc::new(FixedClock(today)),
        "test-secret".to_owned(),
        None,
    )
}

fn published_field(fieldname: &str, label: &str, fieldtype: &str) -> PublishedFieldRequest {
    PublishedFieldRequest {
        fieldname: fieldname.to_owned(),
        label: Some(label.to_owned()),
        fieldtype: fieldtype.to_owned(),
    }
}

async fn publish_sales_invoice(state: &AppState) {
    let result = sync_doctype_fields_handler(
        State(state.clone()),
        Path("Sales Invoice".to_owned()),
        Json(SyncDocTypeFieldsRequest {
            fields: vec![
                published_field("customer", "Customer", "Link"),
                published_field("posting_date", "Posting Date", "Date"),
                published_field("totals_section", "Totals", "Section Break"),
                published_field("grand_total", "Grand Total", "Currency"),
                published_field("due_date", "Due Date", "Datetime"),
                published_field("column_break_7", "", "Column Break"),
                published_field("attachment", "Attachment", "Attach"),
                published_field("remarks", "Remarks", "Small Text"),
            ],
        }),
    )
    .await;
    assert!(result.is_ok());
}

fn user_rule(user: &str, date_field: &str, allowed_days: i64) -> BackdateRuleRequest {
    BackdateRuleRequest {
        name: None,
        doc_type: "Sales Invoice".to_owned(),
        permission_type: "User".to_owned(),
        user: Some(user.to_owned()),
        role: None,
        date_field: Some(date_field.to_owned()),
        allowed_days,
    }
}

async fn save_rules(
    state: &AppState,
    rules: Vec<BackdateRuleRequest>,
) -> Result<Json<crate::dto::BackdateSettingsResponse>, ApiError> {
    save_backdate_settings_handler(
        State(state.clone()),
        Json(SaveBackdateSettingsRequest {
            updated_by: "Administrator".to_owned(),
            permission_details: rules,
        }),
    )
    .await
}

fn validate_event(user: &str, posting_date: &str) -> DocumentEventRequest {
    DocumentEventRequest {
        event: "validate".to_owned(),
        user: user.to_owned(),
        document: json!({
            "doctype": "Sales Invoice",
            "name": "SINV-0001",
            "posting_date": posting_date,
        }),
    }
}

#[tokio::test]
async fn date_fields_lists_only_date_fields_in_form_order() {
    let state = test_state();
    publish_sales_invoice(&state).await;

    let Json(fields) = list_date_fields_handler(
        State(state),
        Query(DateFieldsQuery {
            doctype_name: Some("Sales Invoice".to_owned()),
        }),
    )
    .await;

    assert_eq!(
        fields,
        vec![
            DateFieldResponse {
                fieldname: "posting_date".to_owned(),
                label: Some("Posting Date".to_owned()),
            },
            DateFieldResponse {
                fieldname: "due_date".to_owned(),
                label: Some("Due Date".to_owned()),
            },
        ]
    );
}

#[tokio::test]
async fn date_fields_are_empty_for_missing_or_unknown_doctype() {
    let state = test_state();

    let Json(missing) = list_date_fields_handler(
        State(state.clone()),
        Query(DateFieldsQuery { doctype_name: None }),
    )
    .await;
    assert!(missing.is_empty());

    let Json(unknown) = list_date_fields_handler(
        State(state),
        Query(DateFieldsQuery {
            doctype_name: Some("Purchase Order".to_owned()),
        }),
    )
    .await;
    assert!(unknown.is_empty());
}

#[tokio::test]
async fn hook_allows_saves_when_no_rules_exist() {
    let state = test_state();

    let result =
        document_event_handler(State(state), Json(validate_event("jane", "2020-01-01"))).await;
    let Ok((status, Json(response))) = result else {
        unreachable!("hook should succeed without rules");
    };

    assert_eq!(status, StatusCode::OK);
    assert!(response.allowed);
    assert_eq!(response.reason.as_deref(), Some("no_rules_configured"));
}

#[tokio::test]
async fn hook_denies_saves_backdated_beyond_the_allowance() {
    let state = test_state();
    publish_sales_invoice(&state).await;
    assert!(save_rules(&state, vec![user_rule("jane", "posting_date", 5)]).await.is_ok());

    let result =
        document_event_handler(State(state), Json(validate_event("jane", "2024-03-10"))).await;
    let Ok((status, Json(response))) = result else {
        unreachable!("hook should answer with a decision");
    };

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!response.allowed);
    assert_eq!(response.days_backdated, Some(10));
    assert_eq!(response.field_label.as_deref(), Some("Posting Date"));
    assert_eq!(
        response.message.as_deref(),
        Some(
            "Backdating Sales Invoice by 10 day(s) using 'Posting Date' is not allowed for this \
             user or role. Please select a valid date within the allowed range."
        )
    );
}

#[tokio::test]
async fn hook_matches_role_rules_through_synced_roles() {
    let state = test_state();
    let roles = sync_subject_roles_handler(
        State(state.clone()),
        Path("jane".to_owned()),
        Json(SyncSubjectRolesRequest {
            roles: vec!["Accounts User".to_owned()],
        }),
    )
    .await;
    assert!(roles.is_ok());

    let role_rule = BackdateRuleRequest {
        name: None,
        doc_type: "Sales Invoice".to_owned(),
        permission_type: "Role".to_owned(),
        user: Some("ignored".to_owned()),
        role: Some("Accounts User".to_owned()),
        date_field: Some("posting_date".to_owned()),
        allowed_days: 3,
    };
    assert!(save_rules(&state, vec![role_rule]).await.is_ok());

    let within = document_event_handler(
        State(state.clone()),
        Json(validate_event("jane", "2024-03-17")),
    )
    .await;
    assert_eq!(within.ok().map(|(status, _)| status), Some(StatusCode::OK));

    let beyond = document_event_handler(
        State(state.clone()),
        Json(validate_event("jane", "2024-03-16")),
    )
    .await;
    assert_eq!(
        beyond.ok().map(|(status, _)| status),
        Some(StatusCode::UNPROCESSABLE_ENTITY)
    );

    let other_user =
        document_event_handler(State(state), Json(validate_event("omar", "2024-03-01"))).await;
    let Ok((status, Json(response))) = other_user else {
        unreachable!("hook should answer with a decision");
    };
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response.reason.as_deref(), Some("no_applicable_rule"));
}

#[tokio::test]
async fn hook_rejects_unknown_events_and_malformed_dates() {
    let state = test_state();
    assert!(save_rules(&state, vec![user_rule("jane", "posting_date", 5)]).await.is_ok());

    let mut on_submit = validate_event("jane", "2024-03-19");
    on_submit.event = "on_submit".to_owned();
    let unknown = document_event_handler(State(state.clone()), Json(on_submit)).await;
    let Err(error) = unknown else {
        unreachable!("unknown events should be rejected");
    };
    assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);

    let malformed =
        document_event_handler(State(state), Json(validate_event("jane", "yesterday"))).await;
    assert!(matches!(malformed, Err(ApiError(AppError::Validation(_)))));
}

#[tokio::test]
async fn settings_round_trip_and_reject_duplicates() {
    let state = test_state();
    publish_sales_invoice(&state).await;

    let saved = save_rules(&state, vec![user_rule("jane", "posting_date", 5)]).await;
    assert!(saved.is_ok());

    let Ok(Json(settings)) = get_backdate_settings_handler(State(state.clone())).await else {
        unreachable!("settings should load");
    };
    assert_eq!(settings.permission_details.len(), 1);
    assert_eq!(settings.permission_details[0].user.as_deref(), Some("jane"));
    assert_eq!(settings.permission_details[0].allowed_days, 5);

    let duplicate = save_rules(
        &state,
        vec![
            user_rule("jane", "posting_date", 5),
            user_rule("jane", "posting_date", 9),
        ],
    )
    .await;
    assert!(matches!(duplicate, Err(ApiError(AppError::Conflict(_)))));

    let not_a_date = save_rules(&state, vec![user_rule("jane", "grand_total", 5)]).await;
    assert!(matches!(not_a_date, Err(ApiError(AppError::Validation(_)))));
}

#[tokio::test]
async fn settings_reject_rows_sharing_a_name() {
    let state = test_state();
    let name = "6f1c2a9e-4b7d-4c1e-9a53-2d8f0e7b1c44";
    let mut first = user_rule("jane", "posting_date", 5);
    first.name = Some(name.to_owned());
    let mut second = user_rule("omar", "posting_date", 5);
    second.name = Some(name.to_owned());

    let result = save_rules(&state, vec![first, second]).await;
    let Err(error) = result else {
        unreachable!("rows sharing a name should be rejected");
    };
    assert_eq!(error.into_response().status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn settings_reject_unknown_permission_types() {
    let state = test_state();
    let mut rule = user_rule("jane", "posting_date", 5);
    rule.permission_type = "Group".to_owned();

    let result = save_rules(&state, vec![rule]).await;
    assert!(matches!(result, Err(ApiError(AppError::Validation(_)))));
}

#[tokio::test]
async fn health_reports_in_memory_storage() {
    let (status, Json(response)) = health_handler(State(test_state())).await;

    assert_eq!(status, StatusCode::OK);
    assert!(response.ready);
    assert_eq!(response.storage, "in_memory");
    assert_eq!(response.postgres.status, "disabled");
}
