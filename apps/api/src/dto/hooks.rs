use backdate_domain::BackdateDecision;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Lifecycle event delivered by the host for one document save.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "document-event-request.ts")]
pub struct DocumentEventRequest {
    pub event: String,
    pub user: String,
    #[ts(type = "Record<string, unknown>")]
    pub document: Value,
}

/// Outcome of a lifecycle hook.
#[derive(Debug, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "document-event-response.ts")]
pub struct DocumentEventResponse {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub days_backdated: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_label: Option<String>,
}

impl From<BackdateDecision> for DocumentEventResponse {
    fn from(value: BackdateDecision) -> Self {
        match value {
            BackdateDecision::Allowed { reason } => Self {
                allowed: true,
                reason: Some(reason.as_str().to_owned()),
                message: None,
                doctype: None,
                days_backdated: None,
                date_field: None,
                field_label: None,
            },
            BackdateDecision::Denied(denial) => Self {
                allowed: false,
                reason: None,
                message: Some(denial.message()),
                doctype: Some(denial.doctype().to_owned()),
                days_backdated: Some(denial.days_backdated()),
                date_field: Some(denial.date_field().to_owned()),
                field_label: Some(denial.field_label()),
            },
        }
    }
}
