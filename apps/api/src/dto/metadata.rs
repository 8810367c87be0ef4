use backdate_application::PublishedFieldInput;
use backdate_domain::{DateFieldOption, DocTypeField};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query string of the date field lookup.
#[derive(Debug, Deserialize)]
pub struct DateFieldsQuery {
    pub doctype_name: Option<String>,
}

/// Selectable date field.
#[derive(Debug, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "date-field-response.ts")]
pub struct DateFieldResponse {
    pub fieldname: String,
    pub label: Option<String>,
}

impl From<DateFieldOption> for DateFieldResponse {
    fn from(value: DateFieldOption) -> Self {
        Self {
            fieldname: value.fieldname,
            label: value.label,
        }
    }
}

/// One field published by the host.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "published-field-request.ts")]
pub struct PublishedFieldRequest {
    pub fieldname: String,
    pub label: Option<String>,
    pub fieldtype: String,
}

impl From<PublishedFieldRequest> for PublishedFieldInput {
    fn from(value: PublishedFieldRequest) -> Self {
        Self {
            fieldname: value.fieldname,
            label: value.label,
            fieldtype: value.fieldtype,
        }
    }
}

/// Incoming payload replacing a document type's fields.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "sync-doctype-fields-request.ts")]
pub struct SyncDocTypeFieldsRequest {
    pub fields: Vec<PublishedFieldRequest>,
}

/// API representation of a mirrored field.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "doctype-field-response.ts")]
pub struct DocTypeFieldResponse {
    pub fieldname: String,
    pub label: Option<String>,
    pub fieldtype: String,
}

impl From<DocTypeField> for DocTypeFieldResponse {
    fn from(value: DocTypeField) -> Self {
        Self {
            fieldname: value.fieldname().as_str().to_owned(),
            label: value.label().map(str::to_owned),
            fieldtype: value.field_type().as_str().to_owned(),
        }
    }
}

/// Incoming payload replacing a subject's roles.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "sync-subject-roles-request.ts")]
pub struct SyncSubjectRolesRequest {
    pub roles: Vec<String>,
}

/// API representation of a subject's mirrored roles.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "subject-roles-response.ts")]
pub struct SubjectRolesResponse {
    pub subject: String,
    pub roles: Vec<String>,
}
