use std::str::FromStr;

use backdate_core::AppError;
use backdate_domain::{
    BackdatePermissionSettings, BackdateRule, BackdateRuleInput, PermissionType, RuleTarget,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// One rule row of the settings table.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "backdate-rule-request.ts")]
pub struct BackdateRuleRequest {
    pub name: Option<String>,
    pub doc_type: String,
    pub permission_type: String,
    pub user: Option<String>,
    pub role: Option<String>,
    pub date_field: Option<String>,
    #[ts(type = "number")]
    pub allowed_days: i64,
}

impl TryFrom<BackdateRuleRequest> for BackdateRuleInput {
    type Error = AppError;

    fn try_from(value: BackdateRuleRequest) -> Result<Self, Self::Error> {
        let rule_id = value
            .name
            .filter(|name| !name.trim().is_empty())
            .map(|name| {
                Uuid::parse_str(name.trim()).map_err(|error| {
                    AppError::Validation(format!("invalid rule name '{name}': {error}"))
                })
            })
            .transpose()?;

        Ok(Self {
            rule_id,
            doc_type: value.doc_type,
            permission_type: PermissionType::from_str(value.permission_type.as_str())?,
            user: value.user,
            role: value.role,
            date_field: value.date_field,
            allowed_days: value.allowed_days,
        })
    }
}

/// Incoming payload replacing the settings table.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "save-backdate-settings-request.ts")]
pub struct SaveBackdateSettingsRequest {
    pub updated_by: String,
    pub permission_details: Vec<BackdateRuleRequest>,
}

/// API representation of one rule row.
#[derive(Debug, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "backdate-rule-response.ts")]
pub struct BackdateRuleResponse {
    pub name: String,
    pub doc_type: String,
    pub permission_type: String,
    pub user: Option<String>,
    pub role: Option<String>,
    pub date_field: Option<String>,
    pub allowed_days: u32,
}

impl From<&BackdateRule> for BackdateRuleResponse {
    fn from(value: &BackdateRule) -> Self {
        let (user, role) = match value.target() {
            RuleTarget::User(user) => (Some(user.as_str().to_owned()), None),
            RuleTarget::Role(role) => (None, Some(role.as_str().to_owned())),
        };

        Self {
            name: value.rule_id().to_string(),
            doc_type: value.doc_type().as_str().to_owned(),
            permission_type: value.permission_type().as_str().to_owned(),
            user,
            role,
            date_field: value.date_field().map(|field| field.as_str().to_owned()),
            allowed_days: value.allowed_days(),
        }
    }
}

/// API representation of the settings table.
#[derive(Debug, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "backdate-settings-response.ts")]
pub struct BackdateSettingsResponse {
    pub permission_details: Vec<BackdateRuleResponse>,
}

impl From<&BackdatePermissionSettings> for BackdateSettingsResponse {
    fn from(value: &BackdatePermissionSettings) -> Self {
        Self {
            permission_details: value.rules().iter().map(BackdateRuleResponse::from).collect(),
        }
    }
}
