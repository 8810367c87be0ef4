use std::collections::HashMap;
use std::sync::Arc;

use backdate_core::{AppError, AppResult, UserIdentity};
use backdate_domain::{BackdatePermissionSettings, BackdateRule, BackdateRuleInput, DocTypeField};
use tracing::info;

use crate::backdate_ports::{BackdateSettingsRepository, DocTypeMetadataRepository};

/// Application service maintaining the backdate permission settings.
#[derive(Clone)]
pub struct BackdateSettingsService {
    settings_repository: Arc<dyn BackdateSettingsRepository>,
    metadata_repository: Arc<dyn DocTypeMetadataRepository>,
}

impl BackdateSettingsService {
    /// Creates a settings service from its ports.
    #[must_use]
    pub fn new(
        settings_repository: Arc<dyn BackdateSettingsRepository>,
        metadata_repository: Arc<dyn DocTypeMetadataRepository>,
    ) -> Self {
        Self {
            settings_repository,
            metadata_repository,
        }
    }

    /// Returns the current settings; empty when none were saved yet.
    pub async fn get_settings(&self) -> AppResult<BackdatePermissionSettings> {
        Ok(self
            .settings_repository
            .find_settings()
            .await?
            .unwrap_or_else(BackdatePermissionSettings::empty))
    }

    /// Validates and replaces every rule row.
    pub async fn save_settings(
        &self,
        actor: &UserIdentity,
        rows: Vec<BackdateRuleInput>,
    ) -> AppResult<BackdatePermissionSettings> {
        let rules = rows
            .into_iter()
            .map(BackdateRule::new)
            .collect::<AppResult<Vec<_>>>()?;
        let settings = BackdatePermissionSettings::new(rules)?;

        self.require_date_fields(&settings).await?;

        self.settings_repository
            .save_settings(&settings, actor.subject())
            .await?;

        info!(
            subject = actor.subject(),
            rule_count = settings.rules().len(),
            "saved backdate permission settings"
        );

        Ok(settings)
    }

    /// Rejects rule rows pointing at a field that is not a date field of a
    /// known document type. Document types without published metadata are
    /// accepted as-is.
    async fn require_date_fields(&self, settings: &BackdatePermissionSettings) -> AppResult<()> {
        let mut metadata: HashMap<&str, Option<Vec<DocTypeField>>> = HashMap::new();

        for rule in settings.rules() {
            let Some(date_field) = rule.date_field() else {
                continue;
            };

            let doctype = rule.doc_type().as_str();
            if !metadata.contains_key(doctype) {
                let fields = self.metadata_repository.find_doctype_fields(doctype).await?;
                metadata.insert(doctype, fields);
            }

            let Some(Some(fields)) = metadata.get(doctype) else {
                continue;
            };

            let is_date_field = fields.iter().any(|field| {
                field.fieldname().as_str() == date_field.as_str()
                    && field.field_type().is_date_like()
            });
            if !is_date_field {
                return Err(AppError::Validation(format!(
                    "'{}' is not a date field of '{doctype}'",
                    date_field.as_str()
                )));
            }
        }

        Ok(())
    }
}
