use std::collections::HashMap;

use async_trait::async_trait;
use backdate_application::{
    BackdateSettingsRepository, DocTypeMetadataRepository, SubjectRoleRepository,
};
use backdate_core::AppResult;
use backdate_domain::{BackdatePermissionSettings, DocTypeField};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredSettings {
    settings: BackdatePermissionSettings,
    updated_by: String,
}

/// In-memory settings, role and metadata repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryBackdateRepository {
    settings: RwLock<Option<StoredSettings>>,
    subject_roles: RwLock<HashMap<String, Vec<String>>>,
    doctype_fields: RwLock<HashMap<String, Vec<DocTypeField>>>,
}

impl InMemoryBackdateRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the subject that saved the current settings.
    pub async fn settings_updated_by(&self) -> Option<String> {
        self.settings
            .read()
            .await
            .as_ref()
            .map(|stored| stored.updated_by.clone())
    }
}

#[async_trait]
impl BackdateSettingsRepository for InMemoryBackdateRepository {
    async fn find_settings(&self) -> AppResult<Option<BackdatePermissionSettings>> {
        Ok(self
            .settings
            .read()
            .await
            .as_ref()
            .map(|stored| stored.settings.clone()))
    }

    async fn save_settings(
        &self,
        settings: &BackdatePermissionSettings,
        updated_by: &str,
    ) -> AppResult<()> {
        *self.settings.write().await = Some(StoredSettings {
            settings: settings.clone(),
            updated_by: updated_by.to_owned(),
        });

        Ok(())
    }
}

#[async_trait]
impl SubjectRoleRepository for InMemoryBackdateRepository {
    async fn list_roles_for_subject(&self, subject: &str) -> AppResult<Vec<String>> {
        let mut roles = self
            .subject_roles
            .read()
            .await
            .get(subject)
            .cloned()
            .unwrap_or_default();
        roles.sort();
        Ok(roles)
    }

    async fn replace_roles_for_subject(&self, subject: &str, roles: &[String]) -> AppResult<()> {
        self.subject_roles
            .write()
            .await
            .insert(subject.to_owned(), roles.to_vec());
        Ok(())
    }
}

#[async_trait]
impl DocTypeMetadataRepository for InMemoryBackdateRepository {
    async fn find_doctype_fields(&self, doctype: &str) -> AppResult<Option<Vec<DocTypeField>>> {
        Ok(self.doctype_fields.read().await.get(doctype).cloned())
    }

    async fn replace_doctype_fields(
        &self,
        doctype: &str,
        fields: &[DocTypeField],
    ) -> AppResult<()> {
        self.doctype_fields
            .write()
            .await
            .insert(doctype.to_owned(), fields.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests;
