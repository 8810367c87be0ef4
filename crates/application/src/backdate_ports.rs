use async_trait::async_trait;
use backdate_core::AppResult;
use backdate_domain::{BackdatePermissionSettings, DocTypeField};
use chrono::NaiveDate;

/// Repository port for the singleton backdate permission settings.
#[async_trait]
pub trait BackdateSettingsRepository: Send + Sync {
    /// Returns the settings, or `None` when they were never saved.
    async fn find_settings(&self) -> AppResult<Option<BackdatePermissionSettings>>;

    /// Replaces the settings and their rule rows, keeping row order.
    async fn save_settings(
        &self,
        settings: &BackdatePermissionSettings,
        updated_by: &str,
    ) -> AppResult<()>;
}

/// Port resolving the roles assigned to a subject by the host.
#[async_trait]
pub trait SubjectRoleRepository: Send + Sync {
    /// Lists roles assigned to the subject.
    async fn list_roles_for_subject(&self, subject: &str) -> AppResult<Vec<String>>;

    /// Replaces the roles assigned to the subject.
    async fn replace_roles_for_subject(&self, subject: &str, roles: &[String]) -> AppResult<()>;
}

/// Port exposing host field metadata per document type.
#[async_trait]
pub trait DocTypeMetadataRepository: Send + Sync {
    /// Lists fields of a document type in form order, or `None` when the
    /// document type is unknown.
    async fn find_doctype_fields(&self, doctype: &str) -> AppResult<Option<Vec<DocTypeField>>>;

    /// Replaces the published fields of a document type.
    async fn replace_doctype_fields(&self, doctype: &str, fields: &[DocTypeField])
    -> AppResult<()>;
}

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    /// Returns today's date in the configured time zone.
    fn today(&self) -> NaiveDate;
}
