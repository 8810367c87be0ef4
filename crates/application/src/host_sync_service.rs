use std::str::FromStr;
use std::sync::Arc;

use backdate_core::{AppError, AppResult, NonEmptyString};
use backdate_domain::{DocTypeField, FieldType};
use tracing::info;

use crate::backdate_ports::{DocTypeMetadataRepository, SubjectRoleRepository};

/// Field metadata pushed by the host for one document type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedFieldInput {
    /// Field name used as the document key.
    pub fieldname: String,
    /// Label shown on the host form.
    pub label: Option<String>,
    /// Host field type label (`Date`, `Datetime`, `Link`, ...).
    pub fieldtype: String,
}

/// Mirrors host-owned roles and field metadata into local storage.
#[derive(Clone)]
pub struct HostSyncService {
    role_repository: Arc<dyn SubjectRoleRepository>,
    metadata_repository: Arc<dyn DocTypeMetadataRepository>,
}

impl HostSyncService {
    /// Creates a sync service from its ports.
    #[must_use]
    pub fn new(
        role_repository: Arc<dyn SubjectRoleRepository>,
        metadata_repository: Arc<dyn DocTypeMetadataRepository>,
    ) -> Self {
        Self {
            role_repository,
            metadata_repository,
        }
    }

    /// Replaces the roles assigned to a subject, ignoring blank and repeated names.
    pub async fn sync_subject_roles(
        &self,
        subject: &str,
        roles: Vec<String>,
    ) -> AppResult<Vec<String>> {
        let subject = NonEmptyString::new(subject)?;
        let mut normalized: Vec<String> = Vec::with_capacity(roles.len());
        for role in roles {
            let role = role.trim().to_owned();
            if !role.is_empty() && !normalized.contains(&role) {
                normalized.push(role);
            }
        }

        self.role_repository
            .replace_roles_for_subject(subject.as_str(), &normalized)
            .await?;

        info!(
            subject = subject.as_str(),
            role_count = normalized.len(),
            "synced subject roles"
        );
        Ok(normalized)
    }

    /// Replaces the published fields of a document type, keeping form order.
    pub async fn sync_doctype_fields(
        &self,
        doctype: &str,
        fields: Vec<PublishedFieldInput>,
    ) -> AppResult<Vec<DocTypeField>> {
        let doctype = NonEmptyString::new(doctype)?;
        let mut published: Vec<DocTypeField> = Vec::with_capacity(fields.len());

        for input in fields {
            let field_type = FieldType::from_str(input.fieldtype.as_str())?;
            let field =
                DocTypeField::new(doctype.as_str(), input.fieldname, input.label, field_type)?;

            if published
                .iter()
                .any(|existing| existing.fieldname() == field.fieldname())
            {
                return Err(AppError::Conflict(format!(
                    "field '{}' is published twice for '{}'",
                    field.fieldname().as_str(),
                    doctype.as_str()
                )));
            }
            published.push(field);
        }

        self.metadata_repository
            .replace_doctype_fields(doctype.as_str(), &published)
            .await?;

        info!(
            doctype = doctype.as_str(),
            field_count = published.len(),
            "synced document type fields"
        );
        Ok(published)
    }
}

#[cfg(test)]
mod tests;
