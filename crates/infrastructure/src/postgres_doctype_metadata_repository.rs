use std::str::FromStr;

use async_trait::async_trait;
use backdate_application::DocTypeMetadataRepository;
use backdate_core::{AppError, AppResult};
use backdate_domain::{DocTypeField, FieldType};
use sqlx::{FromRow, PgPool};

/// PostgreSQL-backed mirror of host document type metadata.
#[derive(Clone)]
pub struct PostgresDocTypeMetadataRepository {
    pool: PgPool,
}

impl PostgresDocTypeMetadataRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct FieldRow {
    fieldname: String,
    label: Option<String>,
    field_type: String,
}

#[async_trait]
impl DocTypeMetadataRepository for PostgresDocTypeMetadataRepository {
    async fn find_doctype_fields(&self, doctype: &str) -> AppResult<Option<Vec<DocTypeField>>> {
        let known = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM doctypes WHERE name = $1)
            "#,
        )
        .bind(doctype)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to look up document type '{doctype}': {error}"))
        })?;

        if !known {
            return Ok(None);
        }

        let rows = sqlx::query_as::<_, FieldRow>(
            r#"
            SELECT fieldname, label, field_type
            FROM doctype_fields
            WHERE doctype = $1
            ORDER BY position
            "#,
        )
        .bind(doctype)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list fields for document type '{doctype}': {error}"
            ))
        })?;

        rows.into_iter()
            .map(|row| {
                let field_type = FieldType::from_str(row.field_type.as_str())?;
                DocTypeField::new(doctype, row.fieldname, row.label, field_type)
            })
            .collect::<AppResult<Vec<_>>>()
            .map(Some)
    }

    async fn replace_doctype_fields(
        &self,
        doctype: &str,
        fields: &[DocTypeField],
    ) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to begin transaction: {error}"))
        })?;

        sqlx::query(
            r#"
            INSERT INTO doctypes (name, updated_at)
            VALUES ($1, now())
            ON CONFLICT (name) DO UPDATE SET updated_at = now()
            "#,
        )
        .bind(doctype)
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to save document type '{doctype}': {error}"))
        })?;

        sqlx::query("DELETE FROM doctype_fields WHERE doctype = $1")
            .bind(doctype)
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to clear fields for document type '{doctype}': {error}"
                ))
            })?;

        for (position, field) in fields.iter().enumerate() {
            let position = i32::try_from(position).map_err(|_| {
                AppError::Validation(format!("too many fields for document type '{doctype}'"))
            })?;

            sqlx::query(
                r#"
                INSERT INTO doctype_fields (doctype, fieldname, label, field_type, position)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(doctype)
            .bind(field.fieldname().as_str())
            .bind(field.label())
            .bind(field.field_type().as_str())
            .bind(position)
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to save field '{}' for document type '{doctype}': {error}",
                    field.fieldname().as_str()
                ))
            })?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(())
    }
}
