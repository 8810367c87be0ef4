use std::str::FromStr;

use async_trait::async_trait;
use backdate_application::BackdateSettingsRepository;
use backdate_core::{AppError, AppResult};
use backdate_domain::{BackdatePermissionSettings, BackdateRule, BackdateRuleInput, PermissionType};
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL-backed backdate permission settings repository.
#[derive(Clone)]
pub struct PostgresBackdateSettingsRepository {
    pool: PgPool,
}

impl PostgresBackdateSettingsRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RuleRow {
    id: Uuid,
    doc_type: String,
    permission_type: String,
    target_identity: String,
    date_field: Option<String>,
    allowed_days: i64,
}

impl RuleRow {
    fn into_rule(self) -> AppResult<BackdateRule> {
        let permission_type = PermissionType::from_str(self.permission_type.as_str())?;
        let (user, role) = match permission_type {
            PermissionType::User => (Some(self.target_identity), None),
            PermissionType::Role => (None, Some(self.target_identity)),
        };

        BackdateRule::new(BackdateRuleInput {
            rule_id: Some(self.id),
            doc_type: self.doc_type,
            permission_type,
            user,
            role,
            date_field: self.date_field,
            allowed_days: self.allowed_days,
        })
    }
}

#[async_trait]
impl BackdateSettingsRepository for PostgresBackdateSettingsRepository {
    async fn find_settings(&self) -> AppResult<Option<BackdatePermissionSettings>> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM backdate_permission_settings)
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load backdate permission settings: {error}"))
        })?;

        if !exists {
            return Ok(None);
        }

        let rows = sqlx::query_as::<_, RuleRow>(
            r#"
            SELECT id, doc_type, permission_type, target_identity, date_field, allowed_days
            FROM backdate_permission_rules
            ORDER BY position
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load backdate permission rules: {error}"))
        })?;

        let rules = rows
            .into_iter()
            .map(RuleRow::into_rule)
            .collect::<AppResult<Vec<_>>>()?;
        debug!(rule_count = rules.len(), "loaded backdate permission rules");

        BackdatePermissionSettings::new(rules).map(Some)
    }

    async fn save_settings(
        &self,
        settings: &BackdatePermissionSettings,
        updated_by: &str,
    ) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to start backdate settings transaction: {error}"
            ))
        })?;

        sqlx::query(
            r#"
            INSERT INTO backdate_permission_settings (singleton, updated_by, updated_at)
            VALUES (TRUE, $1, now())
            ON CONFLICT (singleton)
            DO UPDATE SET
                updated_by = EXCLUDED.updated_by,
                updated_at = now()
            "#,
        )
        .bind(updated_by)
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to save backdate permission settings: {error}"))
        })?;

        sqlx::query("DELETE FROM backdate_permission_rules")
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to clear backdate permission rules: {error}"))
            })?;

        for (position, rule) in settings.rules().iter().enumerate() {
            let position = i32::try_from(position).map_err(|_| {
                AppError::Validation("too many backdate permission rules".to_owned())
            })?;

            sqlx::query(
                r#"
                INSERT INTO backdate_permission_rules (
                    id,
                    position,
                    doc_type,
                    permission_type,
                    target_identity,
                    date_field,
                    allowed_days
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(rule.rule_id())
            .bind(position)
            .bind(rule.doc_type().as_str())
            .bind(rule.permission_type().as_str())
            .bind(rule.target().identity())
            .bind(rule.date_field().map(|field| field.as_str()))
            .bind(i64::from(rule.allowed_days()))
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to save backdate permission rule for '{}': {error}",
                    rule.doc_type().as_str()
                ))
            })?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to commit backdate settings transaction: {error}"
            ))
        })?;

        Ok(())
    }
}
