use async_trait::async_trait;
use backdate_application::SubjectRoleRepository;
use backdate_core::{AppError, AppResult};
use sqlx::PgPool;

/// PostgreSQL-backed mirror of host role assignments.
#[derive(Clone)]
pub struct PostgresSubjectRoleRepository {
    pool: PgPool,
}

impl PostgresSubjectRoleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubjectRoleRepository for PostgresSubjectRoleRepository {
    async fn list_roles_for_subject(&self, subject: &str) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT role_name
            FROM subject_roles
            WHERE subject = $1
            ORDER BY role_name
            "#,
        )
        .bind(subject)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list roles for subject '{subject}': {error}"
            ))
        })
    }

    async fn replace_roles_for_subject(&self, subject: &str, roles: &[String]) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to begin transaction: {error}"))
        })?;

        sqlx::query("DELETE FROM subject_roles WHERE subject = $1")
            .bind(subject)
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to clear roles for subject '{subject}': {error}"
                ))
            })?;

        sqlx::query(
            r#"
            INSERT INTO subject_roles (subject, role_name)
            SELECT $1, role_name
            FROM UNNEST($2::TEXT[]) AS role_name
            ON CONFLICT (subject, role_name) DO NOTHING
            "#,
        )
        .bind(subject)
        .bind(roles)
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to save roles for subject '{subject}': {error}"
            ))
        })?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(())
    }
}
