use std::sync::Arc;

use backdate_application::{
    BackdateSettingsRepository, BackdateSettingsService, BackdateValidationService, Clock,
    DateFieldService, DocTypeMetadataRepository, HostSyncService, SubjectRoleRepository,
};
use backdate_infrastructure::{
    InMemoryBackdateRepository, PostgresBackdateSettingsRepository,
    PostgresDocTypeMetadataRepository, PostgresSubjectRoleRepository, SystemClock,
};
use sqlx::PgPool;
use tracing::warn;

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub(crate) struct RepositorySet {
    pub(crate) settings_repository: Arc<dyn BackdateSettingsRepository>,
    pub(crate) role_repository: Arc<dyn SubjectRoleRepository>,
    pub(crate) metadata_repository: Arc<dyn DocTypeMetadataRepository>,
}

impl RepositorySet {
    fn postgres(pool: &PgPool) -> Self {
        Self {
            settings_repository: Arc::new(PostgresBackdateSettingsRepository::new(pool.clone())),
            role_repository: Arc::new(PostgresSubjectRoleRepository::new(pool.clone())),
            metadata_repository: Arc::new(PostgresDocTypeMetadataRepository::new(pool.clone())),
        }
    }

    pub(crate) fn in_memory(repository: Arc<InMemoryBackdateRepository>) -> Self {
        Self {
            settings_repository: repository.clone(),
            role_repository: repository.clone(),
            metadata_repository: repository,
        }
    }
}

pub fn build_app_state(pool: Option<PgPool>, config: &ApiConfig) -> AppState {
    let repositories = match pool.as_ref() {
        Some(pool) => RepositorySet::postgres(pool),
        None => {
            warn!("DATABASE_URL is not set, backdate settings are kept in memory only");
            RepositorySet::in_memory(Arc::new(InMemoryBackdateRepository::new()))
        }
    };

    assemble_app_state(
        repositories,
        Arc::new(SystemClock::new(config.utc_offset)),
        config.hook_shared_secret.clone(),
        pool,
    )
}

pub(crate) fn assemble_app_state(
    repositories: RepositorySet,
    clock: Arc<dyn Clock>,
    hook_shared_secret: String,
    postgres_pool: Option<PgPool>,
) -> AppState {
    AppState {
        backdate_validation_service: BackdateValidationService::new(
            repositories.settings_repository.clone(),
            repositories.role_repository.clone(),
            clock,
        ),
        backdate_settings_service: BackdateSettingsService::new(
            repositories.settings_repository,
            repositories.metadata_repository.clone(),
        ),
        date_field_service: DateFieldService::new(repositories.metadata_repository.clone()),
        host_sync_service: HostSyncService::new(
            repositories.role_repository,
            repositories.metadata_repository,
        ),
        hook_shared_secret,
        postgres_pool,
    }
}
