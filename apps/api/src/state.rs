use backdate_application::{
    BackdateSettingsService, BackdateValidationService, DateFieldService, HostSyncService,
};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub backdate_validation_service: BackdateValidationService,
    pub backdate_settings_service: BackdateSettingsService,
    pub date_field_service: DateFieldService,
    pub host_sync_service: HostSyncService,
    pub hook_shared_secret: String,
    pub postgres_pool: Option<PgPool>,
}
