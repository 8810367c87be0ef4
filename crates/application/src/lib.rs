//! Application services and ports.

#![forbid(unsafe_code)]

mod backdate_ports;
mod backdate_settings_service;
mod backdate_validation_service;
mod date_field_service;
mod host_sync_service;

pub use backdate_ports::{
    BackdateSettingsRepository, Clock, DocTypeMetadataRepository, SubjectRoleRepository,
};
pub use backdate_settings_service::BackdateSettingsService;
pub use backdate_validation_service::BackdateValidationService;
pub use date_field_service::DateFieldService;
pub use host_sync_service::{HostSyncService, PublishedFieldInput};
