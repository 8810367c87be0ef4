//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_backdate_repository;
mod postgres_backdate_settings_repository;
mod postgres_doctype_metadata_repository;
mod postgres_subject_role_repository;
mod system_clock;

pub use in_memory_backdate_repository::InMemoryBackdateRepository;
pub use postgres_backdate_settings_repository::PostgresBackdateSettingsRepository;
pub use postgres_doctype_metadata_repository::PostgresDocTypeMetadataRepository;
pub use postgres_subject_role_repository::PostgresSubjectRoleRepository;
pub use system_clock::SystemClock;
