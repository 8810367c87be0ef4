mod health;
mod hooks;
mod metadata;
mod settings;

pub use health::{HealthDependencyStatus, HealthResponse};
pub use hooks::{DocumentEventRequest, DocumentEventResponse};
pub use metadata::{
    DateFieldResponse, DateFieldsQuery, DocTypeFieldResponse, PublishedFieldRequest,
    SubjectRolesResponse, SyncDocTypeFieldsRequest, SyncSubjectRolesRequest,
};
pub use settings::{
    BackdateRuleRequest, BackdateRuleResponse, BackdateSettingsResponse,
    SaveBackdateSettingsRequest,
};
