//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod backdate_rule;
mod document;
mod label;
mod metadata;
mod policy;
mod settings;

pub use backdate_rule::{
    ActorContext, BackdateRule, BackdateRuleInput, PermissionType, RuleTarget,
};
pub use document::{DocumentEvent, SubjectDocument};
pub use label::humanize_fieldname;
pub use metadata::{DateFieldOption, DocTypeField, FieldType};
pub use policy::{AllowReason, BackdateDecision, BackdateDenial, evaluate_backdating};
pub use settings::BackdatePermissionSettings;
