use std::collections::BTreeSet;
use std::str::FromStr;

use backdate_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity kind a rule row is granted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionType {
    /// Rule applies to one user.
    User,
    /// Rule applies to every user holding a role.
    Role,
}

impl PermissionType {
    /// Returns a stable storage value for the permission type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Role => "Role",
        }
    }
}

impl FromStr for PermissionType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "role" => Ok(Self::Role),
            _ => Err(AppError::Validation(format!(
                "unknown permission type '{value}'"
            ))),
        }
    }
}

/// Acting identity with its resolved roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorContext {
    subject: String,
    roles: BTreeSet<String>,
}

impl ActorContext {
    /// Creates an actor context from a subject and its assigned roles.
    #[must_use]
    pub fn new(subject: impl Into<String>, roles: impl IntoIterator<Item = String>) -> Self {
        Self {
            subject: subject.into(),
            roles: roles.into_iter().collect(),
        }
    }

    /// Returns the acting subject.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns whether the actor holds the role.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

/// Identity a rule row targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "permission_type", content = "identity")]
pub enum RuleTarget {
    /// Exact user match.
    User(NonEmptyString),
    /// Role membership match.
    Role(NonEmptyString),
}

impl RuleTarget {
    /// Returns the permission type of this target.
    #[must_use]
    pub fn permission_type(&self) -> PermissionType {
        match self {
            Self::User(_) => PermissionType::User,
            Self::Role(_) => PermissionType::Role,
        }
    }

    /// Returns the targeted user or role name.
    #[must_use]
    pub fn identity(&self) -> &str {
        match self {
            Self::User(user) | Self::Role(user) => user.as_str(),
        }
    }

    /// Returns whether the actor is covered by this target.
    #[must_use]
    pub fn matches(&self, actor: &ActorContext) -> bool {
        match self {
            Self::User(user) => user.as_str() == actor.subject(),
            Self::Role(role) => actor.has_role(role.as_str()),
        }
    }
}

/// Input payload for one backdate rule row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackdateRuleInput {
    /// Existing row id; a new one is generated when absent.
    pub rule_id: Option<Uuid>,
    /// Document type the row applies to.
    pub doc_type: String,
    /// Identity kind the row is granted to.
    pub permission_type: PermissionType,
    /// Target user for `User` rows.
    pub user: Option<String>,
    /// Target role for `Role` rows.
    pub role: Option<String>,
    /// Date field compared against today.
    pub date_field: Option<String>,
    /// Maximum number of days a record may be backdated.
    pub allowed_days: i64,
}

/// One configured backdating allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackdateRule {
    rule_id: Uuid,
    doc_type: NonEmptyString,
    target: RuleTarget,
    date_field: Option<NonEmptyString>,
    allowed_days: u32,
}

impl BackdateRule {
    /// Creates a validated rule row.
    ///
    /// The identity not selected by `permission_type` is discarded.
    pub fn new(input: BackdateRuleInput) -> AppResult<Self> {
        let BackdateRuleInput {
            rule_id,
            doc_type,
            permission_type,
            user,
            role,
            date_field,
            allowed_days,
        } = input;

        let doc_type = NonEmptyString::new(doc_type).map_err(|_| {
            AppError::Validation("backdate rules require a document type".to_owned())
        })?;

        let target = match permission_type {
            PermissionType::User => NonEmptyString::optional(user)
                .map(RuleTarget::User)
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "user rule for '{}' requires a user",
                        doc_type.as_str()
                    ))
                })?,
            PermissionType::Role => NonEmptyString::optional(role)
                .map(RuleTarget::Role)
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "role rule for '{}' requires a role",
                        doc_type.as_str()
                    ))
                })?,
        };

        let allowed_days = u32::try_from(allowed_days).map_err(|_| {
            AppError::Validation(format!(
                "allowed days must be between 0 and {}, got {allowed_days}",
                u32::MAX
            ))
        })?;

        Ok(Self {
            rule_id: rule_id.unwrap_or_else(Uuid::new_v4),
            doc_type,
            target,
            date_field: NonEmptyString::optional(date_field),
            allowed_days,
        })
    }

    /// Returns the stable row id.
    #[must_use]
    pub fn rule_id(&self) -> Uuid {
        self.rule_id
    }

    /// Returns the document type the row applies to.
    #[must_use]
    pub fn doc_type(&self) -> &NonEmptyString {
        &self.doc_type
    }

    /// Returns the targeted identity.
    #[must_use]
    pub fn target(&self) -> &RuleTarget {
        &self.target
    }

    /// Returns the permission type derived from the target.
    #[must_use]
    pub fn permission_type(&self) -> PermissionType {
        self.target.permission_type()
    }

    /// Returns the date field compared against today, if configured.
    #[must_use]
    pub fn date_field(&self) -> Option<&NonEmptyString> {
        self.date_field.as_ref()
    }

    /// Returns the backdating allowance in days.
    #[must_use]
    pub fn allowed_days(&self) -> u32 {
        self.allowed_days
    }

    /// Returns whether the row governs saves of `doctype` by `actor`.
    #[must_use]
    pub fn applies_to(&self, doctype: &str, actor: &ActorContext) -> bool {
        self.doc_type.as_str() == doctype && self.target.matches(actor)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use backdate_core::AppError;

    use super::{ActorContext, BackdateRule, BackdateRuleInput, PermissionType, RuleTarget};

    fn input(permission_type: PermissionType) -> BackdateRuleInput {
        BackdateRuleInput {
            rule_id: None,
            doc_type: "Sales Invoice".to_owned(),
            permission_type,
            user: Some("accounts@example.com".to_owned()),
            role: Some("Accounts Manager".to_owned()),
            date_field: Some("posting_date".to_owned()),
            allowed_days: 5,
        }
    }

    #[test]
    fn permission_type_parses_host_values() {
        assert_eq!(PermissionType::from_str("User").ok(), Some(PermissionType::User));
        assert_eq!(PermissionType::from_str("role").ok(), Some(PermissionType::Role));
        assert!(PermissionType::from_str("Group").is_err());
    }

    #[test]
    fn user_rule_discards_role_identity() {
        let rule =
            BackdateRule::new(input(PermissionType::User)).unwrap_or_else(|_| unreachable!());
        assert_eq!(rule.permission_type(), PermissionType::User);
        assert_eq!(rule.target().identity(), "accounts@example.com");
    }

    #[test]
    fn role_rule_requires_role() {
        let mut role_input = input(PermissionType::Role);
        role_input.role = Some("   ".to_owned());
        let result = BackdateRule::new(role_input);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn negative_allowance_is_rejected() {
        let mut negative = input(PermissionType::User);
        negative.allowed_days = -1;
        assert!(BackdateRule::new(negative).is_err());
    }

    #[test]
    fn blank_date_field_is_kept_as_absent() {
        let mut without_field = input(PermissionType::User);
        without_field.date_field = Some(String::new());
        let rule = BackdateRule::new(without_field).unwrap_or_else(|_| unreachable!());
        assert!(rule.date_field().is_none());
    }

    #[test]
    fn role_target_matches_membership_only() {
        let rule =
            BackdateRule::new(input(PermissionType::Role)).unwrap_or_else(|_| unreachable!());
        let member = ActorContext::new("clerk@example.com", vec!["Accounts Manager".to_owned()]);
        let outsider = ActorContext::new("Accounts Manager", Vec::new());

        assert!(rule.applies_to("Sales Invoice", &member));
        assert!(!rule.applies_to("Sales Invoice", &outsider));
        assert!(!rule.applies_to("Purchase Invoice", &member));
        assert!(matches!(rule.target(), RuleTarget::Role(_)));
    }
}
