use std::collections::HashSet;

use backdate_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::BackdateRule;

/// Singleton backdate permission settings with ordered rule rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackdatePermissionSettings {
    rules: Vec<BackdateRule>,
}

impl BackdatePermissionSettings {
    /// Creates settings from rule rows, rejecting duplicate rows.
    ///
    /// Two rows are duplicates when they share a rule id, or when they share
    /// document type, date field, permission type and target identity. Rows
    /// without a date field only conflict through their rule id.
    pub fn new(rules: Vec<BackdateRule>) -> AppResult<Self> {
        let mut seen_ids = HashSet::new();
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen_ids.insert(rule.rule_id()) {
                return Err(AppError::Conflict(format!(
                    "rule '{}' appears more than once",
                    rule.rule_id()
                )));
            }

            let Some(date_field) = rule.date_field() else {
                continue;
            };

            let key = (
                rule.doc_type().as_str(),
                date_field.as_str(),
                rule.permission_type(),
                rule.target().identity(),
            );
            if !seen.insert(key) {
                return Err(AppError::Conflict(format!(
                    "a permission already exists for document type '{}', \
                     date field '{}' and {} '{}'",
                    rule.doc_type().as_str(),
                    date_field.as_str(),
                    rule.permission_type().as_str().to_lowercase(),
                    rule.target().identity()
                )));
            }
        }

        Ok(Self { rules })
    }

    /// Creates settings without any rule rows.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns rule rows in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[BackdateRule] {
        &self.rules
    }

    /// Returns whether no rule rows are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
