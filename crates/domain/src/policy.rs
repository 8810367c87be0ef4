use backdate_core::AppResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ActorContext, BackdatePermissionSettings, SubjectDocument, humanize_fieldname};

/// Why a save was allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowReason {
    /// No settings or no rule rows exist.
    NoRulesConfigured,
    /// No rule targets this document type and actor.
    NoApplicableRule,
    /// Applicable rules exist but none has a date field usable on the document.
    NoUsableDateField,
    /// The document date is today or in the future.
    NotBackdated,
    /// An applicable rule allows the backdating window.
    WithinAllowance,
}

impl AllowReason {
    /// Returns a stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoRulesConfigured => "no_rules_configured",
            Self::NoApplicableRule => "no_applicable_rule",
            Self::NoUsableDateField => "no_usable_date_field",
            Self::NotBackdated => "not_backdated",
            Self::WithinAllowance => "within_allowance",
        }
    }
}

/// Details of a blocked save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackdateDenial {
    doctype: String,
    days_backdated: i64,
    date_field: String,
}

impl BackdateDenial {
    /// Returns the document type of the blocked save.
    #[must_use]
    pub fn doctype(&self) -> &str {
        self.doctype.as_str()
    }

    /// Returns how many days the document is backdated.
    #[must_use]
    pub fn days_backdated(&self) -> i64 {
        self.days_backdated
    }

    /// Returns the offending date field name.
    #[must_use]
    pub fn date_field(&self) -> &str {
        self.date_field.as_str()
    }

    /// Returns the offending date field as a human label.
    #[must_use]
    pub fn field_label(&self) -> String {
        humanize_fieldname(self.date_field.as_str())
    }

    /// Returns the user-visible message shown when the save is blocked.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Backdating {} by {} day(s) using '{}' is not allowed for this user or role. \
             Please select a valid date within the allowed range.",
            self.doctype,
            self.days_backdated,
            self.field_label()
        )
    }
}

/// Outcome of a backdating check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BackdateDecision {
    /// The save may proceed.
    Allowed {
        /// Why the save was allowed.
        reason: AllowReason,
    },
    /// The save must be aborted.
    Denied(BackdateDenial),
}

impl BackdateDecision {
    /// Returns whether the save may proceed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the denial details for a blocked save.
    #[must_use]
    pub fn denial(&self) -> Option<&BackdateDenial> {
        match self {
            Self::Allowed { .. } => None,
            Self::Denied(denial) => Some(denial),
        }
    }

    fn allowed(reason: AllowReason) -> Self {
        Self::Allowed { reason }
    }
}

/// Decides whether `actor` may save `document` given the configured rules.
///
/// Rules are scanned in declaration order. A rule applies when both its
/// document type and its target match; applicable rules whose date field is
/// missing from the document are skipped. A present date field holding `null`
/// or a blank string reads as `today`, so it is never backdated. The first applicable rule that
/// finds the document not backdated or within its allowance allows the save.
/// When applicable rules were found and none allowed it, the save is denied
/// citing the last rejecting rule.
pub fn evaluate_backdating(
    settings: Option<&BackdatePermissionSettings>,
    document: &SubjectDocument,
    actor: &ActorContext,
    today: NaiveDate,
) -> AppResult<BackdateDecision> {
    let Some(settings) = settings.filter(|settings| !settings.is_empty()) else {
        return Ok(BackdateDecision::allowed(AllowReason::NoRulesConfigured));
    };

    let mut applicable_rule_found = false;
    let mut rejection: Option<(i64, &str)> = None;

    for rule in settings.rules() {
        if !rule.applies_to(document.doctype(), actor) {
            continue;
        }
        applicable_rule_found = true;

        let Some(date_field) = rule.date_field() else {
            continue;
        };
        if !document.has_field(date_field.as_str()) {
            continue;
        }
        let document_date = document.date_value(date_field.as_str())?.unwrap_or(today);

        let days_backdated = (today - document_date).num_days();
        if days_backdated <= 0 {
            return Ok(BackdateDecision::allowed(AllowReason::NotBackdated));
        }
        if days_backdated <= i64::from(rule.allowed_days()) {
            return Ok(BackdateDecision::allowed(AllowReason::WithinAllowance));
        }

        rejection = Some((days_backdated, date_field.as_str()));
    }

    match (applicable_rule_found, rejection) {
        (false, _) => Ok(BackdateDecision::allowed(AllowReason::NoApplicableRule)),
        (true, None) => Ok(BackdateDecision::allowed(AllowReason::NoUsableDateField)),
        (true, Some((days_backdated, date_field))) => {
            Ok(BackdateDecision::Denied(BackdateDenial {
                doctype: document.doctype().to_owned(),
                days_backdated,
                date_field: date_field.to_owned(),
            }))
        }
    }
}
