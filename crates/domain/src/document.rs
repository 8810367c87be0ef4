use std::str::FromStr;

use backdate_core::{AppError, AppResult, NonEmptyString};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Document lifecycle event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentEvent {
    /// Raised before every insert or update is persisted.
    Validate,
}

impl DocumentEvent {
    /// Returns the host's event name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validate => "validate",
        }
    }
}

impl FromStr for DocumentEvent {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "validate" => Ok(Self::Validate),
            _ => Err(AppError::Validation(format!(
                "document event '{value}' is not handled by the backdate guard"
            ))),
        }
    }
}

/// Document being saved, as handed over by the host for one validation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectDocument {
    doctype: NonEmptyString,
    values: Map<String, Value>,
}

impl SubjectDocument {
    /// Creates a subject document from a document type and its field values.
    pub fn new(doctype: impl Into<String>, values: Value) -> AppResult<Self> {
        let Value::Object(values) = values else {
            return Err(AppError::Validation(
                "document values must be a JSON object".to_owned(),
            ));
        };

        Ok(Self {
            doctype: NonEmptyString::new(doctype)?,
            values,
        })
    }

    /// Creates a subject document from a host payload carrying its own
    /// `doctype` key next to the field values.
    pub fn from_host_payload(payload: Value) -> AppResult<Self> {
        let doctype = payload
            .get("doctype")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| {
                AppError::Validation("document payload requires a 'doctype' string".to_owned())
            })?;

        Self::new(doctype, payload)
    }

    /// Returns the document type name.
    #[must_use]
    pub fn doctype(&self) -> &str {
        self.doctype.as_str()
    }

    /// Returns whether the document carries the field at all.
    #[must_use]
    pub fn has_field(&self, fieldname: &str) -> bool {
        self.values.contains_key(fieldname)
    }

    /// Reads a field as a calendar date.
    ///
    /// Missing fields, `null` and blank strings carry no date and yield
    /// `None`. Date-time values contribute their date part as written.
    pub fn date_value(&self, fieldname: &str) -> AppResult<Option<NaiveDate>> {
        match self.values.get(fieldname) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
            Some(Value::String(text)) => parse_date(text.trim()).map(Some).ok_or_else(|| {
                AppError::Validation(format!(
                    "field '{fieldname}' on '{}' is not a valid date: '{text}'",
                    self.doctype()
                ))
            }),
            Some(other) => Err(AppError::Validation(format!(
                "field '{fieldname}' on '{}' must be a date string, got {other}",
                self.doctype()
            ))),
        }
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|date_time| date_time.date())
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|date_time| date_time.date_naive())
        })
}
