use std::str::FromStr;

use backdate_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Host field types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// UTF-8 string field.
    Text,
    /// Numeric field.
    Number,
    /// Boolean field.
    Boolean,
    /// Date-only field.
    Date,
    /// Date-time field.
    DateTime,
    /// Time-only field.
    Time,
    /// Fixed option list.
    Select,
    /// Arbitrary JSON field.
    Json,
    /// Link to another document type.
    Relation,
    /// Child table of another document type.
    Table,
    /// Any other host type (layout breaks, attachments, ...), kept by label.
    Other(String),
}

impl FieldType {
    /// Returns a stable storage value for the field type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::Select => "select",
            Self::Json => "json",
            Self::Relation => "relation",
            Self::Table => "table",
            Self::Other(label) => label.as_str(),
        }
    }

    /// Returns whether values of this type carry a calendar date.
    #[must_use]
    pub fn is_date_like(&self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }
}

impl FromStr for FieldType {
    type Err = AppError;

    /// Parses storage values as well as the host's own field type labels
    /// (`Date`, `Datetime`, `Data`, `Link`, `Check`, ...). Unlisted labels
    /// become [`FieldType::Other`].
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let label = value.trim();
        if label.is_empty() {
            return Err(AppError::Validation("field type must not be empty".to_owned()));
        }

        match label.to_ascii_lowercase().as_str() {
            "text" | "data" | "small text" | "long text" | "text editor" => Ok(Self::Text),
            "number" | "int" | "float" | "currency" | "percent" => Ok(Self::Number),
            "boolean" | "check" => Ok(Self::Boolean),
            "date" => Ok(Self::Date),
            "datetime" => Ok(Self::DateTime),
            "time" => Ok(Self::Time),
            "select" => Ok(Self::Select),
            "json" => Ok(Self::Json),
            "relation" | "link" | "dynamic link" => Ok(Self::Relation),
            "table" => Ok(Self::Table),
            _ => Ok(Self::Other(label.to_owned())),
        }
    }
}

/// Field metadata for one document type, as published by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocTypeField {
    doctype: NonEmptyString,
    fieldname: NonEmptyString,
    label: Option<String>,
    field_type: FieldType,
}

impl DocTypeField {
    /// Creates validated field metadata.
    pub fn new(
        doctype: impl Into<String>,
        fieldname: impl Into<String>,
        label: Option<String>,
        field_type: FieldType,
    ) -> AppResult<Self> {
        Ok(Self {
            doctype: NonEmptyString::new(doctype)?,
            fieldname: NonEmptyString::new(fieldname)?,
            label: label.filter(|label| !label.trim().is_empty()),
            field_type,
        })
    }

    /// Returns the owning document type name.
    #[must_use]
    pub fn doctype(&self) -> &NonEmptyString {
        &self.doctype
    }

    /// Returns the field name used as the document key.
    #[must_use]
    pub fn fieldname(&self) -> &NonEmptyString {
        &self.fieldname
    }

    /// Returns the label configured on the field, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the field type.
    #[must_use]
    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }
}

/// Selectable date field for a rule row's `date_field` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFieldOption {
    /// Field name used as the document key.
    pub fieldname: String,
    /// Label configured on the field.
    pub label: Option<String>,
}

impl DateFieldOption {
    /// Projects date-like fields into options, keeping metadata order.
    #[must_use]
    pub fn from_fields(fields: &[DocTypeField]) -> Vec<Self> {
        fields
            .iter()
            .filter(|field| field.field_type().is_date_like())
            .map(|field| Self {
                fieldname: field.fieldname().as_str().to_owned(),
                label: field.label().map(str::to_owned),
            })
            .collect()
    }
}
