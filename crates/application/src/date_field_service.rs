use std::sync::Arc;

use backdate_domain::DateFieldOption;
use tracing::error;

use crate::backdate_ports::DocTypeMetadataRepository;

/// Lists selectable date fields for the settings form.
#[derive(Clone)]
pub struct DateFieldService {
    metadata_repository: Arc<dyn DocTypeMetadataRepository>,
}

impl DateFieldService {
    /// Creates a date field service from a metadata repository.
    #[must_use]
    pub fn new(metadata_repository: Arc<dyn DocTypeMetadataRepository>) -> Self {
        Self {
            metadata_repository,
        }
    }

    /// Returns the date and date-time fields of a document type in form order.
    ///
    /// Never fails: a blank name yields an empty list, and unknown document
    /// types or lookup failures are logged and yield an empty list.
    pub async fn list_date_fields(&self, doctype_name: &str) -> Vec<DateFieldOption> {
        let doctype_name = doctype_name.trim();
        if doctype_name.is_empty() {
            return Vec::new();
        }

        match self
            .metadata_repository
            .find_doctype_fields(doctype_name)
            .await
        {
            Ok(Some(fields)) => DateFieldOption::from_fields(&fields),
            Ok(None) => {
                error!(
                    doctype = doctype_name,
                    "error getting date fields: unknown document type"
                );
                Vec::new()
            }
            Err(lookup_error) => {
                error!(
                    doctype = doctype_name,
                    error = %lookup_error,
                    "error getting date fields"
                );
                Vec::new()
            }
        }
    }
}
