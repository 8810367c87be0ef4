use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use backdate_core::{AppError, AppResult};
use backdate_domain::{DocTypeField, FieldType};
use tokio::sync::Mutex;

use crate::{DateFieldService, DocTypeMetadataRepository, SubjectRoleRepository};

use super::{HostSyncService, PublishedFieldInput};

#[derive(Default)]
struct FakeStore {
    roles: Mutex<HashMap<String, Vec<String>>>,
    fields: Mutex<HashMap<String, Vec<DocTypeField>>>,
}

#[async_trait]
impl SubjectRoleRepository for FakeStore {
    async fn list_roles_for_subject(&self, subject: &str) -> AppResult<Vec<String>> {
        Ok(self.roles.lock().await.get(subject).cloned().unwrap_or_default())
    }

    async fn replace_roles_for_subject(&self, subject: &str, roles: &[String]) -> AppResult<()> {
        self.roles
            .lock()
            .await
            .insert(subject.to_owned(), roles.to_vec());
        Ok(())
    }
}

#[async_trait]
impl DocTypeMetadataRepository for FakeStore {
    async fn find_doctype_fields(&self, doctype: &str) -> AppResult<Option<Vec<DocTypeField>>> {
        Ok(self.fields.lock().await.get(doctype).cloned())
    }

    async fn replace_doctype_fields(
        &self,
        doctype: &str,
        fields: &[DocTypeField],
    ) -> AppResult<()> {
        self.fields
            .lock()
            .await
            .insert(doctype.to_owned(), fields.to_vec());
        Ok(())
    }
}

fn published(fieldname: &str, fieldtype: &str) -> PublishedFieldInput {
    PublishedFieldInput {
        fieldname: fieldname.to_owned(),
        label: None,
        fieldtype: fieldtype.to_owned(),
    }
}

#[tokio::test]
async fn subject_roles_are_normalized() {
    let store = Arc::new(FakeStore::default());
    let service = HostSyncService::new(store.clone(), store.clone());

    let synced = service
        .sync_subject_roles(
            "clerk@example.com",
            vec![
                " Accounts User ".to_owned(),
                String::new(),
                "Accounts User".to_owned(),
                "Stock User".to_owned(),
            ],
        )
        .await;
    assert_eq!(
        synced.ok(),
        Some(vec!["Accounts User".to_owned(), "Stock User".to_owned()])
    );
    assert_eq!(
        store.list_roles_for_subject("clerk@example.com").await.ok(),
        Some(vec!["Accounts User".to_owned(), "Stock User".to_owned()])
    );
}

#[tokio::test]
async fn doctype_fields_accept_host_types() {
    let store = Arc::new(FakeStore::default());
    let service = HostSyncService::new(store.clone(), store.clone());

    let synced = service
        .sync_doctype_fields(
            "Sales Invoice",
            vec![published("posting_date", "Date"), published("customer", "Link")],
        )
        .await
        .unwrap_or_default();
    assert_eq!(synced.len(), 2);
    assert_eq!(synced[0].field_type(), &FieldType::Date);
    assert_eq!(synced[1].field_type(), &FieldType::Relation);
}

#[tokio::test]
async fn layout_and_attachment_fields_do_not_block_the_date_lister() {
    let store = Arc::new(FakeStore::default());
    let service = HostSyncService::new(store.clone(), store.clone());
    let lister = DateFieldService::new(store);

    let mut posting_date = published("posting_date", "Date");
    posting_date.label = Some("Posting Date".to_owned());
    let mut due_date = published("due_date", "Datetime");
    due_date.label = Some("Due Date".to_owned());

    let synced = service
        .sync_doctype_fields(
            "Sales Invoice",
            vec![
                published("customer", "Link"),
                posting_date,
                published("details_section", "Section Break"),
                due_date,
                published("attachment", "Attach"),
                published("column_break_4", "Column Break"),
            ],
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(synced[2].field_type(), &FieldType::Other("Section Break".to_owned()));

    let options = lister.list_date_fields("Sales Invoice").await;
    let pairs: Vec<(&str, Option<&str>)> = options
        .iter()
        .map(|option| (option.fieldname.as_str(), option.label.as_deref()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("posting_date", Some("Posting Date")),
            ("due_date", Some("Due Date")),
        ]
    );
}

#[tokio::test]
async fn repeated_fieldname_is_a_conflict() {
    let store = Arc::new(FakeStore::default());
    let service = HostSyncService::new(store.clone(), store);

    let result = service
        .sync_doctype_fields(
            "Sales Invoice",
            vec![
                published("posting_date", "Date"),
                published("posting_date", "Datetime"),
            ],
        )
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}
