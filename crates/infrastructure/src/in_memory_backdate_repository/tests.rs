use backdate_application::{
    BackdateSettingsRepository, DocTypeMetadataRepository, SubjectRoleRepository,
};
use backdate_domain::{
    BackdatePermissionSettings, BackdateRule, BackdateRuleInput, DocTypeField, FieldType,
    PermissionType,
};

use super::InMemoryBackdateRepository;

#[tokio::test]
async fn settings_are_absent_until_saved() {
    let repository = InMemoryBackdateRepository::new();

    let missing = repository.find_settings().await;
    assert!(matches!(missing, Ok(None)));

    let rule = BackdateRule::new(BackdateRuleInput {
        rule_id: None,
        doc_type: "Payment Entry".to_owned(),
        permission_type: PermissionType::Role,
        user: None,
        role: Some("Accounts Manager".to_owned()),
        date_field: Some("posting_date".to_owned()),
        allowed_days: 30,
    })
    .unwrap_or_else(|_| unreachable!());
    let settings = BackdatePermissionSettings::new(vec![rule]).unwrap_or_else(|_| unreachable!());

    let saved = repository.save_settings(&settings, "admin@example.com").await;
    assert!(saved.is_ok());
    assert_eq!(repository.find_settings().await.ok().flatten(), Some(settings));
    assert_eq!(
        repository.settings_updated_by().await.as_deref(),
        Some("admin@example.com")
    );
}

#[tokio::test]
async fn roles_are_listed_sorted_per_subject() {
    let repository = InMemoryBackdateRepository::new();

    let saved = repository
        .replace_roles_for_subject(
            "clerk@example.com",
            &["Stock User".to_owned(), "Accounts User".to_owned()],
        )
        .await;
    assert!(saved.is_ok());

    let roles = repository.list_roles_for_subject("clerk@example.com").await;
    assert_eq!(
        roles.ok(),
        Some(vec!["Accounts User".to_owned(), "Stock User".to_owned()])
    );

    let unknown = repository.list_roles_for_subject("guest").await;
    assert_eq!(unknown.ok(), Some(Vec::new()));
}

#[tokio::test]
async fn doctype_fields_distinguish_unknown_from_empty() {
    let repository = InMemoryBackdateRepository::new();
    let field = DocTypeField::new("ToDo", "date", Some("Due Date".to_owned()), FieldType::Date)
        .unwrap_or_else(|_| unreachable!());

    assert!(matches!(repository.find_doctype_fields("ToDo").await, Ok(None)));

    let saved = repository.replace_doctype_fields("ToDo", &[field.clone()]).await;
    assert!(saved.is_ok());
    let saved = repository.replace_doctype_fields("Note", &[]).await;
    assert!(saved.is_ok());

    assert_eq!(
        repository.find_doctype_fields("ToDo").await.ok().flatten(),
        Some(vec![field])
    );
    assert_eq!(
        repository.find_doctype_fields("Note").await.ok().flatten(),
        Some(Vec::new())
    );
}
