use std::sync::Arc;

use backdate_core::{AppResult, UserIdentity};
use backdate_domain::{
    ActorContext, AllowReason, BackdateDecision, DocumentEvent, SubjectDocument,
    evaluate_backdating,
};
use tracing::{debug, warn};

use crate::backdate_ports::{BackdateSettingsRepository, Clock, SubjectRoleRepository};

/// Application service deciding whether a document save may be backdated.
#[derive(Clone)]
pub struct BackdateValidationService {
    settings_repository: Arc<dyn BackdateSettingsRepository>,
    role_repository: Arc<dyn SubjectRoleRepository>,
    clock: Arc<dyn Clock>,
}

impl BackdateValidationService {
    /// Creates a validation service from its ports.
    #[must_use]
    pub fn new(
        settings_repository: Arc<dyn BackdateSettingsRepository>,
        role_repository: Arc<dyn SubjectRoleRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            settings_repository,
            role_repository,
            clock,
        }
    }

    /// Evaluates the backdating rules for one save without failing on denial.
    pub async fn evaluate_document(
        &self,
        actor: &UserIdentity,
        document: &SubjectDocument,
    ) -> AppResult<BackdateDecision> {
        let today = self.clock.today();
        let settings = self
            .settings_repository
            .find_settings()
            .await?
            .filter(|settings| !settings.is_empty());

        let Some(settings) = settings else {
            debug!(doctype = document.doctype(), "no backdate rules configured");
            return Ok(BackdateDecision::Allowed {
                reason: AllowReason::NoRulesConfigured,
            });
        };

        let roles = self
            .role_repository
            .list_roles_for_subject(actor.subject())
            .await?;
        let actor_context = ActorContext::new(actor.subject(), roles);

        let decision = evaluate_backdating(Some(&settings), document, &actor_context, today)?;
        match &decision {
            BackdateDecision::Allowed { reason } => debug!(
                doctype = document.doctype(),
                subject = actor.subject(),
                reason = reason.as_str(),
                "backdate check passed"
            ),
            BackdateDecision::Denied(denial) => warn!(
                doctype = denial.doctype(),
                subject = actor.subject(),
                days_backdated = denial.days_backdated(),
                date_field = denial.date_field(),
                "backdated save blocked"
            ),
        }

        Ok(decision)
    }

    /// Lifecycle hook entry point, registered for every document type.
    pub async fn handle_document_event(
        &self,
        actor: &UserIdentity,
        document: &SubjectDocument,
        event: DocumentEvent,
    ) -> AppResult<BackdateDecision> {
        debug!(
            event = event.as_str(),
            doctype = document.doctype(),
            "handling document event"
        );

        match event {
            DocumentEvent::Validate => self.evaluate_document(actor, document).await,
        }
    }
}
