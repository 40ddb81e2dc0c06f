use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use super::{ActionKind, ActionOutcome, BulkAction, DispatchError, Disposition};
use crate::cache::ResultCache;
use crate::datasource::DataSource;
use crate::filter::Scalar;
use crate::mail::{EmailMessage, MailComposer, Mailer};
use crate::model::{Entity, Record};
use crate::registry::entity_def;
use crate::selection::SelectionSet;
use crate::utils::today;

/// Static regex for usable email addresses (compiled once on first use)
#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("EMAIL_REGEX is a valid regex literal")
});

#[derive(Debug)]
enum DispatchState {
    Idle,
    Confirming(BulkAction),
    Inflight,
}

/// Runs one bulk action at a time against a page's selection.
///
/// Success clears the selection; a mutation additionally invalidates
/// the entity's cache. Failure leaves the selection intact so the
/// operator can retry without re-selecting.
pub struct BulkDispatcher {
    source: Arc<dyn DataSource>,
    cache: Arc<ResultCache>,
    composer: Arc<MailComposer>,
    mailer: Arc<dyn Mailer>,
    entity: Entity,
    available: Vec<ActionKind>,
    state: DispatchState,
}

impl BulkDispatcher {
    #[must_use]
    pub fn new(
        source: Arc<dyn DataSource>,
        cache: Arc<ResultCache>,
        composer: Arc<MailComposer>,
        mailer: Arc<dyn Mailer>,
        entity: Entity,
    ) -> Self {
        Self {
            source,
            cache,
            composer,
            mailer,
            entity,
            available: ActionKind::DEFAULT.to_vec(),
            state: DispatchState::Idle,
        }
    }

    /// Replace the page's action allow-list.
    #[must_use]
    pub fn with_actions(mut self, actions: Vec<ActionKind>) -> Self {
        self.available = actions;
        self
    }

    #[must_use]
    pub const fn entity(&self) -> Entity {
        self.entity
    }

    #[must_use]
    pub fn available_actions(&self) -> &[ActionKind] {
        &self.available
    }

    /// Action parked at the confirmation gate, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&BulkAction> {
        match &self.state {
            DispatchState::Confirming(action) => Some(action),
            DispatchState::Idle | DispatchState::Inflight => None,
        }
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.state, DispatchState::Idle)
    }

    /// Validate and either run the action or park it for confirmation.
    pub async fn request(
        &mut self,
        action: BulkAction,
        selection: &mut SelectionSet,
        rows: &[Record],
    ) -> Result<Disposition, DispatchError> {
        if !matches!(self.state, DispatchState::Idle) {
            return Err(DispatchError::Busy);
        }
        if !self.available.contains(&action.kind()) {
            return Err(DispatchError::NotAvailable(action.kind()));
        }
        if selection.is_empty() {
            return Err(DispatchError::EmptySelection);
        }
        if let BulkAction::StatusChange { status } = &action {
            if !entity_def(self.entity).has_status(status) {
                return Err(DispatchError::UnknownStatus {
                    entity: self.entity,
                    status: status.clone(),
                });
            }
        }
        if action.is_destructive() {
            self.state = DispatchState::Confirming(action);
            return Ok(Disposition::AwaitingConfirmation);
        }
        let outcome = self.execute(action, selection, rows).await?;
        Ok(Disposition::Executed(outcome))
    }

    /// Run the action parked at the confirmation gate.
    pub async fn confirm(
        &mut self,
        selection: &mut SelectionSet,
        rows: &[Record],
    ) -> Result<ActionOutcome, DispatchError> {
        let previous = std::mem::replace(&mut self.state, DispatchState::Idle);
        let DispatchState::Confirming(action) = previous else {
            self.state = previous;
            return Err(DispatchError::NothingPending);
        };
        self.execute(action, selection, rows).await
    }

    /// Drop a parked action. Declining confirmation is not an error.
    pub fn cancel(&mut self) {
        if matches!(self.state, DispatchState::Confirming(_)) {
            self.state = DispatchState::Idle;
        }
    }

    async fn execute(
        &mut self,
        action: BulkAction,
        selection: &mut SelectionSet,
        rows: &[Record],
    ) -> Result<ActionOutcome, DispatchError> {
        let kind = action.kind();
        self.state = DispatchState::Inflight;
        let result = self.run(action, selection, rows).await;
        self.state = DispatchState::Idle;
        match &result {
            Ok(outcome) => {
                info!(entity = %self.entity, action = %kind, ?outcome, "bulk action settled");
                if matches!(outcome, ActionOutcome::Mutated { .. }) {
                    self.cache.invalidate(self.entity).await;
                }
                // A no-recipients outcome leaves the selection alone so
                // the operator can fix addresses and retry
                if !matches!(outcome, ActionOutcome::NoRecipients) {
                    selection.clear();
                }
            }
            Err(error) => {
                warn!(entity = %self.entity, action = %kind, %error, "bulk action failed");
            }
        }
        result
    }

    async fn run(
        &self,
        action: BulkAction,
        selection: &SelectionSet,
        rows: &[Record],
    ) -> Result<ActionOutcome, DispatchError> {
        let ids = selection.ids();
        match action {
            BulkAction::Delete => {
                let affected = self.source.delete_many(self.entity, &ids).await?;
                Ok(ActionOutcome::Mutated { affected })
            }
            BulkAction::StatusChange { status } => {
                let affected = self
                    .source
                    .update_many(self.entity, &ids, &json!({ "status": status }))
                    .await?;
                Ok(ActionOutcome::Mutated { affected })
            }
            BulkAction::Approve { approved_amount } => {
                let mut fields = Map::new();
                fields.insert("status".to_string(), Value::String("approved".to_string()));
                fields.insert(
                    "approval_date".to_string(),
                    Value::String(today().to_string()),
                );
                if let Some(amount) = approved_amount {
                    fields.insert("approved_amount".to_string(), json!(amount));
                }
                let affected = self
                    .source
                    .update_many(self.entity, &ids, &Value::Object(fields))
                    .await?;
                Ok(ActionOutcome::Mutated { affected })
            }
            BulkAction::Reject { rejection_reason } => {
                let mut fields = Map::new();
                fields.insert("status".to_string(), Value::String("rejected".to_string()));
                if let Some(reason) = rejection_reason {
                    fields.insert("rejection_reason".to_string(), Value::String(reason));
                }
                let affected = self
                    .source
                    .update_many(self.entity, &ids, &Value::Object(fields))
                    .await?;
                Ok(ActionOutcome::Mutated { affected })
            }
            BulkAction::Email { subject, body } => {
                let recipients = collect_recipients(selection, rows, self.entity);
                if recipients.is_empty() {
                    return Ok(ActionOutcome::NoRecipients);
                }
                let count = recipients.len();
                let message = EmailMessage::html(recipients, subject, body);
                let rendered = self.composer.render(&message)?;
                self.mailer.send(&rendered).await?;
                Ok(ActionOutcome::EmailSent { recipients: count })
            }
        }
    }
}

/// One address per selected row in row order, duplicates preserved.
/// Rows with no usable address are skipped.
fn collect_recipients(selection: &SelectionSet, rows: &[Record], entity: Entity) -> Vec<String> {
    let contact_fields = entity_def(entity).contact_fields;
    rows.iter()
        .filter(|row| selection.contains(row.id()))
        .filter_map(|row| contact_address(row, contact_fields))
        .collect()
}

/// First usable address among the entity's contact fields.
fn contact_address(row: &Record, contact_fields: &[&'static str]) -> Option<String> {
    contact_fields.iter().find_map(|field| {
        if let Some(Scalar::Text(address)) = row.field_value(field) {
            let trimmed = address.trim();
            if EMAIL_REGEX.is_match(trimmed) {
                return Some(trimmed.to_string());
            }
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::Mutex;

    use super::*;
    use crate::cache::CacheConfig;
    use crate::datasource::MemorySource;
    use crate::mail::{MailError, RenderedEmail, SendReceipt};
    use crate::model::Family;

    struct RecordingMailer {
        sent: Mutex<Vec<RenderedEmail>>,
    }

    impl RecordingMailer {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
            }
        }

        async fn sent(&self) -> Vec<RenderedEmail> {
            self.sent.lock().await.clone()
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, message: &RenderedEmail) -> Result<SendReceipt, MailError> {
            self.sent.lock().await.push(message.clone());
            Ok(SendReceipt {
                message_id: "msg-1".to_string(),
            })
        }
    }

    fn family(id: &str, email: Option<&str>) -> Record {
        Record::Family(Box::new(
            serde_json::from_value::<Family>(json!({
                "id": id,
                "status": "active",
                "husband_last_name": "Cohen",
                "husband_email": email,
                "created_at": "2024-01-01T10:00:00Z",
                "updated_at": "2024-01-01T10:00:00Z"
            }))
            .unwrap(),
        ))
    }

    struct Fixture {
        source: Arc<MemorySource>,
        mailer: Arc<RecordingMailer>,
        dispatcher: BulkDispatcher,
    }

    async fn fixture(records: Vec<Record>) -> Fixture {
        let source = Arc::new(MemorySource::new());
        source.seed(records).await;
        let cache = Arc::new(ResultCache::new(source.clone(), &CacheConfig::default()));
        let composer = Arc::new(MailComposer::new("noreply@example.org", "Tov VaChesed"));
        let mailer = Arc::new(RecordingMailer::new());
        let dispatcher = BulkDispatcher::new(
            source.clone(),
            cache,
            composer,
            mailer.clone(),
            Entity::Families,
        );
        Fixture {
            source,
            mailer,
            dispatcher,
        }
    }

    fn select(ids: &[&str]) -> SelectionSet {
        let mut selection = SelectionSet::new();
        for id in ids {
            selection.toggle(id, true);
        }
        selection
    }

    #[tokio::test]
    async fn test_status_change_runs_without_confirmation() {
        let mut fx = fixture(vec![family("fam-1", None), family("fam-2", None)]).await;
        let rows = vec![family("fam-1", None), family("fam-2", None)];
        let mut selection = select(&["fam-1", "fam-2"]);
        let disposition = fx
            .dispatcher
            .request(
                BulkAction::StatusChange {
                    status: "inactive".to_string(),
                },
                &mut selection,
                &rows,
            )
            .await
            .unwrap();
        assert_eq!(
            disposition,
            Disposition::Executed(ActionOutcome::Mutated { affected: 2 })
        );
        assert!(selection.is_empty());
        let fetched = fx
            .source
            .get(Entity::Families, "fam-1")
            .await
            .unwrap()
            .unwrap();
        match fetched {
            Record::Family(updated) => assert_eq!(updated.status.as_str(), "inactive"),
            _ => panic!("wrong entity"),
        }
    }

    #[tokio::test]
    async fn test_delete_waits_for_confirmation() {
        let mut fx = fixture(vec![family("fam-1", None)]).await;
        let rows = vec![family("fam-1", None)];
        let mut selection = select(&["fam-1"]);
        let disposition = fx
            .dispatcher
            .request(BulkAction::Delete, &mut selection, &rows)
            .await
            .unwrap();
        assert_eq!(disposition, Disposition::AwaitingConfirmation);
        assert!(fx
            .source
            .get(Entity::Families, "fam-1")
            .await
            .unwrap()
            .is_some());
        let outcome = fx.dispatcher.confirm(&mut selection, &rows).await.unwrap();
        assert_eq!(outcome, ActionOutcome::Mutated { affected: 1 });
        assert!(selection.is_empty());
        assert!(fx
            .source
            .get(Entity::Families, "fam-1")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_cancel_declines_without_mutation() {
        let mut fx = fixture(vec![family("fam-1", None)]).await;
        let rows = vec![family("fam-1", None)];
        let mut selection = select(&["fam-1"]);
        fx.dispatcher
            .request(BulkAction::Delete, &mut selection, &rows)
            .await
            .unwrap();
        fx.dispatcher.cancel();
        let err = fx
            .dispatcher
            .confirm(&mut selection, &rows)
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::NothingPending));
        assert_eq!(selection.len(), 1);
        assert!(fx
            .source
            .get(Entity::Families, "fam-1")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_request_while_confirming_is_busy() {
        let mut fx = fixture(vec![family("fam-1", None)]).await;
        let rows = vec![family("fam-1", None)];
        let mut selection = select(&["fam-1"]);
        fx.dispatcher
            .request(BulkAction::Delete, &mut selection, &rows)
            .await
            .unwrap();
        let err = fx
            .dispatcher
            .request(BulkAction::Delete, &mut selection, &rows)
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Busy));
    }

    #[tokio::test]
    async fn test_allow_list_rejects_missing_action() {
        let fx = fixture(vec![family("fam-1", None)]).await;
        let mut dispatcher = fx.dispatcher.with_actions(vec![ActionKind::Email]);
        let rows = vec![family("fam-1", None)];
        let mut selection = select(&["fam-1"]);
        let err = dispatcher
            .request(BulkAction::Delete, &mut selection, &rows)
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::NotAvailable(ActionKind::Delete)));
    }

    #[tokio::test]
    async fn test_empty_selection_rejected_at_request() {
        let mut fx = fixture(vec![family("fam-1", None)]).await;
        let rows = vec![family("fam-1", None)];
        let mut selection = SelectionSet::new();
        let err = fx
            .dispatcher
            .request(BulkAction::Delete, &mut selection, &rows)
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::EmptySelection));
    }

    #[tokio::test]
    async fn test_unknown_status_rejected() {
        let mut fx = fixture(vec![family("fam-1", None)]).await;
        let rows = vec![family("fam-1", None)];
        let mut selection = select(&["fam-1"]);
        let err = fx
            .dispatcher
            .request(
                BulkAction::StatusChange {
                    status: "archived".to_string(),
                },
                &mut selection,
                &rows,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::UnknownStatus { .. }));
        assert_eq!(selection.len(), 1);
    }

    #[tokio::test]
    async fn test_email_sends_to_usable_addresses_only() {
        let mut fx = fixture(vec![
            family("fam-1", Some("cohen@example.org")),
            family("fam-2", None),
            family("fam-3", Some("not-an-address")),
        ])
        .await;
        let rows = vec![
            family("fam-1", Some("cohen@example.org")),
            family("fam-2", None),
            family("fam-3", Some("not-an-address")),
        ];
        let mut selection = select(&["fam-1", "fam-2", "fam-3"]);
        let disposition = fx
            .dispatcher
            .request(
                BulkAction::Email {
                    subject: "Holiday support".to_string(),
                    body: "<p>Chag sameach</p>".to_string(),
                },
                &mut selection,
                &rows,
            )
            .await
            .unwrap();
        assert_eq!(
            disposition,
            Disposition::Executed(ActionOutcome::EmailSent { recipients: 1 })
        );
        assert!(selection.is_empty());
        let sent = fx.mailer.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["cohen@example.org".to_string()]);
    }

    #[tokio::test]
    async fn test_email_with_no_usable_addresses() {
        let mut fx = fixture(vec![family("fam-1", None)]).await;
        let rows = vec![family("fam-1", None)];
        let mut selection = select(&["fam-1"]);
        let disposition = fx
            .dispatcher
            .request(
                BulkAction::Email {
                    subject: "Hello".to_string(),
                    body: "<p>Hi</p>".to_string(),
                },
                &mut selection,
                &rows,
            )
            .await
            .unwrap();
        assert_eq!(
            disposition,
            Disposition::Executed(ActionOutcome::NoRecipients)
        );
        assert_eq!(selection.len(), 1);
        assert!(fx.mailer.sent().await.is_empty());
    }
}
