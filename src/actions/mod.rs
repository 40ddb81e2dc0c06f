//! Bulk actions applied to the current selection.
//!
//! A page requests an action; destructive ones pass through an explicit
//! confirmation gate before the dispatcher runs the single backing
//! mutation (or send) and reconciles cache and selection.

mod dispatcher;

use std::fmt;

use thiserror::Error;

use crate::datasource::SourceError;
use crate::mail::MailError;
use crate::model::Entity;

pub use dispatcher::BulkDispatcher;

/// Action identity, used by per-page allow-lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Delete,
    StatusChange,
    Approve,
    Reject,
    Email,
}

impl ActionKind {
    /// Actions offered on a page unless it declares otherwise.
    pub const DEFAULT: [Self; 3] = [Self::Delete, Self::Email, Self::StatusChange];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::StatusChange => "status",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bulk operation with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkAction {
    Delete,
    StatusChange {
        status: String,
    },
    /// Support-request approval. The dispatcher stamps the approval
    /// date itself.
    Approve {
        approved_amount: Option<f64>,
    },
    Reject {
        rejection_reason: Option<String>,
    },
    /// Body is ready-made HTML; see [`crate::mail::text_to_html`] for
    /// plain-text input.
    Email {
        subject: String,
        body: String,
    },
}

impl BulkAction {
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Delete => ActionKind::Delete,
            Self::StatusChange { .. } => ActionKind::StatusChange,
            Self::Approve { .. } => ActionKind::Approve,
            Self::Reject { .. } => ActionKind::Reject,
            Self::Email { .. } => ActionKind::Email,
        }
    }

    /// Destructive actions go through the confirmation gate.
    #[must_use]
    pub const fn is_destructive(&self) -> bool {
        matches!(self, Self::Delete)
    }
}

/// What a finished action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Rows were mutated or deleted.
    Mutated { affected: usize },
    /// One message went out to this many addresses.
    EmailSent { recipients: usize },
    /// No selected row had a usable address; nothing was sent.
    NoRecipients,
}

/// Result of requesting an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Disposition {
    Executed(ActionOutcome),
    /// Destructive action parked until `confirm` or `cancel`.
    AwaitingConfirmation,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("an action is already in progress")]
    Busy,
    #[error("action `{0}` is not available on this page")]
    NotAvailable(ActionKind),
    #[error("no rows are selected")]
    EmptySelection,
    #[error("status `{status}` is not valid for {entity}")]
    UnknownStatus { entity: Entity, status: String },
    #[error("no action is awaiting confirmation")]
    NothingPending,
    #[error("data source error: {0}")]
    Source(#[from] SourceError),
    #[error("mail error: {0}")]
    Mail(#[from] MailError),
}
