//! Outgoing mail: message types, template rendering, and the delivery
//! trait.
//!
//! The crate composes and renders messages; actual wire delivery is an
//! injected [`Mailer`] implementation.

mod composer;
mod templates;
mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use composer::{strip_html, text_to_html, MailComposer, TemplateError};
pub use types::{EmailBody, EmailMessage, RenderedEmail, SendReceipt, TemplateName};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("message has no recipients")]
    NoRecipients,
    #[error("message subject is empty")]
    EmptySubject,
    #[error("message body is empty")]
    EmptyBody,
    #[error("template rendering failed: {0}")]
    Template(#[from] TemplateError),
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Delivery collaborator. The wire protocol and provider are its
/// concern; the crate hands it fully rendered messages.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &RenderedEmail) -> Result<SendReceipt, MailError>;
}
