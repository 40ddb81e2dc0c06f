use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use handlebars::Handlebars;
use regex::Regex;
use serde_json::{json, Map, Value};
use thiserror::Error;

use super::templates::source;
use super::types::{EmailBody, EmailMessage, RenderedEmail, TemplateName};
use super::MailError;

/// Static regex matching HTML tags (compiled once on first use)
#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("TAG_REGEX is a valid regex literal"));

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Renders [`EmailMessage`]s into wire-ready HTML and text.
///
/// Holds the configured sender identity so composed subjects and
/// template footers carry the organization name.
pub struct MailComposer {
    handlebars: Handlebars<'static>,
    from_address: String,
    org_name: String,
}

impl MailComposer {
    #[must_use]
    pub fn new(from_address: impl Into<String>, org_name: impl Into<String>) -> Self {
        Self {
            handlebars: Handlebars::new(),
            from_address: from_address.into(),
            org_name: org_name.into(),
        }
    }

    #[must_use]
    pub fn from_address(&self) -> &str {
        &self.from_address
    }

    #[must_use]
    pub fn org_name(&self) -> &str {
        &self.org_name
    }

    /// Validate and render a message.
    ///
    /// The plain-text alternative falls back to the rendered HTML with
    /// tags stripped when the caller supplied none.
    pub fn render(&self, message: &EmailMessage) -> Result<RenderedEmail, MailError> {
        if message.to.is_empty() {
            return Err(MailError::NoRecipients);
        }
        if message.subject.trim().is_empty() {
            return Err(MailError::EmptySubject);
        }
        let html = match &message.body {
            EmailBody::Html(html) => {
                if html.trim().is_empty() {
                    return Err(MailError::EmptyBody);
                }
                html.clone()
            }
            EmailBody::Template { name, data } => self.render_template(*name, data)?,
        };
        let text = match &message.text {
            Some(text) => text.clone(),
            None => strip_html(&html),
        };
        Ok(RenderedEmail {
            to: message.to.clone(),
            subject: message.subject.clone(),
            html,
            text,
        })
    }

    /// Template data is expected to be an object; anything else renders
    /// with just the shared keys.
    fn render_template(&self, name: TemplateName, data: &Value) -> Result<String, TemplateError> {
        let mut context: Map<String, Value> = match data {
            Value::Object(map) => map.clone(),
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Array(_) => Map::new(),
        };
        context
            .entry("org_name")
            .or_insert_with(|| Value::String(self.org_name.clone()));
        context
            .entry("year")
            .or_insert_with(|| Value::from(Utc::now().year()));
        Ok(self
            .handlebars
            .render_template(source(name), &Value::Object(context))?)
    }

    #[must_use]
    pub fn notification_message(&self, to: Vec<String>, message: &str) -> EmailMessage {
        EmailMessage::templated(
            to,
            format!("System update - {}", self.org_name),
            TemplateName::Notification,
            json!({ "message": message }),
        )
    }

    #[must_use]
    pub fn approval_message(
        &self,
        to: Vec<String>,
        family_name: &str,
        amount: f64,
        date: &str,
    ) -> EmailMessage {
        EmailMessage::templated(
            to,
            format!("Your support request has been approved - {}", self.org_name),
            TemplateName::Approval,
            json!({ "family_name": family_name, "amount": amount, "date": date }),
        )
    }

    #[must_use]
    pub fn reminder_message(&self, to: Vec<String>, message: &str) -> EmailMessage {
        EmailMessage::templated(
            to,
            format!("Reminder - {}", self.org_name),
            TemplateName::Reminder,
            json!({ "message": message }),
        )
    }

    #[must_use]
    pub fn report_message(&self, to: Vec<String>, report_html: &str) -> EmailMessage {
        EmailMessage::templated(
            to,
            format!("Monthly report - {}", self.org_name),
            TemplateName::Report,
            json!({ "report": report_html }),
        )
    }
}

/// Drop HTML tags and turn `&nbsp;` entities into plain spaces.
#[must_use]
pub fn strip_html(html: &str) -> String {
    TAG_REGEX.replace_all(html, "").replace("&nbsp;", " ")
}

/// Turn user-typed plain text into a minimal HTML body.
#[must_use]
pub fn text_to_html(text: &str) -> String {
    text.trim().replace('\n', "<br>")
}
