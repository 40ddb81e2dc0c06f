use serde_json::Value;

/// Named message layouts known to the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateName {
    Notification,
    Approval,
    Reminder,
    Report,
}

impl TemplateName {
    pub const ALL: [Self; 4] = [
        Self::Notification,
        Self::Approval,
        Self::Reminder,
        Self::Report,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Notification => "notification",
            Self::Approval => "approval",
            Self::Reminder => "reminder",
            Self::Report => "report",
        }
    }
}

/// Message body before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum EmailBody {
    /// Ready-made HTML, sent as-is.
    Html(String),
    /// A named layout plus its substitution data.
    Template { name: TemplateName, data: Value },
}

/// Outgoing message as composed by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub body: EmailBody,
    /// Plain-text alternative. When absent the rendered HTML is
    /// stripped of tags instead.
    pub text: Option<String>,
}

impl EmailMessage {
    #[must_use]
    pub fn html(to: Vec<String>, subject: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            to,
            subject: subject.into(),
            body: EmailBody::Html(html.into()),
            text: None,
        }
    }

    #[must_use]
    pub fn templated(
        to: Vec<String>,
        subject: impl Into<String>,
        name: TemplateName,
        data: Value,
    ) -> Self {
        Self {
            to,
            subject: subject.into(),
            body: EmailBody::Template { name, data },
            text: None,
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Fully rendered message, ready for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Opaque delivery acknowledgement from the mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    pub message_id: String,
}
