use std::fmt;

use crate::form::ContactFormData;

/// Subject used when the mail client takes over a failed submission.
pub const FALLBACK_SUBJECT: &str = "Domain Purchase Inquiry";

/// A `mailto:` target with optional pre-filled subject and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailtoLink {
    pub recipient: String,
    pub subject: Option<String>,
    pub body: Option<String>,
}

impl MailtoLink {
    /// Link that only opens a blank message to `recipient`.
    pub fn to(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            subject: None,
            body: None,
        }
    }

    /// Pre-filled compose link carrying the submitted form values.
    pub fn fallback(recipient: impl Into<String>, data: &ContactFormData) -> Self {
        Self {
            recipient: recipient.into(),
            subject: Some(FALLBACK_SUBJECT.to_string()),
            body: Some(format!(
                "Name: {}\nEmail: {}\nMessage: {}",
                data.name, data.email, data.message
            )),
        }
    }

    /// Renders the link with percent-encoded query parameters.
    pub fn href(&self) -> String {
        let mut href = format!("mailto:{}", self.recipient);
        let mut separator = '?';
        if let Some(subject) = &self.subject {
            href.push(separator);
            href.push_str("subject=");
            href.push_str(&urlencoding::encode(subject));
            separator = '&';
        }
        if let Some(body) = &self.body {
            href.push(separator);
            href.push_str("body=");
            href.push_str(&urlencoding::encode(body));
        }
        href
    }
}

impl fmt::Display for MailtoLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}
