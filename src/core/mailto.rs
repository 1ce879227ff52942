use crate::domain::model::{FormSubmission, Handoff};
use crate::domain::ports::Submitter;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use url::{form_urlencoded, Url};

/// A `mailto:` URI with percent-encoded subject and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailtoUri(String);

impl MailtoUri {
    pub fn compose(recipient: &str, submission: &FormSubmission) -> Self {
        let body = format!(
            "Name: {}\nEmail: {}\nPhone: {}\n\nMessage:\n{}",
            submission.full_name(),
            submission.email,
            submission.phone.as_deref().unwrap_or(""),
            submission.message
        );

        Self(format!(
            "mailto:{}?subject={}&body={}",
            recipient,
            encode_component(&submission.subject),
            encode_component(&body)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Parses back through `url` to confirm the result is a well-formed URI.
    pub fn parse(&self) -> Result<Url> {
        Url::parse(&self.0).map_err(|e| SiteError::SubmissionError {
            message: format!("composed mailto URI is malformed: {}", e),
        })
    }
}

impl fmt::Display for MailtoUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Percent-encodes a query component. Spaces become `%20`, since mail
/// clients do not read `+` as a space inside `mailto:` headers.
pub fn encode_component(value: &str) -> String {
    // byte_serialize emits `+` only for spaces; a literal plus is already `%2B`
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Hands a contact request to the visitor's own mail client after an optional
/// cosmetic pause. Nothing leaves the machine.
#[derive(Debug, Clone)]
pub struct MailClientHandoff {
    recipient: String,
    delay: Duration,
}

impl MailClientHandoff {
    pub fn new(recipient: impl Into<String>, delay: Duration) -> Self {
        Self {
            recipient: recipient.into(),
            delay,
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }
}

#[async_trait]
impl Submitter for MailClientHandoff {
    async fn submit(&self, submission: &FormSubmission) -> Result<Handoff> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let uri = MailtoUri::compose(&self.recipient, submission);
        uri.parse()?;
        tracing::debug!("Composed mailto URI ({} bytes)", uri.as_str().len());

        Ok(Handoff {
            navigate_to: Some(uri.into_string()),
        })
    }
}
