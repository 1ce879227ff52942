//! Contact form pipeline: read the controls, validate, and track where the
//! form is between a submit and the mail handoff.

use crate::config::site_config::ContactConfig;
use crate::domain::model::{Alert, FormFields, FormMessage, FormSubmission, SubmitButton};
use crate::domain::ports::{ElementId, Page};
use crate::utils::error::ValidationError;
use crate::utils::validation::{validate_email, validate_required};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Validating,
    /// Idle again, with a validation warning on screen.
    Invalid(ValidationError),
    Submitting,
    /// Idle again, after the request was handed off.
    Sent,
    /// Idle again, the submitter reported a failure.
    Failed,
}

impl FormState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormState::Submitting)
    }
}

/// Checks required fields in form order, then the email shape.
pub fn validate(fields: &FormFields) -> Result<FormSubmission, ValidationError> {
    validate_required("firstName", &fields.first_name)?;
    validate_required("lastName", &fields.last_name)?;
    validate_required("email", &fields.email)?;
    validate_required("subject", &fields.subject)?;
    validate_required("message", &fields.message)?;
    validate_email(&fields.email)?;

    Ok(FormSubmission {
        first_name: fields.first_name.clone(),
        last_name: fields.last_name.clone(),
        email: fields.email.clone(),
        phone: Some(fields.phone.clone()).filter(|p| !p.is_empty()),
        subject: fields.subject.clone(),
        message: fields.message.clone(),
    })
}

/// Missing controls read as empty.
pub fn read_fields<P: Page + ?Sized>(page: &P, config: &ContactConfig) -> FormFields {
    let ids = &config.field_ids;
    let read = |id: &str| page.value(id).unwrap_or_default();

    FormFields {
        first_name: read(&ids.first_name),
        last_name: read(&ids.last_name),
        email: read(&ids.email),
        phone: read(&ids.phone),
        subject: read(&ids.subject),
        message: read(&ids.message),
    }
}

/// First `<button type="submit">` inside the form.
pub fn submit_button<P: Page + ?Sized>(page: &P, form: &str) -> Option<ElementId> {
    page.descendants(form).into_iter().find(|el| {
        page.tag(el).as_deref() == Some("button")
            && page.attribute(el, "type").as_deref() == Some("submit")
    })
}

pub fn set_submit_button<P: Page + ?Sized>(
    page: &mut P,
    button: &str,
    state: SubmitButton,
    config: &ContactConfig,
) {
    match state {
        SubmitButton::Busy => {
            page.set_disabled(button, true);
            page.set_text(button, &config.busy_label);
        }
        SubmitButton::Ready => {
            page.set_disabled(button, false);
            page.set_text(button, &config.idle_label);
        }
    }
}

/// Returns false when the page has no message area.
pub fn show_message<P: Page + ?Sized>(
    page: &mut P,
    message: &FormMessage,
    config: &ContactConfig,
) -> bool {
    let Some(target) = page.query(&config.message_selector) else {
        return false;
    };
    page.set_class_list(&target, message.alert.class_list());
    page.set_text(&target, &message.text);
    page.set_class(&target, &config.hidden_class, false);
    true
}

pub fn hide_message<P: Page + ?Sized>(page: &mut P, config: &ContactConfig) {
    if let Some(target) = page.query(&config.message_selector) {
        page.set_class(&target, &config.hidden_class, true);
    }
}

/// Hands out increasing tokens for shown messages and remembers which one is up.
#[derive(Debug, Default)]
pub struct MessageSlot {
    next_token: u64,
    visible: Option<u64>,
}

impl MessageSlot {
    pub fn next(&mut self, alert: Alert, text: impl Into<String>) -> FormMessage {
        self.next_token += 1;
        self.visible = Some(self.next_token);
        FormMessage {
            alert,
            text: text.into(),
            token: self.next_token,
        }
    }

    /// True when `token` is still the message on screen.
    pub fn take_if_current(&mut self, token: u64) -> bool {
        if self.visible == Some(token) {
            self.visible = None;
            true
        } else {
            false
        }
    }

    pub fn visible(&self) -> Option<u64> {
        self.visible
    }
}
