use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw values as read from the contact form controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// A validated contact request. Built fresh per submit and dropped after handoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl FormSubmission {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alert {
    Success,
    Danger,
}

impl Alert {
    pub fn class_list(self) -> &'static str {
        match self {
            Alert::Success => "alert alert-success mt-3",
            Alert::Danger => "alert alert-danger mt-3",
        }
    }
}

/// Inline status shown under the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub alert: Alert,
    pub text: String,
    /// Identifies this particular showing so a late dismissal cannot hide a newer message.
    pub token: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitButton {
    Ready,
    Busy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DarkModePreference(pub bool);

impl DarkModePreference {
    /// Anything other than the literal `"true"` counts as off.
    pub fn from_stored(value: Option<&str>) -> Self {
        Self(value == Some("true"))
    }

    pub fn as_stored(self) -> &'static str {
        if self.0 {
            "true"
        } else {
            "false"
        }
    }

    pub fn enabled(self) -> bool {
        self.0
    }

    pub fn toggled(self) -> Self {
        Self(!self.0)
    }
}

/// Document-space box of an element, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBlock {
    Start,
    Nearest,
}

/// One user action or timer firing, as seen by the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    Loaded {
        path: String,
    },
    AnchorClicked {
        href: String,
    },
    Scrolled {
        offset_y: f64,
    },
    Input {
        element: String,
        value: String,
    },
    FieldFocused {
        element: String,
    },
    FieldBlurred {
        element: String,
    },
    SubmitContactForm,
    /// The submitter came back for the request accepted by the last submit.
    SubmissionFinished {
        result: SubmissionResult,
    },
    DismissFormMessage {
        token: u64,
    },
    ToggleDarkMode,
    BackToTopClicked,
    CopyEmailClicked,
    KeyPressed {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        meta: bool,
    },
    AccordionClicked {
        element: String,
    },
    AccordionSettled {
        element: String,
    },
    PrintProject {
        project_id: String,
    },
}

impl PageEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PageEvent::Loaded { .. } => "loaded",
            PageEvent::AnchorClicked { .. } => "anchor_clicked",
            PageEvent::Scrolled { .. } => "scrolled",
            PageEvent::Input { .. } => "input",
            PageEvent::FieldFocused { .. } => "field_focused",
            PageEvent::FieldBlurred { .. } => "field_blurred",
            PageEvent::SubmitContactForm => "submit_contact_form",
            PageEvent::SubmissionFinished { .. } => "submission_finished",
            PageEvent::DismissFormMessage { .. } => "dismiss_form_message",
            PageEvent::ToggleDarkMode => "toggle_dark_mode",
            PageEvent::BackToTopClicked => "back_to_top_clicked",
            PageEvent::CopyEmailClicked => "copy_email_clicked",
            PageEvent::KeyPressed { .. } => "key_pressed",
            PageEvent::AccordionClicked { .. } => "accordion_clicked",
            PageEvent::AccordionSettled { .. } => "accordion_settled",
            PageEvent::PrintProject { .. } => "print_project",
        }
    }
}

/// An event the host must feed back after `delay`.
#[derive(Debug, Clone, PartialEq)]
pub struct Deferred {
    pub delay: Duration,
    pub event: PageEvent,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventOutcome {
    pub default_prevented: bool,
    pub deferred: Vec<Deferred>,
    /// A validated request the host must run through the submitter off the
    /// event loop, feeding back a `SubmissionFinished` when it completes.
    pub submission: Option<FormSubmission>,
}

impl EventOutcome {
    pub fn prevented() -> Self {
        Self {
            default_prevented: true,
            ..Self::default()
        }
    }

    pub fn defer(mut self, delay: Duration, event: PageEvent) -> Self {
        self.deferred.push(Deferred { delay, event });
        self
    }

    pub fn submit(mut self, submission: FormSubmission) -> Self {
        self.submission = Some(submission);
        self
    }
}

/// What a submitter did with a contact request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    /// Location the page should open next, e.g. a `mailto:` URI.
    pub navigate_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionResult {
    HandedOff {
        #[serde(default)]
        navigate_to: Option<String>,
    },
    Failed {
        /// Shown to the visitor.
        message: String,
    },
}
