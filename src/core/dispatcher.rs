use crate::config::site_config::SiteConfig;
use crate::core::contact_form::{self, FormState, MessageSlot};
use crate::core::reveal::OneShotObserver;
use crate::core::scroll::{self, ThresholdToggle};
use crate::core::{nav, theme};
use crate::domain::model::{
    Alert, DarkModePreference, EventOutcome, FormSubmission, PageEvent, ScrollBlock,
    SubmissionResult, SubmitButton,
};
use crate::domain::ports::{Clipboard, KeyValueStore, Page, Submitter};
use chrono::Datelike;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// A pending submitter call, detached from the dispatcher that started it.
pub type SubmissionTask = Pin<Box<dyn Future<Output = PageEvent> + Send + 'static>>;

/// Everything the page remembers between events.
#[derive(Debug)]
pub struct AppState {
    pub dark_mode: DarkModePreference,
    pub form: FormState,
    pub messages: MessageSlot,
    pub navbar: ThresholdToggle,
    pub back_to_top: ThresholdToggle,
    pub reveal: OneShotObserver,
    pub lazy_images: OneShotObserver,
    pub scroll_y: f64,
}

impl AppState {
    fn new(config: &SiteConfig, dark_mode: DarkModePreference) -> Self {
        let scroll = &config.scroll;
        Self {
            dark_mode,
            form: FormState::Idle,
            messages: MessageSlot::default(),
            navbar: ThresholdToggle::new(
                &scroll.navbar_selector,
                &scroll.navbar_class,
                scroll.navbar_threshold,
            ),
            back_to_top: ThresholdToggle::new(
                &scroll.back_to_top_selector,
                &scroll.back_to_top_class,
                scroll.back_to_top_threshold,
            ),
            reveal: OneShotObserver::new(config.reveal.threshold, config.reveal.bottom_margin_px),
            // Images load as soon as any part shows, with no margin.
            lazy_images: OneShotObserver::new(0.0, 0.0),
            scroll_y: 0.0,
        }
    }
}

/// Single consumer of page events. Owns the page, the durable store and the
/// submission boundary, and mutates state only in response to an event.
pub struct Dispatcher<P: Page, K: KeyValueStore, S: Submitter> {
    config: SiteConfig,
    page: P,
    store: K,
    submitter: Arc<S>,
    clipboard: Option<Box<dyn Clipboard>>,
    state: AppState,
}

impl<P: Page, K: KeyValueStore, S: Submitter> Dispatcher<P, K, S> {
    /// Reads the saved dark mode preference; nothing touches the page until `Loaded`.
    pub fn new(config: SiteConfig, page: P, store: K, submitter: S) -> Self {
        let dark_mode = theme::load_preference(&store, &config.theme);
        let state = AppState::new(&config, dark_mode);
        Self {
            config,
            page,
            store,
            submitter: Arc::new(submitter),
            clipboard: None,
            state,
        }
    }

    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Some(Box::new(clipboard));
        self
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn into_parts(self) -> (P, K) {
        (self.page, self.store)
    }

    /// Runs the submitter for a request returned in `EventOutcome::submission`.
    /// The future borrows nothing from the dispatcher, so the host can spawn
    /// it and keep dispatching while it is pending.
    pub fn submission_task(&self, submission: FormSubmission) -> SubmissionTask
    where
        S: 'static,
    {
        let submitter = Arc::clone(&self.submitter);
        Box::pin(async move {
            let result = match submitter.submit(&submission).await {
                Ok(handoff) => {
                    tracing::debug!(subject = %submission.subject, "Submitter accepted contact request");
                    SubmissionResult::HandedOff {
                        navigate_to: handoff.navigate_to,
                    }
                }
                Err(e) => {
                    tracing::error!("Contact submission failed: {}", e);
                    SubmissionResult::Failed {
                        message: e.user_friendly_message(),
                    }
                }
            };
            PageEvent::SubmissionFinished { result }
        })
    }

    pub async fn dispatch(&mut self, event: PageEvent) -> EventOutcome {
        tracing::debug!(event = event.name(), "Dispatching page event");

        match event {
            PageEvent::Loaded { path } => self.on_loaded(&path),
            PageEvent::AnchorClicked { href } => self.on_anchor_clicked(&href),
            PageEvent::Scrolled { offset_y } => self.on_scrolled(offset_y),
            PageEvent::Input { element, value } => {
                self.page.set_value(&element, &value);
                EventOutcome::default()
            }
            PageEvent::FieldFocused { element } => self.on_field_focus(&element, true),
            PageEvent::FieldBlurred { element } => self.on_field_focus(&element, false),
            PageEvent::SubmitContactForm => self.on_submit(),
            PageEvent::SubmissionFinished { result } => self.on_submission_finished(result),
            PageEvent::DismissFormMessage { token } => {
                if self.state.messages.take_if_current(token) {
                    contact_form::hide_message(&mut self.page, &self.config.contact);
                }
                EventOutcome::default()
            }
            PageEvent::ToggleDarkMode => {
                self.state.dark_mode = theme::toggle(
                    &mut self.page,
                    &mut self.store,
                    &self.config.site.body_selector,
                    self.state.dark_mode,
                    &self.config.theme,
                );
                EventOutcome::default()
            }
            PageEvent::BackToTopClicked => {
                self.page.scroll_to_top();
                EventOutcome::default()
            }
            PageEvent::CopyEmailClicked => self.on_copy_email().await,
            PageEvent::KeyPressed { key, ctrl, meta } => self.on_key(&key, ctrl || meta),
            PageEvent::AccordionClicked { element } => EventOutcome::default().defer(
                self.config.accordion_settle(),
                PageEvent::AccordionSettled { element },
            ),
            PageEvent::AccordionSettled { element } => {
                if !self.page.has_class(&element, &self.config.site.collapsed_class) {
                    self.page.scroll_into_view(&element, ScrollBlock::Nearest);
                }
                EventOutcome::default()
            }
            PageEvent::PrintProject { project_id } => {
                if self.page.query(&format!("#{}", project_id)).is_some() {
                    self.page.print();
                }
                EventOutcome::default()
            }
        }
    }

    fn on_loaded(&mut self, path: &str) -> EventOutcome {
        tracing::info!("{} Portfolio", self.config.site.owner);
        tracing::info!("Interested in the code? Check out my GitHub: {}", self.config.site.github_url);
        tracing::debug!(path, "Page loaded");

        theme::apply(
            &mut self.page,
            &self.config.site.body_selector,
            self.state.dark_mode,
            &self.config.theme,
        );

        let year = chrono::Local::now().year();
        let stamped = nav::stamp_copyright(&mut self.page, &self.config.footer, year);
        let active = nav::mark_active_links(&mut self.page, &self.config.nav);
        tracing::debug!(stamped, active, "Applied footer year and active nav links");

        for selector in &self.config.reveal.selectors {
            for el in self.page.query_all(selector) {
                self.state.reveal.observe(el);
            }
        }
        for el in self.page.query_all(&self.config.lazy_images.selector) {
            self.state.lazy_images.observe(el);
        }

        // Observers report elements already in view as soon as they start watching.
        self.reveal_visible();
        EventOutcome::default()
    }

    fn on_anchor_clicked(&mut self, href: &str) -> EventOutcome {
        let Some(target) = scroll::anchor_target(href) else {
            return EventOutcome::default();
        };

        if let Some(el) = self.page.query(target) {
            self.page.scroll_into_view(&el, ScrollBlock::Start);
        } else {
            tracing::debug!(href, "Anchor target not found");
        }
        EventOutcome::prevented()
    }

    fn on_scrolled(&mut self, offset_y: f64) -> EventOutcome {
        self.state.scroll_y = offset_y;
        self.page.set_scroll_y(offset_y);
        self.state.navbar.evaluate(&mut self.page, offset_y);
        self.state.back_to_top.evaluate(&mut self.page, offset_y);
        self.reveal_visible();
        EventOutcome::default()
    }

    fn reveal_visible(&mut self) {
        let scroll_y = self.state.scroll_y;

        for el in self.state.reveal.take_intersecting(&self.page, scroll_y) {
            self.page.set_class(&el, &self.config.reveal.class, true);
        }

        let lazy = &self.config.lazy_images;
        for img in self.state.lazy_images.take_intersecting(&self.page, scroll_y) {
            if let Some(src) = self.page.attribute(&img, &lazy.source_attribute) {
                self.page.set_attribute(&img, "src", &src);
            }
            self.page.set_class(&img, &lazy.loaded_class, true);
        }
    }

    fn on_field_focus(&mut self, element: &str, focused: bool) -> EventOutcome {
        let Some(parent) = self.page.parent(element) else {
            return EventOutcome::default();
        };
        let class = &self.config.site.focused_class;

        if focused {
            self.page.set_class(&parent, class, true);
        } else if self.page.value(element).unwrap_or_default().is_empty() {
            self.page.set_class(&parent, class, false);
        }
        EventOutcome::default()
    }

    fn on_submit(&mut self) -> EventOutcome {
        let contact = &self.config.contact;
        let Some(form) = self.page.query(&contact.form_selector) else {
            return EventOutcome::default();
        };
        let outcome = EventOutcome::prevented();

        if self.state.form.is_submitting() {
            tracing::debug!("Submit ignored while a submission is in flight");
            return outcome;
        }

        self.state.form = FormState::Validating;
        let fields = contact_form::read_fields(&self.page, contact);

        let submission = match contact_form::validate(&fields) {
            Ok(submission) => submission,
            Err(e) => {
                tracing::info!("Contact form rejected: {:?}", e);
                let message = self.state.messages.next(Alert::Danger, e.to_string());
                contact_form::show_message(&mut self.page, &message, contact);
                self.state.form = FormState::Invalid(e);
                return outcome;
            }
        };

        self.state.form = FormState::Submitting;
        if let Some(button) = contact_form::submit_button(&self.page, &form) {
            contact_form::set_submit_button(&mut self.page, &button, SubmitButton::Busy, contact);
        }
        outcome.submit(submission)
    }

    fn on_submission_finished(&mut self, result: SubmissionResult) -> EventOutcome {
        if !self.state.form.is_submitting() {
            tracing::warn!("Submission result arrived with no submission in flight");
            return EventOutcome::default();
        }
        let contact = &self.config.contact;
        let mut outcome = EventOutcome::default();

        match result {
            SubmissionResult::HandedOff { navigate_to } => {
                tracing::info!("Contact request handed off");
                let message = self.state.messages.next(Alert::Success, contact.success_message());
                contact_form::show_message(&mut self.page, &message, contact);
                if let Some(location) = navigate_to {
                    self.page.navigate(&location);
                }
                outcome = outcome.defer(
                    contact.success_dismiss(),
                    PageEvent::DismissFormMessage {
                        token: message.token,
                    },
                );
                self.state.form = FormState::Sent;
            }
            SubmissionResult::Failed { message } => {
                let message = self.state.messages.next(Alert::Danger, message);
                contact_form::show_message(&mut self.page, &message, contact);
                self.state.form = FormState::Failed;
            }
        }

        if let Some(form) = self.page.query(&contact.form_selector) {
            self.page.reset_form(&form);
            if let Some(button) = contact_form::submit_button(&self.page, &form) {
                contact_form::set_submit_button(&mut self.page, &button, SubmitButton::Ready, contact);
            }
        }
        outcome
    }

    async fn on_copy_email(&mut self) -> EventOutcome {
        let Some(clipboard) = &self.clipboard else {
            tracing::warn!("No clipboard available, email not copied");
            return EventOutcome::default();
        };

        match clipboard.write_text(&self.config.contact.recipient).await {
            Ok(()) => self.page.alert(&self.config.contact.copied_text),
            Err(e) => tracing::error!("Failed to copy email: {}", e),
        }
        EventOutcome::default()
    }

    fn on_key(&mut self, key: &str, command: bool) -> EventOutcome {
        if !(command && key == "k") {
            return EventOutcome::default();
        }
        if let Some(search) = self.page.query(&self.config.site.search_selector) {
            self.page.focus(&search);
        }
        EventOutcome::prevented()
    }
}
