use crate::core::dispatcher::Dispatcher;
use crate::domain::model::{Deferred, EventOutcome, FormSubmission, PageEvent};
use crate::domain::ports::{KeyValueStore, Page, Submitter};
use tokio::sync::mpsc;

enum Queued {
    Immediate(PageEvent),
    /// Fed back by a timer or a finished submission.
    Background(PageEvent),
}

/// Drives a `Dispatcher` the way a browser event loop would: one event at a
/// time, with deferred follow-ups fired from tokio timers and submissions run
/// on their own task so nothing waits behind them.
pub struct SiteRuntime<P: Page, K: KeyValueStore, S: Submitter> {
    dispatcher: Dispatcher<P, K, S>,
    tx: mpsc::UnboundedSender<Queued>,
    rx: mpsc::UnboundedReceiver<Queued>,
    in_flight: usize,
    outcomes: Vec<(String, EventOutcome)>,
}

impl<P: Page, K: KeyValueStore, S: Submitter + 'static> SiteRuntime<P, K, S> {
    pub fn new(dispatcher: Dispatcher<P, K, S>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            dispatcher,
            tx,
            rx,
            in_flight: 0,
            outcomes: Vec::new(),
        }
    }

    pub fn push(&self, event: PageEvent) {
        // The receiver lives in self, so the send cannot fail.
        let _ = self.tx.send(Queued::Immediate(event));
    }

    /// Processes queued events, waiting on timers and submissions, until
    /// nothing is left to do.
    pub async fn run_until_idle(&mut self) {
        loop {
            let queued = match self.rx.try_recv() {
                Ok(queued) => queued,
                Err(_) if self.in_flight == 0 => break,
                Err(_) => match self.rx.recv().await {
                    Some(queued) => queued,
                    None => break,
                },
            };

            let event = match queued {
                Queued::Immediate(event) => event,
                Queued::Background(event) => {
                    self.in_flight -= 1;
                    event
                }
            };

            let name = event.name().to_string();
            let outcome = self.dispatcher.dispatch(event).await;
            for deferred in &outcome.deferred {
                self.schedule(deferred.clone());
            }
            if let Some(submission) = &outcome.submission {
                self.spawn_submission(submission.clone());
            }
            self.outcomes.push((name, outcome));
        }
    }

    fn schedule(&mut self, deferred: Deferred) {
        self.in_flight += 1;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(deferred.delay).await;
            let _ = tx.send(Queued::Background(deferred.event));
        });
    }

    fn spawn_submission(&mut self, submission: FormSubmission) {
        self.in_flight += 1;
        let tx = self.tx.clone();
        let task = self.dispatcher.submission_task(submission);
        tokio::spawn(async move {
            let _ = tx.send(Queued::Background(task.await));
        });
    }

    pub fn dispatcher(&self) -> &Dispatcher<P, K, S> {
        &self.dispatcher
    }

    /// Name and outcome of every event handled so far, in order.
    pub fn outcomes(&self) -> &[(String, EventOutcome)] {
        &self.outcomes
    }

    pub fn into_dispatcher(self) -> Dispatcher<P, K, S> {
        self.dispatcher
    }
}
