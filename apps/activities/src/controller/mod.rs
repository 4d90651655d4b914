//! Controller layer: owns the directory snapshot and the display, turns
//! typed commands into fetches and mutations, and drives the notifier.

pub mod events;

use std::sync::Arc;

use client_core::{
    validate_mutation, DirectoryService, FetchError, MutationError, Notifier, Outcome,
};
use shared::{domain::ActivityDirectory, protocol::MutationKind};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use view::{render, DisplayState, FETCH_FAILURE_MESSAGE};

pub use events::{SignupForm, UiCommand};

/// Sequence number handed out when a fetch is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FetchTicket(u64);

/// A directory fetch that finished in the background, waiting to be applied
/// by the controller loop.
#[derive(Debug)]
pub struct FetchCompletion {
    ticket: FetchTicket,
    result: Result<ActivityDirectory, FetchError>,
}

pub struct Controller {
    service: Arc<dyn DirectoryService>,
    notifier: Notifier,
    snapshot: Option<ActivityDirectory>,
    display: DisplayState,
    form: SignupForm,
    issued_fetches: u64,
    applied_fetch: u64,
    completions: Option<mpsc::Sender<FetchCompletion>>,
}

impl Controller {
    pub fn new(service: Arc<dyn DirectoryService>, notifier: Notifier) -> Self {
        Self {
            service,
            notifier,
            snapshot: None,
            display: DisplayState::default(),
            form: SignupForm::default(),
            issued_fetches: 0,
            applied_fetch: 0,
            completions: None,
        }
    }

    /// From now on fetches run as background tasks and report through the
    /// returned queue. Completions must be handed back to
    /// [`Controller::complete_fetch`]; the newest issued fetch wins.
    pub fn enable_fetch_queue(&mut self, capacity: usize) -> mpsc::Receiver<FetchCompletion> {
        let (tx, rx) = mpsc::channel(capacity);
        self.completions = Some(tx);
        rx
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Last directory that was successfully rendered.
    pub fn snapshot(&self) -> Option<&ActivityDirectory> {
        self.snapshot.as_ref()
    }

    /// Handles one command. Mutating commands return their outcome.
    pub async fn handle(&mut self, command: UiCommand) -> Option<Outcome> {
        debug!(command = command.name(), "handling ui command");
        match command {
            UiCommand::Refresh => {
                self.refresh().await;
                None
            }
            UiCommand::SelectActivity { position } => {
                match self.display.activity_option(position) {
                    Some(option) => self.form.activity = option.value.clone(),
                    None => warn!(position, "no activity option at position"),
                }
                None
            }
            UiCommand::EditEmail { email } => {
                self.form.email = email;
                None
            }
            UiCommand::SubmitSignup => {
                let SignupForm { activity, email } = self.form.clone();
                Some(self.signup(&activity, &email).await)
            }
            UiCommand::SignupRequested { activity, email } => {
                Some(self.signup(&activity, &email).await)
            }
            UiCommand::UnregisterRow { card, row } => {
                let action = self.display.row(card, row).map(|row| row.action.clone());
                Some(match action {
                    Some(action) => self.unregister(&action.activity, &action.participant).await,
                    None => self.finish(
                        MutationKind::Unregister,
                        Err(MutationError::Invalid { field: "participant" }),
                    ),
                })
            }
            UiCommand::UnregisterRequested { activity, email } => {
                Some(self.unregister(&activity, &email).await)
            }
        }
    }

    /// Fetches inline, or queues a background fetch when the fetch queue is
    /// enabled.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_fetch();
        let Some(completions) = self.completions.clone() else {
            let result = self.service.fetch_directory().await;
            self.apply_fetch(ticket, result);
            return;
        };

        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let result = service.fetch_directory().await;
            if completions
                .send(FetchCompletion { ticket, result })
                .await
                .is_err()
            {
                debug!(ticket = ticket.0, "controller loop gone; fetch result dropped");
            }
        });
    }

    /// Returns whether the display changed.
    pub fn complete_fetch(&mut self, completion: FetchCompletion) -> bool {
        self.apply_fetch(completion.ticket, completion.result)
    }

    fn begin_fetch(&mut self) -> FetchTicket {
        self.issued_fetches += 1;
        FetchTicket(self.issued_fetches)
    }

    /// Applies a completed fetch unless a fetch issued later has already been
    /// applied.
    fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<ActivityDirectory, FetchError>,
    ) -> bool {
        if ticket.0 <= self.applied_fetch {
            debug!(
                ticket = ticket.0,
                applied = self.applied_fetch,
                "discarding stale directory fetch"
            );
            return false;
        }
        self.applied_fetch = ticket.0;

        match result {
            Ok(directory) => {
                self.display.replace(render(&directory));
                if !self.display.has_option(&self.form.activity) {
                    self.form.activity.clear();
                }
                debug!(activities = directory.len(), "directory rendered");
                self.snapshot = Some(directory);
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch activity directory");
                self.display.fail_list(FETCH_FAILURE_MESSAGE);
            }
        }
        true
    }

    pub async fn signup(&mut self, activity: &str, email: &str) -> Outcome {
        self.dispatch(MutationKind::Signup, activity, email).await
    }

    pub async fn unregister(&mut self, activity: &str, email: &str) -> Outcome {
        self.dispatch(MutationKind::Unregister, activity, email).await
    }

    async fn dispatch(&mut self, kind: MutationKind, activity: &str, email: &str) -> Outcome {
        let result = match validate_mutation(activity, email) {
            Ok(()) => match kind {
                MutationKind::Signup => self.service.signup(activity, email).await,
                MutationKind::Unregister => self.service.unregister(activity, email).await,
            },
            Err(err) => Err(err),
        };

        let succeeded = result.is_ok();
        let outcome = self.finish(kind, result);
        if succeeded {
            if kind == MutationKind::Signup {
                self.form.reset();
            }
            self.refresh().await;
        }
        outcome
    }

    fn finish(&self, kind: MutationKind, result: Result<String, MutationError>) -> Outcome {
        let outcome = Outcome::from_result(kind, &result);
        match &result {
            Ok(_) => info!(kind = kind.path_segment(), "mutation succeeded"),
            Err(err) => warn!(
                kind = kind.path_segment(),
                error = %err,
                "mutation failed; view left unchanged"
            ),
        }
        self.notifier
            .notify(outcome.message.clone(), outcome.notice_kind());
        outcome
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
