//! Transient status message shown after a mutation attempt.

use std::{sync::Arc, time::Duration};

use tokio::sync::watch;

pub const NOTICE_DISMISS_AFTER: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: NoticeKind,
}

/// Contents of the message region. A dismissed notice keeps its last message
/// but is no longer visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notice {
    message: Option<StatusMessage>,
    visible: bool,
    generation: u64,
}

impl Notice {
    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn visible_message(&self) -> Option<&StatusMessage> {
        self.message.as_ref().filter(|_| self.visible)
    }
}

/// Latest message wins. Each `notify` schedules its own dismissal; a dismissal
/// only hides the notice if no newer message was shown since it was scheduled.
#[derive(Debug, Clone)]
pub struct Notifier {
    state: Arc<watch::Sender<Notice>>,
    dismiss_after: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::with_dismiss_after(NOTICE_DISMISS_AFTER)
    }

    pub fn with_dismiss_after(dismiss_after: Duration) -> Self {
        let (state, _) = watch::channel(Notice::default());
        Self {
            state: Arc::new(state),
            dismiss_after,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn notify(&self, text: impl Into<String>, kind: NoticeKind) {
        let text = text.into();
        let mut generation = 0;
        self.state.send_modify(|notice| {
            notice.generation += 1;
            generation = notice.generation;
            notice.message = Some(StatusMessage { text, kind });
            notice.visible = true;
        });
        tracing::debug!(kind = kind.as_str(), generation, "notice shown");

        let state = Arc::clone(&self.state);
        let dismiss_after = self.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(dismiss_after).await;
            state.send_if_modified(|notice| {
                if notice.generation != generation || !notice.visible {
                    return false;
                }
                notice.visible = false;
                true
            });
        });
    }

    pub fn current(&self) -> Notice {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Notice> {
        self.state.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/notifier_tests.rs"]
mod tests;
