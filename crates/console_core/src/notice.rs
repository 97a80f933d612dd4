//! Non-blocking user-facing notifications.
//!
//! Every operation outcome surfaces as a single notice (bulk create may add
//! a warning next to its success). Nothing here is fatal; the pages stay
//! interactive after any failure.

use tokio::sync::broadcast;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Warning(text) | Notice::Error(text) => text,
        }
    }
}

/// Fan-out channel the view layer subscribes to. Send failures only mean
/// nobody is listening, which is fine for a console without an open view.
#[derive(Debug, Clone)]
pub struct NoticeBus {
    tx: broadcast::Sender<Notice>,
}

impl NoticeBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn success(&self, text: impl Into<String>) {
        let _ = self.tx.send(Notice::Success(text.into()));
    }

    pub fn warning(&self, text: impl Into<String>) {
        let _ = self.tx.send(Notice::Warning(text.into()));
    }

    pub fn error(&self, text: impl Into<String>) {
        let _ = self.tx.send(Notice::Error(text.into()));
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new()
    }
}
