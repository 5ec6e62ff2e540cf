//! Debounced autosave bookkeeping and the ambient save indicator

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// Ambient indicator state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AutosaveStatus {
    #[default]
    Idle,
    Saving,
    Saved(DateTime<Local>),
    Submitted,
    Failed,
}

impl AutosaveStatus {
    pub fn text(&self) -> String {
        match self {
            Self::Idle => String::new(),
            Self::Saving => "Saving...".to_string(),
            Self::Saved(at) => format!("Saved at {}", at.format("%I:%M %p")),
            Self::Submitted => "Submitted".to_string(),
            Self::Failed => "Not saved".to_string(),
        }
    }

    pub fn is_saving(&self) -> bool {
        matches!(self, Self::Saving)
    }
}

/// A scheduled save. At most one exists at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSave {
    pub due: Instant,
    /// Requested explicitly by the user
    pub manual: bool,
}

#[derive(Debug, Clone)]
pub struct Autosave {
    is_unsaved: bool,
    last_saved_at: Option<DateTime<Local>>,
    pending: Option<PendingSave>,
    delay: Duration,
    manual_delay: Duration,
}

impl Autosave {
    pub fn new(delay: Duration, manual_delay: Duration) -> Self {
        Self {
            is_unsaved: false,
            last_saved_at: None,
            pending: None,
            delay,
            manual_delay,
        }
    }

    pub fn is_unsaved(&self) -> bool {
        self.is_unsaved
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Local>> {
        self.last_saved_at
    }

    pub fn pending(&self) -> Option<PendingSave> {
        self.pending
    }

    /// A field changed: replace any pending save with a fresh implicit one
    pub fn field_changed(&mut self, now: Instant) -> AutosaveStatus {
        self.is_unsaved = true;
        self.schedule(now, false);
        AutosaveStatus::Saving
    }

    /// The user asked to save now
    pub fn request_manual(&mut self, now: Instant) {
        self.schedule(now, true);
    }

    fn schedule(&mut self, now: Instant, manual: bool) {
        let delay = if manual { self.manual_delay } else { self.delay };
        if self.pending.is_some() {
            tracing::debug!("Replacing pending save");
        }
        self.pending = Some(PendingSave {
            due: now + delay,
            manual,
        });
    }

    /// Remove and return the pending save if it is due
    pub fn take_due(&mut self, now: Instant) -> Option<PendingSave> {
        match self.pending {
            Some(pending) if pending.due <= now => self.pending.take(),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Record the outcome of a save attempt
    pub fn complete(&mut self, succeeded: bool, at: DateTime<Local>) -> AutosaveStatus {
        if succeeded {
            self.mark_saved(at)
        } else {
            AutosaveStatus::Failed
        }
    }

    /// Treat the current answers as saved (after restore or clear)
    pub fn mark_saved(&mut self, at: DateTime<Local>) -> AutosaveStatus {
        self.is_unsaved = false;
        self.last_saved_at = Some(at);
        AutosaveStatus::Saved(at)
    }

    pub fn mark_submitted(&mut self) -> AutosaveStatus {
        self.is_unsaved = false;
        self.pending = None;
        AutosaveStatus::Submitted
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }
}
