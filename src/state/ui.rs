//! Controller-owned UI state: the active chat pointer and the bookkeeping
//! around it.
//!
//! DESIGN
//! ======
//! At most one chat is active per tab. Everything that depends on "which chat
//! is showing" (history epochs, the live-message buffer, title lookup) hangs
//! off that single pointer so it can never disagree with it.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use std::cell::Cell;

use super::chat::{MessageLine, SessionEntry};

/// A history load that has been requested but not rendered yet.
#[derive(Clone, Debug, PartialEq, Eq)]
struct PendingHistory {
    epoch: u64,
    chat_id: String,
    buffered: Vec<MessageLine>,
}

/// Active chat plus the state needed to keep the window consistent with it.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    current_chat_id: Option<String>,
    /// Whether the active chat has been opened since this page loaded.
    opened: bool,
    sessions: Vec<SessionEntry>,
    epoch: u64,
    pending: Option<PendingHistory>,
}

impl UiState {
    /// State resuming `current_chat_id` from an earlier page load.
    pub fn restored(current_chat_id: Option<String>) -> Self {
        Self { current_chat_id, ..Self::default() }
    }

    pub fn current_chat_id(&self) -> Option<&str> {
        self.current_chat_id.as_deref()
    }

    /// Whether `room` is the active chat.
    pub fn is_active(&self, room: &str) -> bool {
        self.current_chat_id.as_deref() == Some(room)
    }

    /// Whether the active chat was restored but never opened on this page.
    pub fn needs_open(&self) -> bool {
        self.current_chat_id.is_some() && !self.opened
    }

    /// Make `chat_id` the active chat.
    pub fn activate(&mut self, chat_id: &str) {
        self.current_chat_id = Some(chat_id.to_owned());
        self.opened = true;
    }

    /// Remember the last rendered session list for title lookups.
    pub fn remember_sessions(&mut self, entries: &[SessionEntry]) {
        self.sessions = entries.to_vec();
    }

    pub fn label_for(&self, chat_id: &str) -> Option<&str> {
        self.sessions
            .iter()
            .find(|entry| entry.chat_id == chat_id)
            .map(|entry| entry.label.as_str())
    }

    /// Start a history load for `chat_id`, superseding any load in flight.
    /// Returns the epoch identifying this load.
    pub fn begin_history(&mut self, chat_id: &str) -> u64 {
        self.epoch += 1;
        self.pending = Some(PendingHistory { epoch: self.epoch, chat_id: chat_id.to_owned(), buffered: Vec::new() });
        self.epoch
    }

    /// Drop any history load in flight without starting a new one.
    pub fn cancel_history(&mut self) {
        self.epoch += 1;
        self.pending = None;
    }

    /// Finish the load identified by `epoch`.
    ///
    /// Returns the live lines buffered while it was in flight, or `None` when
    /// the load was superseded and its result must be discarded.
    pub fn finish_history(&mut self, epoch: u64) -> Option<Vec<MessageLine>> {
        let pending = self.pending.take_if(|p| p.epoch == epoch)?;
        if !self.is_active(&pending.chat_id) {
            return None;
        }
        Some(pending.buffered)
    }

    /// Route a live line for the active chat.
    ///
    /// Returns the line when it should render now, or `None` when it was
    /// buffered behind a history load.
    pub fn route_live(&mut self, line: MessageLine) -> Option<MessageLine> {
        match &mut self.pending {
            Some(pending) if self.current_chat_id.as_deref() == Some(pending.chat_id.as_str()) => {
                pending.buffered.push(line);
                None
            }
            _ => Some(line),
        }
    }
}

/// Single-flight flag for an async operation.
#[derive(Debug, Default)]
pub struct InFlight(Cell<bool>);

impl InFlight {
    /// Claim the flag, or `None` if the operation is already running.
    ///
    /// The flag is released when the returned guard drops, on every exit
    /// path including a dropped future.
    pub fn try_enter(&self) -> Option<InFlightGuard<'_>> {
        if self.0.replace(true) { None } else { Some(InFlightGuard(&self.0)) }
    }

    pub fn is_active(&self) -> bool {
        self.0.get()
    }
}

/// Releases an [`InFlight`] flag on drop.
#[derive(Debug)]
pub struct InFlightGuard<'a>(&'a Cell<bool>);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
