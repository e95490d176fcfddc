//! Render model for the session list and chat window.
//!
//! DESIGN
//! ======
//! Components render this struct and nothing else. The controller mutates it
//! only through the methods below, so every visible transition (history
//! loaded, load failed, live line appended) has one named entry point.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::fmt;

use crate::net::types::{HistoryMessage, Sender};

/// Placeholder row for an empty session list.
pub const EMPTY_SESSIONS_PLACEHOLDER: &str = "No chats yet. Start a new one!";

/// Window title when the active chat has no list entry.
pub const DEFAULT_TITLE: &str = "Chat";

/// Whose message a line is, which decides its alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    /// Sent by the signed-in user.
    Own,
    Other,
}

impl LineStyle {
    pub fn for_sender(sender: &Sender, current_user_email: &str) -> Self {
        if sender.is_user(current_user_email) { Self::Own } else { Self::Other }
    }

    /// CSS modifier class for a message row.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Own => "user-message",
            Self::Other => "other-message",
        }
    }
}

/// One rendered message row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageLine {
    pub author: String,
    pub text: String,
    pub style: LineStyle,
    pub timestamp: Option<String>,
}

impl MessageLine {
    pub fn from_history(msg: &HistoryMessage, current_user_email: &str) -> Self {
        Self {
            author: msg.user.display_name().to_owned(),
            text: msg.message.clone(),
            style: LineStyle::for_sender(&msg.user, current_user_email),
            timestamp: msg.timestamp.clone(),
        }
    }

    pub fn live(sender: &Sender, text: &str, current_user_email: &str) -> Self {
        Self {
            author: sender.display_name().to_owned(),
            text: text.to_owned(),
            style: LineStyle::for_sender(sender, current_user_email),
            timestamp: None,
        }
    }

    /// Same author and text, ignoring timestamps.
    pub fn same_message(&self, other: &Self) -> bool {
        self.author == other.author && self.text == other.text
    }
}

impl fmt::Display for MessageLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.author, self.text)
    }
}

/// One row of the session list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionEntry {
    pub chat_id: String,
    pub label: String,
    pub active: bool,
}

/// What the chat window shows besides its lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum WindowStatus {
    #[default]
    Idle,
    Loading,
    Failed(String),
}

/// State for the session list and chat window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatState {
    pub sessions: Vec<SessionEntry>,
    /// Set once a list response has been rendered.
    pub sessions_loaded: bool,
    pub title: String,
    pub lines: Vec<MessageLine>,
    pub status: WindowStatus,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            sessions: Vec::new(),
            sessions_loaded: false,
            title: DEFAULT_TITLE.to_owned(),
            lines: Vec::new(),
            status: WindowStatus::Idle,
        }
    }
}

impl ChatState {
    /// Replace the session list.
    pub fn show_sessions(&mut self, entries: Vec<SessionEntry>) {
        self.sessions = entries;
        self.sessions_loaded = true;
    }

    /// Whether the list should render [`EMPTY_SESSIONS_PLACEHOLDER`].
    pub fn shows_placeholder(&self) -> bool {
        self.sessions_loaded && self.sessions.is_empty()
    }

    /// Mark `chat_id` selected and every other entry unselected.
    pub fn highlight(&mut self, chat_id: &str) {
        for entry in &mut self.sessions {
            entry.active = entry.chat_id == chat_id;
        }
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn begin_history(&mut self) {
        self.status = WindowStatus::Loading;
    }

    /// Replace the window contents with a freshly fetched history.
    pub fn show_history(&mut self, lines: Vec<MessageLine>) {
        self.lines = lines;
        self.status = WindowStatus::Idle;
    }

    /// Replace the window contents with a failure notice.
    pub fn show_history_error(&mut self, message: String) {
        self.lines.clear();
        self.status = WindowStatus::Failed(message);
    }

    pub fn push_line(&mut self, line: MessageLine) {
        self.lines.push(line);
    }

    pub fn clear_lines(&mut self) {
        self.lines.clear();
        self.status = WindowStatus::Idle;
    }
}

/// Live lines buffered during a history load that are not already at the
/// tail of that history.
///
/// Each history line in the last `buffered.len()` rows absorbs at most one
/// matching buffered line, so a message sent twice in a row survives once
/// per actual repeat.
pub fn lines_to_replay(history: &[MessageLine], buffered: Vec<MessageLine>) -> Vec<MessageLine> {
    let tail_start = history.len().saturating_sub(buffered.len());
    let mut unmatched: Vec<&MessageLine> = history[tail_start..].iter().collect();
    buffered
        .into_iter()
        .filter(|line| {
            if let Some(pos) = unmatched.iter().position(|seen| seen.same_message(line)) {
                unmatched.remove(pos);
                false
            } else {
                true
            }
        })
        .collect()
}
