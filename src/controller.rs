//! The chat controller: session list, active chat, history, live messages,
//! and sends.
//!
//! ARCHITECTURE
//! ============
//! The controller is generic over its four collaborators (REST api, duplex
//! channel, tab storage, view) so the browser wires real implementations and
//! tests wire recording fakes. It owns the only copy of [`UiState`].
//!
//! CONCURRENCY
//! ===========
//! Every operation runs on the browser's single thread. Several may be
//! suspended at once (two history loads, a creation and a list reload), so
//! state sits in a `RefCell` that is never borrowed across an `.await`.
//! History responses are tagged with an epoch and dropped when a newer load
//! has started; live messages that race a history load are buffered and
//! replayed after it renders.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::RefCell;

use crate::config::WidgetConfig;
use crate::net::api::{ApiError, ChatApi};
use crate::net::socket_client::RoomChannel;
use crate::net::types::{ClientEvent, Sender, ServerEvent};
use crate::state::chat::{ChatState, DEFAULT_TITLE, MessageLine, SessionEntry, lines_to_replay};
use crate::state::ui::{InFlight, UiState};
use crate::util::tab_storage::TabStorage;
use crate::util::time_label::session_label;
use crate::view::ChatView;

/// Alert shown when sending with no chat selected.
pub const SELECT_CHAT_ALERT: &str = "Please select a chat session before sending a message.";

/// Alert shown when a new chat could not be created.
pub const NEW_CHAT_FAILED_ALERT: &str = "Failed to start a new chat";

/// Why a new chat could not be created.
#[derive(Debug, thiserror::Error)]
pub enum CreateChatError {
    #[error(transparent)]
    Request(#[from] ApiError),
    #[error("server response did not include a session id")]
    MissingSessionId,
}

/// Result of [`ChatController::send_message`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Handed to the connected duplex channel; the input should be cleared.
    Sent,
    /// No chat is active; the user was alerted.
    NoActiveChat,
    /// Blank input; nothing happened.
    Empty,
    /// The duplex channel is not connected; the input is kept for a retry.
    ChannelClosed,
}

impl SendOutcome {
    pub fn clears_input(self) -> bool {
        self == Self::Sent
    }
}

pub struct ChatController<A, C, S, V> {
    api: A,
    channel: C,
    storage: S,
    view: V,
    storage_key: String,
    send_target: String,
    current_user_email: String,
    state: RefCell<UiState>,
    creating: InFlight,
}

impl<A, C, S, V> ChatController<A, C, S, V>
where
    A: ChatApi,
    C: RoomChannel,
    S: TabStorage,
    V: ChatView,
{
    /// Build a controller, resuming the active chat persisted in `storage`.
    pub fn new(config: &WidgetConfig, api: A, channel: C, storage: S, view: V) -> Self {
        let restored = storage.get(&config.storage_key).filter(|id| !id.trim().is_empty());
        if let Some(chat_id) = &restored {
            log::debug!("resuming chat {chat_id}");
        }
        Self {
            api,
            channel,
            storage,
            view,
            storage_key: config.storage_key.clone(),
            send_target: config.send_target.clone(),
            current_user_email: config.current_user_email.clone(),
            state: RefCell::new(UiState::restored(restored)),
            creating: InFlight::default(),
        }
    }

    pub fn current_chat_id(&self) -> Option<String> {
        self.state.borrow().current_chat_id().map(str::to_owned)
    }

    /// Whether a new-chat request is in flight.
    pub fn is_creating(&self) -> bool {
        self.creating.is_active()
    }

    /// Fetch and render the session list.
    ///
    /// With no active chat, the first (newest) session is opened. A chat
    /// resumed from storage is opened the first time the list loads.
    pub async fn load_sessions(&self) {
        let sessions = match self.api.list_sessions().await {
            Ok(sessions) => sessions,
            Err(err) => {
                log::error!("error loading chat sessions: {err}");
                return;
            }
        };

        let (entries, to_open) = {
            let mut state = self.state.borrow_mut();
            let entries: Vec<SessionEntry> = sessions
                .iter()
                .map(|s| SessionEntry {
                    chat_id: s.chat_id.clone(),
                    label: session_label(&s.created_at),
                    active: state.is_active(&s.chat_id),
                })
                .collect();
            state.remember_sessions(&entries);
            let to_open = match state.current_chat_id() {
                None => entries.first().map(|e| e.chat_id.clone()),
                Some(active) if state.needs_open() => Some(active.to_owned()),
                Some(_) => None,
            };
            (entries, to_open)
        };
        log::debug!("loaded {} chat sessions", entries.len());
        self.view.apply(|chat| chat.show_sessions(entries));

        if let Some(chat_id) = to_open {
            self.open_chat(&chat_id).await;
        }
    }

    /// Make `chat_id` the active chat: persist it, join its room, and render
    /// its full history.
    pub async fn open_chat(&self, chat_id: &str) {
        let epoch = {
            let mut state = self.state.borrow_mut();
            state.activate(chat_id);
            state.begin_history(chat_id)
        };
        self.storage.set(&self.storage_key, chat_id);
        self.join(chat_id);
        self.view.apply(|chat| {
            chat.begin_history();
            chat.highlight(chat_id);
        });

        let result = self.api.fetch_history(chat_id).await;

        let Some(buffered) = self.state.borrow_mut().finish_history(epoch) else {
            log::debug!("discarding stale history for chat {chat_id}");
            return;
        };
        let title = self.title_for(chat_id);

        match result {
            Ok(messages) => {
                let lines: Vec<MessageLine> = messages
                    .iter()
                    .map(|msg| MessageLine::from_history(msg, &self.current_user_email))
                    .collect();
                let replay = lines_to_replay(&lines, buffered);
                self.view.apply(move |chat| {
                    chat.show_history(lines);
                    for line in replay {
                        chat.push_line(line);
                    }
                    chat.set_title(title);
                });
            }
            Err(err) => {
                log::error!("error loading history for chat {chat_id}: {err}");
                self.view.apply(move |chat| {
                    chat.show_history_error(format!("Could not load messages: {err}"));
                    for line in buffered {
                        chat.push_line(line);
                    }
                    chat.set_title(title);
                });
            }
        }
    }

    /// Render a live message if it belongs to the active chat.
    pub fn append_live_message(&self, user: &Sender, message: &str, room: &str) {
        let line = {
            let mut state = self.state.borrow_mut();
            if !state.is_active(room) {
                log::debug!("ignoring message for inactive room {room}");
                return;
            }
            state.route_live(MessageLine::live(user, message, &self.current_user_email))
        };
        if let Some(line) = line {
            self.view.apply(|chat| chat.push_line(line));
        }
    }

    /// Dispatch a decoded inbound duplex event.
    pub fn handle_server_event(&self, event: ServerEvent) {
        match event {
            ServerEvent::ReceiveMessage(msg) => self.append_live_message(&msg.user, &msg.message, &msg.room),
        }
    }

    /// Create a chat session and switch to it.
    ///
    /// A call while another is in flight returns immediately.
    pub async fn start_new_chat(&self) {
        let Some(_creating) = self.creating.try_enter() else {
            log::debug!("new chat already in flight");
            return;
        };

        let chat_id = match self.request_session().await {
            Ok(chat_id) => chat_id,
            Err(err) => {
                log::error!("error creating new chat: {err}");
                self.view.alert(NEW_CHAT_FAILED_ALERT);
                return;
            }
        };

        log::info!("created chat {chat_id}");
        {
            let mut state = self.state.borrow_mut();
            state.activate(&chat_id);
            state.cancel_history();
        }
        // Cleared before the join: the new room's first push can arrive
        // while the list reloads.
        self.view.apply(ChatState::clear_lines);
        self.storage.set(&self.storage_key, &chat_id);
        self.join(&chat_id);
        self.load_sessions().await;

        let title = self.title_for(&chat_id);
        self.view.apply(|chat| {
            chat.highlight(&chat_id);
            chat.set_title(title);
        });
    }

    /// Send `input` to the active chat.
    pub fn send_message(&self, input: &str) -> SendOutcome {
        let Some(room) = self.current_chat_id() else {
            self.view.alert(SELECT_CHAT_ALERT);
            return SendOutcome::NoActiveChat;
        };
        let text = input.trim();
        if text.is_empty() {
            return SendOutcome::Empty;
        }

        log::debug!("sending message to room {room}");
        let event = ClientEvent::SendMessage { message: text.to_owned(), room, target: self.send_target.clone() };
        if self.channel.emit(&event) {
            SendOutcome::Sent
        } else {
            log::warn!("duplex channel not connected; message not sent");
            SendOutcome::ChannelClosed
        }
    }

    /// Subscribe to the active room after the transport (re)connects.
    pub fn rejoin_active_room(&self) {
        if let Some(chat_id) = self.current_chat_id() {
            log::info!("rejoining room {chat_id}");
            self.join(&chat_id);
        }
    }

    async fn request_session(&self) -> Result<String, CreateChatError> {
        let response = self.api.create_session().await?;
        response
            .session_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(CreateChatError::MissingSessionId)
    }

    fn join(&self, room: &str) {
        if !self.channel.emit(&ClientEvent::Join { room: room.to_owned() }) {
            log::debug!("duplex channel not connected; room {room} is joined on connect");
        }
    }

    fn title_for(&self, chat_id: &str) -> String {
        self.state
            .borrow()
            .label_for(chat_id)
            .unwrap_or(DEFAULT_TITLE)
            .to_owned()
    }
}
