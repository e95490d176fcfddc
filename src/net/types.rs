//! Wire DTOs for the chat REST endpoints and the duplex event channel.
//!
//! DESIGN
//! ======
//! The server is not ours, so decoding is lenient where its payloads are:
//! senders arrive either as identity objects or as bare names, and session
//! timestamps arrive as strings, numbers, or not at all.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};

/// Label used when the server has no creation time for a session.
pub const UNKNOWN_CREATED_AT: &str = "Unknown";

/// One row of `GET /chat_sessions`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSessionSummary {
    /// Opaque chat identifier, also used as the duplex room name.
    pub chat_id: String,
    /// Server-formatted creation time.
    #[serde(default = "unknown_created_at", deserialize_with = "deserialize_created_at")]
    pub created_at: String,
}

/// Signed-in identity attached to human messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Display name; some accounts have none.
    #[serde(default)]
    pub name: Option<String>,
    /// Account email.
    pub email: String,
}

/// Author of a message.
///
/// Humans arrive as `{name, email}` objects; the assistant and legacy rows
/// arrive as a bare string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sender {
    Identity(Identity),
    Named(String),
}

impl Sender {
    /// Name shown in front of the message text.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Identity(identity) => identity
                .name
                .as_deref()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(&identity.email),
            Self::Named(name) => name,
        }
    }

    /// Whether this sender is the signed-in user identified by `email`.
    ///
    /// An empty `email` (nobody signed in) never matches.
    pub fn is_user(&self, email: &str) -> bool {
        if email.is_empty() {
            return false;
        }
        match self {
            Self::Identity(identity) => identity.email == email,
            Self::Named(name) => name == email,
        }
    }
}

/// One row of `GET /chat/{chat_id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub user: Sender,
    pub message: String,
    /// ISO-8601 send time, when the server includes it.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Body of `POST /new_chat`. Failure bodies omit `session_id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChatResponse {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Payload of an inbound `receive_message` event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveMessage {
    pub room: String,
    pub user: Sender,
    pub message: String,
}

/// Events this client emits on the duplex channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Subscribe this tab to a room.
    Join { room: String },
    /// Submit a chat message to a room.
    SendMessage { message: String, room: String, target: String },
}

/// Events the server pushes on the duplex channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    ReceiveMessage(ReceiveMessage),
}

fn unknown_created_at() -> String {
    UNKNOWN_CREATED_AT.to_owned()
}

fn deserialize_created_at<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(raw) => raw,
        serde_json::Value::Null => unknown_created_at(),
        other => other.to_string(),
    })
}
