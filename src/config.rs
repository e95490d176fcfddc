//! Widget configuration injected by the host page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server that renders the page knows the signed-in user and where its
//! endpoints live. It hands both to the widget as a JSON blob inside
//! `<script type="application/json" id="chat-widget-config">`. Every field
//! has a default so a bare page still works against the stock endpoints.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

/// DOM id of the element holding the JSON config.
pub const CONFIG_ELEMENT_ID: &str = "chat-widget-config";

/// Error returned by [`WidgetConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid widget config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Endpoints, storage key, and identity used by the chat controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// `GET` endpoint listing the user's chat sessions.
    pub sessions_path: String,
    /// Prefix for `GET {prefix}/{chat_id}` history requests.
    pub history_path_prefix: String,
    /// `POST` endpoint creating a chat session.
    pub new_chat_path: String,
    /// Websocket path for the duplex channel, resolved against the page host.
    pub socket_path: String,
    /// `sessionStorage` key holding the active chat id.
    pub storage_key: String,
    /// Fixed recipient tag attached to every outgoing message.
    pub send_target: String,
    /// Email of the signed-in user; empty when nobody is signed in.
    pub current_user_email: String,
    /// DOM id of the element the widget mounts into.
    pub mount_id: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            sessions_path: "/chat_sessions".to_owned(),
            history_path_prefix: "/chat".to_owned(),
            new_chat_path: "/new_chat".to_owned(),
            socket_path: "/ws".to_owned(),
            storage_key: "currentChatId".to_owned(),
            send_target: "GPT".to_owned(),
            current_user_email: String::new(),
            mount_id: "chat-widget".to_owned(),
        }
    }
}

impl WidgetConfig {
    /// Parse a config blob, filling absent fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if `raw` is not a JSON object of the
    /// expected shape.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(raw)?;
        config.current_user_email = config.current_user_email.trim().to_owned();
        Ok(config)
    }

    /// Read the config the host page injected, falling back to defaults.
    pub fn from_page() -> Self {
        #[cfg(feature = "csr")]
        {
            let Some(raw) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
                .and_then(|el| el.text_content())
            else {
                log::info!("no #{CONFIG_ELEMENT_ID} element; using default widget config");
                return Self::default();
            };
            match Self::from_json(&raw) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("{err}; using default widget config");
                    Self::default()
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            Self::default()
        }
    }
}
