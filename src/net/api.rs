//! REST API helpers for the chat endpoints.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: [`ApiError::Unavailable`], since these endpoints are only
//! meaningful in the browser that carries the session cookie.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`; the controller decides whether a
//! failure is logged, alerted, or rendered. Nothing here retries.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use async_trait::async_trait;

use super::types::{ChatSessionSummary, HistoryMessage, NewChatResponse};
use crate::config::WidgetConfig;

/// Failure of a single REST call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-2xx status.
    #[error("unexpected status: {0}")]
    Status(u16),
    /// The body was not the JSON shape we expected.
    #[error("invalid response body: {0}")]
    Decode(String),
    /// Called outside a browser.
    #[error("not available outside the browser")]
    Unavailable,
}

/// Request/response endpoints the chat controller depends on.
///
/// Futures are `?Send`: the browser runtime is single-threaded.
#[async_trait(?Send)]
pub trait ChatApi {
    /// `GET` the signed-in user's chat sessions, newest first.
    async fn list_sessions(&self) -> Result<Vec<ChatSessionSummary>, ApiError>;

    /// `GET` the full message history of one chat.
    async fn fetch_history(&self, chat_id: &str) -> Result<Vec<HistoryMessage>, ApiError>;

    /// `POST` a request for a new chat session.
    async fn create_session(&self) -> Result<NewChatResponse, ApiError>;
}

#[async_trait(?Send)]
impl<T: ChatApi + ?Sized> ChatApi for Rc<T> {
    async fn list_sessions(&self) -> Result<Vec<ChatSessionSummary>, ApiError> {
        (**self).list_sessions().await
    }

    async fn fetch_history(&self, chat_id: &str) -> Result<Vec<HistoryMessage>, ApiError> {
        (**self).fetch_history(chat_id).await
    }

    async fn create_session(&self) -> Result<NewChatResponse, ApiError> {
        (**self).create_session().await
    }
}

/// [`ChatApi`] over same-origin HTTP.
#[derive(Clone, Debug)]
pub struct HttpChatApi {
    sessions_path: String,
    history_path_prefix: String,
    new_chat_path: String,
}

impl HttpChatApi {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            sessions_path: config.sessions_path.clone(),
            history_path_prefix: config.history_path_prefix.clone(),
            new_chat_path: config.new_chat_path.clone(),
        }
    }

    /// URL of the history endpoint for `chat_id`.
    pub fn history_endpoint(&self, chat_id: &str) -> String {
        history_endpoint(&self.history_path_prefix, chat_id)
    }
}

/// `chat_id` is a single path segment, so reserved characters are escaped.
fn history_endpoint(prefix: &str, chat_id: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), urlencoding::encode(chat_id.trim_matches('/')))
}

#[async_trait(?Send)]
impl ChatApi for HttpChatApi {
    async fn list_sessions(&self) -> Result<Vec<ChatSessionSummary>, ApiError> {
        #[cfg(feature = "csr")]
        {
            get_json(&self.sessions_path).await
        }
        #[cfg(not(feature = "csr"))]
        {
            log::debug!("session list request for {} skipped outside the browser", self.sessions_path);
            Err(ApiError::Unavailable)
        }
    }

    async fn fetch_history(&self, chat_id: &str) -> Result<Vec<HistoryMessage>, ApiError> {
        let url = self.history_endpoint(chat_id);
        #[cfg(feature = "csr")]
        {
            get_json(&url).await
        }
        #[cfg(not(feature = "csr"))]
        {
            log::debug!("history request for {url} skipped outside the browser");
            Err(ApiError::Unavailable)
        }
    }

    async fn create_session(&self) -> Result<NewChatResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&self.new_chat_path)
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            if !resp.ok() {
                return Err(ApiError::Status(resp.status()));
            }
            resp.json::<NewChatResponse>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "csr"))]
        {
            log::debug!("new chat request to {} skipped outside the browser", self.new_chat_path);
            Err(ApiError::Unavailable)
        }
    }
}

#[cfg(feature = "csr")]
async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    if !resp.ok() {
        return Err(ApiError::Status(resp.status()));
    }
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}
