//! Widget UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render [`crate::state::chat::ChatState`] from context and hand
//! user actions to the controller through [`crate::app::ControllerHandle`].
//! They never mutate chat state themselves.

pub mod chat_header;
pub mod chat_window;
pub mod message_input;
pub mod session_list;
