//! Client-side state modules.
//!
//! DESIGN
//! ======
//! `ui` is what the controller decides with (active chat, in-flight loads);
//! `chat` is what components render. Keeping them apart means a render can
//! never change which room this tab is in.

pub mod chat;
pub mod ui;
