//! Seam between the controller and whatever renders [`ChatState`].

use std::rc::Rc;

use leptos::prelude::*;

use crate::state::chat::ChatState;

/// Rendering surface driven by the chat controller.
pub trait ChatView {
    /// Mutate the rendered state.
    fn apply(&self, change: impl FnOnce(&mut ChatState));

    /// Show a blocking notice to the user.
    fn alert(&self, message: &str);
}

impl<T: ChatView> ChatView for Rc<T> {
    fn apply(&self, change: impl FnOnce(&mut ChatState)) {
        (**self).apply(change);
    }

    fn alert(&self, message: &str) {
        (**self).alert(message);
    }
}

/// [`ChatView`] backed by the reactive signal the components read.
#[derive(Clone, Copy, Debug)]
pub struct SignalView {
    chat: RwSignal<ChatState>,
}

impl SignalView {
    pub fn new(chat: RwSignal<ChatState>) -> Self {
        Self { chat }
    }
}

impl ChatView for SignalView {
    fn apply(&self, change: impl FnOnce(&mut ChatState)) {
        self.chat.update(change);
    }

    fn alert(&self, message: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(window) = web_sys::window() else {
                log::warn!("alert without window: {message}");
                return;
            };
            if let Err(err) = window.alert_with_message(message) {
                log::warn!("alert failed: {err:?}");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            log::warn!("alert: {message}");
        }
    }
}
