//! Sidebar list of the user's chat sessions.

use leptos::prelude::*;

use crate::app::ControllerHandle;
use crate::state::chat::{ChatState, EMPTY_SESSIONS_PLACEHOLDER};

/// Session list; clicking an entry opens that chat.
#[component]
pub fn SessionList() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let controller = expect_context::<ControllerHandle>();

    view! {
        <ul id="chatList" class="chat-list">
            {move || {
                let state = chat.get();
                if state.shows_placeholder() {
                    return view! {
                        <li class="chat-list__empty">{EMPTY_SESSIONS_PLACEHOLDER}</li>
                    }
                        .into_any();
                }

                state
                    .sessions
                    .into_iter()
                    .map(|entry| {
                        let chat_id = entry.chat_id.clone();
                        let on_click = move |_| {
                            let controller = controller.get();
                            let chat_id = chat_id.clone();
                            leptos::task::spawn_local(async move {
                                controller.open_chat(&chat_id).await;
                            });
                        };
                        view! {
                            <li
                                class="chat-list__item"
                                class:active=entry.active
                                data-chat-id=entry.chat_id
                                on:click=on_click
                            >
                                {entry.label}
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()
                    .into_any()
            }}
        </ul>
    }
}
