//! Chat window title bar with the new-chat button.

use leptos::prelude::*;

use crate::app::ControllerHandle;
use crate::state::chat::ChatState;

#[component]
pub fn ChatHeader() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let controller = expect_context::<ControllerHandle>();

    let on_new_chat = move |_| {
        let controller = controller.get();
        leptos::task::spawn_local(async move {
            controller.start_new_chat().await;
        });
    };

    view! {
        <div class="chat-header">
            <h2 id="chatTitle" class="chat-header__title">
                {move || chat.with(|c| c.title.clone())}
            </h2>
            <button id="newChatBtn" class="btn btn--primary" on:click=on_new_chat>
                "New Chat"
            </button>
        </div>
    }
}
