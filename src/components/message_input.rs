//! Message form for the active chat.

use leptos::prelude::*;

use crate::app::ControllerHandle;

#[component]
pub fn MessageInput() -> impl IntoView {
    let controller = expect_context::<ControllerHandle>();
    let input = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let outcome = controller.get().send_message(&input.get_untracked());
        if outcome.clears_input() {
            input.set(String::new());
        }
    };

    view! {
        <form id="messageForm" class="message-form" on:submit=on_submit>
            <input
                id="messageInput"
                class="message-form__input"
                type="text"
                autocomplete="off"
                placeholder="Type a message..."
                prop:value=move || input.get()
                on:input=move |ev| input.set(event_target_value(&ev))
            />
            <button class="btn btn--primary message-form__send" type="submit">
                "Send"
            </button>
        </form>
    }
}
