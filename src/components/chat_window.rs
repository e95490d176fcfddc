//! Message window for the active chat.

use leptos::prelude::*;

use crate::state::chat::{ChatState, WindowStatus};

/// Scrolling list of message lines plus a loading or failure notice.
#[component]
pub fn ChatWindow() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    // Keep the newest line in view.
    Effect::new(move || {
        chat.track();

        #[cfg(feature = "csr")]
        {
            if let Some(el) = messages_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    let notice = move || match chat.with(|c| c.status.clone()) {
        WindowStatus::Idle => None,
        WindowStatus::Loading => Some(view! { <div class="chat-window__status">"Loading messages..."</div> }.into_any()),
        WindowStatus::Failed(message) => Some(
            view! { <div class="chat-window__status chat-window__status--error">{message}</div> }
                .into_any(),
        ),
    };

    view! {
        <div id="chatWindow" class="chat-window" node_ref=messages_ref>
            {notice}
            {move || {
                chat.get()
                    .lines
                    .into_iter()
                    .map(|line| {
                        let class = format!("message {}", line.style.css_class());
                        view! {
                            <div class=class title=line.timestamp>
                                <strong>{line.author}</strong>
                                ": "
                                {line.text}
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
