//! Root widget component with context providers and the socket task.

use std::rc::Rc;

use leptos::prelude::*;

use crate::components::{
    chat_header::ChatHeader, chat_window::ChatWindow, message_input::MessageInput, session_list::SessionList,
};
use crate::config::WidgetConfig;
use crate::controller::ChatController;
use crate::net::api::HttpChatApi;
use crate::net::socket_client::SocketSender;
use crate::state::chat::ChatState;
use crate::util::tab_storage::SessionStorage;
use crate::view::SignalView;

/// Controller wired to the browser's REST, websocket, and storage.
pub type BrowserController = ChatController<HttpChatApi, SocketSender, SessionStorage, SignalView>;

/// Copyable context handle to the shared controller.
#[derive(Clone, Copy)]
pub struct ControllerHandle(StoredValue<Rc<BrowserController>, LocalStorage>);

impl ControllerHandle {
    pub fn get(self) -> Rc<BrowserController> {
        self.0.get_value()
    }
}

/// Root widget component.
///
/// Provides the chat state and controller contexts, starts the websocket
/// task, and loads the session list.
#[component]
pub fn App(config: WidgetConfig) -> impl IntoView {
    let chat = RwSignal::new(ChatState::default());
    provide_context(chat);

    let (sender, outbound) = SocketSender::channel();
    let connection = sender.connection();
    let controller = Rc::new(ChatController::new(
        &config,
        HttpChatApi::new(&config),
        sender,
        SessionStorage,
        SignalView::new(chat),
    ));
    provide_context(ControllerHandle(StoredValue::new_local(Rc::clone(&controller))));

    #[cfg(feature = "csr")]
    {
        let on_event = {
            let controller = Rc::clone(&controller);
            move |event| controller.handle_server_event(event)
        };
        let on_connect = {
            let controller = Rc::clone(&controller);
            move || controller.rejoin_active_room()
        };
        crate::net::socket_client::spawn_socket_client(
            config.socket_path.clone(),
            outbound,
            connection,
            on_event,
            on_connect,
        );

        leptos::task::spawn_local(async move {
            controller.load_sessions().await;
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        drop((outbound, connection, controller));
    }

    view! {
        <div class="chat-widget">
            <aside class="chat-widget__sidebar">
                <SessionList/>
            </aside>
            <section class="chat-widget__main">
                <ChatHeader/>
                <ChatWindow/>
                <MessageInput/>
            </section>
        </div>
    }
}
