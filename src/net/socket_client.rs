//! Websocket duplex channel for room joins, sends, and live messages.
//!
//! The `SocketSender` half queues outgoing events while the socket is open
//! and refuses them otherwise; `spawn_socket_client` owns the websocket
//! lifecycle: connection, reconnection with exponential backoff, and inbound
//! event dispatch. Nothing is buffered across a disconnect.
//!
//! All websocket logic is gated behind `#[cfg(feature = "csr")]` since it
//! requires a browser environment.

#[cfg(test)]
#[path = "socket_client_test.rs"]
mod socket_client_test;

use std::cell::Cell;
use std::rc::Rc;

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};

use super::types::{ClientEvent, ServerEvent};

/// Outbound side of the duplex channel.
pub trait RoomChannel {
    /// Queue `event` for delivery. Fire-and-forget: `false` only means the
    /// channel is gone, never that the server rejected anything.
    fn emit(&self, event: &ClientEvent) -> bool;
}

impl<T: RoomChannel + ?Sized> RoomChannel for Rc<T> {
    fn emit(&self, event: &ClientEvent) -> bool {
        (**self).emit(event)
    }
}

/// Shared flag the socket task raises while a websocket is open.
#[derive(Clone, Debug, Default)]
pub struct ConnectionState(Rc<Cell<bool>>);

impl ConnectionState {
    pub fn is_open(&self) -> bool {
        self.0.get()
    }

    pub fn set_open(&self, open: bool) {
        self.0.set(open);
    }
}

/// Cloneable handle that queues encoded events for the socket task.
#[derive(Clone, Debug)]
pub struct SocketSender {
    tx: UnboundedSender<String>,
    connection: ConnectionState,
}

impl SocketSender {
    /// A disconnected sender plus the receiver the socket task drains.
    pub fn channel() -> (Self, UnboundedReceiver<String>) {
        let (tx, rx) = unbounded();
        (Self { tx, connection: ConnectionState::default() }, rx)
    }

    /// Connection flag for the socket task driving this sender.
    pub fn connection(&self) -> ConnectionState {
        self.connection.clone()
    }
}

impl RoomChannel for SocketSender {
    fn emit(&self, event: &ClientEvent) -> bool {
        if !self.connection.is_open() {
            log::debug!("socket not connected; dropping {event:?}");
            return false;
        }
        match encode_event(event) {
            Ok(json) => self.tx.unbounded_send(json).is_ok(),
            Err(err) => {
                log::error!("failed to encode {event:?}: {err}");
                false
            }
        }
    }
}

/// Encode an outbound event as a websocket text message.
///
/// # Errors
///
/// Returns the serializer error if the event cannot be encoded.
pub fn encode_event(event: &ClientEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(event)
}

/// Decode an inbound websocket text message.
///
/// # Errors
///
/// Returns the deserializer error for malformed text or unknown events.
pub fn decode_event(text: &str) -> Result<ServerEvent, serde_json::Error> {
    serde_json::from_str(text)
}

/// Websocket URL for `path` on the page's host, matching its TLS-ness.
pub fn socket_url(page_href: &str, host: &str, path: &str) -> String {
    let proto = if page_href.starts_with("https") { "wss" } else { "ws" };
    let path = if path.starts_with('/') { path.to_owned() } else { format!("/{path}") };
    format!("{proto}://{host}{path}")
}

/// Next reconnect delay after `current_ms`, doubling up to `max_ms`.
pub fn next_backoff_ms(current_ms: u32, max_ms: u32) -> u32 {
    current_ms.saturating_mul(2).min(max_ms)
}

#[cfg(feature = "csr")]
const INITIAL_BACKOFF_MS: u32 = 1000;
#[cfg(feature = "csr")]
const MAX_BACKOFF_MS: u32 = 10_000;

/// Spawn the websocket lifecycle as a local async task.
///
/// `connection` is raised while a websocket is open. `on_event` receives
/// every decoded inbound event; `on_connect` runs after each successful
/// connection so callers can join rooms that were refused while offline.
#[cfg(feature = "csr")]
pub fn spawn_socket_client<E, R>(
    path: String,
    rx: UnboundedReceiver<String>,
    connection: ConnectionState,
    on_event: E,
    on_connect: R,
) where
    E: Fn(ServerEvent) + 'static,
    R: Fn() + 'static,
{
    leptos::task::spawn_local(socket_client_loop(path, rx, connection, on_event, on_connect));
}

/// Main connection loop with reconnect logic.
#[cfg(feature = "csr")]
async fn socket_client_loop<E, R>(
    path: String,
    mut rx: UnboundedReceiver<String>,
    connection: ConnectionState,
    on_event: E,
    on_connect: R,
) where
    E: Fn(ServerEvent),
    R: Fn(),
{
    let mut backoff_ms = INITIAL_BACKOFF_MS;

    loop {
        let Some(window) = web_sys::window() else {
            log::error!("no window; websocket client stopped");
            return;
        };
        let href = window.location().href().unwrap_or_default();
        let host = window.location().host().unwrap_or_else(|_| "localhost:5000".to_owned());
        let url = socket_url(&href, &host, &path);

        let result = connect_and_run(&url, &mut rx, &connection, &on_event, &on_connect).await;
        connection.set_open(false);
        drain_stale(&mut rx);

        match result {
            Ok(()) => {
                log::info!("websocket disconnected cleanly");
                backoff_ms = INITIAL_BACKOFF_MS;
            }
            Err(e) => {
                log::warn!("websocket error: {e}");
            }
        }

        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(backoff_ms))).await;
        backoff_ms = next_backoff_ms(backoff_ms, MAX_BACKOFF_MS);
    }
}

/// Connect to the websocket and pump messages until disconnect.
#[cfg(feature = "csr")]
async fn connect_and_run<E, C>(
    url: &str,
    rx: &mut UnboundedReceiver<String>,
    connection: &ConnectionState,
    on_event: &E,
    on_connect: &C,
) -> Result<(), String>
where
    E: Fn(ServerEvent),
    C: Fn(),
{
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    let (mut ws_write, mut ws_read) = ws.split();
    connection.set_open(true);
    on_connect();

    let send_task = async {
        while let Some(msg) = rx.next().await {
            if ws_write.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    };

    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Text(text)) => match decode_event(&text) {
                    Ok(event) => on_event(event),
                    Err(err) => log::debug!("ignoring socket message: {err}"),
                },
                Ok(Message::Bytes(_)) => {}
                Err(e) => {
                    log::warn!("websocket recv error: {e}");
                    break;
                }
            }
        }
    };

    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;

    Ok(())
}

/// Discard events accepted before the socket dropped but never written.
pub fn drain_stale(rx: &mut UnboundedReceiver<String>) -> usize {
    let mut dropped = 0;
    while let Ok(Some(_)) = rx.try_next() {
        dropped += 1;
    }
    if dropped > 0 {
        log::warn!("dropped {dropped} unsent socket events after disconnect");
    }
    dropped
}
