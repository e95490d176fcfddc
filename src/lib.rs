//! # chat-widget
//!
//! Leptos + WASM chat widget for a multi-session chat page. Lists the
//! signed-in user's chat sessions, renders the active chat's history, streams
//! live messages over a websocket room, and sends new messages.
//!
//! The [`controller`] holds all behavior behind four seams (REST api, duplex
//! channel, tab storage, view); [`app`] and [`components`] wire the browser
//! implementations and render [`state::chat::ChatState`].

pub mod app;
pub mod components;
pub mod config;
pub mod controller;
pub mod net;
pub mod state;
pub mod util;
pub mod view;

/// WASM entry point: install logging and mount the widget.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use leptos::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::app::App;
    use crate::config::WidgetConfig;

    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger unavailable: {err}");
    }

    let config = WidgetConfig::from_page();
    let mount = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(&config.mount_id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());

    match mount {
        Some(el) => {
            log::info!("mounting chat widget into #{}", config.mount_id);
            leptos::mount::mount_to(el, move || view! { <App config/> }).forget();
        }
        None => {
            log::warn!("no #{} element; mounting chat widget on body", config.mount_id);
            leptos::mount::mount_to_body(move || view! { <App config/> });
        }
    }
}
