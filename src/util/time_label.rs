//! Session-list labels from server creation timestamps.

#[cfg(test)]
#[path = "time_label_test.rs"]
mod time_label_test;

use crate::net::types::UNKNOWN_CREATED_AT;

/// Human label for a session created at `created_at`.
///
/// In the browser a parseable timestamp renders in the user's locale;
/// anything else is shown as the server sent it.
pub fn session_label(created_at: &str) -> String {
    let raw = created_at.trim();
    if raw.is_empty() {
        return UNKNOWN_CREATED_AT.to_owned();
    }
    #[cfg(feature = "csr")]
    {
        if let Some(label) = locale_label(raw) {
            return label;
        }
    }
    raw.to_owned()
}

#[cfg(feature = "csr")]
fn locale_label(raw: &str) -> Option<String> {
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_str(raw));
    if date.get_time().is_nan() {
        return None;
    }
    let locale = web_sys::window()
        .and_then(|w| w.navigator().language())
        .unwrap_or_else(|| "en-US".to_owned());
    date.to_locale_string(&locale, &wasm_bindgen::JsValue::UNDEFINED).as_string()
}
