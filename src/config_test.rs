use super::*;

#[test]
fn default_config_targets_stock_endpoints() {
    let config = WidgetConfig::default();
    assert_eq!(config.sessions_path, "/chat_sessions");
    assert_eq!(config.history_path_prefix, "/chat");
    assert_eq!(config.new_chat_path, "/new_chat");
    assert_eq!(config.storage_key, "currentChatId");
    assert_eq!(config.send_target, "GPT");
    assert!(config.current_user_email.is_empty());
}

#[test]
fn from_json_fills_missing_fields_with_defaults() {
    let config = WidgetConfig::from_json(r#"{ "current_user_email": "alice@x.com" }"#).expect("config should parse");
    assert_eq!(config.current_user_email, "alice@x.com");
    assert_eq!(config.sessions_path, "/chat_sessions");
    assert_eq!(config.socket_path, "/ws");
}

#[test]
fn from_json_trims_injected_email() {
    let config = WidgetConfig::from_json(r#"{ "current_user_email": "  alice@x.com\n" }"#).expect("config should parse");
    assert_eq!(config.current_user_email, "alice@x.com");
}

#[test]
fn from_json_overrides_endpoints() {
    let config = WidgetConfig::from_json(
        r#"{ "sessions_path": "/api/sessions", "history_path_prefix": "/api/chat", "send_target": "assistant" }"#,
    )
    .expect("config should parse");
    assert_eq!(config.sessions_path, "/api/sessions");
    assert_eq!(config.history_path_prefix, "/api/chat");
    assert_eq!(config.send_target, "assistant");
}

#[test]
fn from_json_rejects_malformed_blob() {
    let err = WidgetConfig::from_json("{ not json").expect_err("malformed config should fail");
    assert!(err.to_string().starts_with("invalid widget config"));
}

#[test]
fn from_page_outside_browser_is_default() {
    assert_eq!(WidgetConfig::from_page(), WidgetConfig::default());
}
