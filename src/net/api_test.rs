use super::*;

#[test]
fn history_endpoint_formats_expected_path() {
    assert_eq!(history_endpoint("/chat", "65f0c0ffee"), "/chat/65f0c0ffee");
}

#[test]
fn history_endpoint_tolerates_trailing_slash_prefix() {
    assert_eq!(history_endpoint("/api/chat/", "abc"), "/api/chat/abc");
}

#[test]
fn history_endpoint_escapes_reserved_characters() {
    assert_eq!(history_endpoint("/chat", "a?b#c%d"), "/chat/a%3Fb%23c%25d");
    assert_eq!(history_endpoint("/chat", "x/y z"), "/chat/x%2Fy%20z");
}

#[test]
fn http_api_uses_configured_history_prefix() {
    let config = WidgetConfig { history_path_prefix: "/rooms".to_owned(), ..WidgetConfig::default() };
    let api = HttpChatApi::new(&config);
    assert_eq!(api.history_endpoint("r1"), "/rooms/r1");
}

#[test]
fn api_error_messages_are_descriptive() {
    assert_eq!(ApiError::Status(404).to_string(), "unexpected status: 404");
    assert_eq!(ApiError::Transport("offline".to_owned()).to_string(), "request failed: offline");
    assert_eq!(ApiError::Decode("eof".to_owned()).to_string(), "invalid response body: eof");
}

#[test]
fn http_api_outside_browser_is_unavailable() {
    let api = HttpChatApi::new(&WidgetConfig::default());
    let result = futures::executor::block_on(api.list_sessions());
    assert!(matches!(result, Err(ApiError::Unavailable)));
    let result = futures::executor::block_on(api.create_session());
    assert!(matches!(result, Err(ApiError::Unavailable)));
}
