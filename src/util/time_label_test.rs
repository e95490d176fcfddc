use super::*;

#[test]
fn blank_timestamp_is_unknown() {
    assert_eq!(session_label(""), "Unknown");
    assert_eq!(session_label("   "), "Unknown");
}

#[test]
fn unknown_marker_passes_through() {
    assert_eq!(session_label("Unknown"), "Unknown");
}

#[test]
fn native_label_is_trimmed_server_value() {
    assert_eq!(session_label(" Wed, 14 Oct 2026 09:30:00 GMT "), "Wed, 14 Oct 2026 09:30:00 GMT");
}
