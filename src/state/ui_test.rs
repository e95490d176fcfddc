use super::*;
use crate::state::chat::LineStyle;

fn line(text: &str) -> MessageLine {
    MessageLine { author: "Bob".to_owned(), text: text.to_owned(), style: LineStyle::Other, timestamp: None }
}

// =============================================================
// Active chat pointer
// =============================================================

#[test]
fn ui_state_default_has_no_active_chat() {
    let state = UiState::default();
    assert_eq!(state.current_chat_id(), None);
    assert!(!state.needs_open());
}

#[test]
fn restored_chat_needs_open_until_activated() {
    let mut state = UiState::restored(Some("42".to_owned()));
    assert!(state.is_active("42"));
    assert!(state.needs_open());
    state.activate("42");
    assert!(!state.needs_open());
}

#[test]
fn activate_switches_active_room() {
    let mut state = UiState::default();
    state.activate("a");
    state.activate("b");
    assert!(state.is_active("b"));
    assert!(!state.is_active("a"));
}

#[test]
fn label_for_uses_remembered_sessions() {
    let mut state = UiState::default();
    state.remember_sessions(&[SessionEntry { chat_id: "a".to_owned(), label: "Monday".to_owned(), active: false }]);
    assert_eq!(state.label_for("a"), Some("Monday"));
    assert_eq!(state.label_for("b"), None);
}

// =============================================================
// History epochs
// =============================================================

#[test]
fn finish_history_returns_buffer_for_current_load() {
    let mut state = UiState::default();
    state.activate("a");
    let epoch = state.begin_history("a");
    assert_eq!(state.finish_history(epoch), Some(Vec::new()));
}

#[test]
fn superseded_history_is_discarded() {
    let mut state = UiState::default();
    state.activate("a");
    let first = state.begin_history("a");
    state.activate("b");
    let second = state.begin_history("b");
    assert_eq!(state.finish_history(first), None);
    assert_eq!(state.finish_history(second), Some(Vec::new()));
}

#[test]
fn cancelled_history_is_discarded() {
    let mut state = UiState::default();
    state.activate("a");
    let epoch = state.begin_history("a");
    state.activate("new");
    state.cancel_history();
    assert_eq!(state.finish_history(epoch), None);
}

// =============================================================
// Live routing
// =============================================================

#[test]
fn live_line_renders_immediately_without_pending_load() {
    let mut state = UiState::default();
    state.activate("a");
    assert_eq!(state.route_live(line("hi")), Some(line("hi")));
}

#[test]
fn live_line_is_buffered_during_load_and_returned_on_finish() {
    let mut state = UiState::default();
    state.activate("a");
    let epoch = state.begin_history("a");
    assert_eq!(state.route_live(line("hi")), None);
    assert_eq!(state.finish_history(epoch), Some(vec![line("hi")]));
    assert_eq!(state.route_live(line("after")), Some(line("after")));
}

// =============================================================
// InFlight
// =============================================================

#[test]
fn in_flight_rejects_second_entry_until_guard_drops() {
    let flag = InFlight::default();
    let guard = flag.try_enter();
    assert!(guard.is_some());
    assert!(flag.is_active());
    assert!(flag.try_enter().is_none());
    drop(guard);
    assert!(!flag.is_active());
    assert!(flag.try_enter().is_some());
}
