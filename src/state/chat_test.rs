use super::*;
use crate::net::types::Identity;

fn bob() -> Sender {
    Sender::Identity(Identity { name: Some("Bob".to_owned()), email: "bob@x.com".to_owned() })
}

fn line(author: &str, text: &str) -> MessageLine {
    MessageLine { author: author.to_owned(), text: text.to_owned(), style: LineStyle::Other, timestamp: None }
}

fn entry(chat_id: &str, active: bool) -> SessionEntry {
    SessionEntry { chat_id: chat_id.to_owned(), label: format!("label-{chat_id}"), active }
}

// =============================================================
// LineStyle / MessageLine
// =============================================================

#[test]
fn line_style_own_when_sender_email_matches() {
    assert_eq!(LineStyle::for_sender(&bob(), "bob@x.com"), LineStyle::Own);
    assert_eq!(LineStyle::for_sender(&bob(), "alice@x.com"), LineStyle::Other);
}

#[test]
fn line_style_css_classes() {
    assert_eq!(LineStyle::Own.css_class(), "user-message");
    assert_eq!(LineStyle::Other.css_class(), "other-message");
}

#[test]
fn live_line_renders_author_and_text() {
    let line = MessageLine::live(&bob(), "hi", "alice@x.com");
    assert_eq!(line.to_string(), "Bob: hi");
    assert_eq!(line.style, LineStyle::Other);
}

#[test]
fn history_line_keeps_timestamp() {
    let msg = HistoryMessage {
        user: Sender::Named("GPT".to_owned()),
        message: "hello".to_owned(),
        timestamp: Some("2026-10-14T09:30:00".to_owned()),
    };
    let line = MessageLine::from_history(&msg, "alice@x.com");
    assert_eq!(line.author, "GPT");
    assert_eq!(line.timestamp.as_deref(), Some("2026-10-14T09:30:00"));
}

#[test]
fn same_message_ignores_timestamp_and_style() {
    let mut a = line("Bob", "hi");
    let mut b = line("Bob", "hi");
    a.timestamp = Some("t1".to_owned());
    b.style = LineStyle::Own;
    assert!(a.same_message(&b));
    assert!(!a.same_message(&line("Bob", "hello")));
}

// =============================================================
// ChatState
// =============================================================

#[test]
fn chat_state_default_has_generic_title_and_no_placeholder() {
    let state = ChatState::default();
    assert_eq!(state.title, DEFAULT_TITLE);
    assert!(!state.shows_placeholder());
    assert_eq!(state.status, WindowStatus::Idle);
}

#[test]
fn empty_session_list_shows_placeholder_once_loaded() {
    let mut state = ChatState::default();
    state.show_sessions(Vec::new());
    assert!(state.shows_placeholder());
}

#[test]
fn highlight_selects_exactly_one_entry() {
    let mut state = ChatState::default();
    state.show_sessions(vec![entry("a", true), entry("b", false), entry("c", false)]);
    state.highlight("b");
    let active: Vec<&str> = state.sessions.iter().filter(|e| e.active).map(|e| e.chat_id.as_str()).collect();
    assert_eq!(active, vec!["b"]);
}

#[test]
fn history_error_clears_stale_lines() {
    let mut state = ChatState::default();
    state.push_line(line("Bob", "old"));
    state.begin_history();
    assert_eq!(state.status, WindowStatus::Loading);
    state.show_history_error("boom".to_owned());
    assert!(state.lines.is_empty());
    assert_eq!(state.status, WindowStatus::Failed("boom".to_owned()));
}

#[test]
fn show_history_replaces_lines_and_clears_loading() {
    let mut state = ChatState::default();
    state.push_line(line("Bob", "old"));
    state.begin_history();
    state.show_history(vec![line("Ann", "new")]);
    assert_eq!(state.lines, vec![line("Ann", "new")]);
    assert_eq!(state.status, WindowStatus::Idle);
}

// =============================================================
// lines_to_replay
// =============================================================

#[test]
fn replay_drops_buffered_line_already_in_history_tail() {
    let history = vec![line("Ann", "first"), line("Bob", "hi")];
    let replay = lines_to_replay(&history, vec![line("Bob", "hi")]);
    assert!(replay.is_empty());
}

#[test]
fn replay_keeps_buffered_line_missing_from_history() {
    let history = vec![line("Ann", "first")];
    let replay = lines_to_replay(&history, vec![line("Bob", "late")]);
    assert_eq!(replay, vec![line("Bob", "late")]);
}

#[test]
fn replay_only_looks_at_history_tail() {
    let history = vec![line("Bob", "hi"), line("Ann", "a"), line("Ann", "b")];
    let replay = lines_to_replay(&history, vec![line("Bob", "hi")]);
    assert_eq!(replay, vec![line("Bob", "hi")]);
}

#[test]
fn replay_matches_repeats_one_for_one() {
    let history = vec![line("Bob", "ok"), line("Ann", "x")];
    let replay = lines_to_replay(&history, vec![line("Bob", "ok"), line("Bob", "ok")]);
    assert_eq!(replay, vec![line("Bob", "ok")]);
}

#[test]
fn replay_with_empty_history_keeps_everything() {
    let replay = lines_to_replay(&[], vec![line("Bob", "a"), line("Bob", "b")]);
    assert_eq!(replay.len(), 2);
}
