use geochat_core::{update, AppState, Msg};

#[test]
fn input_change_marks_dirty_once() {
    let (mut state, effects) = update(AppState::new(), Msg::InputChanged("Bei".to_string()));
    assert!(effects.is_empty());
    assert_eq!(state.view().input, "Bei");
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::InputChanged("Bei".to_string()));
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn close_without_open_window_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::InfoWindowClosed);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
