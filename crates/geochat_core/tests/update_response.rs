use std::sync::Once;

use geochat_core::{
    update, AppState, ChatCopy, Effect, Location, LngLat, Msg, RequestId, ResponseOutcome, Role,
    Viewport,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(geochat_logging::initialize_for_tests);
}

fn submit(state: AppState, input: &str) -> (AppState, RequestId) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    let (state, effects) = update(state, Msg::Submitted);
    let request_id = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SendRequest { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("send request effect");
    (state, request_id)
}

fn respond(
    state: AppState,
    request_id: RequestId,
    outcome: ResponseOutcome,
) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::ResponseReceived {
            request_id,
            outcome,
        },
    )
}

fn beijing_and_shanghai() -> Vec<Location> {
    vec![
        Location::new("Beijing", 116.4, 39.9),
        Location::new("Shanghai", 121.5, 31.2),
    ]
}

fn assistant_texts(state: &AppState) -> Vec<String> {
    state
        .transcript()
        .messages()
        .iter()
        .filter(|message| message.role == Role::Assistant)
        .map(|message| message.text.clone())
        .collect()
}

#[test]
fn locations_replace_markers_and_fit_bounds() {
    init_logging();
    let copy = ChatCopy::default();
    let (state, request_id) = submit(AppState::new(), "Beijing then Shanghai");

    let (mut state, effects) = respond(
        state,
        request_id,
        ResponseOutcome::Located(beijing_and_shanghai()),
    );
    let view = state.view();

    let positions: Vec<LngLat> = view.markers.iter().map(|m| m.position).collect();
    assert_eq!(
        positions,
        vec![LngLat::new(116.4, 39.9), LngLat::new(121.5, 31.2)]
    );
    let Viewport::Fitted(bounds) = view.viewport else {
        panic!("viewport not fitted: {:?}", view.viewport);
    };
    assert!(positions.iter().all(|p| bounds.contains(*p)));

    assert_eq!(
        effects,
        vec![Effect::ReplaceMarkers {
            markers: view.markers.clone(),
            bounds,
        }]
    );

    let summary = format!("Beijing{}Shanghai", copy.separator);
    assert_eq!(assistant_texts(&state), vec![copy.summary(&beijing_and_shanghai())]);
    assert!(assistant_texts(&state)[0].contains(&summary));
    assert_eq!(view.in_flight, 0);
    assert_eq!(state.last_applied(), Some(request_id));
    assert!(state.consume_dirty());
}

#[test]
fn empty_locations_keep_previous_markers() {
    init_logging();
    let copy = ChatCopy::default();
    let (state, first) = submit(AppState::new(), "Beijing then Shanghai");
    let (state, _) = respond(state, first, ResponseOutcome::Located(beijing_and_shanghai()));
    let markers_before = state.view().markers;
    let viewport_before = state.view().viewport;

    let (state, second) = submit(state, "nowhere in particular");
    let (state, effects) = respond(state, second, ResponseOutcome::Located(Vec::new()));

    assert!(effects.is_empty());
    assert_eq!(state.view().markers, markers_before);
    assert_eq!(state.view().viewport, viewport_before);
    assert_eq!(
        assistant_texts(&state).last(),
        Some(&copy.no_locations)
    );
    assert_eq!(state.last_applied(), Some(first));
}

#[test]
fn failure_appends_one_message_and_removes_placeholder() {
    init_logging();
    let copy = ChatCopy::default();
    let (state, request_id) = submit(AppState::new(), "Beijing");

    let (state, effects) = respond(state, request_id, ResponseOutcome::Failed);

    assert!(effects.is_empty());
    assert!(state.markers().is_empty());
    assert_eq!(assistant_texts(&state), vec![copy.failure.clone()]);
    assert_eq!(state.view().in_flight, 0);
    assert!(!assistant_texts(&state).contains(&copy.pending));
}

#[test]
fn failure_leaves_existing_markers() {
    init_logging();
    let (state, first) = submit(AppState::new(), "Beijing then Shanghai");
    let (state, _) = respond(state, first, ResponseOutcome::Located(beijing_and_shanghai()));
    let before = state.view().markers;

    let (state, second) = submit(state, "again");
    let (state, effects) = respond(state, second, ResponseOutcome::Failed);

    assert!(effects.is_empty());
    assert_eq!(state.view().markers, before);
}

#[test]
fn unknown_or_repeated_response_is_ignored() {
    init_logging();
    let (state, request_id) = submit(AppState::new(), "Beijing");
    let (state, _) = respond(state, request_id, ResponseOutcome::Failed);
    let settled = state.clone();

    let (state, effects) = respond(state, request_id, ResponseOutcome::Failed);
    assert!(effects.is_empty());
    assert_eq!(state, settled);

    let (state, effects) = respond(state, 99, ResponseOutcome::Located(beijing_and_shanghai()));
    assert!(effects.is_empty());
    assert_eq!(state, settled);
}

#[test]
fn marker_click_opens_info_window_with_name() {
    init_logging();
    let (state, request_id) = submit(AppState::new(), "Beijing then Shanghai");
    let (state, _) = respond(state, request_id, ResponseOutcome::Located(beijing_and_shanghai()));
    let shanghai = state.view().markers[1].clone();

    let (state, effects) = update(state, Msg::MarkerClicked(shanghai.id));

    assert_eq!(
        effects,
        vec![Effect::OpenInfoWindow {
            marker_id: shanghai.id,
            position: shanghai.position,
            content: "Shanghai".to_string(),
        }]
    );
    assert_eq!(
        state.view().info_window.map(|window| window.content),
        Some("Shanghai".to_string())
    );

    let (state, effects) = update(state, Msg::InfoWindowClosed);
    assert_eq!(effects, vec![Effect::CloseInfoWindow]);
    assert!(state.view().info_window.is_none());

    let (_state, effects) = update(state, Msg::InfoWindowClosed);
    assert!(effects.is_empty());
}

#[test]
fn clicking_unknown_marker_is_noop() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::MarkerClicked(7));

    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn new_markers_close_open_info_window() {
    init_logging();
    let (state, first) = submit(AppState::new(), "Beijing then Shanghai");
    let (state, _) = respond(state, first, ResponseOutcome::Located(beijing_and_shanghai()));
    let marker_id = state.view().markers[0].id;
    let (state, _) = update(state, Msg::MarkerClicked(marker_id));

    let (state, second) = submit(state, "Paris");
    let (state, effects) = respond(
        state,
        second,
        ResponseOutcome::Located(vec![Location::new("Paris", 2.35, 48.85)]),
    );

    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0], Effect::CloseInfoWindow);
    assert!(matches!(effects[1], Effect::ReplaceMarkers { ref markers, .. } if markers.len() == 1));
    assert!(state.view().info_window.is_none());
}
