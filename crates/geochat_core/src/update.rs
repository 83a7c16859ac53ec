use geochat_logging::{geochat_debug, geochat_info};

use crate::{AppState, Bounds, Effect, Location, Msg, RequestId, ResponseOutcome};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::Submitted => {
            let Some(user_input) = state.take_submission() else {
                return (state, Vec::new());
            };
            let request_id = state.begin_request(&user_input);
            geochat_debug!(
                "request {} submitted ({} chars)",
                request_id,
                user_input.chars().count()
            );
            vec![Effect::SendRequest {
                request_id,
                user_input,
            }]
        }
        Msg::ResponseReceived {
            request_id,
            outcome,
        } => apply_response(&mut state, request_id, outcome),
        Msg::MarkerClicked(marker_id) => match state.open_info_window(marker_id) {
            Some(window) => vec![Effect::OpenInfoWindow {
                marker_id: window.marker_id,
                position: window.position,
                content: window.content,
            }],
            None => Vec::new(),
        },
        Msg::InfoWindowClosed => {
            if state.close_info_window() {
                vec![Effect::CloseInfoWindow]
            } else {
                Vec::new()
            }
        }
    };

    (state, effects)
}

fn apply_response(
    state: &mut AppState,
    request_id: RequestId,
    outcome: ResponseOutcome,
) -> Vec<Effect> {
    if !state.settle_request(request_id) {
        geochat_debug!("ignoring response for unknown request {}", request_id);
        return Vec::new();
    }

    let locations = match outcome {
        ResponseOutcome::Located(locations) => locations,
        ResponseOutcome::Failed => {
            let text = state.settings().copy.failure.clone();
            state.append_assistant(text);
            return Vec::new();
        }
    };

    match bounds_of(&locations) {
        None => {
            // Existing markers stay on the map.
            let text = state.settings().copy.no_locations.clone();
            state.append_assistant(text);
            Vec::new()
        }
        Some(_) if state.is_superseded(request_id) => {
            geochat_info!(
                "request {} superseded by {:?}; {} location(s) not shown",
                request_id,
                state.last_applied(),
                locations.len()
            );
            let text = state.settings().copy.superseded(&locations);
            state.append_assistant(text);
            Vec::new()
        }
        Some(bounds) => {
            let text = state.settings().copy.summary(&locations);
            state.append_assistant(text);

            let mut effects = Vec::with_capacity(2);
            if state.close_info_window() {
                effects.push(Effect::CloseInfoWindow);
            }
            let markers = state.apply_locations(request_id, &locations, bounds);
            geochat_debug!("request {} placed {} marker(s)", request_id, markers.len());
            effects.push(Effect::ReplaceMarkers { markers, bounds });
            effects
        }
    }
}

fn bounds_of(locations: &[Location]) -> Option<Bounds> {
    Bounds::covering(locations.iter().map(|location| location.position))
}
