use std::sync::mpsc;

use geochat_client::{ClientEvent, ClientHandle, EventSink, GeoPoint};
use geochat_core::{Effect, Location, Msg, ResponseOutcome};
use geochat_logging::{geochat_info, geochat_warn};

use super::app::HostEvent;
use super::map::{MapSurface, MarkerManager};

pub struct EffectRunner<S: MapSurface> {
    client: ClientHandle,
    map: MarkerManager<S>,
}

impl<S: MapSurface> EffectRunner<S> {
    pub fn new(client: ClientHandle, map: MarkerManager<S>) -> Self {
        Self { client, map }
    }

    #[cfg(test)]
    pub fn map(&self) -> &MarkerManager<S> {
        &self.map
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendRequest {
                    request_id,
                    user_input,
                } => {
                    geochat_info!(
                        "SendRequest request_id={} input_len={}",
                        request_id,
                        user_input.len()
                    );
                    self.client.submit(request_id, user_input);
                }
                Effect::ReplaceMarkers { markers, bounds } => {
                    self.map.replace(&markers, bounds);
                }
                Effect::OpenInfoWindow {
                    position, content, ..
                } => {
                    self.map.open_info_window(position, &content);
                }
                Effect::CloseInfoWindow => self.map.close_info_window(),
            }
        }
    }
}

/// Forwards client completions into the host's event channel.
pub struct HostEventSink {
    tx: mpsc::Sender<HostEvent>,
}

impl HostEventSink {
    pub fn new(tx: mpsc::Sender<HostEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for HostEventSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(HostEvent::Core(map_event(event)));
    }
}

pub(crate) fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::RequestCompleted { request_id, result } => {
            let outcome = match result {
                Ok(points) => ResponseOutcome::Located(points.into_iter().map(to_location).collect()),
                Err(err) => {
                    geochat_warn!("request {} failed: {}", request_id, err);
                    ResponseOutcome::Failed
                }
            };
            Msg::ResponseReceived {
                request_id,
                outcome,
            }
        }
    }
}

fn to_location(point: GeoPoint) -> Location {
    Location::new(point.name, point.longitude, point.latitude)
}

#[cfg(test)]
mod tests {
    use geochat_client::{ClientEvent, FailureKind, GeoPoint, RequestError};
    use geochat_core::{Location, Msg, ResponseOutcome};

    use super::map_event;

    #[test]
    fn successful_completion_becomes_located() {
        let msg = map_event(ClientEvent::RequestCompleted {
            request_id: 4,
            result: Ok(vec![GeoPoint {
                name: "Beijing".to_string(),
                longitude: 116.4,
                latitude: 39.9,
            }]),
        });
        assert_eq!(
            msg,
            Msg::ResponseReceived {
                request_id: 4,
                outcome: ResponseOutcome::Located(vec![Location::new("Beijing", 116.4, 39.9)]),
            }
        );
    }

    #[test]
    fn request_error_becomes_failed() {
        let msg = map_event(ClientEvent::RequestCompleted {
            request_id: 5,
            result: Err(RequestError {
                kind: FailureKind::HttpStatus(502),
                message: "502 Bad Gateway".to_string(),
            }),
        });
        assert_eq!(
            msg,
            Msg::ResponseReceived {
                request_id: 5,
                outcome: ResponseOutcome::Failed,
            }
        );
    }
}
