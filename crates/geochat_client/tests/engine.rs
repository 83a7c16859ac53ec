use std::sync::{mpsc, Arc};
use std::time::Duration;

use geochat_client::{
    ChannelEventSink, ClientEvent, ClientHandle, FailureKind, GeoPoint, LocationSource,
    RequestError, RequestId,
};

/// Replies after a per-request delay; `"fail"` produces a network error.
struct ScriptedSource;

#[async_trait::async_trait]
impl LocationSource for ScriptedSource {
    async fn locate(
        &self,
        request_id: RequestId,
        user_input: &str,
    ) -> Result<Vec<GeoPoint>, RequestError> {
        let delay = if request_id == 1 { 200 } else { 10 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        if user_input == "panic" {
            panic!("source blew up");
        }
        if user_input == "fail" {
            return Err(RequestError {
                kind: FailureKind::Network,
                message: "connection refused".to_string(),
            });
        }
        Ok(vec![GeoPoint {
            name: user_input.to_string(),
            longitude: 0.0,
            latitude: 0.0,
        }])
    }
}

fn completed_id(event: &ClientEvent) -> RequestId {
    match event {
        ClientEvent::RequestCompleted { request_id, .. } => *request_id,
    }
}

#[test]
fn completions_arrive_in_settle_order() {
    let (tx, rx) = mpsc::channel();
    let client = ClientHandle::with_source(
        Arc::new(ScriptedSource),
        Arc::new(ChannelEventSink::new(tx)),
    )
    .expect("client");

    client.submit(1, "slow");
    client.submit(2, "fast");

    let first = rx.recv_timeout(Duration::from_secs(5)).expect("first event");
    let second = rx.recv_timeout(Duration::from_secs(5)).expect("second event");
    assert_eq!(completed_id(&first), 2);
    assert_eq!(completed_id(&second), 1);
}

#[test]
fn failures_are_delivered_as_events() {
    let (tx, rx) = mpsc::channel();
    let client = ClientHandle::with_source(
        Arc::new(ScriptedSource),
        Arc::new(ChannelEventSink::new(tx)),
    )
    .expect("client");

    client.submit(3, "fail");

    let ClientEvent::RequestCompleted { request_id, result } =
        rx.recv_timeout(Duration::from_secs(5)).expect("event");
    assert_eq!(request_id, 3);
    assert_eq!(result.unwrap_err().kind, FailureKind::Network);
}

#[test]
fn panicking_source_still_completes_request() {
    let (tx, rx) = mpsc::channel();
    let client = ClientHandle::with_source(
        Arc::new(ScriptedSource),
        Arc::new(ChannelEventSink::new(tx)),
    )
    .expect("client");

    client.submit(4, "panic");
    client.submit(5, "after");

    let mut events = vec![
        rx.recv_timeout(Duration::from_secs(5)).expect("first event"),
        rx.recv_timeout(Duration::from_secs(5)).expect("second event"),
    ];
    events.sort_by_key(completed_id);

    let ClientEvent::RequestCompleted { request_id, result } = &events[0];
    assert_eq!(*request_id, 4);
    assert_eq!(result.as_ref().unwrap_err().kind, FailureKind::Network);

    let ClientEvent::RequestCompleted { request_id, result } = &events[1];
    assert_eq!(*request_id, 5);
    assert_eq!(result.as_ref().unwrap()[0].name, "after");
}
