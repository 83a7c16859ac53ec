//! Geochat client: the outbound `/process` request and its background runtime.
mod decode;
mod engine;
mod request;
mod types;

pub use decode::decode_reply;
pub use engine::{ChannelEventSink, ClientError, ClientHandle, EventSink};
pub use request::{ClientSettings, LocationSource, ReqwestLocationSource, USER_INPUT_FIELD};
pub use types::{ClientEvent, FailureKind, GeoPoint, RequestError, RequestId};
