//! Geochat core: pure submission state machine and view-model helpers.
mod effect;
mod geo;
mod markers;
mod msg;
mod settings;
mod state;
mod transcript;
mod update;
mod view_model;

pub use effect::Effect;
pub use geo::{Bounds, LngLat, Viewport};
pub use markers::{Location, Marker, MarkerId, MarkerSet};
pub use msg::Msg;
pub use settings::{ChatCopy, ChatSettings, MapControl, MapSettings};
pub use state::{AppState, InfoWindow, RequestId, ResponseOutcome};
pub use transcript::{Message, MessageId, Role, Transcript};
pub use update::update;
pub use view_model::AppViewModel;
