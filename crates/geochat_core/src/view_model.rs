use crate::{InfoWindow, Marker, Message, Viewport};

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub input: String,
    pub messages: Vec<Message>,
    pub markers: Vec<Marker>,
    pub viewport: Viewport,
    pub info_window: Option<InfoWindow>,
    /// Requests submitted but not yet settled.
    pub in_flight: usize,
    pub dirty: bool,
}
