#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the chat input.
    InputChanged(String),
    /// User submitted the chat form.
    Submitted,
    /// The request issued for `request_id` settled.
    ResponseReceived {
        request_id: crate::RequestId,
        outcome: crate::ResponseOutcome,
    },
    /// User clicked a marker on the map.
    MarkerClicked(crate::MarkerId),
    /// User dismissed the info window.
    InfoWindowClosed,
}
