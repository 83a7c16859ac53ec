use crate::{Bounds, LngLat, Marker, MarkerId, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// POST the trimmed input to the backend.
    SendRequest {
        request_id: RequestId,
        user_input: String,
    },
    /// Remove every marker from the map, add `markers`, then fit `bounds`.
    ReplaceMarkers { markers: Vec<Marker>, bounds: Bounds },
    OpenInfoWindow {
        marker_id: MarkerId,
        position: LngLat,
        content: String,
    },
    CloseInfoWindow,
}
