use std::collections::BTreeMap;

use crate::geo::{Bounds, Viewport};
use crate::markers::{Location, Marker, MarkerId, MarkerSet};
use crate::settings::ChatSettings;
use crate::transcript::{MessageId, Role, Transcript};
use crate::view_model::AppViewModel;

/// Sequence number of a submission. Also correlates the pending placeholder.
pub type RequestId = u64;

/// How an outbound request settled, as seen by the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome {
    /// Well-formed reply; the list may be empty.
    Located(Vec<Location>),
    /// Transport, status or decode failure. Details are logged by the host.
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfoWindow {
    pub marker_id: MarkerId,
    pub position: crate::LngLat,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    settings: ChatSettings,
    input: String,
    transcript: Transcript,
    markers: MarkerSet,
    viewport: Viewport,
    info_window: Option<InfoWindow>,
    /// Placeholder message of every request still in flight.
    pending: BTreeMap<RequestId, MessageId>,
    next_request_id: RequestId,
    /// Newest request whose locations are on the map.
    last_applied: Option<RequestId>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(ChatSettings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ChatSettings) -> Self {
        let viewport = Viewport::Initial {
            center: settings.map.center,
            zoom: settings.map.zoom,
        };
        Self {
            settings,
            input: String::new(),
            transcript: Transcript::new(),
            markers: MarkerSet::new(),
            viewport,
            info_window: None,
            pending: BTreeMap::new(),
            next_request_id: 0,
            last_applied: None,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            input: self.input.clone(),
            messages: self.transcript.messages().to_vec(),
            markers: self.markers.as_slice().to_vec(),
            viewport: self.viewport,
            info_window: self.info_window.clone(),
            in_flight: self.pending.len(),
            dirty: self.dirty,
        }
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn last_applied(&self) -> Option<RequestId> {
        self.last_applied
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.dirty = true;
        }
    }

    /// Trimmed input, or `None` when it is blank. Blank input is left as typed.
    pub(crate) fn take_submission(&mut self) -> Option<String> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let text = trimmed.to_string();
        self.input.clear();
        Some(text)
    }

    /// Appends the user message and the pending placeholder for a new request.
    pub(crate) fn begin_request(&mut self, user_input: &str) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.transcript.append(Role::User, user_input);
        let placeholder = self
            .transcript
            .append(Role::Assistant, self.settings.copy.pending.clone());
        self.pending.insert(request_id, placeholder);
        self.dirty = true;
        request_id
    }

    /// Removes the placeholder of `request_id`. Returns `false` for unknown or
    /// already settled requests.
    pub(crate) fn settle_request(&mut self, request_id: RequestId) -> bool {
        match self.pending.remove(&request_id) {
            Some(placeholder) => {
                self.transcript.remove(placeholder);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    pub(crate) fn append_assistant(&mut self, text: String) {
        self.transcript.append(Role::Assistant, text);
        self.dirty = true;
    }

    /// A request is superseded once an equal or newer one has been applied.
    pub(crate) fn is_superseded(&self, request_id: RequestId) -> bool {
        self.last_applied
            .is_some_and(|applied| applied >= request_id)
    }

    pub(crate) fn apply_locations(
        &mut self,
        request_id: RequestId,
        locations: &[Location],
        bounds: Bounds,
    ) -> Vec<Marker> {
        let markers = self.markers.replace(locations).to_vec();
        self.viewport = Viewport::Fitted(bounds);
        self.last_applied = Some(request_id);
        self.dirty = true;
        markers
    }

    pub(crate) fn open_info_window(&mut self, marker_id: MarkerId) -> Option<InfoWindow> {
        let marker = self.markers.get(marker_id)?;
        let window = InfoWindow {
            marker_id,
            position: marker.position,
            content: marker.title.clone(),
        };
        self.info_window = Some(window.clone());
        self.dirty = true;
        Some(window)
    }

    /// Returns whether a window was open.
    pub(crate) fn close_info_window(&mut self) -> bool {
        let was_open = self.info_window.take().is_some();
        if was_open {
            self.dirty = true;
        }
        was_open
    }
}
