//! Map surface seam and the marker manager that owns what is drawn on it.

use std::collections::BTreeSet;
use std::io::Write;

use geochat_core::{Bounds, LngLat, MapControl, MapSettings, Marker};
use geochat_logging::geochat_warn;

/// Surface-side identity of a drawn marker.
pub type MarkerHandle = u64;

/// Primitives the host map must expose.
pub trait MapSurface {
    fn add_control(&mut self, control: MapControl);
    fn add_marker(&mut self, marker: &Marker) -> MarkerHandle;
    fn remove_markers(&mut self, handles: &[MarkerHandle]);
    fn set_bounds(&mut self, bounds: Bounds);
    fn open_info_window(&mut self, position: LngLat, content: &str);
    fn close_info_window(&mut self);
}

/// Owns the handles of every marker currently on the surface.
///
/// `clear` and `add_all` are not atomic with each other; the effect runner
/// only goes through `replace`.
pub struct MarkerManager<S: MapSurface> {
    surface: S,
    handles: Vec<MarkerHandle>,
}

impl<S: MapSurface> MarkerManager<S> {
    /// Installs the configured controls on a fresh surface.
    pub fn new(mut surface: S, settings: &MapSettings) -> Self {
        for control in &settings.controls {
            surface.add_control(*control);
        }
        Self {
            surface,
            handles: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        if self.handles.is_empty() {
            return;
        }
        self.surface.remove_markers(&self.handles);
        self.handles.clear();
    }

    pub fn add_all(&mut self, markers: &[Marker]) {
        for marker in markers {
            let handle = self.surface.add_marker(marker);
            self.handles.push(handle);
        }
    }

    pub fn replace(&mut self, markers: &[Marker], bounds: Bounds) {
        self.clear();
        self.add_all(markers);
        if !self.handles.is_empty() {
            self.surface.set_bounds(bounds);
        }
    }

    pub fn open_info_window(&mut self, position: LngLat, content: &str) {
        self.surface.open_info_window(position, content);
    }

    pub fn close_info_window(&mut self) {
        self.surface.close_info_window();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

/// Text rendition of the map for the terminal host.
pub struct TerminalMap<W: Write> {
    out: W,
    next_handle: MarkerHandle,
    live: BTreeSet<MarkerHandle>,
}

impl<W: Write> TerminalMap<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            next_handle: 0,
            live: BTreeSet::new(),
        }
    }

    #[cfg(test)]
    pub fn live_markers(&self) -> usize {
        self.live.len()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.out, "  [map] {text}") {
            geochat_warn!("failed to write map output: {}", err);
        }
    }
}

impl<W: Write> MapSurface for TerminalMap<W> {
    fn add_control(&mut self, control: MapControl) {
        let name = match control {
            MapControl::ToolBar => "toolbar",
            MapControl::Scale => "scale",
        };
        self.line(format_args!("{name} control added"));
    }

    fn add_marker(&mut self, marker: &Marker) -> MarkerHandle {
        self.next_handle += 1;
        let handle = self.next_handle;
        self.live.insert(handle);
        self.line(format_args!(
            "marker {} \"{}\" at {}",
            handle,
            marker.title,
            format_lng_lat(marker.position)
        ));
        handle
    }

    fn remove_markers(&mut self, handles: &[MarkerHandle]) {
        for handle in handles {
            self.live.remove(handle);
        }
        self.line(format_args!("{} marker(s) removed", handles.len()));
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.line(format_args!(
            "view fitted to {} .. {}",
            format_lng_lat(bounds.south_west),
            format_lng_lat(bounds.north_east)
        ));
    }

    fn open_info_window(&mut self, position: LngLat, content: &str) {
        self.line(format_args!("info {} @ {}", content, format_lng_lat(position)));
    }

    fn close_info_window(&mut self) {
        self.line(format_args!("info closed"));
    }
}

pub fn format_lng_lat(point: LngLat) -> String {
    format!("({:.6}, {:.6})", point.lng, point.lat)
}
