use crate::geo::LngLat;

pub type MarkerId = u64;

/// A named point returned by the backend for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub position: LngLat,
}

impl Location {
    pub fn new(name: impl Into<String>, lng: f64, lat: f64) -> Self {
        Self {
            name: name.into(),
            position: LngLat::new(lng, lat),
        }
    }
}

/// A displayed marker. `title` doubles as the info window content.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub position: LngLat,
    pub title: String,
}

/// The markers currently on the map.
///
/// Only `replace` mutates the set, so a clear is never observable without the
/// matching add.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkerSet {
    markers: Vec<Marker>,
    next_id: MarkerId,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every current marker and creates one per location, in order.
    pub fn replace(&mut self, locations: &[Location]) -> &[Marker] {
        self.markers.clear();
        for location in locations {
            self.next_id += 1;
            self.markers.push(Marker {
                id: self.next_id,
                position: location.position,
                title: location.name.clone(),
            });
        }
        &self.markers
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.id == id)
    }

    pub fn as_slice(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
