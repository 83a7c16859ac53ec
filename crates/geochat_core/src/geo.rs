/// A point on the map as `(longitude, latitude)` in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// Axis-aligned lng/lat box. Does not wrap across the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: LngLat,
    pub north_east: LngLat,
}

impl Bounds {
    /// Degenerate bounds covering a single point.
    pub fn around(point: LngLat) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Smallest bounds covering every point, or `None` for an empty input.
    pub fn covering<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LngLat>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::around(first);
        for point in iter {
            bounds.extend(point);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, point: LngLat) {
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
    }

    pub fn contains(&self, point: LngLat) -> bool {
        (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
            && (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
    }

    pub fn center(&self) -> LngLat {
        LngLat::new(
            (self.south_west.lng + self.north_east.lng) / 2.0,
            (self.south_west.lat + self.north_east.lat) / 2.0,
        )
    }
}

/// What the map should currently show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    /// The construction-time view, before any response was applied.
    Initial { center: LngLat, zoom: u8 },
    /// Fitted to the markers of the last applied response.
    Fitted(Bounds),
}
