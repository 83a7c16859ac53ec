use serde::Deserialize;

use crate::{FailureKind, GeoPoint, RequestError};

#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default)]
    locations: Option<Vec<RawLocation>>,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    name: String,
    location: Vec<Coordinate>,
}

/// The backend forwards the geocoder's `"lng,lat"` split, so each component
/// may arrive as a JSON string instead of a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn value(&self) -> Option<f64> {
        let value = match self {
            Coordinate::Number(value) => *value,
            Coordinate::Text(text) => text.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Decode a `/process` reply body.
///
/// A missing or `null` `locations` field is an empty list. Any entry with a
/// bad coordinate pair rejects the whole body.
pub fn decode_reply(bytes: &[u8]) -> Result<Vec<GeoPoint>, RequestError> {
    let reply: Reply = serde_json::from_slice(bytes)
        .map_err(|err| RequestError::new(FailureKind::MalformedBody, err.to_string()))?;

    reply
        .locations
        .unwrap_or_default()
        .into_iter()
        .map(into_point)
        .collect()
}

fn into_point(raw: RawLocation) -> Result<GeoPoint, RequestError> {
    let malformed = |reason: &str| {
        RequestError::new(
            FailureKind::MalformedBody,
            format!("location {:?}: {reason}", raw.name),
        )
    };

    let [lng, lat] = raw.location.as_slice() else {
        return Err(malformed("expected [longitude, latitude]"));
    };
    let longitude = lng
        .value()
        .filter(|value| (-180.0..=180.0).contains(value))
        .ok_or_else(|| malformed("longitude out of range"))?;
    let latitude = lat
        .value()
        .filter(|value| (-90.0..=90.0).contains(value))
        .ok_or_else(|| malformed("latitude out of range"))?;

    Ok(GeoPoint {
        name: raw.name,
        longitude,
        latitude,
    })
}
