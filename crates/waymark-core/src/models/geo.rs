//! Geographic coordinates and map markers.
//!
//! Trip files in the wild spell locations several ways. They are normalized
//! here, once, into a [`GeoPoint`] that always serializes as `[lat, lng]`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::TripDocument;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocation", into = "[f64; 2]")]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a point, rejecting coordinates outside the valid ranges.
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(format!("latitude {lat} is out of range"));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(format!("longitude {lng} is out of range"));
        }
        Ok(Self { lat, lng })
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.lat, point.lng]
    }
}

/// Every location spelling accepted in trip files.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLocation {
    Pair([f64; 2]),
    Object {
        lat: f64,
        #[serde(alias = "lon")]
        lng: f64,
    },
    Text(String),
}

impl TryFrom<RawLocation> for GeoPoint {
    type Error = String;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        match raw {
            RawLocation::Pair([lat, lng]) | RawLocation::Object { lat, lng } => {
                GeoPoint::new(lat, lng)
            }
            RawLocation::Text(text) => {
                let mut parts = text.split(',').map(str::trim);
                let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next())
                else {
                    return Err(format!("location '{text}' is not 'lat, lng'"));
                };
                let lat = lat
                    .parse::<f64>()
                    .map_err(|_| format!("invalid latitude '{lat}'"))?;
                let lng = lng
                    .parse::<f64>()
                    .map_err(|_| format!("invalid longitude '{lng}'"))?;
                GeoPoint::new(lat, lng)
            }
        }
    }
}

/// Initial map viewport for a trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
}

/// A located section or subsection, ready to be pinned on a map.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub point: GeoPoint,
    /// Title of the enclosing section, set for subsection markers
    pub parent: Option<String>,
}

impl TripDocument {
    /// The configured initial viewport, if the trip declares both center and
    /// zoom.
    pub fn map_view(&self) -> Option<MapView> {
        Some(MapView {
            center: self.default_map_center?,
            zoom: self.default_zoom?,
        })
    }

    /// Markers for every located section and subsection, in document order.
    pub fn markers(&self) -> Vec<Marker> {
        let mut markers = Vec::new();
        for section in &self.sections {
            if let Some(point) = section.location {
                markers.push(Marker {
                    id: section.id.clone(),
                    title: section.display_title().to_string(),
                    description: section.description.clone(),
                    point,
                    parent: None,
                });
            }
            for subsection in &section.subsections {
                if let Some(point) = subsection.location {
                    markers.push(Marker {
                        id: subsection.id.clone(),
                        title: subsection.display_title().to_string(),
                        description: subsection.description.clone(),
                        point,
                        parent: Some(section.display_title().to_string()),
                    });
                }
            }
        }
        markers
    }

    /// Markers as a GeoJSON `FeatureCollection`.
    ///
    /// GeoJSON positions are `[lng, lat]`, the reverse of trip files.
    pub fn markers_geojson(&self) -> Value {
        let features: Vec<Value> = self
            .markers()
            .into_iter()
            .map(|marker| {
                json!({
                    "type": "Feature",
                    "geometry": {
                        "type": "Point",
                        "coordinates": [marker.point.lng, marker.point.lat],
                    },
                    "properties": {
                        "id": marker.id,
                        "title": marker.title,
                        "description": marker.description,
                        "parent": marker.parent,
                    },
                })
            })
            .collect();

        let mut collection = json!({
            "type": "FeatureCollection",
            "features": features,
        });
        if let Some(view) = self.map_view() {
            collection["view"] = json!({
                "center": [view.center.lat, view.center.lng],
                "zoom": view.zoom,
            });
        }
        collection
    }
}
