use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};

use crate::TrackCollection;

/// One LineString per non-empty track, with its name, color and duration as properties
pub fn to_geojson(tracks: &TrackCollection) -> GeoJson {
    let mut features = Vec::new();
    for track in tracks.tracks() {
        if track.is_empty() {
            continue;
        }
        let line = track
            .points()
            .iter()
            .map(|pt| vec![pt.longitude, pt.latitude])
            .collect();

        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), track.name.clone().into());
        properties.insert("color".to_string(), track.color.clone().into());
        properties.insert("duration_ms".to_string(), track.duration_ms().into());

        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::LineString(line))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }
    GeoJson::FeatureCollection(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}
