use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::projection::{BoundsMode, GeoBounds, Transform, Viewport};
use crate::{GeoPoint, Track};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrackID(pub usize);

/// All loaded tracks, in display order
#[derive(Clone, Debug, Default)]
pub struct TrackCollection {
    tracks: Vec<Track>,
    // IDs are never reused, even after removal
    next_id: usize,
    max_duration_ms: i64,
}

impl TrackCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a track to the end. Without a color, one is picked from a categorical palette.
    pub fn add(
        &mut self,
        name: String,
        color: Option<String>,
        points: Vec<GeoPoint>,
    ) -> Result<TrackID> {
        let id = TrackID(self.next_id);
        let color = color.unwrap_or_else(|| palette_color(id.0));
        let track = Track::new(id, name, color, points)?;
        debug!(
            "Adding {:?} ({}) with {} points",
            id,
            track.name,
            track.points().len()
        );
        self.next_id += 1;
        self.tracks.push(track);
        self.recalculate();
        Ok(id)
    }

    pub fn remove(&mut self, id: TrackID) -> Result<Track> {
        let idx = self
            .tracks
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::UnknownTrack(id))?;
        let track = self.tracks.remove(idx);
        self.recalculate();
        Ok(track)
    }

    pub fn get(&self, id: TrackID) -> Result<&Track> {
        self.tracks
            .iter()
            .find(|t| t.id == id)
            .ok_or(Error::UnknownTrack(id))
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// The latest end time across all tracks, or 0 with no tracks
    pub fn max_duration_ms(&self) -> i64 {
        self.max_duration_ms
    }

    /// One box covering every non-empty track, or None if there aren't any
    pub fn shared_bounds(&self) -> Option<GeoBounds> {
        let mut result: Option<GeoBounds> = None;
        for track in &self.tracks {
            if let Ok(bounds) = GeoBounds::from_points(track.points()) {
                if let Some(total) = result.as_mut() {
                    total.union(&bounds);
                } else {
                    result = Some(bounds);
                }
            }
        }
        result
    }

    /// One transform per track, in display order. Empty tracks get None.
    pub fn transforms(&self, viewport: Viewport, mode: BoundsMode) -> Vec<Option<Transform>> {
        let shared = match mode {
            BoundsMode::PerTrack => None,
            BoundsMode::Shared => self.shared_bounds(),
        };
        self.tracks
            .iter()
            .map(|track| {
                if track.is_empty() {
                    return None;
                }
                let bounds = match shared {
                    Some(bounds) => bounds,
                    None => GeoBounds::from_points(track.points()).ok()?,
                };
                Some(Transform::new(bounds, viewport))
            })
            .collect()
    }

    fn recalculate(&mut self) {
        self.max_duration_ms = self
            .tracks
            .iter()
            .map(|t| t.duration_ms())
            .max()
            .unwrap_or(0);
    }
}

fn palette_color(idx: usize) -> String {
    let palette = &colorous::CATEGORY10;
    let color = palette[idx % palette.len()];
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight(end_ms: i64) -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0, 0.0, 0),
            GeoPoint::new(1.0, 1.0, 0.0, end_ms),
        ]
    }

    #[test]
    fn max_duration_follows_membership() {
        let mut tracks = TrackCollection::new();
        assert_eq!(tracks.max_duration_ms(), 0);

        let short = tracks.add("short".to_string(), None, straight(1000)).unwrap();
        let long = tracks.add("long".to_string(), None, straight(5000)).unwrap();
        assert_eq!(tracks.max_duration_ms(), 5000);

        tracks.remove(long).unwrap();
        assert_eq!(tracks.max_duration_ms(), 1000);
        tracks.remove(short).unwrap();
        assert_eq!(tracks.max_duration_ms(), 0);
        assert!(tracks.is_empty());
    }

    #[test]
    fn ids_are_unique_and_ordered() {
        let mut tracks = TrackCollection::new();
        let a = tracks.add("a".to_string(), None, straight(1)).unwrap();
        tracks.remove(a).unwrap();
        let b = tracks.add("b".to_string(), None, straight(1)).unwrap();
        let c = tracks.add("c".to_string(), None, straight(1)).unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        let names: Vec<&str> = tracks.tracks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
        assert_eq!(tracks.remove(a).unwrap_err(), Error::UnknownTrack(a));
    }

    #[test]
    fn colors() {
        let mut tracks = TrackCollection::new();
        let a = tracks.add("a".to_string(), None, straight(1)).unwrap();
        let b = tracks
            .add("b".to_string(), Some("red".to_string()), straight(1))
            .unwrap();
        assert_eq!(tracks.get(a).unwrap().color, "#1f77b4");
        assert_eq!(tracks.get(b).unwrap().color, "red");
    }

    #[test]
    fn shared_bounds_skip_empty() {
        let mut tracks = TrackCollection::new();
        assert!(tracks.shared_bounds().is_none());
        tracks.add("empty".to_string(), None, Vec::new()).unwrap();
        assert!(tracks.shared_bounds().is_none());
        tracks.add("a".to_string(), None, straight(1)).unwrap();
        tracks
            .add(
                "b".to_string(),
                None,
                vec![GeoPoint::new(-2.0, 3.0, 0.0, 0)],
            )
            .unwrap();
        let bounds = tracks.shared_bounds().unwrap();
        assert_eq!(bounds.min_lat, -2.0);
        assert_eq!(bounds.max_lat, 1.0);
        assert_eq!(bounds.min_lon, 0.0);
        assert_eq!(bounds.max_lon, 3.0);
    }

    #[test]
    fn rejected_track_leaves_collection_alone() {
        let mut tracks = TrackCollection::new();
        let bad = vec![
            GeoPoint::new(0.0, 0.0, 0.0, 100),
            GeoPoint::new(0.0, 0.0, 0.0, 50),
        ];
        assert!(tracks.add("bad".to_string(), None, bad).is_err());
        assert!(tracks.is_empty());
        assert_eq!(tracks.max_duration_ms(), 0);
    }
}
