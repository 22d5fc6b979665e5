use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::TrackID;

/// One recorded GPS fix. The time is relative to the start of its track.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation_meters: f64,
    pub time_offset_ms: i64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64, elevation_meters: f64, time_offset_ms: i64) -> Self {
        Self {
            latitude,
            longitude,
            elevation_meters,
            time_offset_ms,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            latitude: self.latitude,
            longitude: self.longitude,
            elevation_meters: self.elevation_meters,
        }
    }
}

/// Where a track is at some moment. Recomputed on every query.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation_meters: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Track {
    pub id: TrackID,
    pub name: String,
    pub color: String,
    // Time never decreases. Equal adjacent times are fine (a paused device).
    points: Vec<GeoPoint>,
}

impl Track {
    /// Fails if any point is earlier than the one before it, or if times start before 0. An empty
    /// track is allowed, but can't be interpolated or projected.
    pub fn new(id: TrackID, name: String, color: String, points: Vec<GeoPoint>) -> Result<Self> {
        if let Some(first) = points.first() {
            if first.time_offset_ms < 0 {
                return Err(Error::InvalidArgument(format!(
                    "track times are relative to its start, but the first is {}ms",
                    first.time_offset_ms
                )));
            }
        }
        for (idx, pair) in points.windows(2).enumerate() {
            if pair[0].time_offset_ms > pair[1].time_offset_ms {
                return Err(Error::OutOfOrder {
                    idx: idx + 1,
                    previous_ms: pair[0].time_offset_ms,
                    next_ms: pair[1].time_offset_ms,
                });
            }
        }
        Ok(Self {
            id,
            name,
            color,
            points,
        })
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The last point's time offset, or 0 for an empty track
    pub fn duration_ms(&self) -> i64 {
        self.points.last().map(|pt| pt.time_offset_ms).unwrap_or(0)
    }

    pub fn interpolate(&self, time_ms: i64) -> Result<Position> {
        crate::interpolate::interpolate(&self.points, time_ms)
    }

    pub fn summary(&self) -> TrackSummary {
        let mut length_meters = 0.0;
        let mut elevation_gain_meters = 0.0;
        for pair in self.points.windows(2) {
            length_meters += haversine_distance(
                pair[0].latitude,
                pair[0].longitude,
                pair[1].latitude,
                pair[1].longitude,
            );
            let climb = pair[1].elevation_meters - pair[0].elevation_meters;
            if climb > 0.0 {
                elevation_gain_meters += climb;
            }
        }
        TrackSummary {
            num_points: self.points.len(),
            start_ms: self.points.first().map(|pt| pt.time_offset_ms).unwrap_or(0),
            end_ms: self.duration_ms(),
            length_meters,
            elevation_gain_meters,
        }
    }
}

/// Descriptive numbers for listing a track. Only for display; projection doesn't use any of this.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrackSummary {
    pub num_points: usize,
    pub start_ms: i64,
    pub end_ms: i64,
    pub length_meters: f64,
    pub elevation_gain_meters: f64,
}

fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let r = 6_371_000.0_f64;
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    r * c
}
