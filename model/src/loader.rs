use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

use crate::{GeoPoint, TrackCollection};

/// Reads CSV rows of `track,time,latitude,longitude,elevation`. Rows are grouped by track name,
/// with times made relative to the first row of each track. Tracks are added in order of name.
pub fn load<R: std::io::Read>(reader: R) -> Result<TrackCollection> {
    // Read raw data
    let mut data_per_track: BTreeMap<String, Vec<(NaiveDateTime, Record)>> = BTreeMap::new();
    for rec in csv::Reader::from_reader(reader).deserialize() {
        let rec: Record = rec?;
        let time = parse_time(&rec.time)?;
        data_per_track
            .entry(rec.track.clone())
            .or_insert_with(Vec::new)
            .push((time, rec));
    }

    let mut tracks = TrackCollection::new();
    for (name, rows) in data_per_track {
        let start = rows[0].0;
        let points: Vec<GeoPoint> = rows
            .into_iter()
            .map(|(time, rec)| {
                GeoPoint::new(
                    rec.latitude,
                    rec.longitude,
                    rec.elevation.unwrap_or(0.0),
                    (time - start).num_milliseconds(),
                )
            })
            .collect();
        let num_points = points.len();
        let id = tracks
            .add(name.clone(), None, points)
            .map_err(|err| anyhow!("Track {name}: {err}"))?;
        info!(
            "Loaded {:?} ({}): {} points over {}ms",
            id,
            name,
            num_points,
            tracks.get(id)?.duration_ms()
        );
    }
    Ok(tracks)
}

fn parse_time(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_utc());
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        Ok(dt) => Ok(dt),
        Err(err) => bail!("Can't parse time {raw:?}: {err}"),
    }
}

#[derive(Deserialize)]
struct Record {
    track: String,
    time: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    elevation: Option<f64>,
}
