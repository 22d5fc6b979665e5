use serde::Serialize;

use crate::error::Result;
use crate::projection::{BoundsMode, ScreenPt, Viewport};
use crate::{
    GeoPoint, PlaybackClock, PlaybackState, Position, Track, TrackCollection, TrackID,
};

/// Tracks plus the clock that plays them back. Changing the tracks keeps the clock's timeline in
/// sync.
pub struct Replay {
    tracks: TrackCollection,
    pub clock: PlaybackClock,
}

/// Everything needed to draw one moment of playback
#[derive(Clone, Debug, Serialize)]
pub struct Frame {
    pub state: PlaybackState,
    /// How far along the whole timeline, in [0, 1]
    pub progress: f64,
    pub tracks: Vec<FrameTrack>,
}

#[derive(Clone, Debug, Serialize)]
pub struct FrameTrack {
    pub id: TrackID,
    pub name: String,
    pub color: String,
    pub position: Position,
    pub marker: ScreenPt,
    pub path: Vec<ScreenPt>,
}

impl Replay {
    pub fn new(tracks: TrackCollection) -> Self {
        let clock = PlaybackClock::new(tracks.max_duration_ms());
        Self { tracks, clock }
    }

    pub fn tracks(&self) -> &TrackCollection {
        &self.tracks
    }

    pub fn add_track(
        &mut self,
        name: String,
        color: Option<String>,
        points: Vec<GeoPoint>,
    ) -> Result<TrackID> {
        let id = self.tracks.add(name, color, points)?;
        self.clock.set_max_duration(self.tracks.max_duration_ms());
        Ok(id)
    }

    pub fn remove_track(&mut self, id: TrackID) -> Result<Track> {
        let track = self.tracks.remove(id)?;
        self.clock.set_max_duration(self.tracks.max_duration_ms());
        Ok(track)
    }

    /// Positions of every track at the clock's current time. Empty tracks are skipped.
    pub fn frame(&self, viewport: Viewport, mode: BoundsMode) -> Frame {
        let state = self.clock.state();
        let time_ms = state.current_time_ms;
        let mut tracks = Vec::new();
        for (track, transform) in self
            .tracks
            .tracks()
            .iter()
            .zip(self.tracks.transforms(viewport, mode))
        {
            let transform = match transform {
                Some(transform) => transform,
                None => {
                    warn!("Skipping {:?} ({}), it has no points", track.id, track.name);
                    continue;
                }
            };
            let position = match track.interpolate(time_ms) {
                Ok(pos) => pos,
                Err(err) => {
                    warn!("Skipping {:?} ({}): {}", track.id, track.name, err);
                    continue;
                }
            };
            tracks.push(FrameTrack {
                id: track.id,
                name: track.name.clone(),
                color: track.color.clone(),
                position,
                marker: transform.apply_position(&position),
                path: transform.apply_path(track.points()),
            });
        }
        Frame {
            state,
            progress: self.clock.to_percent(),
            tracks,
        }
    }
}
