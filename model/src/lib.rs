#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod collection;
mod error;
mod export;
mod interpolate;
pub mod loader;
mod playback;
mod projection;
mod session;
mod track;

pub use self::collection::{TrackCollection, TrackID};
pub use self::error::{Error, Result};
pub use self::export::to_geojson;
pub use self::interpolate::interpolate;
pub use self::playback::{PlaybackClock, PlaybackState, Status, DEFAULT_TICK_MS};
pub use self::projection::{
    compute_transform, BoundsMode, GeoBounds, ScreenPt, Transform, Viewport,
};
pub use self::session::{Frame, FrameTrack, Replay};
pub use self::track::{GeoPoint, Position, Track, TrackSummary};
