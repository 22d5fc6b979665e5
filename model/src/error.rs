use thiserror::Error;

use crate::TrackID;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Empty point sequences, non-positive speed multipliers, unusable viewports
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("track points out-of-order at index {idx}: {previous_ms}ms then {next_ms}ms")]
    OutOfOrder {
        idx: usize,
        previous_ms: i64,
        next_ms: i64,
    },
    #[error("unknown {0:?}")]
    UnknownTrack(TrackID),
}

pub type Result<T> = std::result::Result<T, Error>;
