use crate::foundation::core::TrackKind;
use serde::{Deserialize, Serialize};

/// One discrete edit produced by the host from user input (drag, trim, lane change).
///
/// Serialized as a tagged object, e.g. `{"op": "move", "track": "audio", "id": "a3", "start": 9}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    /// Replace a clip's start time.
    Move {
        /// Track holding the clip.
        track: TrackKind,
        /// Clip id.
        id: String,
        /// New start in seconds.
        start: f64,
    },
    /// Replace a clip's duration.
    Resize {
        /// Track holding the clip.
        track: TrackKind,
        /// Clip id.
        id: String,
        /// New duration in seconds.
        duration: f64,
    },
    /// Move an audio clip to another lane.
    Reassign {
        /// Audio clip id.
        id: String,
        /// Target lane.
        lane: u32,
    },
}

impl EditCommand {
    /// Build a [`EditCommand::Move`].
    pub fn move_to(track: TrackKind, id: impl Into<String>, start: f64) -> Self {
        Self::Move {
            track,
            id: id.into(),
            start,
        }
    }

    /// Build a [`EditCommand::Resize`].
    pub fn resize(track: TrackKind, id: impl Into<String>, duration: f64) -> Self {
        Self::Resize {
            track,
            id: id.into(),
            duration,
        }
    }

    /// Build a [`EditCommand::Reassign`].
    pub fn reassign(id: impl Into<String>, lane: u32) -> Self {
        Self::Reassign {
            id: id.into(),
            lane,
        }
    }

    /// Track the command targets.
    pub fn track(&self) -> TrackKind {
        match self {
            Self::Move { track, .. } | Self::Resize { track, .. } => *track,
            Self::Reassign { .. } => TrackKind::Audio,
        }
    }

    /// Id of the clip the command targets.
    pub fn clip_id(&self) -> &str {
        match self {
            Self::Move { id, .. } | Self::Resize { id, .. } | Self::Reassign { id, .. } => id,
        }
    }
}
