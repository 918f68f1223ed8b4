use crate::foundation::core::TrackKind;

/// Convenience result type used across clipline.
pub type TimelineResult<T> = Result<T, TimelineError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every error is terminal for the operation that raised it: nothing is retried and no partial
/// state is ever committed.
#[derive(thiserror::Error, Debug)]
pub enum TimelineError {
    /// Malformed input payload (wrong container shape, missing or mistyped field).
    #[error("schema error at {field}: {reason}")]
    Schema {
        /// JSON path of the offending value, e.g. `$.audio[2].start`.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A clip field violates a value constraint.
    #[error("invalid clip '{id}': {field} {reason}")]
    InvalidClip {
        /// Id of the offending clip (may be empty when the id itself is invalid).
        id: String,
        /// Name of the offending field.
        field: &'static str,
        /// Constraint that was violated.
        reason: String,
    },

    /// Two audio clips would overlap in the same lane.
    #[error("lane conflict on lane {lane}: '{clip_a}' overlaps '{clip_b}'")]
    LaneConflict {
        /// Lane both clips share.
        lane: u32,
        /// The clip that was seen first.
        clip_a: String,
        /// The clip that collides with `clip_a`.
        clip_b: String,
    },

    /// An edit referenced a clip id that is not present in the track.
    #[error("{track} clip '{id}' not found")]
    NotFound {
        /// Track that was searched.
        track: TrackKind,
        /// Requested id.
        id: String,
    },

    /// Two clips of the same track share an id.
    #[error("duplicate {track} clip id '{id}'")]
    DuplicateId {
        /// Track holding both clips.
        track: TrackKind,
        /// The repeated id.
        id: String,
    },

    /// The edit state machine was driven out of order.
    #[error("edit error: {0}")]
    Edit(String),

    /// Errors when parsing JSON text.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TimelineError {
    /// Build a [`TimelineError::Schema`] value.
    pub fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Schema {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`TimelineError::InvalidClip`] value.
    pub fn invalid_clip(
        id: impl Into<String>,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidClip {
            id: id.into(),
            field,
            reason: reason.into(),
        }
    }

    /// Build a [`TimelineError::LaneConflict`] value.
    pub fn lane_conflict(lane: u32, clip_a: impl Into<String>, clip_b: impl Into<String>) -> Self {
        Self::LaneConflict {
            lane,
            clip_a: clip_a.into(),
            clip_b: clip_b.into(),
        }
    }

    /// Build a [`TimelineError::NotFound`] value.
    pub fn not_found(track: TrackKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            track,
            id: id.into(),
        }
    }

    /// Build a [`TimelineError::Edit`] value.
    pub fn edit(msg: impl Into<String>) -> Self {
        Self::Edit(msg.into())
    }

    /// Build a [`TimelineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
