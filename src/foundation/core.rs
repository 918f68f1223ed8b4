use std::fmt;

/// Which track a clip lives on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    /// Video track; clips are single-lane and may stack.
    Video,
    /// Audio track; clips are spread across non-overlapping lanes.
    Audio,
}

impl TrackKind {
    /// Payload key for this track (`"video"` / `"audio"`).
    pub fn key(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Half-open time span `[start, end)` in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    /// Inclusive span start.
    pub start: f64,
    /// Exclusive span end.
    pub end: f64, // exclusive
}

impl Span {
    /// Span covering `duration` seconds from `start`.
    pub fn from_start_duration(start: f64, duration: f64) -> Self {
        Self {
            start,
            end: start + duration,
        }
    }

    /// Length of the span in seconds.
    pub fn len_secs(self) -> f64 {
        self.end - self.start
    }

    /// Return `true` when the spans share any instant. Touching endpoints do not overlap.
    pub fn overlaps(self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Return `true` when `t` is inside `[start, end)`.
    pub fn contains(self, t: f64) -> bool {
        self.start <= t && t < self.end
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
