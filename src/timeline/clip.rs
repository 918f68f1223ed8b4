use crate::foundation::core::Span;
use crate::foundation::error::{TimelineError, TimelineResult};
use serde_json::{Map, Value};

/// Payload keys owned by clip fields.
pub(crate) const CLIP_KEYS: [&str; 4] = ["id", "src", "start", "duration"];
/// Payload key of an audio clip's lane.
pub(crate) const LANE_KEY: &str = "lane";
const RESERVED_KEYS: [&str; 5] = ["id", "src", "start", "duration", LANE_KEY];

/// One media reference placed on the timeline.
///
/// Clips are immutable from the outside; edits go through
/// [`apply_edit`](crate::apply_edit), which rebuilds the affected clip.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    id: String,
    src: String,
    start: f64,
    duration: f64,
    lane: Option<u32>,
    extra: Map<String, Value>,
}

impl Clip {
    /// Create a validated clip without a lane.
    ///
    /// Fails with [`TimelineError::InvalidClip`] when `id` or `src` is empty, `start` is negative
    /// or `duration` is not positive.
    pub fn new(
        id: impl Into<String>,
        src: impl Into<String>,
        start: f64,
        duration: f64,
    ) -> TimelineResult<Self> {
        let clip = Self {
            id: id.into(),
            src: src.into(),
            start,
            duration,
            lane: None,
            extra: Map::new(),
        };
        clip.check()?;
        Ok(clip)
    }

    /// Pin the clip to an audio lane.
    pub fn with_lane(mut self, lane: u32) -> Self {
        self.lane = Some(lane);
        self
    }

    /// Attach opaque payload keys to re-emit on encode.
    ///
    /// Keys the payload reserves for clip fields (`id`, `src`, `start`, `duration`, `lane`) are
    /// dropped; set those through the constructor and [`Clip::with_lane`].
    pub fn with_extra(mut self, mut extra: Map<String, Value>) -> Self {
        extra.retain(|k, _| !RESERVED_KEYS.contains(&k.as_str()));
        self.extra = extra;
        self
    }

    /// Extras exactly as decoded; a video clip's `lane` key is opaque and kept.
    pub(crate) fn with_decoded_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    /// Stable clip id, unique within its track.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Media URI/path, opaque to the engine.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Start time in seconds from the timeline origin.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// End time (`start + duration`), exclusive.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Half-open span occupied on the timeline.
    pub fn span(&self) -> Span {
        Span::from_start_duration(self.start, self.duration)
    }

    /// Audio lane, `None` for video clips and unassigned audio clips.
    pub fn lane(&self) -> Option<u32> {
        self.lane
    }

    /// Unknown payload keys captured at decode time.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub(crate) fn set_start(&mut self, start: f64) {
        self.start = start;
    }

    pub(crate) fn set_duration(&mut self, duration: f64) {
        self.duration = duration;
    }

    pub(crate) fn set_lane(&mut self, lane: Option<u32>) {
        self.lane = lane;
    }

    /// Check the value constraints every clip must satisfy.
    pub(crate) fn check(&self) -> TimelineResult<()> {
        if self.id.is_empty() {
            return Err(TimelineError::invalid_clip("", "id", "must not be empty"));
        }
        if self.src.is_empty() {
            return Err(TimelineError::invalid_clip(&self.id, "src", "must not be empty"));
        }
        check_start(&self.id, self.start)?;
        check_duration(&self.id, self.duration)
    }
}

pub(crate) fn check_start(id: &str, start: f64) -> TimelineResult<()> {
    if !start.is_finite() || start < 0.0 {
        return Err(TimelineError::invalid_clip(
            id,
            "start",
            format!("must be finite and >= 0, got {start}"),
        ));
    }
    Ok(())
}

pub(crate) fn check_duration(id: &str, duration: f64) -> TimelineResult<()> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(TimelineError::invalid_clip(
            id,
            "duration",
            format!("must be finite and > 0, got {duration}"),
        ));
    }
    Ok(())
}
