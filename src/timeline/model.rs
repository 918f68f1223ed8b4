use crate::codec::payload;
use crate::foundation::core::TrackKind;
use crate::foundation::error::{TimelineError, TimelineResult};
use crate::timeline::clip::Clip;
use crate::timeline::lanes;
use crate::timeline::media::{MediaDurations, NoDurations, clamp_duration};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

/// Ordered clips of one media kind. Order is payload order and carries no timing meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    kind: TrackKind,
    clips: Vec<Clip>,
}

impl Track {
    fn new(kind: TrackKind, clips: Vec<Clip>) -> Self {
        Self { kind, clips }
    }

    /// Media kind of this track.
    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    /// Clips in payload order.
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Number of clips.
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Return `true` when the track holds no clips.
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Aggregate root: one video track and one audio track.
///
/// A `Timeline` always satisfies its invariants: clip ids are unique per track, every audio clip
/// has a lane and no two audio clips overlap within a lane. It is built fresh from each payload
/// and owned by the caller for one decode → edit → encode cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    video: Track,
    audio: Track,
    extra: Map<String, Value>,
}

impl Timeline {
    /// Timeline with two empty tracks.
    pub fn empty() -> Self {
        Self {
            video: Track::new(TrackKind::Video, Vec::new()),
            audio: Track::new(TrackKind::Audio, Vec::new()),
            extra: Map::new(),
        }
    }

    /// Build a timeline from clip lists, assigning lanes to unassigned audio clips.
    pub fn new(video: Vec<Clip>, audio: Vec<Clip>) -> TimelineResult<Self> {
        Self::normalized(video, audio, &NoDurations)
    }

    /// Build a timeline, clamping audio durations to `durations` before lane allocation.
    ///
    /// Lanes on video clips are dropped; video has no lanes.
    pub fn normalized(
        mut video: Vec<Clip>,
        audio: Vec<Clip>,
        durations: &dyn MediaDurations,
    ) -> TimelineResult<Self> {
        for c in &mut video {
            c.set_lane(None);
        }
        check_unique(TrackKind::Video, &video)?;
        check_unique(TrackKind::Audio, &audio)?;

        let mut clamped = audio;
        for c in &mut clamped {
            let d = clamp_duration(durations, c.src(), c.duration());
            c.set_duration(d);
        }
        let audio = lanes::assign_or_validate(&clamped)?;

        Ok(Self {
            video: Track::new(TrackKind::Video, video),
            audio: Track::new(TrackKind::Audio, audio),
            extra: Map::new(),
        })
    }

    pub(crate) fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    /// Decode a wire payload. See [`crate::decode`].
    pub fn decode(raw: &Value) -> TimelineResult<Self> {
        payload::decode(raw)
    }

    /// Encode into a wire payload. See [`crate::encode`].
    pub fn encode(&self) -> Value {
        payload::encode(self)
    }

    /// Parse and decode a payload from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> TimelineResult<Self> {
        let raw: Value = serde_json::from_reader(r)
            .map_err(|e| TimelineError::serde(format!("parse timeline payload JSON: {e}")))?;
        Self::decode(&raw)
    }

    /// Parse and decode a payload from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> TimelineResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            anyhow::Error::new(e).context(format!("open timeline payload '{}'", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Encode as pretty-printed JSON text.
    pub fn to_string_pretty(&self) -> String {
        // Serializing a `Value` cannot fail.
        serde_json::to_string_pretty(&self.encode()).unwrap_or_default()
    }

    /// Re-check every invariant on the current state.
    pub fn validate(&self) -> TimelineResult<()> {
        for track in [&self.video, &self.audio] {
            check_unique(track.kind, &track.clips)?;
            for c in &track.clips {
                c.check()?;
            }
        }
        if let Some(c) = self.video.clips.iter().find(|c| c.lane().is_some()) {
            return Err(TimelineError::invalid_clip(
                c.id(),
                "lane",
                "is not allowed on video clips",
            ));
        }
        if let Some(c) = self.audio.clips.iter().find(|c| c.lane().is_none()) {
            return Err(TimelineError::invalid_clip(c.id(), "lane", "must be assigned"));
        }
        lanes::assign_or_validate(&self.audio.clips).map(|_| ())
    }

    /// Look up a clip by id.
    pub fn find(&self, track: TrackKind, id: &str) -> TimelineResult<&Clip> {
        let idx = self.position(track, id)?;
        Ok(&self.track(track).clips[idx])
    }

    pub(crate) fn position(&self, track: TrackKind, id: &str) -> TimelineResult<usize> {
        self.track(track)
            .clips
            .iter()
            .position(|c| c.id() == id)
            .ok_or_else(|| TimelineError::not_found(track, id))
    }

    pub(crate) fn clips_mut(&mut self, track: TrackKind) -> &mut Vec<Clip> {
        match track {
            TrackKind::Video => &mut self.video.clips,
            TrackKind::Audio => &mut self.audio.clips,
        }
    }

    /// Track of the given kind.
    pub fn track(&self, kind: TrackKind) -> &Track {
        match kind {
            TrackKind::Video => &self.video,
            TrackKind::Audio => &self.audio,
        }
    }

    /// The video track.
    pub fn video(&self) -> &Track {
        &self.video
    }

    /// The audio track.
    pub fn audio(&self) -> &Track {
        &self.audio
    }

    /// Audio clips grouped by lane, each group in payload order.
    pub fn lanes(&self) -> BTreeMap<u32, Vec<&Clip>> {
        let mut out: BTreeMap<u32, Vec<&Clip>> = BTreeMap::new();
        for c in &self.audio.clips {
            if let Some(lane) = c.lane() {
                out.entry(lane).or_default().push(c);
            }
        }
        out
    }

    /// Number of audio lane rows (highest lane + 1).
    pub fn lane_count(&self) -> u32 {
        lanes::lane_count(&self.audio.clips)
    }

    /// Latest clip end across both tracks, `0.0` for an empty timeline.
    pub fn end(&self) -> f64 {
        self.video
            .clips
            .iter()
            .chain(&self.audio.clips)
            .map(Clip::end)
            .fold(0.0, f64::max)
    }

    /// Return `true` when both tracks are empty.
    pub fn is_empty(&self) -> bool {
        self.video.is_empty() && self.audio.is_empty()
    }

    /// Unknown top-level payload keys captured at decode time.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromStr for Timeline {
    type Err = TimelineError;

    fn from_str(s: &str) -> TimelineResult<Self> {
        Self::from_reader(s.as_bytes())
    }
}

fn check_unique(track: TrackKind, clips: &[Clip]) -> TimelineResult<()> {
    let mut seen = HashSet::with_capacity(clips.len());
    for c in clips {
        if !seen.insert(c.id()) {
            return Err(TimelineError::DuplicateId {
                track,
                id: c.id().to_owned(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
