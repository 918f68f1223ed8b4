use crate::codec::payload;
use crate::edit::apply::apply_edit_with;
use crate::edit::command::EditCommand;
use crate::edit::session::EditSession;
use crate::foundation::error::{TimelineError, TimelineResult};
use crate::timeline::media::{MediaDurations, NoDurations};
use crate::timeline::model::Timeline;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// The three operations a hosting UI layer calls.
///
/// Hosts own transport, persistence, rendering and translating user input into
/// [`EditCommand`]s; the engine only sees payloads and commands.
pub trait TimelineBoundary {
    /// Decode and normalize a raw payload.
    fn decode(&self, raw: &Value) -> TimelineResult<Timeline>;

    /// Apply one edit atomically.
    fn apply_edit(&self, timeline: &Timeline, cmd: &EditCommand) -> TimelineResult<Timeline>;

    /// Encode back into a raw payload.
    fn encode(&self, timeline: &Timeline) -> Value;
}

/// Options for a [`TimelineEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOpts {
    /// Clamp audio clip durations to `media_durations`.
    pub clamp_audio_to_media: bool,
    /// Known media lengths in seconds, keyed by clip `src`.
    pub media_durations: BTreeMap<String, f64>,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            clamp_audio_to_media: true,
            media_durations: BTreeMap::new(),
        }
    }
}

impl EngineOpts {
    /// Load options from a JSON file; missing keys take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> TimelineResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            anyhow::Error::new(e).context(format!("open engine options '{}'", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| TimelineError::serde(format!("parse engine options JSON: {e}")))
    }
}

/// Timeline engine configured with [`EngineOpts`].
#[derive(Debug, Clone, Default)]
pub struct TimelineEngine {
    opts: EngineOpts,
}

impl TimelineEngine {
    /// Create an engine.
    pub fn new(opts: EngineOpts) -> Self {
        Self { opts }
    }

    /// Options in effect.
    pub fn opts(&self) -> &EngineOpts {
        &self.opts
    }

    fn durations(&self) -> &dyn MediaDurations {
        if self.opts.clamp_audio_to_media {
            &self.opts.media_durations
        } else {
            &NoDurations
        }
    }

    /// Start an [`EditSession`] sharing this engine's duration lookup.
    pub fn session(&self, timeline: Timeline) -> EditSession<'_> {
        EditSession::with_durations(timeline, self.durations())
    }

    /// Apply `cmds` in order, stopping at the first rejected edit.
    ///
    /// Returns the fully edited timeline; on error `timeline` is untouched and the error names
    /// the rejected command's problem.
    pub fn apply_script(
        &self,
        timeline: &Timeline,
        cmds: &[EditCommand],
    ) -> TimelineResult<Timeline> {
        let mut session = self.session(timeline.clone());
        for (i, cmd) in cmds.iter().enumerate() {
            if let Err(e) = session.apply(cmd.clone()) {
                tracing::debug!(step = i, "edit script rejected");
                return Err(e);
            }
        }
        Ok(session.into_timeline())
    }
}

impl TimelineBoundary for TimelineEngine {
    fn decode(&self, raw: &Value) -> TimelineResult<Timeline> {
        payload::decode_with(raw, self.durations())
    }

    fn apply_edit(&self, timeline: &Timeline, cmd: &EditCommand) -> TimelineResult<Timeline> {
        apply_edit_with(timeline, cmd, self.durations())
    }

    fn encode(&self, timeline: &Timeline) -> Value {
        payload::encode(timeline)
    }
}
