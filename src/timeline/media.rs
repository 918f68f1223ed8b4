use std::collections::{BTreeMap, HashMap};

/// Lookup of the real playable length of media resources, keyed by clip `src`.
///
/// Audio clip durations are clamped to this length when it is known. Hosts usually fill it from
/// their media probe; the engine never touches the media itself.
pub trait MediaDurations {
    /// Known duration in seconds of the resource at `src`, if any.
    fn duration_of(&self, src: &str) -> Option<f64>;
}

/// Lookup that knows nothing; every caller-supplied duration is trusted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDurations;

impl MediaDurations for NoDurations {
    fn duration_of(&self, _src: &str) -> Option<f64> {
        None
    }
}

impl MediaDurations for BTreeMap<String, f64> {
    fn duration_of(&self, src: &str) -> Option<f64> {
        self.get(src).copied()
    }
}

impl MediaDurations for HashMap<String, f64> {
    fn duration_of(&self, src: &str) -> Option<f64> {
        self.get(src).copied()
    }
}

/// Clamp `duration` to the known media length of `src`.
///
/// Non-finite or non-positive known lengths are ignored.
pub(crate) fn clamp_duration(durations: &dyn MediaDurations, src: &str, duration: f64) -> f64 {
    match durations.duration_of(src) {
        Some(known) if known.is_finite() && known > 0.0 && known < duration => {
            tracing::debug!(
                src,
                requested = duration,
                known,
                "clamped audio duration to media length"
            );
            known
        }
        _ => duration,
    }
}
