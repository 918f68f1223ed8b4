//! Wire payload codec.
//!
//! The payload is the widget's JSON value:
//!
//! ```json
//! {
//!   "video": [ {"id": "v1", "src": "a.mp4", "start": 0, "duration": 5} ],
//!   "audio": [ {"id": "a1", "src": "b.mp3", "start": 1, "duration": 8, "lane": 0} ]
//! }
//! ```
//!
//! Missing or `null` tracks decode as empty. Unknown keys, on clips and at the top level, are
//! kept as opaque extras and written back on encode.

use crate::foundation::core::TrackKind;
use crate::foundation::error::{TimelineError, TimelineResult};
use crate::timeline::clip::{CLIP_KEYS, Clip, LANE_KEY};
use crate::timeline::media::{MediaDurations, NoDurations};
use crate::timeline::model::Timeline;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathElem {
    Field(&'static str),
    Index(usize),
}

fn format_path(path: &[PathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            PathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            PathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

fn schema_at(path: &[PathElem], reason: impl Into<String>) -> TimelineError {
    TimelineError::schema(format_path(path), reason)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decode a raw payload, trusting every caller-supplied duration.
pub fn decode(raw: &Value) -> TimelineResult<Timeline> {
    decode_with(raw, &NoDurations)
}

/// Decode a raw payload, clamping audio durations to the lengths known by `durations`.
#[tracing::instrument(skip(raw, durations))]
pub fn decode_with(raw: &Value, durations: &dyn MediaDurations) -> TimelineResult<Timeline> {
    let Some(obj) = raw.as_object() else {
        return Err(schema_at(
            &[],
            format!(
                "expected an object with `video` and `audio` arrays, got {}",
                json_kind(raw)
            ),
        ));
    };

    let video = decode_track(obj, TrackKind::Video)?;
    let audio = decode_track(obj, TrackKind::Audio)?;
    let extra: Map<String, Value> = obj
        .iter()
        .filter(|(k, _)| k.as_str() != "video" && k.as_str() != "audio")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    tracing::debug!(video = video.len(), audio = audio.len(), "decoded payload tracks");
    Ok(Timeline::normalized(video, audio, durations)?.with_extra(extra))
}

fn decode_track(obj: &Map<String, Value>, kind: TrackKind) -> TimelineResult<Vec<Clip>> {
    let key = kind.key();
    let items = match obj.get(key) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(schema_at(
                &[PathElem::Field(key)],
                format!("expected an array, got {}", json_kind(other)),
            ));
        }
    };

    let mut path = vec![PathElem::Field(key)];
    let mut clips = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        path.push(PathElem::Index(i));
        clips.push(decode_clip(item, kind, &mut path)?);
        path.pop();
    }
    Ok(clips)
}

fn decode_clip(item: &Value, kind: TrackKind, path: &mut Vec<PathElem>) -> TimelineResult<Clip> {
    let Some(map) = item.as_object() else {
        return Err(schema_at(
            path,
            format!("expected a clip object, got {}", json_kind(item)),
        ));
    };

    let id = required_str(map, "id", path)?;
    let src = required_str(map, "src", path)?;
    let start = required_f64(map, "start", path)?;
    let duration = required_f64(map, "duration", path)?;
    let lane = match kind {
        TrackKind::Audio => optional_lane(map, id, path)?,
        TrackKind::Video => None,
    };

    let extra: Map<String, Value> = map
        .iter()
        .filter(|(k, _)| !is_known_key(kind, k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let clip = Clip::new(id, src, start, duration)?.with_decoded_extra(extra);
    Ok(match lane {
        Some(l) => clip.with_lane(l),
        None => clip,
    })
}

fn is_known_key(kind: TrackKind, key: &str) -> bool {
    CLIP_KEYS.contains(&key) || (kind == TrackKind::Audio && key == LANE_KEY)
}

fn required_str<'a>(
    map: &'a Map<String, Value>,
    field: &'static str,
    path: &mut Vec<PathElem>,
) -> TimelineResult<&'a str> {
    path.push(PathElem::Field(field));
    let res = match map.get(field) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(schema_at(
            path,
            format!("expected a string, got {}", json_kind(other)),
        )),
        None => Err(schema_at(path, "missing required field")),
    };
    path.pop();
    res
}

fn required_f64(
    map: &Map<String, Value>,
    field: &'static str,
    path: &mut Vec<PathElem>,
) -> TimelineResult<f64> {
    path.push(PathElem::Field(field));
    let res = match map.get(field) {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| schema_at(path, "number is not representable as f64")),
        Some(other) => Err(schema_at(
            path,
            format!("expected a number, got {}", json_kind(other)),
        )),
        None => Err(schema_at(path, "missing required field")),
    };
    path.pop();
    res
}

fn optional_lane(
    map: &Map<String, Value>,
    id: &str,
    path: &mut Vec<PathElem>,
) -> TimelineResult<Option<u32>> {
    let n = match map.get(LANE_KEY) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n,
        Some(other) => {
            path.push(PathElem::Field(LANE_KEY));
            let err = schema_at(path, format!("expected an integer, got {}", json_kind(other)));
            path.pop();
            return Err(err);
        }
    };

    if let Some(u) = n.as_u64() {
        return u32::try_from(u)
            .map(Some)
            .map_err(|_| TimelineError::invalid_clip(id, "lane", format!("{u} is out of range")));
    }
    if n.as_i64().is_some() {
        return Err(TimelineError::invalid_clip(id, "lane", format!("must be >= 0, got {n}")));
    }
    // Integral floats (`1.0`) come from loosely typed hosts.
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= 0.0 && f <= f64::from(u32::MAX) => Ok(Some(f as u32)),
        Some(f) if f.fract() == 0.0 && f < 0.0 => Err(TimelineError::invalid_clip(
            id,
            "lane",
            format!("must be >= 0, got {f}"),
        )),
        _ => {
            path.push(PathElem::Field(LANE_KEY));
            let err = schema_at(path, format!("expected an integer, got {n}"));
            path.pop();
            Err(err)
        }
    }
}

/// Encode a timeline into a raw payload. Never fails.
pub fn encode(timeline: &Timeline) -> Value {
    let mut obj = Map::new();
    for kind in [TrackKind::Video, TrackKind::Audio] {
        let clips = timeline
            .track(kind)
            .clips()
            .iter()
            .map(|c| encode_clip(c, kind))
            .collect();
        obj.insert(kind.key().to_owned(), Value::Array(clips));
    }
    for (k, v) in timeline.extra() {
        obj.insert(k.clone(), v.clone());
    }
    Value::Object(obj)
}

fn encode_clip(clip: &Clip, kind: TrackKind) -> Value {
    let mut m = Map::new();
    m.insert("id".to_owned(), Value::from(clip.id()));
    m.insert("src".to_owned(), Value::from(clip.src()));
    m.insert("start".to_owned(), encode_seconds(clip.start()));
    m.insert("duration".to_owned(), encode_seconds(clip.duration()));
    if kind == TrackKind::Audio
        && let Some(lane) = clip.lane()
    {
        m.insert(LANE_KEY.to_owned(), Value::from(lane));
    }
    for (k, v) in clip.extra() {
        m.insert(k.clone(), v.clone());
    }
    Value::Object(m)
}

/// Whole seconds are written as integers so untouched payloads keep their look.
fn encode_seconds(v: f64) -> Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
    if v.fract() == 0.0 && v.abs() < MAX_EXACT {
        Value::from(v as i64)
    } else {
        Value::from(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/payload.rs"]
mod tests;
