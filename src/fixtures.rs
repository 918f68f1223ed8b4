//! Example payloads and the payload API description, for documentation and tests.

use serde_json::{Value, json};

const VIDEO_SRC: &str = "https://www.w3schools.com/html/mov_bbb.mp4";
const AUDIO_SRC: &str = "https://www.w3schools.com/html/horse.mp3";

/// The widget's documented example payload.
///
/// Note that `a1` (`[1, 9)`) and `a3` (`[7, 10)`) share lane 0 and overlap, so this payload is
/// rejected by [`crate::decode`] with a lane conflict.
pub fn widget_example() -> Value {
    json!({
        "video": [
            {"id": "v1", "src": VIDEO_SRC, "start": 0, "duration": 5},
            {"id": "v2", "src": VIDEO_SRC, "start": 6, "duration": 4}
        ],
        "audio": [
            {"id": "a1", "src": AUDIO_SRC, "start": 1, "duration": 8, "lane": 0},
            {"id": "a2", "src": AUDIO_SRC, "start": 3, "duration": 2, "lane": 1},
            {"id": "a3", "src": AUDIO_SRC, "start": 7, "duration": 3, "lane": 0}
        ]
    })
}

/// The interactive demo's payload; decodes cleanly.
pub fn demo_example() -> Value {
    json!({
        "video": [
            {"id": "v1", "src": VIDEO_SRC, "start": 1, "duration": 4},
            {"id": "v2", "src": VIDEO_SRC, "start": 7, "duration": 5}
        ],
        "audio": [
            {"id": "a1", "src": AUDIO_SRC, "start": 0, "duration": 5, "lane": 0},
            {"id": "a2", "src": AUDIO_SRC, "start": 5.5, "duration": 3, "lane": 1},
            {"id": "a3", "src": AUDIO_SRC, "start": 9, "duration": 2, "lane": 0}
        ]
    })
}

/// Machine-readable description of the payload, for API introspection.
pub fn api_info() -> Value {
    let clip = |with_lane: bool| {
        let mut props = json!({
            "id": {"type": "string", "minLength": 1},
            "src": {"type": "string", "minLength": 1},
            "start": {"type": "number", "minimum": 0},
            "duration": {"type": "number", "exclusiveMinimum": 0}
        });
        if with_lane {
            props["lane"] = json!({"type": ["integer", "null"], "minimum": 0});
        }
        json!({
            "type": "object",
            "required": ["id", "src", "start", "duration"],
            "properties": props,
            "additionalProperties": true
        })
    };
    json!({
        "type": "object",
        "properties": {
            "video": {"type": "array", "items": clip(false)},
            "audio": {"type": "array", "items": clip(true)}
        },
        "additionalProperties": true
    })
}
