use super::*;
use serde_json::json;

#[test]
fn missing_tracks_decode_as_empty() {
    let t = decode(&json!({})).unwrap();
    assert!(t.is_empty());
    let t = decode(&json!({"video": null, "audio": []})).unwrap();
    assert!(t.is_empty());
}

#[test]
fn non_object_payload_is_a_schema_error() {
    let err = decode(&json!([1, 2])).unwrap_err();
    match err {
        TimelineError::Schema { field, reason } => {
            assert_eq!(field, "$");
            assert!(reason.contains("got an array"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn track_must_be_an_array() {
    let err = decode(&json!({"audio": {"id": "a"}})).unwrap_err();
    assert!(matches!(err, TimelineError::Schema { ref field, .. } if field == "$.audio"));
}

#[test]
fn clip_must_be_an_object() {
    let err = decode(&json!({"video": ["v1"]})).unwrap_err();
    assert!(matches!(err, TimelineError::Schema { ref field, .. } if field == "$.video[0]"));
}

#[test]
fn missing_id_and_src_are_schema_errors() {
    let err = decode(&json!({"video": [{"src": "x.mp4", "start": 0, "duration": 1}]})).unwrap_err();
    assert!(matches!(err, TimelineError::Schema { ref field, .. } if field == "$.video[0].id"));

    let err = decode(&json!({"audio": [
        {"id": "a0", "src": "x.mp3", "start": 0, "duration": 1},
        {"id": "a1", "start": 0, "duration": 1}
    ]}))
    .unwrap_err();
    assert!(matches!(err, TimelineError::Schema { ref field, .. } if field == "$.audio[1].src"));
}

#[test]
fn non_numeric_start_is_a_schema_error() {
    let err = decode(&json!({"video": [{"id": "v", "src": "x", "start": "0", "duration": 1}]}))
        .unwrap_err();
    match err {
        TimelineError::Schema { field, reason } => {
            assert_eq!(field, "$.video[0].start");
            assert!(reason.contains("expected a number, got a string"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn value_constraints_surface_as_invalid_clip() {
    let err = decode(&json!({"video": [{"id": "v", "src": "x", "start": -1, "duration": 1}]}))
        .unwrap_err();
    assert!(matches!(err, TimelineError::InvalidClip { field: "start", .. }));

    let err = decode(&json!({"audio": [{"id": "a", "src": "x", "start": 0, "duration": 0}]}))
        .unwrap_err();
    assert!(matches!(err, TimelineError::InvalidClip { field: "duration", .. }));

    let err = decode(&json!({"audio": [{"id": "", "src": "x", "start": 0, "duration": 1}]}))
        .unwrap_err();
    assert!(matches!(err, TimelineError::InvalidClip { field: "id", .. }));
}

#[test]
fn lane_parsing() {
    let t = decode(&json!({"audio": [
        {"id": "a", "src": "x", "start": 0, "duration": 1, "lane": 2.0},
        {"id": "b", "src": "x", "start": 0, "duration": 1, "lane": null}
    ]}))
    .unwrap();
    assert_eq!(t.find(TrackKind::Audio, "a").unwrap().lane(), Some(2));
    assert_eq!(t.find(TrackKind::Audio, "b").unwrap().lane(), Some(0));

    let err = decode(&json!({"audio": [
        {"id": "a", "src": "x", "start": 0, "duration": 1, "lane": -1}
    ]}))
    .unwrap_err();
    assert!(matches!(err, TimelineError::InvalidClip { field: "lane", .. }));

    let err = decode(&json!({"audio": [
        {"id": "a", "src": "x", "start": 0, "duration": 1, "lane": 0.5}
    ]}))
    .unwrap_err();
    assert!(matches!(err, TimelineError::Schema { ref field, .. } if field == "$.audio[0].lane"));

    let err = decode(&json!({"audio": [
        {"id": "a", "src": "x", "start": 0, "duration": 1, "lane": "0"}
    ]}))
    .unwrap_err();
    assert!(matches!(err, TimelineError::Schema { .. }));
}

#[test]
fn video_lane_is_kept_as_opaque_extra() {
    let raw = json!({"video": [{"id": "v", "src": "x", "start": 0, "duration": 1, "lane": 3}]});
    let t = decode(&raw).unwrap();
    let v = &t.video().clips()[0];
    assert_eq!(v.lane(), None);
    assert_eq!(v.extra()["lane"], json!(3));
    assert_eq!(encode(&t)["video"], raw["video"]);
    assert_eq!(encode(&t)["audio"], json!([]));
}

#[test]
fn extras_cannot_shadow_clip_fields_on_encode() {
    let mut extra = Map::new();
    extra.insert("start".to_owned(), json!("oops"));
    extra.insert("lane".to_owned(), json!(7));
    extra.insert("gain".to_owned(), json!(0.5));
    let video = Clip::new("v1", "bbb.mp4", 0.0, 1.0).unwrap().with_extra(extra.clone());
    let audio = Clip::new("a1", "horse.mp3", 2.0, 1.0).unwrap().with_extra(extra);
    let t = Timeline::new(vec![video], vec![audio]).unwrap();

    let out = encode(&t);
    assert_eq!(out["video"][0]["start"], json!(0));
    assert_eq!(out["audio"][0]["lane"], json!(0));
    assert_eq!(out["audio"][0]["gain"], json!(0.5));
    assert_eq!(decode(&out).unwrap(), t);
}

#[test]
fn unknown_keys_are_round_tripped_in_order() {
    let raw = json!({
        "video": [],
        "audio": [{
            "id": "a", "src": "x", "start": 0.5, "duration": 2, "lane": 0,
            "gain": 0.8, "label": "VO"
        }],
        "zoom": 1.5
    });
    let t = decode(&raw).unwrap();
    let out = encode(&t);
    assert_eq!(out, raw);
    let keys: Vec<&str> = out["audio"][0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["id", "src", "start", "duration", "lane", "gain", "label"]);
    assert_eq!(t.extra()["zoom"], json!(1.5));
}

#[test]
fn whole_seconds_encode_as_integers() {
    assert_eq!(encode_seconds(5.0), json!(5));
    assert_eq!(encode_seconds(5.5), json!(5.5));
    assert_eq!(encode_seconds(0.0), json!(0));
}

#[test]
fn decode_with_clamps_audio_to_known_media() {
    let mut known = std::collections::HashMap::new();
    known.insert("horse.mp3".to_owned(), 2.0);
    let raw = json!({"audio": [
        {"id": "a1", "src": "horse.mp3", "start": 1, "duration": 8, "lane": 0}
    ]});
    let t = decode_with(&raw, &known).unwrap();
    assert_eq!(t.audio().clips()[0].duration(), 2.0);
    assert_eq!(encode(&t)["audio"][0]["duration"], json!(2));
}

#[test]
fn path_formatting() {
    assert_eq!(format_path(&[]), "$");
    assert_eq!(
        format_path(&[PathElem::Field("audio"), PathElem::Index(3), PathElem::Field("lane")]),
        "$.audio[3].lane"
    );
}
