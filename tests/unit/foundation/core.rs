use super::*;

#[test]
fn touching_spans_do_not_overlap() {
    let a = Span::from_start_duration(1.0, 8.0);
    let b = Span::from_start_duration(9.0, 3.0);
    assert!(!a.overlaps(b));
    assert!(!b.overlaps(a));
}

#[test]
fn interleaved_spans_overlap() {
    let a = Span::from_start_duration(1.0, 8.0);
    let b = Span::from_start_duration(7.0, 3.0);
    assert!(a.overlaps(b));
    assert!(b.overlaps(a));
}

#[test]
fn contained_span_overlaps() {
    let outer = Span::from_start_duration(0.0, 10.0);
    let inner = Span::from_start_duration(2.0, 1.0);
    assert!(outer.overlaps(inner));
    assert!(inner.overlaps(outer));
}

#[test]
fn contains_is_half_open() {
    let s = Span::from_start_duration(2.0, 3.0);
    assert!(s.contains(2.0));
    assert!(s.contains(4.999));
    assert!(!s.contains(5.0));
    assert_eq!(s.len_secs(), 3.0);
}

#[test]
fn track_kind_keys() {
    assert_eq!(TrackKind::Video.key(), "video");
    assert_eq!(TrackKind::Audio.to_string(), "audio");
    let k: TrackKind = serde_json::from_str("\"audio\"").unwrap();
    assert_eq!(k, TrackKind::Audio);
}
