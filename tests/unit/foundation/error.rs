use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TimelineError::schema("$.video", "expected an array")
            .to_string()
            .contains("schema error at $.video:")
    );
    assert!(
        TimelineError::invalid_clip("a1", "duration", "must be > 0")
            .to_string()
            .contains("invalid clip 'a1': duration")
    );
    assert!(
        TimelineError::edit("x")
            .to_string()
            .contains("edit error:")
    );
    assert!(
        TimelineError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn lane_conflict_names_both_clips() {
    let msg = TimelineError::lane_conflict(0, "a1", "a3").to_string();
    assert_eq!(msg, "lane conflict on lane 0: 'a1' overlaps 'a3'");
}

#[test]
fn not_found_names_track() {
    let msg = TimelineError::not_found(TrackKind::Audio, "zz").to_string();
    assert_eq!(msg, "audio clip 'zz' not found");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TimelineError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
