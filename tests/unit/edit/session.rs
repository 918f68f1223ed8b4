use super::*;
use crate::foundation::core::TrackKind;
use crate::timeline::clip::Clip;
use std::collections::BTreeMap;

fn base() -> Timeline {
    let a = |id: &str, start: f64, duration: f64, lane: u32| {
        Clip::new(id, "horse.mp3", start, duration)
            .unwrap()
            .with_lane(lane)
    };
    Timeline::new(
        vec![Clip::new("v1", "bbb.mp4", 0.0, 5.0).unwrap()],
        vec![a("a1", 1.0, 8.0, 0), a("a2", 3.0, 2.0, 1), a("a3", 9.0, 3.0, 0)],
    )
    .unwrap()
}

#[test]
fn stage_then_commit() {
    let mut s = EditSession::new(base());
    assert_eq!(s.state(), EditState::Idle);

    let staged = s
        .stage(EditCommand::move_to(TrackKind::Video, "v1", 2.0))
        .unwrap();
    assert_eq!(staged.find(TrackKind::Video, "v1").unwrap().start(), 2.0);
    assert_eq!(s.state(), EditState::Pending);
    assert_eq!(s.timeline().find(TrackKind::Video, "v1").unwrap().start(), 0.0);

    s.commit().unwrap();
    assert_eq!(s.state(), EditState::Idle);
    assert_eq!(s.timeline().find(TrackKind::Video, "v1").unwrap().start(), 2.0);
}

#[test]
fn rollback_discards_candidate() {
    let mut s = EditSession::new(base());
    let cmd = EditCommand::resize(TrackKind::Audio, "a2", 1.0);
    s.stage(cmd.clone()).unwrap();
    assert_eq!(s.rollback(), Some(cmd));
    assert_eq!(s.state(), EditState::Idle);
    assert_eq!(s.timeline(), &base());
    assert_eq!(s.rollback(), None);
}

#[test]
fn staging_twice_is_rejected() {
    let mut s = EditSession::new(base());
    s.stage(EditCommand::move_to(TrackKind::Video, "v1", 1.0))
        .unwrap();
    let err = s
        .stage(EditCommand::reassign("a2", 2))
        .unwrap_err();
    assert!(matches!(err, TimelineError::Edit(_)));
    assert!(err.to_string().contains("while move of 'v1' is pending"));
    assert_eq!(s.state(), EditState::Pending);
}

#[test]
fn commit_without_pending_is_rejected() {
    let mut s = EditSession::new(base());
    assert!(matches!(s.commit(), Err(TimelineError::Edit(_))));
}

#[test]
fn failed_stage_stays_idle() {
    let mut s = EditSession::new(base());
    let err = s
        .stage(EditCommand::resize(TrackKind::Audio, "a1", 10.0))
        .unwrap_err();
    assert!(matches!(err, TimelineError::LaneConflict { lane: 0, .. }));
    assert_eq!(s.state(), EditState::Idle);
    assert_eq!(s.timeline(), &base());
}

#[test]
fn apply_commits_in_one_step() {
    let mut s = EditSession::new(base());
    s.apply(EditCommand::reassign("a3", 1)).unwrap();
    s.apply(EditCommand::move_to(TrackKind::Audio, "a3", 7.0))
        .unwrap();
    let t = s.into_timeline();
    let a3 = t.find(TrackKind::Audio, "a3").unwrap();
    assert_eq!((a3.start(), a3.lane()), (7.0, Some(1)));
    t.validate().unwrap();
}

#[test]
fn session_clamps_resized_audio() {
    let mut known = BTreeMap::new();
    known.insert("horse.mp3".to_owned(), 4.0);
    let mut s = EditSession::with_durations(base(), &known);
    s.apply(EditCommand::resize(TrackKind::Audio, "a2", 30.0))
        .unwrap();
    assert_eq!(s.timeline().find(TrackKind::Audio, "a2").unwrap().duration(), 4.0);
}
