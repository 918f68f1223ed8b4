use crate::edit::command::EditCommand;
use crate::foundation::core::TrackKind;
use crate::foundation::error::TimelineResult;
use crate::timeline::clip::{check_duration, check_start};
use crate::timeline::lanes;
use crate::timeline::media::{MediaDurations, NoDurations, clamp_duration};
use crate::timeline::model::Timeline;

/// Apply one edit, returning the updated timeline.
///
/// The input is never modified: the candidate is built on a copy and returned only after it
/// passes validation, so a rejected edit leaves the caller's timeline exactly as it was.
pub fn apply_edit(timeline: &Timeline, cmd: &EditCommand) -> TimelineResult<Timeline> {
    apply_edit_with(timeline, cmd, &NoDurations)
}

/// Like [`apply_edit`], clamping resized audio clips to the lengths known by `durations`.
#[tracing::instrument(skip(timeline, durations))]
pub fn apply_edit_with(
    timeline: &Timeline,
    cmd: &EditCommand,
    durations: &dyn MediaDurations,
) -> TimelineResult<Timeline> {
    let track = cmd.track();
    let idx = timeline.position(track, cmd.clip_id())?;
    let mut next = timeline.clone();

    match cmd {
        EditCommand::Move { id, start, .. } => {
            check_start(id, *start)?;
            next.clips_mut(track)[idx].set_start(*start);
        }
        EditCommand::Resize { id, duration, .. } => {
            check_duration(id, *duration)?;
            let clip = &mut next.clips_mut(track)[idx];
            let d = match track {
                TrackKind::Audio => clamp_duration(durations, clip.src(), *duration),
                TrackKind::Video => *duration,
            };
            clip.set_duration(d);
        }
        EditCommand::Reassign { lane, .. } => {
            next.clips_mut(TrackKind::Audio)[idx].set_lane(Some(*lane));
        }
    }

    // Only the edited clip's lane can have gained an overlap.
    if track == TrackKind::Audio
        && let Some(lane) = next.audio().clips()[idx].lane()
    {
        lanes::validate_lane(next.audio().clips(), lane)?;
    }

    tracing::debug!("edit accepted");
    Ok(next)
}
