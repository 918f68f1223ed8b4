use crate::edit::apply::apply_edit_with;
use crate::edit::command::EditCommand;
use crate::foundation::error::{TimelineError, TimelineResult};
use crate::timeline::media::{MediaDurations, NoDurations};
use crate::timeline::model::Timeline;

/// Where an [`EditSession`] is in its apply-then-validate cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// No edit in progress.
    Idle,
    /// One validated edit is staged but not yet committed.
    Pending,
}

/// Drives one timeline through edits, one at a time.
///
/// `stage` moves `Idle → Pending` with a fully validated candidate; `commit` or `rollback`
/// returns to `Idle`. The committed timeline only ever changes on `commit`.
pub struct EditSession<'d> {
    committed: Timeline,
    pending: Option<(EditCommand, Timeline)>,
    durations: &'d dyn MediaDurations,
}

impl EditSession<'static> {
    /// Start a session that trusts every requested duration.
    pub fn new(timeline: Timeline) -> Self {
        Self::with_durations(timeline, &NoDurations)
    }
}

impl<'d> EditSession<'d> {
    /// Start a session that clamps resized audio clips to `durations`.
    pub fn with_durations(timeline: Timeline, durations: &'d dyn MediaDurations) -> Self {
        Self {
            committed: timeline,
            pending: None,
            durations,
        }
    }

    /// Current state.
    pub fn state(&self) -> EditState {
        if self.pending.is_some() {
            EditState::Pending
        } else {
            EditState::Idle
        }
    }

    /// Last committed timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.committed
    }

    /// Staged candidate, if an edit is pending.
    pub fn pending(&self) -> Option<&Timeline> {
        self.pending.as_ref().map(|(_, t)| t)
    }

    /// Validate `cmd` against the committed timeline and hold the result as pending.
    ///
    /// On error the session stays `Idle`.
    pub fn stage(&mut self, cmd: EditCommand) -> TimelineResult<&Timeline> {
        if let Some((staged, _)) = &self.pending {
            return Err(TimelineError::edit(format!(
                "cannot stage {} of '{}' while {} of '{}' is pending",
                op_name(&cmd),
                cmd.clip_id(),
                op_name(staged),
                staged.clip_id()
            )));
        }
        let candidate = apply_edit_with(&self.committed, &cmd, self.durations)?;
        let (_, t) = self.pending.insert((cmd, candidate));
        Ok(t)
    }

    /// Promote the pending candidate to the committed timeline.
    pub fn commit(&mut self) -> TimelineResult<&Timeline> {
        let Some((_, candidate)) = self.pending.take() else {
            return Err(TimelineError::edit("no pending edit to commit"));
        };
        self.committed = candidate;
        Ok(&self.committed)
    }

    /// Drop the pending candidate, returning the command that produced it.
    pub fn rollback(&mut self) -> Option<EditCommand> {
        self.pending.take().map(|(cmd, _)| cmd)
    }

    /// Stage and commit in one step.
    pub fn apply(&mut self, cmd: EditCommand) -> TimelineResult<&Timeline> {
        self.stage(cmd)?;
        self.commit()
    }

    /// Consume the session, returning the committed timeline. A pending edit is discarded.
    pub fn into_timeline(self) -> Timeline {
        self.committed
    }
}

fn op_name(cmd: &EditCommand) -> &'static str {
    match cmd {
        EditCommand::Move { .. } => "move",
        EditCommand::Resize { .. } => "resize",
        EditCommand::Reassign { .. } => "reassign",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edit/session.rs"]
mod tests;
