//! Audio lane allocation.
//!
//! Audio clips sharing a lane must not overlap on their half-open `[start, end)` spans. Clips
//! that arrive without a lane are placed greedily: ascending start time, lowest lane that still
//! fits, opening a new lane only when every existing one is occupied.

use crate::foundation::core::Span;
use crate::foundation::error::{TimelineError, TimelineResult};
use crate::timeline::clip::Clip;
use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

/// Assign lanes to unassigned audio clips, or validate an already fully assigned sequence.
///
/// The returned sequence keeps input order and has a lane on every clip. Clips that already
/// carry a lane keep it; they are validated before any unassigned clip is placed. Re-running on
/// the output returns it unchanged.
///
/// Fails with [`TimelineError::LaneConflict`] naming the first overlapping pair, scanning clips
/// in input order and comparing each one against earlier clips of the same lane.
pub fn assign_or_validate(clips: &[Clip]) -> TimelineResult<Vec<Clip>> {
    validate_assigned(clips.iter().filter(|c| c.lane().is_some()))?;

    let mut unassigned: Vec<usize> = clips
        .iter()
        .enumerate()
        .filter(|(_, c)| c.lane().is_none())
        .map(|(i, _)| i)
        .collect();
    let mut out = clips.to_vec();
    if unassigned.is_empty() {
        return Ok(out);
    }

    // Stable sort keeps input order for equal starts.
    unassigned.sort_by(|&a, &b| clips[a].start().total_cmp(&clips[b].start()));
    let placed = if unassigned.len() == clips.len() {
        sweep(clips, &unassigned)
    } else {
        around_pinned(clips, &unassigned)
    };
    for (idx, lane) in placed {
        tracing::debug!(clip = clips[idx].id(), lane, "assigned audio lane");
        out[idx].set_lane(Some(lane));
    }

    Ok(out)
}

/// Validate a single lane: only clips whose lane equals `lane` are inspected.
pub fn validate_lane(clips: &[Clip], lane: u32) -> TimelineResult<()> {
    validate_assigned(clips.iter().filter(|c| c.lane() == Some(lane)))
}

/// Number of lane rows needed to display `clips` (highest lane + 1, or 0 when none is assigned).
///
/// Saturates at `u32::MAX` when a clip sits on lane `u32::MAX`.
pub fn lane_count(clips: &[Clip]) -> u32 {
    clips
        .iter()
        .filter_map(Clip::lane)
        .max()
        .map_or(0, |l| l.saturating_add(1))
}

/// Seconds with a total order, for use as a map or heap key.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Secs(f64);

impl Eq for Secs {}

impl PartialOrd for Secs {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Secs {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Greedy placement when no clip is pinned: `order` is sorted by start, so a lane is free for
/// the next clip once its last clip has ended.
fn sweep(clips: &[Clip], order: &[usize]) -> Vec<(usize, u32)> {
    let mut busy: BinaryHeap<Reverse<(Secs, u32)>> = BinaryHeap::new();
    let mut free: BTreeSet<u32> = BTreeSet::new();
    let mut opened = 0u32;
    let mut placed = Vec::with_capacity(order.len());
    for &idx in order {
        let span = clips[idx].span();
        while let Some(&Reverse((end, lane))) = busy.peek() {
            if end.0 > span.start {
                break;
            }
            busy.pop();
            free.insert(lane);
        }
        let lane = free.pop_first().unwrap_or_else(|| {
            opened += 1;
            opened - 1
        });
        busy.push(Reverse((Secs(span.end), lane)));
        placed.push((idx, lane));
    }
    placed
}

/// Greedy placement into the gaps left by pinned clips.
fn around_pinned(clips: &[Clip], order: &[usize]) -> Vec<(usize, u32)> {
    let mut occupancy = LaneOccupancy::default();
    for c in clips {
        if let Some(lane) = c.lane() {
            occupancy.insert(lane, c.span());
        }
    }
    let mut placed = Vec::with_capacity(order.len());
    for &idx in order {
        let span = clips[idx].span();
        let lane = occupancy.lowest_free(span);
        occupancy.insert(lane, span);
        placed.push((idx, lane));
    }
    placed
}

fn validate_assigned<'a>(clips: impl Iterator<Item = &'a Clip>) -> TimelineResult<()> {
    match first_conflict(clips) {
        Some((lane, a, b)) => Err(TimelineError::lane_conflict(lane, a, b)),
        None => Ok(()),
    }
}

/// Input-order scan naming the first conflicting pair.
///
/// Until the first conflict every lane holds disjoint spans, so each lane is a start-ordered map
/// and the clips overlapping a newcomer are the contiguous run just before its end.
fn first_conflict<'a>(clips: impl Iterator<Item = &'a Clip>) -> Option<(u32, &'a str, &'a str)> {
    let mut seen: BTreeMap<u32, BTreeMap<Secs, (usize, &'a Clip)>> = BTreeMap::new();
    for (order, c) in clips.enumerate() {
        let Some(lane) = c.lane() else { continue };
        let span = c.span();
        let prev = seen.entry(lane).or_default();
        let earliest = prev
            .range(..Secs(span.end))
            .rev()
            .take_while(|(_, (_, p))| p.end() > span.start)
            .map(|(_, &entry)| entry)
            .min_by_key(|&(i, _)| i);
        if let Some((_, p)) = earliest {
            return Some((lane, p.id(), c.id()));
        }
        prev.insert(Secs(span.start), (order, c));
    }
    None
}

/// Per-lane spans keyed by start; spans within one lane never overlap.
#[derive(Default)]
struct LaneOccupancy {
    lanes: BTreeMap<u32, BTreeMap<Secs, Secs>>,
}

impl LaneOccupancy {
    fn fits(&self, lane: u32, span: Span) -> bool {
        let Some(spans) = self.lanes.get(&lane) else {
            return true;
        };
        let clear_before = spans
            .range(..Secs(span.start))
            .next_back()
            .is_none_or(|(_, end)| end.0 <= span.start);
        let clear_after = spans
            .range(Secs(span.start)..)
            .next()
            .is_none_or(|(start, _)| span.end <= start.0);
        clear_before && clear_after
    }

    fn lowest_free(&self, span: Span) -> u32 {
        let mut lane = 0u32;
        while !self.fits(lane, span) {
            lane += 1;
        }
        lane
    }

    fn insert(&mut self, lane: u32, span: Span) {
        self.lanes
            .entry(lane)
            .or_default()
            .insert(Secs(span.start), Secs(span.end));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/lanes.rs"]
mod tests;
