//! Lane partitioning and the global reorder computation
//!
//! The backend persists one global task order. Lanes (the unscheduled
//! "general" column plus one column per calendar day) are a projection
//! of that single list, so a drag gesture inside one lane has to be
//! translated back into a full reordering of the whole collection.

use super::week::Week;
use crate::types::Task;
use chrono::NaiveDate;
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Identifies a lane on the board: the general column or a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneKey {
    General,
    Day(NaiveDate),
}

impl LaneKey {
    /// The lane a task currently belongs to.
    pub fn for_task(task: &Task) -> Self {
        Self::from_scheduled_for(task.scheduled_for)
    }

    /// Map a `scheduled_for` value to its lane.
    pub fn from_scheduled_for(scheduled_for: Option<NaiveDate>) -> Self {
        match scheduled_for {
            Some(date) => Self::Day(date),
            None => Self::General,
        }
    }

    /// The `scheduled_for` value a task must carry to live in this lane.
    pub fn scheduled_for(&self) -> Option<NaiveDate> {
        match self {
            Self::General => None,
            Self::Day(date) => Some(*date),
        }
    }
}

impl fmt::Display for LaneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::General => f.write_str("general"),
            Self::Day(date) => write!(f, "{date}"),
        }
    }
}

impl FromStr for LaneKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("general") {
            return Ok(Self::General);
        }
        s.parse::<NaiveDate>()
            .map(Self::Day)
            .map_err(|_| format!("invalid lane: {s} (expected 'general' or YYYY-MM-DD)"))
    }
}

/// A move gesture: place `task_id` into `target_lane`, in front of
/// `before_id` when given, at the end of the lane otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub task_id: i64,
    pub target_lane: LaneKey,
    pub before_id: Option<i64>,
}

/// Split the flat list into lanes. Lane order is first encounter in the
/// list; order inside each lane is the list order.
pub fn partition_lanes(tasks: &[Task]) -> IndexMap<LaneKey, Vec<Task>> {
    let mut lanes: IndexMap<LaneKey, Vec<Task>> = IndexMap::new();
    for task in tasks {
        lanes
            .entry(LaneKey::for_task(task))
            .or_default()
            .push(task.clone());
    }
    lanes
}

/// Display order for lanes: general, the displayed week's seven days in
/// chronological order, date lanes before the week (most recent first),
/// date lanes after it (soonest first), then any date lane that falls
/// inside the week range without matching one of its days. The last
/// bucket cannot occur for a well-formed week and exists as a fallback.
pub fn lane_key_order(lanes: &IndexMap<LaneKey, Vec<Task>>, week: &Week) -> Vec<LaneKey> {
    let mut order = Vec::with_capacity(lanes.len() + 8);
    order.push(LaneKey::General);
    order.extend(week.days().iter().copied().map(LaneKey::Day));

    let mut past = Vec::new();
    let mut future = Vec::new();
    let mut stray = Vec::new();
    for key in lanes.keys() {
        let LaneKey::Day(date) = *key else { continue };
        if week.days().contains(&date) {
            continue;
        }
        if date < week.start() {
            past.push(date);
        } else if date > week.end() {
            future.push(date);
        } else {
            stray.push(date);
        }
    }
    past.sort_unstable_by(|a, b| b.cmp(a));
    future.sort_unstable();

    order.extend(past.into_iter().map(LaneKey::Day));
    order.extend(future.into_iter().map(LaneKey::Day));
    order.extend(stray.into_iter().map(LaneKey::Day));
    order
}

/// Recompute the global task order after a move gesture.
///
/// The moved task is lifted out of its current lane, inserted at the
/// requested spot in the target lane, and the lanes are flattened back
/// into one list in display order. The result is a permutation of the
/// input. A `task_id` that is not in the collection returns the input
/// unchanged; that signals a stale gesture upstream and is not an error
/// worth failing the whole interaction for.
///
/// This function only permutes. Changing the moved task's
/// `scheduled_for` to match the target lane is the caller's job, done
/// through a patch before the reorder is computed.
pub fn reorder_by_move(tasks: &[Task], week: &Week, request: &MoveRequest) -> Vec<Task> {
    let mut lanes = partition_lanes(tasks);

    let mut moved = None;
    for lane in lanes.values_mut() {
        if let Some(index) = lane.iter().position(|t| t.id == request.task_id) {
            moved = Some(lane.remove(index));
            break;
        }
    }
    let Some(moved) = moved else {
        warn!(task_id = request.task_id, "move target not in collection, order unchanged");
        return tasks.to_vec();
    };

    let target = lanes.entry(request.target_lane).or_default();
    let insert_at = request
        .before_id
        .and_then(|before| target.iter().position(|t| t.id == before))
        .unwrap_or(target.len());
    target.insert(insert_at, moved);

    let mut flattened = Vec::with_capacity(tasks.len());
    for key in lane_key_order(&lanes, week) {
        if let Some(lane) = lanes.shift_remove(&key) {
            flattened.extend(lane);
        }
    }
    // Lanes the ordering pass somehow missed still make it out, in
    // encounter order.
    for (_, lane) in lanes {
        flattened.extend(lane);
    }
    flattened
}
