//! Read-side projections of the flat task and diary lists
//!
//! Nothing here mutates or reorders state. These are the shapes the
//! display layer renders: the week board, a single day, and the diary
//! grouped by day.

use super::week::Week;
use crate::types::{DoneEntry, Task};
use chrono::NaiveDate;
use indexmap::IndexMap;

/// Tasks that share a calendar date, in global list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub tasks: Vec<Task>,
}

/// Everything the week board shows, derived from one pass over the
/// flat task list.
#[derive(Debug, Clone)]
pub struct BoardView {
    pub week: Week,
    /// Unscheduled tasks, in list order.
    pub general: Vec<Task>,
    /// One group per displayed week day, chronological, possibly empty.
    pub days: Vec<DateGroup>,
    /// Date lanes before the displayed week, most recent date first.
    pub history: Vec<DateGroup>,
    /// Date lanes after the displayed week, soonest date first.
    pub later: Vec<DateGroup>,
}

impl BoardView {
    pub fn build(tasks: &[Task], week: Week) -> Self {
        let mut general = Vec::new();
        let mut days: Vec<DateGroup> = week
            .days()
            .iter()
            .map(|date| DateGroup {
                date: *date,
                tasks: Vec::new(),
            })
            .collect();
        let mut history: IndexMap<NaiveDate, Vec<Task>> = IndexMap::new();
        let mut later: IndexMap<NaiveDate, Vec<Task>> = IndexMap::new();

        for task in tasks {
            match task.scheduled_for {
                None => general.push(task.clone()),
                Some(date) if week.contains(date) => {
                    if let Some(lane) = days.iter_mut().find(|lane| lane.date == date) {
                        lane.tasks.push(task.clone());
                    }
                }
                Some(date) if date < week.start() => {
                    history.entry(date).or_default().push(task.clone());
                }
                Some(date) => later.entry(date).or_default().push(task.clone()),
            }
        }

        let mut history: Vec<DateGroup> = history
            .into_iter()
            .map(|(date, tasks)| DateGroup { date, tasks })
            .collect();
        history.sort_by(|a, b| b.date.cmp(&a.date));

        let mut later: Vec<DateGroup> = later
            .into_iter()
            .map(|(date, tasks)| DateGroup { date, tasks })
            .collect();
        later.sort_by(|a, b| a.date.cmp(&b.date));

        Self {
            week,
            general,
            days,
            history,
            later,
        }
    }

    /// Count of tasks not yet done, across every lane.
    pub fn pending_count(&self) -> usize {
        self.all_tasks().filter(|t| !t.done).count()
    }

    fn all_tasks(&self) -> impl Iterator<Item = &Task> {
        self.general
            .iter()
            .chain(self.days.iter().flat_map(|g| g.tasks.iter()))
            .chain(self.history.iter().flat_map(|g| g.tasks.iter()))
            .chain(self.later.iter().flat_map(|g| g.tasks.iter()))
    }
}

/// Diary entries grouped by day, newest day first, list order inside
/// each day.
pub fn entries_by_day(entries: &[DoneEntry]) -> Vec<(NaiveDate, Vec<DoneEntry>)> {
    let mut grouped: IndexMap<NaiveDate, Vec<DoneEntry>> = IndexMap::new();
    for entry in entries {
        grouped.entry(entry.entry_date).or_default().push(entry.clone());
    }
    let mut groups: Vec<(NaiveDate, Vec<DoneEntry>)> = grouped.into_iter().collect();
    groups.sort_by(|a, b| b.0.cmp(&a.0));
    groups
}
