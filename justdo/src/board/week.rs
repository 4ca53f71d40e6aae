//! Monday-anchored week derivation

use chrono::{Datelike, Days, Local, NaiveDate};

/// Seven consecutive days starting on a Monday. Every anchor date maps
/// to exactly one week, so two anchors in the same calendar week derive
/// the same `Week`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    days: [NaiveDate; 7],
}

impl Week {
    /// The week containing `anchor`.
    pub fn containing(anchor: NaiveDate) -> Self {
        let monday = anchor - Days::new(u64::from(anchor.weekday().num_days_from_monday()));
        let mut days = [monday; 7];
        for (i, day) in days.iter_mut().enumerate() {
            *day = monday + Days::new(i as u64);
        }
        Self { days }
    }

    /// The week containing today, in local time.
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    /// Monday
    pub fn start(&self) -> NaiveDate {
        self.days[0]
    }

    /// Sunday
    pub fn end(&self) -> NaiveDate {
        self.days[6]
    }

    /// The seven days in chronological order
    pub fn days(&self) -> &[NaiveDate; 7] {
        &self.days
    }

    /// Whether `date` falls inside this week
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.end()
    }

    /// Short human label for headers, e.g. `Jan 1 - Jan 7, 2024`
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start().format("%b %-d"),
            self.end().format("%b %-d, %Y")
        )
    }
}
