// larder-core/src/domain/routine/mod.rs

pub mod schedule;

pub use schedule::RoutineSchedule;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A recurring restock: on every due date, the routine's template cards are
/// copied into its target stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    pub id: i64,
    pub name: String,
    pub stock_id: i64,
    pub schedule: RoutineSchedule,
    pub start: NaiveDate,
    #[serde(default)]
    pub last_run: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Routine {
    /// First occurrence on/after `start` if the routine never ran, otherwise
    /// the first occurrence strictly after `last_run`.
    pub fn next_due(&self) -> Option<NaiveDate> {
        match self.last_run {
            None => self.schedule.first_on_or_after(self.start),
            Some(last) => match self.schedule.next_after(last) {
                Some(next) if next < self.start => self.schedule.first_on_or_after(self.start),
                other => other,
            },
        }
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.active && self.next_due().is_some_and(|due| due <= today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    fn routine(schedule: RoutineSchedule, last_run: Option<NaiveDate>) -> Routine {
        Routine {
            id: 1,
            name: "weekly veggies".into(),
            stock_id: 1,
            schedule,
            start: date(2026, 10, 1),
            last_run,
            active: true,
        }
    }

    #[test]
    fn test_never_run_is_due_from_start() {
        let r = routine(RoutineSchedule::Daily, None);
        assert!(!r.is_due(date(2026, 9, 30)));
        assert!(r.is_due(date(2026, 10, 1)));
    }

    #[test]
    fn test_daily_after_run() {
        let r = routine(RoutineSchedule::Daily, Some(date(2026, 10, 5)));
        assert!(!r.is_due(date(2026, 10, 5)));
        assert!(r.is_due(date(2026, 10, 6)));
    }

    #[test]
    fn test_weekly_first_occurrence() {
        // 2026-10-01 is a Thursday.
        let r = routine(RoutineSchedule::Weekly(vec![Weekday::Mon]), None);
        assert_eq!(r.next_due(), Some(date(2026, 10, 5)));
        assert!(!r.is_due(date(2026, 10, 4)));
    }

    #[test]
    fn test_inactive_is_never_due() {
        let mut r = routine(RoutineSchedule::Daily, None);
        r.active = false;
        assert!(!r.is_due(date(2027, 1, 1)));
    }
}
