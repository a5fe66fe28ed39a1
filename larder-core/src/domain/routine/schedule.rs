// larder-core/src/domain/routine/schedule.rs

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum RoutineSchedule {
    Daily,
    /// Every `n` days; 0 behaves as 1.
    EveryNDays(u32),
    /// On the listed weekdays. An empty list is never due.
    Weekly(Vec<Weekday>),
    /// On this day of the month, clamped to the month's last day.
    Monthly(u32),
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    first
        .and_then(|d| d.checked_add_months(Months::new(1)))
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

fn monthly_occurrence(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let day = day.clamp(1, last_day_of_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

impl RoutineSchedule {
    /// First occurrence on or after `from`.
    pub fn first_on_or_after(&self, from: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Daily | Self::EveryNDays(_) => Some(from),
            Self::Weekly(_) | Self::Monthly(_) => from.pred_opt().and_then(|d| self.next_after(d)),
        }
    }

    /// First occurrence strictly after `last`.
    pub fn next_after(&self, last: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Daily => last.checked_add_days(Days::new(1)),
            Self::EveryNDays(n) => last.checked_add_days(Days::new(u64::from((*n).max(1)))),
            Self::Weekly(days) => (1..=7u64)
                .filter_map(|offset| last.checked_add_days(Days::new(offset)))
                .find(|d| days.contains(&d.weekday())),
            Self::Monthly(day) => {
                let this_month = monthly_occurrence(last.year(), last.month(), *day)?;
                if this_month > last {
                    return Some(this_month);
                }
                let next = last.with_day(1)?.checked_add_months(Months::new(1))?;
                monthly_occurrence(next.year(), next.month(), *day)
            }
        }
    }
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

impl fmt::Display for RoutineSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::EveryNDays(n) => write!(f, "every:{}", n),
            Self::Weekly(days) => {
                let labels: Vec<&str> = days.iter().map(|d| weekday_label(*d)).collect();
                write!(f, "weekly:{}", labels.join(","))
            }
            Self::Monthly(day) => write!(f, "monthly:{}", day),
        }
    }
}

impl FromStr for RoutineSchedule {
    type Err = DomainError;

    /// `daily`, `every:3`, `weekly:mon,thu`, `monthly:15`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidSchedule(s.to_string());
        let normalized = s.trim().to_lowercase();
        let (kind, arg) = match normalized.split_once(':') {
            Some((kind, arg)) => (kind, Some(arg.trim())),
            None => (normalized.as_str(), None),
        };

        match (kind, arg) {
            ("daily", None) => Ok(Self::Daily),
            ("every", Some(n)) => n.parse().map(Self::EveryNDays).map_err(|_| invalid()),
            ("weekly", Some(list)) => {
                let days = list
                    .split(',')
                    .map(|d| d.trim().parse::<Weekday>().map_err(|_| invalid()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Weekly(days))
            }
            ("monthly", Some(day)) => match day.parse::<u32>() {
                Ok(d) if (1..=31).contains(&d) => Ok(Self::Monthly(d)),
                _ => Err(invalid()),
            },
            _ => Err(invalid()),
        }
    }
}
