//! Order counts per calendar weekday, always Monday through Sunday.

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};
use shoplens_core::{parse_timestamp, OrderRecord, ShoplensError};

/// Calendar weekday in canonical Monday-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Zero-based position in the canonical ordering.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayCount {
    pub weekday: DayOfWeek,
    pub count: usize,
}

/// Count orders per weekday of their purchase timestamp.
///
/// Always returns seven rows in Monday..Sunday order; days without orders
/// have a count of 0. The first unparseable timestamp aborts the count.
pub fn weekday_distribution(records: &[OrderRecord]) -> Result<Vec<WeekdayCount>, ShoplensError> {
    let mut counts = [0usize; 7];

    for record in records {
        let ts = parse_timestamp(&record.order_purchase_timestamp)?;
        counts[DayOfWeek::from(ts.weekday()).index()] += 1;
    }

    Ok(DayOfWeek::ALL
        .iter()
        .map(|&weekday| WeekdayCount {
            weekday,
            count: counts[weekday.index()],
        })
        .collect())
}
