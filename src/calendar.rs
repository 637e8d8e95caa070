//! Calendar-date primitives.
//!
//! Every date the engine compares is a [`NaiveDate`]. Instants (the wall clock, payment
//! timestamps) are turned into a calendar day exactly once, through [`CalendarClock`], so a
//! day count never moves with the evaluator's time zone.

use chrono::{DateTime, Datelike, FixedOffset, Months, NaiveDate, Offset, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// utc offset of america/sao_paulo, which has kept no daylight saving since 2019
pub const SAO_PAULO_OFFSET_MINUTES: i32 = -180;

/// converts instants to calendar days at a fixed utc offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarClock {
    offset: FixedOffset,
}

impl CalendarClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// clock at utc
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// clock at utc-03:00, the calendar the brazilian preset uses
    pub fn sao_paulo() -> Self {
        Self::from_offset_minutes(SAO_PAULO_OFFSET_MINUTES).unwrap_or_else(|_| Self::utc())
    }

    /// clock at `minutes` east of utc (negative for the americas)
    pub fn from_offset_minutes(minutes: i32) -> Result<Self> {
        FixedOffset::east_opt(minutes.saturating_mul(60))
            .map(Self::new)
            .ok_or_else(|| LedgerError::InvalidConfiguration {
                message: format!("utc offset out of range: {} minutes", minutes),
            })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// calendar day an instant falls on
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// current calendar day
    pub fn today(&self, time: &SafeTimeProvider) -> NaiveDate {
        self.date_of(time.now())
    }
}

impl Default for CalendarClock {
    fn default() -> Self {
        Self::utc()
    }
}

/// parse a `YYYY-MM-DD` date; anything after the date part (a `T` time or a space) is ignored
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    let head = trimmed
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);

    NaiveDate::parse_from_str(head, "%Y-%m-%d").map_err(|e| LedgerError::InvalidDate {
        message: format!("{:?}: {}", input, e),
    })
}

/// whole calendar days from `from` to `to` (negative when `to` is earlier)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// add calendar months, clamping to the last day of shorter months (jan 31 + 1 = feb 28/29)
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// first day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// move a (year, month) pair by `delta` months
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) + delta;
    (index.div_euclid(12), (index.rem_euclid(12) + 1) as u32)
}

/// short pt-BR month label
pub fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Fev",
        3 => "Mar",
        4 => "Abr",
        5 => "Mai",
        6 => "Jun",
        7 => "Jul",
        8 => "Ago",
        9 => "Set",
        10 => "Out",
        11 => "Nov",
        12 => "Dez",
        _ => "",
    }
}

/// calendar period relative to a reference day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Today,
    /// iso week, monday start
    Week,
    Month,
    Year,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Today, Period::Week, Period::Month, Period::Year];

    /// whether `date` falls in this period around `reference`, by calendar components
    pub fn contains(&self, reference: NaiveDate, date: NaiveDate) -> bool {
        match self {
            Period::Today => date == reference,
            Period::Week => date.iso_week() == reference.iso_week(),
            Period::Month => date.year() == reference.year() && date.month() == reference.month(),
            Period::Year => date.year() == reference.year(),
        }
    }
}
