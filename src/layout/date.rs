use std::fmt;
use std::iter::successors;
use thiserror::Error;
use time::{Date, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: u8 = 7;

/// Which day of the week occupies the leftmost column of the grid
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum FirstDay {
    #[default]
    Sunday,
    Monday,
}

impl FirstDay {
    /// The day-of-week number of this day, with 0 = Sunday
    pub fn number(self) -> u8 {
        match self {
            FirstDay::Sunday => 0,
            FirstDay::Monday => 1,
        }
    }

    pub fn weekday(self) -> Weekday {
        match self {
            FirstDay::Sunday => Weekday::Sunday,
            FirstDay::Monday => Weekday::Monday,
        }
    }
}

impl TryFrom<u8> for FirstDay {
    type Error = InvalidFirstDay;

    fn try_from(value: u8) -> Result<FirstDay, InvalidFirstDay> {
        match value {
            0 => Ok(FirstDay::Sunday),
            1 => Ok(FirstDay::Monday),
            n => Err(InvalidFirstDay(n)),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("first day of week must be 0 (Sunday) or 1 (Monday), got {0}")]
pub struct InvalidFirstDay(pub u8);

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;

/// A Monday-anchored week ordinal.
///
/// Unlike ISO week numbers, these increase monotonically across year
/// boundaries, so two weeks can always be compared and subtracted.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct WeekNumber(i32);

impl WeekNumber {
    pub fn get(self) -> i32 {
        self.0
    }

    pub(crate) fn offset(self, weeks: i32) -> WeekNumber {
        WeekNumber(self.0 + weeks)
    }

    /// Number of weeks from `self` to `later`
    pub(crate) fn weeks_until(self, later: WeekNumber) -> i32 {
        later.0 - self.0
    }
}

impl fmt::Display for WeekNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W{}", self.0)
    }
}

pub(crate) trait WeekdayExt {
    fn index0(&self) -> u8;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_sunday()
    }
}

pub(crate) fn day_number(date: Date) -> i32 {
    date.to_julian_day()
}

/// Signed number of days from `a` to `b`
pub fn days_between(a: Date, b: Date) -> i32 {
    day_number(b) - day_number(a)
}

pub fn week_number(date: Date) -> WeekNumber {
    let monday = day_number(date) - i32::from(date.weekday().number_days_from_monday());
    WeekNumber(monday.div_euclid(7))
}

/// Zero-based column of `date` in a grid whose rows start on `first_day`
pub fn column(date: Date, first_day: FirstDay) -> u8 {
    (date.weekday().index0() + DAYS_IN_WEEK - first_day.number()) % DAYS_IN_WEEK
}

/// The [`WeekNumber`] of the grid row containing `date`, i.e., the week
/// number of the Monday in that row.
pub fn row_week(date: Date, first_day: FirstDay) -> WeekNumber {
    let week = week_number(date);
    if first_day == FirstDay::Sunday && date.weekday() == Weekday::Sunday {
        week.offset(1)
    } else {
        week
    }
}

/// # Panics
///
/// Never panics in practice; every month has a first day.
pub fn first_of_month(date: Date) -> Date {
    date.replace_day(1)
        .expect("day 1 should exist in every month")
}

/// Returns the first and last days of the month containing `date`
pub fn month_bounds(date: Date) -> Result<(Date, Date), OutOfTimeError> {
    let first = first_of_month(date);
    let last = match add_months(first, 1) {
        Ok(next) => next.previous_day().ok_or(OutOfTimeError)?,
        // December of the final representable year
        Err(OutOfTimeError) => Date::from_calendar_date(first.year(), Month::December, 31)
            .map_err(|_| OutOfTimeError)?,
    };
    Ok((first, last))
}

/// Returns the first day of the month `n` months after (or before, if
/// negative) the month containing `date`
pub fn add_months(date: Date, n: i32) -> Result<Date, OutOfTimeError> {
    let index = date.year() * 12 + i32::from(u8::from(date.month())) - 1 + n;
    let year = index.div_euclid(12);
    let month = u8::try_from(index.rem_euclid(12) + 1).map_err(|_| OutOfTimeError)?;
    let month = Month::try_from(month).map_err(|_| OutOfTimeError)?;
    Date::from_calendar_date(year, month, 1).map_err(|_| OutOfTimeError)
}

pub(crate) fn iter_days_after(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day()).skip(1)
}

pub(crate) fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}
