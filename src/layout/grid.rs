use super::date::{
    column, iter_days_after, iter_days_before, month_bounds, row_week, FirstDay,
    OutOfTimeError, WeekNumber, DAYS_IN_WEEK,
};
use std::iter::once;
use time::Date;

const WEEK_LEN: usize = DAYS_IN_WEEK as usize;

/// How the renderer should mark days that events fall on.  Chosen once per
/// grid build.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum DayMarking {
    /// Plain day numbers
    #[default]
    Simple,
    /// A dot under the day number for each event covering the day
    MultiDot,
    /// Days covered by any event are highlighted as a continuous period
    Period,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DayCell {
    pub date: Date,
    /// `false` for the padding days belonging to adjacent months
    pub in_month: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WeekRow {
    week: WeekNumber,
    days: [DayCell; WEEK_LEN],
}

impl WeekRow {
    pub fn week(&self) -> WeekNumber {
        self.week
    }

    pub fn days(&self) -> &[DayCell; WEEK_LEN] {
        &self.days
    }

    pub fn first_date(&self) -> Date {
        self.days[0].date
    }

    pub fn last_date(&self) -> Date {
        self.days[WEEK_LEN - 1].date
    }

    /// ISO 8601 week number of the row, as shown in a week-number column
    pub fn iso_week(&self) -> u8 {
        self.last_date().iso_week()
    }

    pub fn contains(&self, date: Date) -> bool {
        self.first_date() <= date && date <= self.last_date()
    }

    pub fn has_extra_days(&self) -> bool {
        self.days.iter().any(|cell| !cell.in_month)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthGrid {
    month_start: Date,
    month_end: Date,
    first_day: FirstDay,
    marking: DayMarking,
    weeks: Vec<WeekRow>,
}

impl MonthGrid {
    /// Lays out every day of the month containing `month` into whole weeks,
    /// padding the first and last weeks with days from the adjacent months.
    pub fn build(
        month: Date,
        first_day: FirstDay,
        marking: DayMarking,
    ) -> Result<MonthGrid, OutOfTimeError> {
        let (month_start, month_end) = month_bounds(month)?;
        let lead = usize::from(column(month_start, first_day));
        let trail = WEEK_LEN - 1 - usize::from(column(month_end, first_day));
        let mut days = Vec::with_capacity(42);
        days.extend(iter_days_before(month_start).take(lead));
        if days.len() < lead {
            return Err(OutOfTimeError);
        }
        days.reverse();
        days.extend(
            once(month_start).chain(iter_days_after(month_start).take_while(|&d| d <= month_end)),
        );
        let before_trail = days.len();
        days.extend(iter_days_after(month_end).take(trail));
        if days.len() - before_trail < trail {
            return Err(OutOfTimeError);
        }
        assert!(
            days.len() % WEEK_LEN == 0,
            "grid should consist of whole weeks"
        );
        let weeks = days
            .chunks_exact(WEEK_LEN)
            .map(|chunk| {
                let days = std::array::from_fn(|i| DayCell {
                    date: chunk[i],
                    in_month: month_start <= chunk[i] && chunk[i] <= month_end,
                });
                WeekRow {
                    week: row_week(chunk[0], first_day),
                    days,
                }
            })
            .collect();
        Ok(MonthGrid {
            month_start,
            month_end,
            first_day,
            marking,
            weeks,
        })
    }

    pub fn weeks(&self) -> &[WeekRow] {
        &self.weeks
    }

    pub fn month_start(&self) -> Date {
        self.month_start
    }

    pub fn month_end(&self) -> Date {
        self.month_end
    }

    pub fn first_day(&self) -> FirstDay {
        self.first_day
    }

    pub fn marking(&self) -> DayMarking {
        self.marking
    }

    /// # Panics
    ///
    /// Does not panic for grids made by [`MonthGrid::build`], which always
    /// have at least four rows.
    pub fn first_week(&self) -> &WeekRow {
        self.weeks.first().expect("grid should have at least one week")
    }

    /// # Panics
    ///
    /// Same as [`MonthGrid::first_week`].
    pub fn last_week(&self) -> &WeekRow {
        self.weeks.last().expect("grid should have at least one week")
    }

    pub fn days(&self) -> impl Iterator<Item = DayCell> + '_ {
        self.weeks.iter().flat_map(|w| w.days.iter().copied())
    }

    /// Returns the row containing `date`, if it is on the grid at all
    pub fn row_of(&self, date: Date) -> Option<&WeekRow> {
        self.weeks.iter().find(|w| w.contains(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::date::{add_months, week_number};
    use time::macros::date;
    use time::Weekday;

    fn build(month: Date, first_day: FirstDay) -> MonthGrid {
        MonthGrid::build(month, first_day, DayMarking::Simple).unwrap()
    }

    #[test]
    fn test_march_2024_sunday_first() {
        let grid = build(date!(2024 - 03 - 15), FirstDay::Sunday);
        assert_eq!(grid.weeks().len(), 6);
        assert_eq!(grid.first_week().first_date(), date!(2024 - 02 - 25));
        assert_eq!(grid.last_week().last_date(), date!(2024 - 04 - 06));
        assert_eq!(grid.month_start(), date!(2024 - 03 - 01));
        assert_eq!(grid.month_end(), date!(2024 - 03 - 31));
        let third = grid.weeks()[2];
        assert_eq!(third.first_date(), date!(2024 - 03 - 10));
        assert_eq!(third.week(), week_number(date!(2024 - 03 - 11)));
        assert!(!third.has_extra_days());
        assert!(grid.first_week().has_extra_days());
    }

    #[test]
    fn test_march_2024_monday_first() {
        let grid = build(date!(2024 - 03 - 01), FirstDay::Monday);
        assert_eq!(grid.weeks().len(), 5);
        assert_eq!(grid.first_week().first_date(), date!(2024 - 02 - 26));
        assert_eq!(grid.last_week().last_date(), date!(2024 - 03 - 31));
        assert!(!grid.last_week().has_extra_days());
    }

    #[test]
    fn test_february_2015_fits_four_weeks() {
        let grid = build(date!(2015 - 02 - 01), FirstDay::Sunday);
        assert_eq!(grid.weeks().len(), 4);
        assert!(grid.days().all(|cell| cell.in_month));
    }

    #[test]
    fn test_every_month_whole_weeks() {
        for first_day in [FirstDay::Sunday, FirstDay::Monday] {
            let mut month = date!(2019 - 01 - 01);
            while month < date!(2031 - 01 - 01) {
                let grid = build(month, first_day);
                let days = grid.days().collect::<Vec<_>>();
                assert_eq!(days.len() % 7, 0, "{month} {first_day:?}");
                assert_eq!(
                    days[0].date.weekday(),
                    first_day.weekday(),
                    "{month} {first_day:?}"
                );
                let in_month = days.iter().filter(|c| c.in_month).collect::<Vec<_>>();
                let (first, last) = month_bounds(month).unwrap();
                assert_eq!(in_month.first().map(|c| c.date), Some(first));
                assert_eq!(in_month.last().map(|c| c.date), Some(last));
                assert!(
                    days.windows(2)
                        .all(|w| w[0].date.next_day() == Some(w[1].date)),
                    "days should be consecutive in {month}"
                );
                month = add_months(month, 1).unwrap();
            }
        }
    }

    #[test]
    fn test_week_rows_ordered() {
        let grid = build(date!(2024 - 12 - 01), FirstDay::Monday);
        for pair in grid.weeks().windows(2) {
            assert_eq!(pair[0].week().weeks_until(pair[1].week()), 1);
        }
        assert_eq!(grid.first_week().days()[0].date.weekday(), Weekday::Monday);
    }

    #[test]
    fn test_iso_week() {
        let grid = build(date!(2025 - 01 - 01), FirstDay::Monday);
        assert_eq!(grid.first_week().iso_week(), 1);
    }

    #[test]
    fn test_row_of() {
        let grid = build(date!(2024 - 03 - 01), FirstDay::Sunday);
        assert_eq!(
            grid.row_of(date!(2024 - 02 - 27)).map(WeekRow::first_date),
            Some(date!(2024 - 02 - 25))
        );
        assert_eq!(grid.row_of(date!(2024 - 04 - 07)), None);
    }

    #[test]
    fn test_end_of_time() {
        assert_eq!(
            MonthGrid::build(date!(9999 - 12 - 01), FirstDay::Sunday, DayMarking::Simple),
            Err(OutOfTimeError)
        );
    }
}
