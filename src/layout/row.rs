use super::date::{column, FirstDay, WeekNumber};
use super::event::EventId;
use super::grid::{MonthGrid, WeekRow};
use super::placement::PlacedEvent;
use std::fmt;
use std::iter::Sum;
use time::Date;
use tracing::trace;

/// Width of a full week row in half-day units
const ROW_HALVES: u16 = 14;

/// Spans at most this wide (in half days) are too narrow to show a label
const MIN_LABEL_HALVES: u16 = 3;

/// A width measured in day cells.
///
/// Stored as an exact count of half days, so that summing the segments of a
/// row never drifts from 7.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Weight(u16);

impl Weight {
    pub const WEEK: Weight = Weight(ROW_HALVES);

    pub fn from_halves(halves: u16) -> Weight {
        Weight(halves)
    }

    /// Saturates at `u16::MAX` halves
    pub fn days(days: u16) -> Weight {
        Weight(days.saturating_mul(2))
    }

    pub fn halves(self) -> u16 {
        self.0
    }

    pub fn as_days(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Weight>>(iter: I) -> Weight {
        Weight(iter.map(Weight::halves).sum())
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventSpan {
    pub event: EventId,
    pub weight: Weight,
    pub color: String,
    /// `None` when the bar is drawn without text in this row
    pub label: Option<String>,
    /// The event's label is cut short wherever it is shown
    pub truncated: bool,
    pub leading_decoration: Option<String>,
    pub trailing_decoration: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WeekSegment {
    Gap(Weight),
    Event(EventSpan),
}

impl WeekSegment {
    pub fn weight(&self) -> Weight {
        match self {
            WeekSegment::Gap(w) => *w,
            WeekSegment::Event(span) => span.weight,
        }
    }

    pub fn as_event(&self) -> Option<&EventSpan> {
        match self {
            WeekSegment::Gap(_) => None,
            WeekSegment::Event(span) => Some(span),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RowLayout {
    pub week: WeekNumber,
    pub segments: Vec<WeekSegment>,
}

impl RowLayout {
    pub fn total_weight(&self) -> Weight {
        self.segments.iter().map(WeekSegment::weight).sum()
    }

    pub fn spans(&self) -> impl Iterator<Item = &EventSpan> + '_ {
        self.segments.iter().filter_map(WeekSegment::as_event)
    }
}

/// Splits one week row into gaps and event bars.
///
/// `placed` must be sorted by start date, as produced by the month filter.
/// Bars are allocated left to right in that order; an event starting before
/// the previous bar's end is pushed right to begin where that bar ends.
pub fn layout_row(row: &WeekRow, grid: &MonthGrid, placed: &[PlacedEvent]) -> RowLayout {
    let first_day = grid.first_day();
    let is_first = row.week() == grid.first_week().week();
    let is_last = row.week() == grid.last_week().week();
    let mut segments = Vec::new();
    let mut cursor = 0u16;
    for pe in placed
        .iter()
        .filter(|pe| pe.event.intersects(row.first_date(), row.last_date()))
    {
        let (start, end) = bar_extent(pe, row, grid, first_day, is_first, is_last);
        let start = start.max(cursor);
        if end <= start {
            trace!(id = %pe.event.id, week = %row.week(), "event bar hidden by earlier bar");
            continue;
        }
        if start > cursor {
            segments.push(WeekSegment::Gap(Weight(start - cursor)));
        }
        segments.push(WeekSegment::Event(event_span(pe, row, grid, Weight(end - start))));
        cursor = end;
    }
    if cursor < ROW_HALVES {
        segments.push(WeekSegment::Gap(Weight(ROW_HALVES - cursor)));
    }
    let layout = RowLayout {
        week: row.week(),
        segments,
    };
    debug_assert_eq!(layout.total_weight(), Weight::WEEK, "row weights must sum to 7");
    layout
}

/// Start and end of an event's bar within `row`, in half days from the
/// row's left edge.
///
/// In the grid's first and last rows, the part of an event lying in the
/// adjacent month shrinks to half a day; the adjoining month's view draws
/// the rest.
fn bar_extent(
    pe: &PlacedEvent,
    row: &WeekRow,
    grid: &MonthGrid,
    first_day: FirstDay,
    is_first: bool,
    is_last: bool,
) -> (u16, u16) {
    let ev = &pe.event;
    let mut start = if ev.start <= row.first_date() {
        0
    } else {
        halves_at(ev.start, first_day)
    };
    let mut end = if ev.end >= row.last_date() {
        ROW_HALVES
    } else {
        halves_at(ev.end, first_day) + 2
    };
    if is_first && ev.start < grid.month_start() && row.contains(grid.month_start()) {
        let boundary = halves_at(grid.month_start(), first_day);
        if boundary > 0 {
            start = boundary - 1;
        }
    }
    if is_last && ev.end > grid.month_end() && row.contains(grid.month_end()) {
        let boundary = halves_at(grid.month_end(), first_day) + 2;
        if boundary < ROW_HALVES {
            end = boundary + 1;
        }
    }
    (start, end)
}

fn halves_at(date: Date, first_day: FirstDay) -> u16 {
    u16::from(column(date, first_day)) * 2
}

fn event_span(pe: &PlacedEvent, row: &WeekRow, grid: &MonthGrid, weight: Weight) -> EventSpan {
    let week = row.week();
    let owned = pe.owns_row(week, grid);
    let label = (week == pe.label_week && weight.halves() > MIN_LABEL_HALVES && owned)
        .then(|| pe.label());
    let leading_decoration = if week == pe.week_start && owned {
        pe.event.leading_decoration.clone()
    } else {
        None
    };
    let trailing_decoration = if week == pe.week_end && owned {
        pe.event.trailing_decoration.clone()
    } else {
        None
    };
    EventSpan {
        event: pe.event.id.clone(),
        weight,
        color: pe.color.clone(),
        label,
        truncated: pe.should_ellipsis,
        leading_decoration,
        trailing_decoration,
    }
}
