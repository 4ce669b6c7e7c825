use super::config::LayoutConfig;
use super::date::{column, day_number, row_week, week_number, FirstDay, WeekNumber};
use super::event::Event;
use super::filter::MonthEvent;
use super::grid::MonthGrid;
use super::text::TextMeasure;
use std::cmp::{max, min};
use time::{Date, Weekday};

/// Labels of events flagged for ellipsis keep this many characters
const ELLIPSIS_KEEP: usize = 10;

const ELLIPSIS: &str = "...";

/// Events spanning this many days or fewer always get a trimmed label
const SHORT_EVENT_DAYS: i32 = 2;

/// Which of two adjoining month views draws an event's label and decorations
/// in the week row they share
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MonthOwner {
    Current,
    Previous,
    Next,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CrossMonthOwner {
    /// Owner of the grid's first row, shared with the previous month
    pub leading: MonthOwner,
    /// Owner of the grid's last row, shared with the next month
    pub trailing: MonthOwner,
}

impl CrossMonthOwner {
    pub const CURRENT: CrossMonthOwner = CrossMonthOwner {
        leading: MonthOwner::Current,
        trailing: MonthOwner::Current,
    };
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedEvent {
    pub event: Event,
    pub color: String,
    /// Row containing the event's first day
    pub week_start: WeekNumber,
    /// Row containing the event's last day
    pub week_end: WeekNumber,
    /// The only row in which the event's label may be drawn
    pub label_week: WeekNumber,
    pub should_ellipsis: bool,
    pub cross_month: CrossMonthOwner,
}

impl PlacedEvent {
    /// Whether the visible month draws this event's label and decorations in
    /// the given row of `grid`
    pub fn owns_row(&self, week: WeekNumber, grid: &MonthGrid) -> bool {
        if week == grid.first_week().week() {
            self.cross_month.leading == MonthOwner::Current
        } else if week == grid.last_week().week() {
            self.cross_month.trailing == MonthOwner::Current
        } else {
            true
        }
    }

    /// The label as drawn.  An event flagged for ellipsis shows at most its
    /// first 10 characters followed by `...`, however short its text.
    pub fn label(&self) -> String {
        if self.should_ellipsis {
            let mut s = self.event.text.chars().take(ELLIPSIS_KEEP).collect::<String>();
            s.push_str(ELLIPSIS);
            s
        } else {
            self.event.text.clone()
        }
    }
}

/// Decides, for each event, which rows it spans, where its label goes, and
/// whether that label has to be truncated.
pub fn place_events<M: TextMeasure>(
    events: &[MonthEvent],
    grid: &MonthGrid,
    config: &LayoutConfig,
    measure: &M,
) -> Vec<PlacedEvent> {
    events
        .iter()
        .map(|me| place_event(me, grid, config, measure))
        .collect()
}

fn place_event<M: TextMeasure>(
    me: &MonthEvent,
    grid: &MonthGrid,
    config: &LayoutConfig,
    measure: &M,
) -> PlacedEvent {
    let ev = &me.event;
    let rows = EventRows::new(ev, grid.first_day());
    let fit = LabelFit {
        day_width: config.day_width(),
        text_width: measure.text_width(&ev.text, config.font_size) + config.label_padding,
    };
    let label_week = default_label_week(ev, grid.first_day());
    let start_room = days_to_week_end(ev.start);
    let should_ellipsis = !fit.fits(start_room);
    let (label_week, should_ellipsis) =
        shift_label(&rows, label_week, start_room, should_ellipsis, fit);
    PlacedEvent {
        event: ev.clone(),
        color: me.color.clone(),
        week_start: rows.start_row,
        week_end: rows.end_row,
        label_week,
        should_ellipsis: should_ellipsis || short_event(ev),
        cross_month: cross_month_owner(ev, grid),
    }
}

/// An event starting on a Sunday is labelled one row later than the week
/// its start falls in, since in a Monday-first grid the starting row offers
/// a single day of room.  The label never moves past the event's last row.
pub(crate) fn default_label_week(ev: &Event, first_day: FirstDay) -> WeekNumber {
    let week = week_number(ev.start);
    let label = if ev.start.weekday() == Weekday::Sunday {
        week.offset(1)
    } else {
        week
    };
    min(label, row_week(ev.end, first_day))
}

/// Days from `date` through the Saturday closing its Sunday-based week.
/// This is the room a label starting on `date` has before it must wrap.
fn days_to_week_end(date: Date) -> i32 {
    7 - i32::from(date.weekday().number_days_from_sunday())
}

/// If the label does not fit at the event's start, move it to a later row
/// with more room than `start_room` days.  The row right after the label row
/// is preferred, and a label moved there is never truncated.  Failing that,
/// the end row is tried, and the ellipsis is re-decided against its room.
fn shift_label(
    rows: &EventRows<'_>,
    label_week: WeekNumber,
    start_room: i32,
    should_ellipsis: bool,
    fit: LabelFit,
) -> (WeekNumber, bool) {
    if rows.start_row == rows.end_row || !should_ellipsis || label_week >= rows.end_row {
        return (label_week, should_ellipsis);
    }
    let next = label_week.offset(1);
    if rows.days_in_row(next) > start_room {
        return (next, false);
    }
    let end_room = rows.days_in_row(rows.end_row);
    if end_room > start_room {
        return (rows.end_row, !fit.fits(end_room));
    }
    (label_week, should_ellipsis)
}

pub(crate) fn short_event(ev: &Event) -> bool {
    ev.day_span() <= SHORT_EVENT_DAYS
}

/// Decides which month view owns the boundary rows an event shares with
/// the adjacent months.
///
/// The month covering more of the event's days in the shared row owns it;
/// on a tie, the earlier month does.  Both adjoining views reach the same
/// verdict, so the label is drawn exactly once.
pub(crate) fn cross_month_owner(ev: &Event, grid: &MonthGrid) -> CrossMonthOwner {
    let month_start = day_number(grid.month_start());
    let month_end = day_number(grid.month_end());
    let first = grid.first_week();
    let last = grid.last_week();

    let previous = overlap_days(ev, day_number(first.first_date()), month_start - 1);
    let leading = if previous > 0 {
        let current = overlap_days(ev, month_start, day_number(first.last_date()));
        if current > previous {
            MonthOwner::Current
        } else {
            MonthOwner::Previous
        }
    } else {
        MonthOwner::Current
    };

    let next = overlap_days(ev, month_end + 1, day_number(last.last_date()));
    let trailing = if next > 0 {
        let current = overlap_days(ev, day_number(last.first_date()), month_end);
        if current >= next {
            MonthOwner::Current
        } else {
            MonthOwner::Next
        }
    } else {
        MonthOwner::Current
    };

    CrossMonthOwner { leading, trailing }
}

/// Number of the event's days falling within the day numbers `lo..=hi`
fn overlap_days(ev: &Event, lo: i32, hi: i32) -> i32 {
    let lo = max(lo, day_number(ev.start));
    let hi = min(hi, day_number(ev.end));
    max(hi - lo + 1, 0)
}

/// The grid rows an event passes through
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct EventRows<'a> {
    event: &'a Event,
    start_row: WeekNumber,
    end_row: WeekNumber,
    /// Day number of the first day of `start_row`
    start_row_first: i32,
}

impl<'a> EventRows<'a> {
    fn new(event: &'a Event, first_day: FirstDay) -> Self {
        EventRows {
            event,
            start_row: row_week(event.start, first_day),
            end_row: row_week(event.end, first_day),
            start_row_first: row_first_day(event.start, first_day),
        }
    }

    /// Number of the event's days that fall in the given row
    fn days_in_row(&self, week: WeekNumber) -> i32 {
        let first = self.start_row_first + 7 * self.start_row.weeks_until(week);
        overlap_days(self.event, first, first + 6)
    }
}

fn row_first_day(date: Date, first_day: FirstDay) -> i32 {
    day_number(date) - i32::from(column(date, first_day))
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct LabelFit {
    day_width: f64,
    text_width: f64,
}

impl LabelFit {
    /// A degenerate (zero, negative, or NaN) day width never fits anything
    fn fits(self, days: i32) -> bool {
        self.day_width > 0.0 && f64::from(days) * self.day_width >= self.text_width
    }
}
