//! Laying out date-ranged events over a month grid.
//!
//! The pipeline runs in four steps, each a pure function of its inputs:
//!
//! 1. [`MonthGrid::build`] pads the visible month out to whole weeks.
//! 2. [`filter_month_events`] keeps the events overlapping the month, in
//!    start order, and assigns palette colors.
//! 3. [`place_events`] decides each event's rows, label row, and whether its
//!    label needs an ellipsis.
//! 4. [`layout_row`] splits every week row into weighted gaps and bars that
//!    always add up to seven days.
//!
//! [`MonthLayouter`] runs all four.
pub mod date;
mod config;
mod event;
mod filter;
mod grid;
mod placement;
mod row;
mod text;
pub use self::config::{LayoutConfig, Palette};
pub use self::date::{FirstDay, InvalidFirstDay, OutOfTimeError, WeekNumber};
pub use self::event::{Event, EventId, LayoutError};
pub use self::filter::{filter_month_events, MonthEvent, MonthEvents};
pub use self::grid::{DayCell, DayMarking, MonthGrid, WeekRow};
pub use self::placement::{place_events, CrossMonthOwner, MonthOwner, PlacedEvent};
pub use self::row::{layout_row, EventSpan, RowLayout, WeekSegment, Weight};
pub use self::text::{ApproxTextMeasure, TextMeasure};
use time::Date;
use tracing::debug;

/// Everything needed to draw one month: the grid of days, the placed events,
/// and the bar segments for each week row
#[derive(Clone, Debug, PartialEq)]
pub struct MonthLayout {
    pub grid: MonthGrid,
    pub placed: Vec<PlacedEvent>,
    /// One entry per row of `grid`, in the same order
    pub rows: Vec<RowLayout>,
    /// Events skipped because they end before they start
    pub rejected: Vec<LayoutError>,
}

impl MonthLayout {
    pub fn month_start(&self) -> Date {
        self.grid.month_start()
    }

    /// The placed events covering `date`, in start order
    pub fn events_on(&self, date: Date) -> impl Iterator<Item = &PlacedEvent> + '_ {
        self.placed.iter().filter(move |pe| pe.event.covers(date))
    }

    pub fn rows_with_weeks(&self) -> impl Iterator<Item = (&WeekRow, &RowLayout)> + '_ {
        std::iter::zip(self.grid.weeks(), &self.rows)
    }
}

/// Runs the whole layout pipeline with a fixed configuration.
///
/// Holds no state besides the configuration and text measure, so the same
/// inputs always produce the same layout.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthLayouter<M = ApproxTextMeasure> {
    config: LayoutConfig,
    measure: M,
}

impl MonthLayouter<ApproxTextMeasure> {
    pub fn new(config: LayoutConfig) -> Self {
        MonthLayouter {
            config,
            measure: ApproxTextMeasure,
        }
    }
}

impl<M: TextMeasure> MonthLayouter<M> {
    pub fn with_measure<N: TextMeasure>(self, measure: N) -> MonthLayouter<N> {
        MonthLayouter {
            config: self.config,
            measure,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out `events` over the month containing `month`
    pub fn layout(&self, month: Date, events: &[Event]) -> Result<MonthLayout, OutOfTimeError> {
        let grid = MonthGrid::build(month, self.config.first_day, self.config.day_marking)?;
        let MonthEvents {
            events: month_events,
            rejected,
        } = filter_month_events(
            events,
            grid.month_start(),
            grid.month_end(),
            &self.config.palette,
        );
        let placed = place_events(&month_events, &grid, &self.config, &self.measure);
        let rows = grid
            .weeks()
            .iter()
            .map(|row| layout_row(row, &grid, &placed))
            .collect();
        debug!(
            month = %grid.month_start(),
            kept = placed.len(),
            rejected = rejected.len(),
            "laid out month"
        );
        Ok(MonthLayout {
            grid,
            placed,
            rows,
            rejected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn events() -> Vec<Event> {
        vec![
            Event::new("conf", date!(2024 - 02 - 27), date!(2024 - 03 - 02), "Conference")
                .leading_decoration("["),
            Event::new("sprint", date!(2024 - 03 - 04), date!(2024 - 03 - 15), "Sprint 12"),
            Event::new("dentist", date!(2024 - 03 - 12), date!(2024 - 03 - 12), "Dentist")
                .color("#ffffff"),
            Event::new("oops", date!(2024 - 03 - 20), date!(2024 - 03 - 18), "Backwards"),
            Event::new("easter", date!(2024 - 03 - 29), date!(2024 - 04 - 01), "Easter"),
            Event::new("may", date!(2024 - 05 - 01), date!(2024 - 05 - 02), "Elsewhere"),
        ]
    }

    #[test]
    fn test_layout_march() {
        let layouter = MonthLayouter::new(LayoutConfig::new(700.0));
        let layout = layouter.layout(date!(2024 - 03 - 18), &events()).unwrap();
        assert_eq!(layout.month_start(), date!(2024 - 03 - 01));
        assert_eq!(layout.rows.len(), layout.grid.weeks().len());
        let ids = layout
            .placed
            .iter()
            .map(|pe| pe.event.id.0.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["conf", "sprint", "dentist", "easter"]);
        assert_eq!(layout.rejected.len(), 1);
        for (row, row_layout) in layout.rows_with_weeks() {
            assert_eq!(row.week(), row_layout.week);
            assert_eq!(row_layout.total_weight(), Weight::WEEK);
        }
        let on_12th = layout
            .events_on(date!(2024 - 03 - 12))
            .map(|pe| pe.color.as_str())
            .collect::<Vec<_>>();
        assert_eq!(on_12th, ["#f9a825", "#ffffff"]);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let layouter = MonthLayouter::new(LayoutConfig::new(360.0).first_day(FirstDay::Monday));
        let events = events();
        let first = layouter.layout(date!(2024 - 03 - 01), &events).unwrap();
        let second = layouter.layout(date!(2024 - 03 - 01), &events).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_measure() {
        #[derive(Debug)]
        struct Wide;

        impl TextMeasure for Wide {
            fn text_width(&self, _text: &str, _font_size: f64) -> f64 {
                f64::INFINITY
            }
        }

        let layouter = MonthLayouter::new(LayoutConfig::new(7000.0)).with_measure(Wide);
        let layout = layouter.layout(date!(2024 - 03 - 01), &events()).unwrap();
        assert!(layout.placed.iter().all(|pe| pe.should_ellipsis));
    }

    #[test]
    fn test_empty_month() {
        let layouter = MonthLayouter::new(LayoutConfig::default());
        let layout = layouter.layout(date!(2015 - 02 - 01), &[]).unwrap();
        assert_eq!(layout.rows.len(), 4);
        for row in &layout.rows {
            assert_eq!(row.segments, [WeekSegment::Gap(Weight::WEEK)]);
        }
    }
}
