use super::measure::ColumnMeasure;
use barcal::layout::date::{add_months, first_of_month};
use barcal::layout::{
    Event, FirstDay, LayoutConfig, MonthGrid, MonthLayout, MonthLayouter, OutOfTimeError,
};
use std::hash::{DefaultHasher, Hash, Hasher};
use time::Date;
use tracing::debug;

/// Number of days per grid row, for converting a day width into a viewport
const DAYS_PER_ROW: u16 = 7;

/// The month currently on screen, the events to show in it, and the most
/// recent layout of the two
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MonthWindow {
    pub(super) today: Date,
    /// Always the first of a month
    month: Date,
    events: Vec<Event>,
    events_fingerprint: u64,
    config: LayoutConfig,
    cache: Option<(LayoutKey, MonthLayout)>,
}

/// Everything a cached layout depends on besides the fixed configuration
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct LayoutKey {
    month: Date,
    events_fingerprint: u64,
    viewport: u16,
    first_day: FirstDay,
}

impl MonthWindow {
    pub(crate) fn new(today: Date, events: Vec<Event>, config: LayoutConfig) -> Self {
        let events_fingerprint = fingerprint(&events);
        MonthWindow {
            today,
            month: first_of_month(today),
            events,
            events_fingerprint,
            config,
            cache: None,
        }
    }

    /// Start on the month containing `date` instead of the current one
    pub(crate) fn start_month(mut self, date: Date) -> Result<Self, OutOfTimeError> {
        self.month = self.checked_month(date)?;
        Ok(self)
    }

    pub(crate) fn month(&self) -> Date {
        self.month
    }

    pub(crate) fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        self.month = self.checked_month(add_months(self.month, 1)?)?;
        Ok(())
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        self.month = self.checked_month(add_months(self.month, -1)?)?;
        Ok(())
    }

    pub(crate) fn jump_to_today(&mut self) {
        self.month = first_of_month(self.today);
    }

    /// Returns the layout of the current month for rows `day_width` columns
    /// per day, reusing the previous layout if nothing it depends on has
    /// changed
    pub(crate) fn ensure_layout(&mut self, day_width: u16) -> Result<&MonthLayout, OutOfTimeError> {
        let viewport = day_width.saturating_mul(DAYS_PER_ROW);
        let key = LayoutKey {
            month: self.month,
            events_fingerprint: self.events_fingerprint,
            viewport,
            first_day: self.config.first_day,
        };
        let layout = match self.cache.take() {
            Some((cached, layout)) if cached == key => layout,
            _ => {
                debug!(month = %self.month, viewport, "recomputing month layout");
                let mut config = self.config.clone();
                config.viewport_width = f64::from(viewport);
                MonthLayouter::new(config)
                    .with_measure(ColumnMeasure)
                    .layout(self.month, &self.events)?
            }
        };
        Ok(&self.cache.insert((key, layout)).1)
    }

    /// Returns the first of the month containing `date` if that month can be
    /// laid out
    fn checked_month(&self, date: Date) -> Result<Date, OutOfTimeError> {
        let month = first_of_month(date);
        MonthGrid::build(month, self.config.first_day, self.config.day_marking)?;
        Ok(month)
    }
}

fn fingerprint(events: &[Event]) -> u64 {
    let mut hasher = DefaultHasher::new();
    events.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn window(today: Date) -> MonthWindow {
        let events = vec![Event::new(
            "trip",
            date!(2024 - 03 - 05),
            date!(2024 - 03 - 07),
            "Trip",
        )];
        MonthWindow::new(today, events, LayoutConfig::new(0.0).font_size(1.0))
    }

    #[test]
    fn test_navigation() {
        let mut w = window(date!(2024 - 03 - 18));
        assert_eq!(w.month(), date!(2024 - 03 - 01));
        w.next_month().unwrap();
        assert_eq!(w.month(), date!(2024 - 04 - 01));
        for _ in 0..4 {
            w.previous_month().unwrap();
        }
        assert_eq!(w.month(), date!(2023 - 12 - 01));
        w.jump_to_today();
        assert_eq!(w.month(), date!(2024 - 03 - 01));
    }

    #[test]
    fn test_start_month() {
        let w = window(date!(2024 - 03 - 18))
            .start_month(date!(1999 - 12 - 31))
            .unwrap();
        assert_eq!(w.month(), date!(1999 - 12 - 01));
    }

    #[test]
    fn test_end_of_time() {
        let mut w = window(date!(2024 - 03 - 18))
            .start_month(date!(9999 - 11 - 15))
            .unwrap();
        assert_eq!(w.next_month(), Err(OutOfTimeError));
        assert_eq!(w.month(), date!(9999 - 11 - 01));
        assert!(window(date!(2024 - 03 - 18))
            .start_month(date!(9999 - 12 - 25))
            .is_err());
    }

    #[test]
    fn test_layout_is_cached() {
        let mut w = window(date!(2024 - 03 - 18));
        let first = w.ensure_layout(8).unwrap().placed.as_ptr();
        let second = w.ensure_layout(8).unwrap().placed.as_ptr();
        assert_eq!(first, second, "unchanged inputs should reuse the layout");
    }

    #[test]
    fn test_layout_follows_month_and_width() {
        let mut w = window(date!(2024 - 03 - 18));
        assert_eq!(w.ensure_layout(8).unwrap().placed.len(), 1);
        w.next_month().unwrap();
        let layout = w.ensure_layout(8).unwrap();
        assert_eq!(layout.month_start(), date!(2024 - 04 - 01));
        assert!(layout.placed.is_empty());
        w.previous_month().unwrap();
        // Two columns per day leaves no room for "Trip"
        let layout = w.ensure_layout(2).unwrap();
        assert!(layout.placed[0].should_ellipsis);
        let layout = w.ensure_layout(12).unwrap();
        assert!(!layout.placed[0].should_ellipsis);
    }
}
