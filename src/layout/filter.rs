use super::config::Palette;
use super::event::{Event, LayoutError};
use time::Date;
use tracing::warn;

/// An event that overlaps the visible month, paired with the color it will
/// be drawn in
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthEvent {
    pub event: Event,
    pub color: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MonthEvents {
    /// Sorted by start date; events with equal starts keep their input order
    pub events: Vec<MonthEvent>,
    pub rejected: Vec<LayoutError>,
}

/// Selects the events overlapping `[month_start, month_end]`, sorts them by
/// start date, and assigns palette colors to those without one.
///
/// Events whose end precedes their start are logged, reported in
/// `rejected`, and otherwise skipped.
pub fn filter_month_events(
    events: &[Event],
    month_start: Date,
    month_end: Date,
    palette: &Palette,
) -> MonthEvents {
    let mut rejected = Vec::new();
    let mut kept = Vec::new();
    for ev in events {
        if let Err(e) = ev.validate() {
            warn!(id = %ev.id, start = %ev.start, end = %ev.end, "skipping event: {e}");
            rejected.push(e);
        } else if ev.intersects(month_start, month_end) {
            kept.push(ev);
        }
    }
    // `sort_by_key` is stable, which keeps color assignment reproducible
    kept.sort_by_key(|ev| ev.start);
    let events = kept
        .into_iter()
        .enumerate()
        .map(|(i, ev)| {
            let color = match ev.color.as_deref() {
                Some(c) if !c.is_empty() => c.to_owned(),
                _ => palette.pick(i).to_owned(),
            };
            MonthEvent {
                event: ev.clone(),
                color,
            }
        })
        .collect();
    MonthEvents { events, rejected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::event::EventId;
    use time::macros::date;

    fn filter(events: &[Event]) -> MonthEvents {
        filter_month_events(
            events,
            date!(2024 - 03 - 01),
            date!(2024 - 03 - 31),
            &Palette::default(),
        )
    }

    fn ids(events: &MonthEvents) -> Vec<&str> {
        events.events.iter().map(|me| me.event.id.0.as_str()).collect()
    }

    #[test]
    fn test_keeps_overlapping_events() {
        let events = [
            Event::new("before", date!(2024 - 02 - 01), date!(2024 - 02 - 29), "x"),
            Event::new("into", date!(2024 - 02 - 20), date!(2024 - 03 - 01), "x"),
            Event::new("inside", date!(2024 - 03 - 05), date!(2024 - 03 - 06), "x"),
            Event::new("around", date!(2024 - 02 - 01), date!(2024 - 04 - 30), "x"),
            Event::new("out of", date!(2024 - 03 - 31), date!(2024 - 04 - 02), "x"),
            Event::new("after", date!(2024 - 04 - 01), date!(2024 - 04 - 01), "x"),
        ];
        let month = filter(&events);
        assert_eq!(ids(&month), ["around", "into", "inside", "out of"]);
        assert!(month.rejected.is_empty());
    }

    #[test]
    fn test_stable_sort() {
        let events = [
            Event::new("c", date!(2024 - 03 - 09), date!(2024 - 03 - 09), "x"),
            Event::new("a1", date!(2024 - 03 - 02), date!(2024 - 03 - 20), "x"),
            Event::new("b", date!(2024 - 03 - 04), date!(2024 - 03 - 04), "x"),
            Event::new("a2", date!(2024 - 03 - 02), date!(2024 - 03 - 03), "x"),
            Event::new("a3", date!(2024 - 03 - 02), date!(2024 - 03 - 02), "x"),
        ];
        let month = filter(&events);
        assert_eq!(ids(&month), ["a1", "a2", "a3", "b", "c"]);
        assert!(month
            .events
            .windows(2)
            .all(|w| w[0].event.start <= w[1].event.start));
    }

    #[test]
    fn test_palette_assignment() {
        let events = [
            Event::new("e0", date!(2024 - 03 - 01), date!(2024 - 03 - 01), "x"),
            Event::new("e1", date!(2024 - 03 - 02), date!(2024 - 03 - 02), "x").color("pink"),
            Event::new("e2", date!(2024 - 03 - 03), date!(2024 - 03 - 03), "x").color(""),
            Event::new("e3", date!(2024 - 03 - 04), date!(2024 - 03 - 04), "x"),
            Event::new("e4", date!(2024 - 03 - 05), date!(2024 - 03 - 05), "x"),
            Event::new("e5", date!(2024 - 03 - 06), date!(2024 - 03 - 06), "x"),
        ];
        let month = filter(&events);
        let colors = month
            .events
            .iter()
            .map(|me| me.color.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            colors,
            ["#2e7d32", "pink", "#c62828", "#6a1b9a", "#1565c0", "#2e7d32"]
        );
    }

    #[test]
    fn test_invalid_range_rejected() {
        let events = [
            Event::new("ok", date!(2024 - 03 - 01), date!(2024 - 03 - 02), "x"),
            Event::new("bad", date!(2024 - 03 - 10), date!(2024 - 03 - 09), "x"),
        ];
        let month = filter(&events);
        assert_eq!(ids(&month), ["ok"]);
        assert_eq!(
            month.rejected,
            [LayoutError::InvalidRange {
                id: EventId::from("bad"),
                start: date!(2024 - 03 - 10),
                end: date!(2024 - 03 - 09),
            }]
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(filter(&[]), MonthEvents::default());
    }
}
