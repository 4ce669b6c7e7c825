use super::date::days_between;
use std::fmt;
use thiserror::Error;
use time::Date;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EventId(pub String);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> EventId {
        EventId(s.to_owned())
    }
}

impl From<String> for EventId {
    fn from(s: String) -> EventId {
        EventId(s)
    }
}

/// A date-ranged event to be drawn as a bar across the month grid.
///
/// Both `start` and `end` are inclusive.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub start: Date,
    pub end: Date,
    pub text: String,
    /// Bar color; when `None` or empty, one is assigned from the palette
    pub color: Option<String>,
    /// Drawn at the very start of the event's bar
    pub leading_decoration: Option<String>,
    /// Drawn at the very end of the event's bar
    pub trailing_decoration: Option<String>,
}

impl Event {
    pub fn new<I: Into<EventId>, S: Into<String>>(id: I, start: Date, end: Date, text: S) -> Event {
        Event {
            id: id.into(),
            start,
            end,
            text: text.into(),
            color: None,
            leading_decoration: None,
            trailing_decoration: None,
        }
    }

    pub fn color<S: Into<String>>(mut self, color: S) -> Event {
        self.color = Some(color.into());
        self
    }

    pub fn leading_decoration<S: Into<String>>(mut self, deco: S) -> Event {
        self.leading_decoration = Some(deco.into());
        self
    }

    pub fn trailing_decoration<S: Into<String>>(mut self, deco: S) -> Event {
        self.trailing_decoration = Some(deco.into());
        self
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.end < self.start {
            Err(LayoutError::InvalidRange {
                id: self.id.clone(),
                start: self.start,
                end: self.end,
            })
        } else {
            Ok(())
        }
    }

    /// Number of days covered by the event, counting both ends
    pub fn day_span(&self) -> i32 {
        days_between(self.start, self.end) + 1
    }

    pub fn covers(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    pub(crate) fn intersects(&self, first: Date, last: Date) -> bool {
        !(self.end < first || self.start > last)
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LayoutError {
    #[error("event {id} ends ({end}) before it starts ({start})")]
    InvalidRange { id: EventId, start: Date, end: Date },
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_validate() {
        let ev = Event::new("a", date!(2024 - 03 - 05), date!(2024 - 03 - 04), "Oops");
        assert_eq!(
            ev.validate(),
            Err(LayoutError::InvalidRange {
                id: EventId::from("a"),
                start: date!(2024 - 03 - 05),
                end: date!(2024 - 03 - 04),
            })
        );
        let ev = Event::new("b", date!(2024 - 03 - 04), date!(2024 - 03 - 04), "Fine");
        assert_eq!(ev.validate(), Ok(()));
    }

    #[test]
    fn test_day_span() {
        let ev = Event::new("a", date!(2024 - 02 - 28), date!(2024 - 03 - 01), "Leap");
        assert_eq!(ev.day_span(), 3);
        assert!(ev.covers(date!(2024 - 02 - 29)));
        assert!(!ev.covers(date!(2024 - 03 - 02)));
    }

    #[test]
    fn test_error_message() {
        let err = LayoutError::InvalidRange {
            id: EventId::from("trip"),
            start: date!(2024 - 03 - 05),
            end: date!(2024 - 03 - 04),
        };
        assert_eq!(
            err.to_string(),
            "event trip ends (2024-03-04) before it starts (2024-03-05)"
        );
    }
}
