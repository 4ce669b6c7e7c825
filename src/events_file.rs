use crate::YMD_FMT;
use barcal::layout::{Event, EventId};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::Date;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
struct EventRecord {
    id: Option<String>,
    start: String,
    end: String,
    #[serde(default)]
    text: String,
    color: Option<String>,
    #[serde(alias = "before")]
    leading: Option<String>,
    #[serde(alias = "after")]
    trailing: Option<String>,
}

impl EventRecord {
    fn into_event(self, index: usize) -> Result<Event, EventsFileError> {
        let start = parse_date(index, "start", self.start)?;
        let end = parse_date(index, "end", self.end)?;
        let id = self
            .id
            .map_or_else(|| EventId(format!("event-{index}")), EventId);
        Ok(Event {
            id,
            start,
            end,
            text: self.text,
            color: self.color,
            leading_decoration: self.leading,
            trailing_decoration: self.trailing,
        })
    }
}

fn parse_date(index: usize, field: &'static str, value: String) -> Result<Date, EventsFileError> {
    Date::parse(&value, &YMD_FMT).map_err(|source| EventsFileError::Date {
        index,
        field,
        value,
        source,
    })
}

#[derive(Debug, Error)]
pub(crate) enum EventsFileError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse events JSON")]
    Json(#[from] serde_json::Error),
    #[error("event #{index}: invalid {field} date {value:?}")]
    Date {
        index: usize,
        field: &'static str,
        value: String,
        source: time::error::Parse,
    },
}

/// Parses a JSON array of events.  Ranges are not validated here; events
/// ending before they start are reported by the layout pass.
pub(crate) fn parse_events(src: &str) -> Result<Vec<Event>, EventsFileError> {
    let records = serde_json::from_str::<Vec<EventRecord>>(src)?;
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.into_event(i))
        .collect()
}

pub(crate) fn load_events(path: &Path) -> Result<Vec<Event>, EventsFileError> {
    let src = fs::read_to_string(path).map_err(|source| EventsFileError::Read {
        path: path.to_owned(),
        source,
    })?;
    parse_events(&src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_parse_events() {
        let src = r##"[
            {"id": "trip", "start": "2024-03-09", "end": "2024-03-12", "text": "Trip",
             "color": "#123456", "before": "<", "after": ">"},
            {"start": "2024-03-20", "end": "2024-03-20", "leading": "*"}
        ]"##;
        let events = parse_events(src).unwrap();
        assert_eq!(
            events,
            [
                Event::new("trip", date!(2024 - 03 - 09), date!(2024 - 03 - 12), "Trip")
                    .color("#123456")
                    .leading_decoration("<")
                    .trailing_decoration(">"),
                Event::new("event-1", date!(2024 - 03 - 20), date!(2024 - 03 - 20), "")
                    .leading_decoration("*"),
            ]
        );
    }

    #[test]
    fn test_bad_date() {
        let src = r#"[{"start": "2024-03-09", "end": "2024-13-01"}]"#;
        let err = parse_events(src).unwrap_err();
        assert!(matches!(
            err,
            EventsFileError::Date {
                index: 0,
                field: "end",
                ..
            }
        ));
        assert_eq!(err.to_string(), r#"event #0: invalid end date "2024-13-01""#);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            parse_events(r#"{"start": "2024-03-09"}"#),
            Err(EventsFileError::Json(_))
        ));
    }

    #[test]
    fn test_backwards_range_is_kept() {
        let src = r#"[{"start": "2024-03-09", "end": "2024-03-01"}]"#;
        let events = parse_events(src).unwrap();
        assert!(events[0].validate().is_err());
    }
}
