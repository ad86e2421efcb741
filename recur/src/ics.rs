//! Calendar-interchange (`.ics`) export of generated dates.
//!
//! Each date becomes one `VEVENT`. Without a start time the event is all-day
//! (`VALUE=DATE`, ending the next day); with one it is a timed block stamped
//! in UTC. The payload is a preview export, not a full RFC 5545 producer.

use jiff::civil::Date;

use crate::rule::TimeOfDay;

pub const PRODID: &str = "-//recur//EN";

/// Clock times applied to every exported event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventTimes {
    pub start: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
}

impl EventTimes {
    pub fn all_day() -> Self {
        Self::default()
    }

    pub fn at(start: TimeOfDay) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn until(mut self, end: TimeOfDay) -> Self {
        self.end = Some(end);
        self
    }
}

/// Render `dates` as a VCALENDAR document with CRLF line endings.
pub fn to_ics<'a>(dates: impl IntoIterator<Item = &'a Date>, times: EventTimes) -> String {
    let dates: Vec<&Date> = dates.into_iter().collect();
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
    ];
    for (i, &date) in dates.iter().enumerate() {
        lines.push("BEGIN:VEVENT".to_string());
        match times.start {
            Some(start) => {
                let end = times.end.unwrap_or(start);
                lines.push(format!("DTSTART:{}", date_time_stamp(*date, start)));
                lines.push(format!("DTEND:{}", date_time_stamp(*date, end)));
            }
            None => {
                lines.push(format!("DTSTART;VALUE=DATE:{}", date_stamp(*date)));
                // The last representable date has no successor; end on the same day.
                let next = date.tomorrow().unwrap_or(*date);
                lines.push(format!("DTEND;VALUE=DATE:{}", date_stamp(next)));
            }
        }
        lines.push(format!("SUMMARY:Recurring Event {}", i + 1));
        lines.push("END:VEVENT".to_string());
    }
    lines.push("END:VCALENDAR".to_string());
    tracing::debug!(events = dates.len(), timed = times.start.is_some(), "rendered ics export");
    lines.join("\r\n")
}

fn date_stamp(date: Date) -> String {
    format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

fn date_time_stamp(date: Date, time: TimeOfDay) -> String {
    format!("{}T{:02}{:02}00Z", date_stamp(date), time.hour, time.minute)
}
