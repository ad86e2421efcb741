use std::collections::BTreeSet;

use jiff::civil::Date;
use jiff::Span;

use crate::error::RecurError;

/// Years added to the start date when no end date is given.
pub const DEFAULT_HORIZON_YEARS: i16 = 1;

/// Range, exclusion and termination constraints shared by every rule in a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RangeConstraints {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub exclusion_dates: BTreeSet<Date>,
    /// Per-rule match cap; 0 is treated as "no cap".
    pub end_after_occurrences: Option<u32>,
}

/// Resolved walk bounds for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: Date,
    pub end: Date,
    pub cap: Option<usize>,
}

impl RangeConstraints {
    pub fn starting(start: Date) -> Self {
        Self {
            start_date: Some(start),
            ..Self::default()
        }
    }

    pub fn until(mut self, end: Date) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn excluding(mut self, dates: impl IntoIterator<Item = Date>) -> Self {
        self.exclusion_dates.extend(dates);
        self
    }

    pub fn end_after(mut self, occurrences: u32) -> Self {
        self.end_after_occurrences = Some(occurrences);
        self
    }

    /// The end date the walk stops at: the explicit end, or start plus the default horizon.
    pub fn effective_end(&self) -> Option<Date> {
        let start = self.start_date?;
        match self.end_date {
            Some(end) => Some(end),
            None => Some(default_end(start)),
        }
    }

    /// Resolve into walk bounds. `None` when there is no start date to anchor on.
    pub fn resolve(&self) -> Option<Window> {
        let start = self.start_date?;
        let end = self.effective_end()?;
        let cap = self
            .end_after_occurrences
            .filter(|&n| n > 0)
            .map(|n| n as usize);
        Some(Window { start, end, cap })
    }

    pub fn is_excluded(&self, date: Date) -> bool {
        self.exclusion_dates.contains(&date)
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<Date, RecurError> {
    let s = s.trim();
    s.parse::<Date>().map_err(|e| RecurError::date(s, e))
}

/// Start plus the horizon, clamped to the month end (Feb 29 + 1y = Feb 28).
/// Saturates at the last representable date.
fn default_end(start: Date) -> Date {
    start
        .checked_add(Span::new().years(DEFAULT_HORIZON_YEARS))
        .unwrap_or(Date::MAX)
}
