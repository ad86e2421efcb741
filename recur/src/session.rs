use std::fmt;

use jiff::civil::Date;

use crate::display::{DateFormat, Locale};
use crate::eval::evaluate;
use crate::ics::{self, EventTimes};
use crate::merge::{merge, MergedDate};
use crate::range::RangeConstraints;
use crate::rule::{RecurrenceRule, TimeOfDay};

/// A set of rules sharing one range, plus how the results are presented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Session {
    pub rules: Vec<RecurrenceRule>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub range: RangeConstraints,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub locale: Locale,
    pub date_format: DateFormat,
}

impl Session {
    pub fn new(rules: Vec<RecurrenceRule>, range: RangeConstraints) -> Self {
        Self {
            rules,
            range,
            ..Self::default()
        }
    }

    /// Load a session from its JSON form.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Each rule's own matches, in rule order.
    pub fn per_rule(&self) -> Vec<Vec<Date>> {
        self.rules
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                let dates = evaluate(rule, &self.range);
                tracing::debug!(index, %rule, count = dates.len(), "rule evaluated");
                dates
            })
            .collect()
    }

    /// Merged, attributed dates across all rules.
    pub fn dates(&self) -> Vec<MergedDate> {
        merge(self.per_rule().into_iter().enumerate())
    }

    pub fn event_times(&self) -> EventTimes {
        EventTimes {
            start: self.start_time,
            end: self.end_time,
        }
    }

    /// Export merged dates using the session's clock times.
    pub fn to_ics(&self, dates: &[MergedDate]) -> String {
        ics::to_ics(dates.iter().map(|m| &m.date), self.event_times())
    }

    /// Newline-separated list in the session's format and locale.
    pub fn format_list(&self, dates: &[MergedDate]) -> String {
        crate::display::format_dates(dates.iter().map(|m| &m.date), self.date_format, self.locale)
    }

    /// Advisory messages for a result computed from this session.
    pub fn advisories(&self, dates: &[MergedDate]) -> Vec<Advisory> {
        let mut out = Vec::new();
        if self.rules.is_empty() {
            out.push(Advisory::NoRules);
        }
        if self.range.start_date.is_none() {
            out.push(Advisory::MissingStartDate);
        }
        if dates.is_empty() && !self.rules.is_empty() && self.range.start_date.is_some() {
            out.push(Advisory::NoMatches);
        }
        out
    }
}

/// Presentation-level validation, derived from inputs and output emptiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    NoRules,
    MissingStartDate,
    NoMatches,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoRules => "At least one recurrence rule is required.",
            Self::MissingStartDate => "Start date is required.",
            Self::NoMatches => "No dates match the current recurrence settings.",
        })
    }
}
