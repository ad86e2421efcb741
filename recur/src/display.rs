use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;

use crate::error::RecurError;
use crate::rule::*;

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MonthlyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthlyPattern::None => f.write_str("none"),
            MonthlyPattern::NthWeekday { ordinal, weekday } => {
                write!(f, "{}-{}", ordinal.as_str(), weekday.short())
            }
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Compact descriptor form, parseable back with `RecurrenceRule::parse`.
///
/// Selections that the frequency ignores (weekdays on a monthly rule, say)
/// are not written.
impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.frequency)?;
        if self.interval > 1 {
            write!(f, "/{}", self.interval)?;
        }
        match self.frequency {
            Frequency::Weekly if !self.weekdays.is_empty() => {
                write!(f, ":")?;
                for (i, day) in self.weekdays.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", day.short())?;
                }
            }
            Frequency::Monthly if self.pattern != MonthlyPattern::None => {
                write!(f, ":{}", self.pattern)?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// Date templates offered for copied lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// `yyyy-MM-dd`
    #[default]
    Iso,
    /// `dd/MM/yyyy`
    DayMonthYear,
    /// `MM/dd/yyyy`
    MonthDayYear,
    /// `d MMM yyyy`
    DayShortMonthYear,
}

impl DateFormat {
    pub const ALL: [DateFormat; 4] = [
        Self::Iso,
        Self::DayMonthYear,
        Self::MonthDayYear,
        Self::DayShortMonthYear,
    ];

    pub fn template(self) -> &'static str {
        match self {
            Self::Iso => "yyyy-MM-dd",
            Self::DayMonthYear => "dd/MM/yyyy",
            Self::MonthDayYear => "MM/dd/yyyy",
            Self::DayShortMonthYear => "d MMM yyyy",
        }
    }

    /// Upper-case spelling, also accepted on input.
    fn alias(self) -> &'static str {
        match self {
            Self::Iso => "YYYY-MM-DD",
            Self::DayMonthYear => "DD/MM/YYYY",
            Self::MonthDayYear => "MM/DD/YYYY",
            Self::DayShortMonthYear => "D MMM YYYY",
        }
    }

    pub fn format(self, date: Date, locale: Locale) -> String {
        let (y, m, d) = (date.year(), date.month(), date.day());
        match self {
            Self::Iso => format!("{y:04}-{m:02}-{d:02}"),
            Self::DayMonthYear => format!("{d:02}/{m:02}/{y:04}"),
            Self::MonthDayYear => format!("{m:02}/{d:02}/{y:04}"),
            Self::DayShortMonthYear => format!("{d} {} {y:04}", locale.short_month(m)),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template())
    }
}

impl FromStr for DateFormat {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|fmt| fmt.template() == s || fmt.alias() == s)
            .ok_or_else(|| RecurError::UnknownFormat(s.to_string()))
    }
}

/// Locales supported for month names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    EnUs,
    Fr,
    De,
    Es,
    ZhCn,
}

impl Locale {
    pub const ALL: [Locale; 5] = [Self::EnUs, Self::Fr, Self::De, Self::Es, Self::ZhCn];

    pub fn tag(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::Fr => "fr",
            Self::De => "de",
            Self::Es => "es",
            Self::ZhCn => "zh-CN",
        }
    }

    fn short_months(self) -> [&'static str; 12] {
        match self {
            Self::EnUs => [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ],
            Self::Fr => [
                "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
                "nov.", "déc.",
            ],
            Self::De => [
                "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.",
                "Nov.", "Dez.",
            ],
            Self::Es => [
                "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
            ],
            Self::ZhCn => [
                "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月",
                "12月",
            ],
        }
    }

    /// Abbreviated month name for a 1-based month.
    pub fn short_month(self, month: i8) -> &'static str {
        usize::try_from(month - 1)
            .ok()
            .and_then(|i| self.short_months().get(i).copied())
            .unwrap_or("?")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.tag().eq_ignore_ascii_case(s) || l.tag().replace('-', "_").eq_ignore_ascii_case(s))
            .ok_or_else(|| RecurError::UnknownLocale(s.to_string()))
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::{DateFormat, Locale};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for DateFormat {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.template())
        }
    }

    impl<'de> Deserialize<'de> for DateFormat {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        }
    }

    impl Serialize for Locale {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.tag())
        }
    }

    impl<'de> Deserialize<'de> for Locale {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        }
    }
}

/// One formatted date per line, the text placed on the clipboard.
pub fn format_dates<'a>(
    dates: impl IntoIterator<Item = &'a Date>,
    format: DateFormat,
    locale: Locale,
) -> String {
    dates
        .into_iter()
        .map(|d| format.format(*d, locale))
        .collect::<Vec<_>>()
        .join("\n")
}
