use std::collections::BTreeSet;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RecurError;

/// One recurrence descriptor: frequency + interval + weekday/pattern selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    #[cfg_attr(
        feature = "serde",
        serde(default = "default_interval", deserialize_with = "deserialize_interval")
    )]
    pub interval: u32,
    /// Selected days, only consulted by weekly rules.
    #[cfg_attr(feature = "serde", serde(default))]
    pub weekdays: BTreeSet<Weekday>,
    /// Nth-weekday selection, only consulted by monthly rules.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pattern: MonthlyPattern,
}

impl RecurrenceRule {
    /// A rule repeating every single unit of `frequency`.
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: 1,
            weekdays: BTreeSet::new(),
            pattern: MonthlyPattern::None,
        }
    }

    pub fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    pub fn weekly() -> Self {
        Self::new(Frequency::Weekly)
    }

    pub fn monthly() -> Self {
        Self::new(Frequency::Monthly)
    }

    pub fn yearly() -> Self {
        Self::new(Frequency::Yearly)
    }

    /// Set the step count.
    pub fn every(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Select weekdays for a weekly rule.
    pub fn on(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.weekdays = days.into_iter().collect();
        self
    }

    /// Anchor a monthly rule on the nth occurrence of a weekday.
    pub fn nth(mut self, ordinal: Ordinal, weekday: Weekday) -> Self {
        self.pattern = MonthlyPattern::NthWeekday { ordinal, weekday };
        self
    }

    /// Interval as used by the walk. Zero never reaches the loop.
    pub fn effective_interval(&self) -> u32 {
        self.interval.max(1)
    }

    /// Parse a compact descriptor such as `weekly/2:mon,wed`.
    pub fn parse(input: &str) -> Result<Self, RecurError> {
        parse_rule(input)
    }
}

impl FromStr for RecurrenceRule {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
fn default_interval() -> u32 {
    1
}

#[cfg(feature = "serde")]
fn deserialize_interval<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let n = u32::deserialize(deserializer)?;
    if n == 0 {
        return Err(serde::de::Error::custom("interval must be at least 1"));
    }
    Ok(n)
}

/// Step unit of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl FromStr for Frequency {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == lower)
            .ok_or_else(|| {
                let err = RecurError::rule(format!("unknown frequency '{s}'"), s);
                match suggest(&lower, Self::ALL.map(Frequency::as_str)) {
                    Some(sug) => err.with_suggestion(sug),
                    None => err,
                }
            })
    }
}

/// Day of week, ordered Sunday first (Sunday=0 .. Saturday=6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "sunday",
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
        }
    }

    pub fn short(self) -> &'static str {
        &self.as_str()[..3]
    }

    /// Sunday-zero day number.
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n)).copied()
    }

    pub fn to_jiff(self) -> jiff::civil::Weekday {
        match self {
            Self::Sunday => jiff::civil::Weekday::Sunday,
            Self::Monday => jiff::civil::Weekday::Monday,
            Self::Tuesday => jiff::civil::Weekday::Tuesday,
            Self::Wednesday => jiff::civil::Weekday::Wednesday,
            Self::Thursday => jiff::civil::Weekday::Thursday,
            Self::Friday => jiff::civil::Weekday::Friday,
            Self::Saturday => jiff::civil::Weekday::Saturday,
        }
    }

    pub fn from_jiff(wd: jiff::civil::Weekday) -> Self {
        match wd {
            jiff::civil::Weekday::Sunday => Self::Sunday,
            jiff::civil::Weekday::Monday => Self::Monday,
            jiff::civil::Weekday::Tuesday => Self::Tuesday,
            jiff::civil::Weekday::Wednesday => Self::Wednesday,
            jiff::civil::Weekday::Thursday => Self::Thursday,
            jiff::civil::Weekday::Friday => Self::Friday,
            jiff::civil::Weekday::Saturday => Self::Saturday,
        }
    }

    pub fn of(date: jiff::civil::Date) -> Self {
        Self::from_jiff(date.weekday())
    }
}

impl FromStr for Weekday {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_weekday(s).ok_or_else(|| RecurError::InvalidWeekday(s.to_string()))
    }
}

/// Accepts full or three-letter names in any case, or a Sunday-zero number.
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u8>() {
        return Weekday::from_number(n);
    }
    let lower = s.to_lowercase();
    Weekday::ALL
        .into_iter()
        .find(|wd| wd.as_str() == lower || wd.short() == lower)
}

#[cfg(feature = "serde")]
impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WeekdayVisitor;

        impl serde::de::Visitor<'_> for WeekdayVisitor {
            type Value = Weekday;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a weekday name or a number from 0 (sunday) to 6")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Weekday, E> {
                parse_weekday(v).ok_or_else(|| E::custom(format!("unknown weekday: {v}")))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Weekday, E> {
                u8::try_from(v)
                    .ok()
                    .and_then(Weekday::from_number)
                    .ok_or_else(|| E::custom(format!("weekday out of range: {v}")))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Weekday, E> {
                u8::try_from(v)
                    .ok()
                    .and_then(Weekday::from_number)
                    .ok_or_else(|| E::custom(format!("weekday out of range: {v}")))
            }
        }

        deserializer.deserialize_any(WeekdayVisitor)
    }
}

/// Which occurrence of a weekday within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Ordinal {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl Ordinal {
    pub const ALL: [Ordinal; 5] = [
        Self::First,
        Self::Second,
        Self::Third,
        Self::Fourth,
        Self::Last,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
            Self::Fourth => "fourth",
            Self::Last => "last",
        }
    }

    /// Zero-based occurrence index, `None` for `Last`.
    pub fn index(self) -> Option<usize> {
        match self {
            Self::First => Some(0),
            Self::Second => Some(1),
            Self::Third => Some(2),
            Self::Fourth => Some(3),
            Self::Last => None,
        }
    }
}

impl FromStr for Ordinal {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|o| o.as_str() == lower)
            .ok_or_else(|| RecurError::pattern(format!("unknown ordinal '{s}'"), s))
    }
}

/// Monthly selection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MonthlyPattern {
    /// Same day number as the walk cursor.
    #[default]
    None,
    /// e.g. "second tuesday", "last friday".
    NthWeekday { ordinal: Ordinal, weekday: Weekday },
}

impl FromStr for MonthlyPattern {
    type Err = RecurError;

    /// Parses `none` or `<ordinal>-<weekday>` (e.g. `first-Mon`, `last-friday`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("none") {
            return Ok(Self::None);
        }
        let Some((nth, day)) = s.split_once('-') else {
            return Err(
                RecurError::pattern("expected <ordinal>-<weekday>", s).with_suggestion("first-mon")
            );
        };
        let ordinal = nth.parse::<Ordinal>().map_err(|_| {
            let err = RecurError::pattern(format!("unknown ordinal '{nth}'"), s);
            match suggest(&nth.to_lowercase(), Ordinal::ALL.map(Ordinal::as_str)) {
                Some(sug) => err.with_suggestion(format!("{sug}-{day}")),
                None => err,
            }
        })?;
        let weekday = parse_weekday(day)
            .ok_or_else(|| RecurError::pattern(format!("unknown weekday '{day}'"), s))?;
        Ok(Self::NthWeekday { ordinal, weekday })
    }
}

#[cfg(feature = "serde")]
impl Serialize for MonthlyPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for MonthlyPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Clock time (hours and minutes) for timed export blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }
}

impl FromStr for TimeOfDay {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RecurError::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if m.len() != 2 || h.is_empty() || h.len() > 2 {
            return Err(invalid());
        }
        let hour = h.parse().map_err(|_| invalid())?;
        let minute = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}

#[cfg(feature = "serde")]
impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// `FREQ[/INTERVAL][:SELECTION]`
fn parse_rule(input: &str) -> Result<RecurrenceRule, RecurError> {
    let trimmed = input.trim();
    let (head, selection) = match trimmed.split_once(':') {
        Some((head, selection)) => (head, Some(selection.trim())),
        None => (trimmed, None),
    };
    let (freq, interval) = match head.split_once('/') {
        Some((freq, interval)) => (freq.trim(), Some(interval.trim())),
        None => (head.trim(), None),
    };

    let frequency = freq.parse::<Frequency>().map_err(|err| match err.suggestion() {
        Some(sug) => {
            let fixed = trimmed.replacen(freq, sug, 1);
            RecurError::rule(format!("unknown frequency '{freq}'"), input).with_suggestion(fixed)
        }
        None => RecurError::rule(format!("unknown frequency '{freq}'"), input),
    })?;

    let mut rule = RecurrenceRule::new(frequency);
    if let Some(raw) = interval {
        rule.interval = match raw.parse::<u32>() {
            Ok(n) if n >= 1 => n,
            _ => return Err(RecurError::InvalidInterval(raw.to_string())),
        };
    }

    let Some(selection) = selection else {
        return Ok(rule);
    };
    match frequency {
        Frequency::Weekly => {
            if selection.is_empty() {
                return Err(RecurError::rule("empty weekday list", input)
                    .with_suggestion(format!("{head}:mon,wed")));
            }
            for part in selection.split(',') {
                let day = part
                    .parse::<Weekday>()
                    .map_err(|_| RecurError::rule(format!("unknown weekday '{}'", part.trim()), input))?;
                rule.weekdays.insert(day);
            }
        }
        Frequency::Monthly => {
            rule.pattern = selection.parse()?;
        }
        Frequency::Daily | Frequency::Yearly => {
            return Err(
                RecurError::rule(format!("{} rules take no ':' selection", frequency.as_str()), input)
                    .with_suggestion(head.trim()),
            );
        }
    }
    Ok(rule)
}

/// Pick the candidate sharing the longest prefix with `input` (at least two chars).
fn suggest<const N: usize>(input: &str, candidates: [&'static str; N]) -> Option<&'static str> {
    candidates
        .into_iter()
        .map(|c| {
            let common = c.chars().zip(input.chars()).take_while(|(a, b)| a == b).count();
            (common, c)
        })
        .filter(|(common, _)| *common >= 2)
        .max_by_key(|(common, _)| *common)
        .map(|(_, c)| c)
}
