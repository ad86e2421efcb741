use jiff::civil::Date;
use jiff::Span;

use crate::range::{RangeConstraints, Window};
use crate::rule::{Frequency, MonthlyPattern, Ordinal, RecurrenceRule, Weekday};

/// Enumerate the dates matching `rule` within `range`, in chronological order.
///
/// Never fails: a missing start date, an unreachable nth weekday or an end
/// before the start all just produce fewer (or no) dates.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(frequency = rule.frequency.as_str(), interval = rule.interval)
)]
pub fn evaluate(rule: &RecurrenceRule, range: &RangeConstraints) -> Vec<Date> {
    let Some(window) = range.resolve() else {
        tracing::debug!("no start date, nothing to evaluate");
        return Vec::new();
    };

    let mut walk = Walk::new(window, range);
    let step = i64::from(rule.effective_interval());

    for k in 0i64.. {
        let Some(cursor) = k
            .checked_mul(step)
            .and_then(|n| cursor_at(rule.frequency, window.start, n))
        else {
            break;
        };
        if cursor > window.end {
            break;
        }

        let done = match rule.frequency {
            Frequency::Daily | Frequency::Yearly => walk.offer(cursor),
            Frequency::Weekly if rule.weekdays.is_empty() => walk.offer(cursor),
            Frequency::Weekly => week_window(rule, cursor, &mut walk),
            Frequency::Monthly => match rule.pattern {
                MonthlyPattern::None => walk.offer(cursor),
                MonthlyPattern::NthWeekday { ordinal, weekday } => {
                    match nth_weekday_of_month(cursor.year(), cursor.month(), weekday, ordinal) {
                        Some(day) if walk.in_window(day) => walk.offer(day),
                        _ => false,
                    }
                }
            },
        };
        if done {
            break;
        }
    }

    tracing::debug!(matches = walk.matches.len(), "evaluation complete");
    walk.matches
}

/// The `n`th step from `start`, computed from the anchor so month-end
/// clamping never drifts (Jan 31 -> Feb 29 -> Mar 31).
fn cursor_at(frequency: Frequency, start: Date, n: i64) -> Option<Date> {
    let span = match frequency {
        Frequency::Daily => Span::new().try_days(n),
        Frequency::Weekly => Span::new().try_weeks(n),
        Frequency::Monthly => Span::new().try_months(n),
        Frequency::Yearly => Span::new().try_years(n),
    }
    .ok()?;
    start.checked_add(span).ok()
}

/// Offer each selected weekday in the 7 days starting at `cursor`.
fn week_window(rule: &RecurrenceRule, cursor: Date, walk: &mut Walk<'_>) -> bool {
    let mut day = cursor;
    for i in 0..7 {
        if i > 0 {
            match day.tomorrow() {
                Ok(next) => day = next,
                Err(_) => return false,
            }
        }
        if rule.weekdays.contains(&Weekday::of(day)) && walk.in_window(day) && walk.offer(day) {
            return true;
        }
    }
    false
}

/// Accumulates matches and applies exclusions and the occurrence cap.
struct Walk<'a> {
    window: Window,
    range: &'a RangeConstraints,
    matches: Vec<Date>,
}

impl<'a> Walk<'a> {
    fn new(window: Window, range: &'a RangeConstraints) -> Self {
        Self {
            window,
            range,
            matches: Vec::new(),
        }
    }

    fn in_window(&self, date: Date) -> bool {
        date >= self.window.start && date <= self.window.end
    }

    /// Accept a candidate unless excluded. Returns true once the cap is reached.
    fn offer(&mut self, date: Date) -> bool {
        if self.range.is_excluded(date) {
            tracing::trace!(%date, "candidate excluded");
            return false;
        }
        self.matches.push(date);
        self.window.cap.is_some_and(|cap| self.matches.len() >= cap)
    }
}

/// The `ordinal` occurrence of `weekday` in the given month, scanning day by day.
///
/// Returns `None` for an invalid month or when the month has too few
/// occurrences (e.g. a fourth that isn't there never becomes a fifth).
pub fn nth_weekday_of_month(year: i16, month: i8, weekday: Weekday, ordinal: Ordinal) -> Option<Date> {
    let first = Date::new(year, month, 1).ok()?;
    let target = weekday.to_jiff();
    let mut seen = 0usize;
    let mut last = None;
    for day in 1..=first.days_in_month() {
        let date = Date::new(year, month, day).ok()?;
        if date.weekday() != target {
            continue;
        }
        if ordinal.index() == Some(seen) {
            return Some(date);
        }
        seen += 1;
        last = Some(date);
    }
    match ordinal {
        Ordinal::Last => last,
        _ => None,
    }
}
