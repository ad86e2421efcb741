//! recur — calendar dates from recurrence rules.
//!
//! Rules repeat daily, weekly, monthly or yearly with an interval, optional
//! weekday selection and an optional "nth weekday of the month" pattern. A
//! shared [`RangeConstraints`] anchors them on a start date and bounds them by
//! an end date, an occurrence cap and a set of excluded dates. Several rules
//! are evaluated independently and merged into one ascending sequence that
//! remembers which rules produced each date.
//!
//! # Examples
//!
//! ```
//! use jiff::civil::date;
//! use recur::{RangeConstraints, RecurrenceRule, Session};
//!
//! let rules = vec![
//!     "weekly:mon,wed".parse::<RecurrenceRule>().unwrap(),
//!     "monthly:last-fri".parse().unwrap(),
//! ];
//! let range = RangeConstraints::starting(date(2024, 1, 1)).until(date(2024, 1, 31));
//! let session = Session::new(rules, range);
//!
//! for merged in session.dates() {
//!     println!("{} {:?}", merged.date, merged.rules);
//! }
//! ```

pub mod calendar;
pub mod display;
pub mod error;
pub mod eval;
pub mod ics;
pub mod merge;
pub mod range;
pub mod rule;
pub mod session;

pub use display::{DateFormat, Locale};
pub use error::RecurError;
pub use eval::{evaluate, nth_weekday_of_month};
pub use ics::EventTimes;
pub use merge::{merge, MergedDate};
pub use range::{parse_date, RangeConstraints, Window, DEFAULT_HORIZON_YEARS};
pub use rule::{Frequency, MonthlyPattern, Ordinal, RecurrenceRule, TimeOfDay, Weekday};
pub use session::{Advisory, Session};

// --- RecurrenceRule convenience methods ---

impl RecurrenceRule {
    /// Dates this rule produces within `range`.
    pub fn dates(&self, range: &RangeConstraints) -> Vec<jiff::civil::Date> {
        eval::evaluate(self, range)
    }

    /// Check whether `date` is produced by this rule within `range`.
    pub fn matches(&self, date: jiff::civil::Date, range: &RangeConstraints) -> bool {
        self.dates(range).binary_search(&date).is_ok()
    }
}
