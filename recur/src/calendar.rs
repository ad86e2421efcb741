//! Plain-text previews: a Sunday-first month grid and an attributed list.

use jiff::civil::Date;

use crate::display::{DateFormat, Locale};
use crate::merge::MergedDate;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const HEADER: &str = "Su  Mo  Tu  We  Th  Fr  Sa";

/// Render the month containing `month_of` as a grid.
///
/// Days produced by one rule carry `*`, days produced by several carry `+`.
/// Returns `None` if the month cannot be represented.
pub fn render_month(month_of: Date, dates: &[MergedDate]) -> Option<String> {
    let first = month_of.first_of_month();
    let name = MONTH_NAMES.get(usize::try_from(first.month() - 1).ok()?)?;

    let mut out = format!("{name} {}\n{HEADER}\n", first.year());
    let lead = usize::try_from(first.weekday().to_sunday_zero_offset()).ok()?;
    let mut cells: Vec<String> = vec!["   ".to_string(); lead];

    for day in 1..=first.days_in_month() {
        let date = Date::new(first.year(), first.month(), day).ok()?;
        let mark = match dates.binary_search_by_key(&date, |m| m.date) {
            Ok(i) if dates[i].is_shared() => '+',
            Ok(_) => '*',
            Err(_) => ' ',
        };
        cells.push(format!("{day:>2}{mark}"));
    }

    for week in cells.chunks(7) {
        out.push_str(week.join(" ").trim_end());
        out.push('\n');
    }
    Some(out)
}

/// List view: formatted date followed by the producing rule indices.
pub fn render_list(
    dates: &[MergedDate],
    format: DateFormat,
    locale: Locale,
    limit: Option<usize>,
) -> String {
    dates
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|m| {
            let rules = m
                .rules
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            format!("{}\t{rules}", format.format(m.date, locale))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge;
    use jiff::civil::date;

    #[test]
    fn test_month_grid() {
        let merged = merge([
            (0, vec![date(2024, 1, 1), date(2024, 1, 10)]),
            (1, vec![date(2024, 1, 10), date(2024, 1, 31)]),
        ]);
        let grid = render_month(date(2024, 1, 15), &merged).unwrap();
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines[0], "January 2024");
        assert_eq!(lines[1], HEADER);
        // 2024-01-01 is a Monday.
        assert_eq!(lines[2], "     1*  2   3   4   5   6");
        assert_eq!(lines[3], " 7   8   9  10+ 11  12  13");
        assert_eq!(lines[6], "28  29  30  31*");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_month_grid_sunday_start() {
        // September 2024 starts on a Sunday.
        let grid = render_month(date(2024, 9, 1), &[]).unwrap();
        assert_eq!(grid.lines().nth(2), Some(" 1   2   3   4   5   6   7"));
    }

    #[test]
    fn test_list_view() {
        let merged = merge([
            (0, vec![date(2024, 1, 1), date(2024, 1, 2)]),
            (1, vec![date(2024, 1, 2)]),
        ]);
        assert_eq!(
            render_list(&merged, DateFormat::Iso, Locale::EnUs, None),
            "2024-01-01\t0\n2024-01-02\t0,1"
        );
        assert_eq!(
            render_list(&merged, DateFormat::DayShortMonthYear, Locale::EnUs, Some(1)),
            "1 Jan 2024\t0"
        );
    }
}
