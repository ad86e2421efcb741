//! Basic recur walkthrough: parse rules, merge their dates, render and export.

use jiff::civil::date;
use recur::{EventTimes, RangeConstraints, RecurrenceRule, Session, TimeOfDay};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rules = ["weekly/2:tue,thu", "monthly:last-fri", "daily/10"]
        .iter()
        .map(|s| s.parse())
        .collect::<Result<Vec<RecurrenceRule>, _>>()?;

    let range = RangeConstraints::starting(date(2026, 3, 1))
        .until(date(2026, 5, 31))
        .excluding([date(2026, 4, 24)]);

    let session = Session::new(rules, range);
    let dates = session.dates();

    println!("{} dates", dates.len());
    for merged in &dates {
        println!("{}  rules {:?}", merged.date, merged.rules);
    }

    for advisory in session.advisories(&dates) {
        println!("warning: {advisory}");
    }

    if let Some(grid) = recur::calendar::render_month(date(2026, 3, 1), &dates) {
        println!("\n{grid}");
    }

    let nine: TimeOfDay = "09:00".parse()?;
    let ics = recur::ics::to_ics(dates.iter().map(|m| &m.date), EventTimes::at(nine));
    println!("{} bytes of ics", ics.len());

    Ok(())
}
