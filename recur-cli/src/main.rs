use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use jiff::civil::Date;
use recur::{Advisory, DateFormat, Locale, RecurError, RecurrenceRule, Session, TimeOfDay};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recur", about = "Preview and export recurring calendar dates", version)]
struct Cli {
    /// Rule descriptor, repeatable (e.g. "daily/2", "weekly:mon,wed", "monthly:last-fri")
    #[arg(short, long = "rule", value_name = "RULE")]
    rules: Vec<RecurrenceRule>,

    /// First date of the recurrence (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = recur::parse_date)]
    start: Option<Date>,

    /// Last date considered (defaults to one year after start)
    #[arg(long, value_name = "DATE", value_parser = recur::parse_date)]
    end: Option<Date>,

    /// Date to leave out, repeatable
    #[arg(long = "exclude", value_name = "DATE", value_parser = recur::parse_date)]
    exclude: Vec<Date>,

    /// Stop each rule after this many dates
    #[arg(long, value_name = "N")]
    count: Option<u32>,

    /// Load rules and settings from a JSON session file
    #[arg(long, value_name = "FILE")]
    session: Option<PathBuf>,

    /// Output date format: yyyy-MM-dd, dd/MM/yyyy, MM/dd/yyyy, "d MMM yyyy"
    #[arg(long, value_name = "FMT")]
    format: Option<DateFormat>,

    /// Locale for month names: en-US, fr, de, es, zh-CN
    #[arg(long, value_name = "LOCALE")]
    locale: Option<Locale>,

    /// Event start time for --ics (HH:MM, UTC)
    #[arg(long, value_name = "HH:MM")]
    start_time: Option<TimeOfDay>,

    /// Event end time for --ics (defaults to the start time)
    #[arg(long, value_name = "HH:MM")]
    end_time: Option<TimeOfDay>,

    /// Print an .ics calendar instead of a list
    #[arg(long, conflicts_with_all = ["json", "calendar"])]
    ics: bool,

    /// Print a month grid of the start month
    #[arg(long, conflicts_with = "json")]
    calendar: bool,

    /// Append the producing rule indices to each listed date
    #[arg(long)]
    show_rules: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Validate inputs without computing
    #[arg(long)]
    check: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_session(cli: &Cli) -> Result<Session, RecurError> {
    let mut session = match &cli.session {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading session");
            let json = std::fs::read_to_string(path)?;
            Session::from_json(&json)?
        }
        None => Session::default(),
    };

    session.rules.extend(cli.rules.iter().cloned());
    if let Some(start) = cli.start {
        session.range.start_date = Some(start);
    }
    if let Some(end) = cli.end {
        session.range.end_date = Some(end);
    }
    session.range.exclusion_dates.extend(cli.exclude.iter().copied());
    if let Some(count) = cli.count {
        session.range.end_after_occurrences = Some(count);
    }
    if let Some(format) = cli.format {
        session.date_format = format;
    }
    if let Some(locale) = cli.locale {
        session.locale = locale;
    }
    if cli.start_time.is_some() {
        session.start_time = cli.start_time;
    }
    if cli.end_time.is_some() {
        session.end_time = cli.end_time;
    }
    Ok(session)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let session = match load_session(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e.display_rich());
            process::exit(1);
        }
    };

    if session.rules.is_empty() {
        eprintln!("error: {}", Advisory::NoRules);
        process::exit(2);
    }

    if cli.check {
        println!("\u{2713} valid");
        process::exit(0);
    }

    let dates = session.dates();
    for advisory in session.advisories(&dates) {
        eprintln!("warning: {advisory}");
    }

    if cli.ics {
        println!("{}", session.to_ics(&dates));
        return;
    }

    if cli.json {
        match serde_json::to_string(&dates) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize: {e}");
                process::exit(1);
            }
        }
        return;
    }

    if cli.calendar {
        let month = session
            .range
            .start_date
            .or_else(|| dates.first().map(|m| m.date));
        if let Some(grid) = month.and_then(|m| recur::calendar::render_month(m, &dates)) {
            print!("{grid}");
        }
        return;
    }

    if dates.is_empty() {
        return;
    }
    if cli.show_rules {
        println!(
            "{}",
            recur::calendar::render_list(&dates, session.date_format, session.locale, None)
        );
    } else {
        println!("{}", session.format_list(&dates));
    }
}
