use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jiff::civil::date;
use recur::{merge, RangeConstraints, RecurrenceRule, Session};

fn year_range() -> RangeConstraints {
    RangeConstraints::starting(date(2026, 1, 1)).until(date(2026, 12, 31))
}

// ---------------------------------------------------------------------------
// Descriptor parsing
// ---------------------------------------------------------------------------

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.bench_function("simple", |b| {
        b.iter(|| black_box("daily").parse::<RecurrenceRule>().unwrap());
    });

    group.bench_function("weekly_days", |b| {
        b.iter(|| black_box("weekly/2:mon,wed,fri").parse::<RecurrenceRule>().unwrap());
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Single-rule evaluation over one year
// ---------------------------------------------------------------------------

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");
    let range = year_range();

    let cases = [
        ("daily", "daily"),
        ("weekly_days", "weekly:mon,wed,fri"),
        ("monthly", "monthly"),
        ("monthly_nth", "monthly:last-fri"),
        ("yearly", "yearly"),
    ];
    for (name, descriptor) in cases {
        let rule: RecurrenceRule = descriptor.parse().unwrap();
        group.bench_function(name, |b| {
            b.iter(|| rule.dates(black_box(&range)));
        });
    }

    let excluded = year_range().excluding((1..=28).map(|d| date(2026, 2, d)));
    let daily = RecurrenceRule::daily();
    group.bench_function("daily_with_exclusions", |b| {
        b.iter(|| daily.dates(black_box(&excluded)));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Merging several rules
// ---------------------------------------------------------------------------

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    let session = Session::new(
        vec![
            "daily/2".parse().unwrap(),
            "weekly:sat,sun".parse().unwrap(),
            "monthly:first-mon".parse().unwrap(),
        ],
        year_range(),
    );
    let per_rule = session.per_rule();

    group.bench_function("three_rules", |b| {
        b.iter(|| merge(black_box(per_rule.clone()).into_iter().enumerate()));
    });

    group.bench_function("session_end_to_end", |b| {
        b.iter(|| black_box(&session).dates());
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_eval, bench_merge);
criterion_main!(benches);
