use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dayline::calendar::DayWindow;
use dayline::config::TimelineConfig;
use dayline::ir::Event;
use dayline::layout::compute_day_layout;
use dayline::parser::parse_events;
use dayline::render::render_svg;
use dayline::theme::Theme;
use std::hint::black_box;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

/// `count` events with staggered starts so clusters grow wide.
fn dense_day(count: usize, stride_minutes: i64, length_minutes: i64) -> Vec<Event> {
    let base = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|idx| {
            let start = base + Duration::minutes((idx as i64 * stride_minutes) % (24 * 60));
            let length = length_minutes + (idx as i64 % 5) * 15;
            Event::new(
                format!("e{idx}"),
                start,
                start + Duration::minutes(length),
                format!("Event {idx}"),
            )
        })
        .collect()
}

fn fixture() -> &'static str {
    include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/benches/fixtures/busy_day.txt"
    ))
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("day_layout");
    let window = DayWindow::utc(date());
    let config = TimelineConfig::default();
    for (count, stride, length) in [(20usize, 45i64, 60i64), (200, 7, 90), (1000, 1, 120)] {
        let events = dense_day(count, stride, length);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("dense_{count}_{stride}_{length}")),
            &events,
            |b, events| {
                b.iter(|| {
                    let layout = compute_day_layout(black_box(events), &window, &config, 375.0);
                    black_box(layout.rects.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_fixture(c: &mut Criterion) {
    let window = DayWindow::utc(date());
    let config = TimelineConfig::default();
    let theme = Theme::light();
    let events = parse_events(fixture(), chrono_tz::UTC).expect("parse failed");

    c.bench_function("parse_busy_day", |b| {
        b.iter(|| black_box(parse_events(black_box(fixture()), chrono_tz::UTC).map(|e| e.len())))
    });
    c.bench_function("layout_busy_day", |b| {
        b.iter(|| {
            let layout = compute_day_layout(black_box(&events), &window, &config, 375.0);
            black_box(layout.cluster_count);
        })
    });
    let layout = compute_day_layout(&events, &window, &config, 375.0);
    c.bench_function("render_busy_day", |b| {
        b.iter(|| black_box(render_svg(black_box(&layout), &events, &theme, &config).len()))
    });
}

criterion_group!(benches, bench_layout, bench_fixture);
criterion_main!(benches);
