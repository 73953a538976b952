mod cluster;
mod mapper;
mod pack;
mod ruler;
pub(crate) mod text;
pub(crate) mod types;
pub use cluster::cluster_spans;
pub use mapper::TimeMapper;
pub use pack::{pack_cluster, pack_spans};
pub use ruler::{hour_labels, hour_marks, now_indicator, now_label};
pub use types::*;

use crate::calendar::DayWindow;
use crate::config::TimelineConfig;
use crate::ir::EventInterval;
use chrono::{DateTime, Utc};

/// Normalizes, filters and sorts the events that take part in the day.
///
/// Ends before starts are clamped to zero duration and every span is clipped
/// to the window. Order is (start, end, input index): a point event sorts
/// ahead of longer events sharing its start, so it never joins their cluster.
pub fn day_spans<E: AsRef<EventInterval>>(
    events: &[E],
    window: &DayWindow,
) -> Vec<Span<DateTime<Utc>>> {
    let mut spans = Vec::with_capacity(events.len());
    for (index, event) in events.iter().enumerate() {
        let interval = event.as_ref();
        let mut end = interval.end;
        if end < interval.start {
            log::warn!(
                "event {} ends before it starts, laying it out as zero duration",
                interval.id
            );
            end = interval.start;
        }
        if !window.intersects(interval.start, end) {
            continue;
        }
        spans.push(Span::new(
            index,
            window.clamp(interval.start),
            window.clamp(end),
        ));
    }
    spans.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(a.end.cmp(&b.end))
            .then(a.index.cmp(&b.index))
    });
    spans
}

/// Lays out one day of events for a view `width` wide.
///
/// Pure: the same events, window, config and width always produce the same
/// rectangles. Events that do not touch the day are left out.
pub fn compute_day_layout<E: AsRef<EventInterval>>(
    events: &[E],
    window: &DayWindow,
    config: &TimelineConfig,
    width: f32,
) -> DayLayout {
    let mapper = TimeMapper::from_config(config);
    let spans = day_spans(events, window);
    let clusters = cluster_spans(&spans);
    let available = (width - config.left_inset).max(0.0);

    let mut rects = Vec::with_capacity(spans.len());
    let mut widest = 0;
    for (cluster_idx, cluster) in clusters.iter().enumerate() {
        let packed = pack_cluster(cluster);
        widest = widest.max(packed.column_count);
        log::trace!(
            "cluster {cluster_idx}: {} events in {} columns",
            cluster.len(),
            packed.column_count
        );

        let slot_width = available / packed.column_count as f32;
        for (span, &column) in cluster.spans.iter().zip(&packed.columns) {
            let start_hour = window.hour_fraction(span.start);
            // DST fall-back can make the wall clock run backwards inside one
            // event; the minimum height keeps such boxes visible.
            let end_hour = window.hour_fraction(span.end);
            let top = mapper.position_of(start_hour);
            let bottom = mapper
                .position_of(end_hour)
                .max(top + config.min_event_height);
            let slot_x = config.left_inset + column as f32 * slot_width;
            rects.push(EventRect {
                id: events[span.index].as_ref().id.clone(),
                index: span.index,
                cluster: cluster_idx,
                column,
                column_count: packed.column_count,
                top,
                bottom,
                x: slot_x,
                width: (slot_width - config.horizontal_event_inset).max(0.0),
                slot_x,
                slot_width,
                start_hour,
                end_hour,
            });
        }
    }
    rects.sort_by_key(|rect| rect.index);

    log::debug!(
        "laid out {} of {} events for {} in {} clusters (widest {})",
        rects.len(),
        events.len(),
        window.date,
        clusters.len(),
        widest
    );

    DayLayout {
        date: window.date,
        width,
        height: mapper.full_height(),
        rects,
        cluster_count: clusters.len(),
        hours: hour_marks(&mapper, config.clock, None),
        now: None,
    }
}

impl DayLayout {
    /// Recomputes the current-time line and the hour label it hides. Runs on
    /// a timer, independently of the event layout.
    pub fn refresh_now(
        &mut self,
        now: Option<DateTime<Utc>>,
        window: &DayWindow,
        config: &TimelineConfig,
    ) {
        let mapper = TimeMapper::from_config(config);
        self.now = now.and_then(|now| now_indicator(now, window, &mapper, config.clock));
        let now_time = self.now.as_ref().map(|indicator| indicator.time);
        self.hours = hour_marks(&mapper, config.clock, now_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Event;
    use chrono::{Duration, NaiveDate, TimeZone};

    fn day() -> DayWindow {
        DayWindow::utc(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, h, m, 0).unwrap()
    }

    fn event(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Event {
        Event::new(id, start, end, id)
    }

    fn layout(events: &[Event]) -> DayLayout {
        compute_day_layout(events, &day(), &TimelineConfig::default(), 375.0)
    }

    #[test]
    fn empty_input_gives_empty_layout() {
        let layout = layout(&[]);
        assert!(layout.is_empty());
        assert_eq!(layout.cluster_count, 0);
        assert_eq!(layout.hours.len(), 25);
    }

    #[test]
    fn two_overlapping_and_one_apart() {
        let events = [
            event("a", at(9, 0), at(10, 0)),
            event("b", at(9, 30), at(10, 30)),
            event("c", at(11, 0), at(12, 0)),
        ];
        let layout = layout(&events);
        let a = layout.rect("a").unwrap();
        let b = layout.rect("b").unwrap();
        let c = layout.rect("c").unwrap();
        assert_eq!((a.column, a.column_count), (0, 2));
        assert_eq!((b.column, b.column_count), (1, 2));
        assert_eq!((c.column, c.column_count), (0, 1));
        assert_eq!(a.cluster, b.cluster);
        assert_ne!(a.cluster, c.cluster);
    }

    #[test]
    fn horizontal_geometry_uses_equal_slots() {
        let events = [
            event("a", at(9, 0), at(10, 0)),
            event("b", at(9, 30), at(10, 30)),
        ];
        let layout = layout(&events);
        let available = 375.0 - 53.0;
        let b = layout.rect("b").unwrap();
        assert_eq!(b.slot_width, available / 2.0);
        assert_eq!(b.slot_x, 53.0 + available / 2.0);
        assert_eq!(b.width, available / 2.0 - 3.0);
    }

    #[test]
    fn vertical_geometry_follows_mapper() {
        let events = [event("a", at(9, 30), at(10, 0))];
        let layout = layout(&events);
        let a = layout.rect("a").unwrap();
        assert_eq!(a.top, 437.5);
        assert_eq!(a.bottom, 10.0 + 10.0 * 45.0);
    }

    #[test]
    fn reversed_interval_is_clamped_to_a_point() {
        let events = [event("a", at(9, 0), at(8, 0))];
        let layout = layout(&events);
        let a = layout.rect("a").unwrap();
        assert_eq!(a.start_hour, a.end_hour);
        assert_eq!(a.height(), TimelineConfig::default().min_event_height);
    }

    #[test]
    fn events_outside_the_day_are_dropped() {
        let events = [
            event("yesterday", at(9, 0) - Duration::days(1), at(10, 0) - Duration::days(1)),
            event("ends_at_midnight", at(0, 0) - Duration::hours(2), at(0, 0)),
            event("today", at(9, 0), at(10, 0)),
        ];
        let layout = layout(&events);
        assert_eq!(layout.rects.len(), 1);
        assert_eq!(layout.rects[0].id, "today");
        assert_eq!(layout.rects[0].index, 2);
    }

    #[test]
    fn events_crossing_midnight_are_clipped() {
        let events = [
            event("overnight_in", at(22, 0) - Duration::days(1), at(1, 0)),
            event("overnight_out", at(23, 0), at(2, 0) + Duration::days(1)),
        ];
        let layout = layout(&events);
        let first = layout.rect("overnight_in").unwrap();
        assert_eq!(first.start_hour, 0.0);
        assert_eq!(first.end_hour, 1.0);
        let second = layout.rect("overnight_out").unwrap();
        assert_eq!(second.end_hour, 24.0);
        assert_eq!(second.bottom, layout.height - 10.0);
    }

    #[test]
    fn point_event_does_not_join_interval_with_same_start() {
        let events = [
            event("meeting", at(9, 0), at(10, 0)),
            event("reminder", at(9, 0), at(9, 0)),
        ];
        let layout = layout(&events);
        assert_eq!(layout.cluster_count, 2);
        assert_eq!(layout.rect("meeting").unwrap().column_count, 1);
        assert_eq!(layout.rect("reminder").unwrap().column_count, 1);
    }

    #[test]
    fn output_is_in_input_order() {
        let events = [
            event("late", at(15, 0), at(16, 0)),
            event("early", at(8, 0), at(9, 0)),
        ];
        let layout = layout(&events);
        let ids: Vec<&str> = layout.rects.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["late", "early"]);
    }

    #[test]
    fn refresh_now_hides_covered_label() {
        let mut layout = layout(&[]);
        let config = TimelineConfig::default();
        layout.refresh_now(Some(at(13, 50)), &day(), &config);
        let now = layout.now.as_ref().unwrap();
        assert_eq!(now.label, "13:50");
        assert!(layout.hours[14].hidden);

        layout.refresh_now(None, &day(), &config);
        assert!(layout.now.is_none());
        assert!(layout.hours.iter().all(|mark| !mark.hidden));
    }
}
