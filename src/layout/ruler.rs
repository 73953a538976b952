use chrono::{DateTime, NaiveTime, Timelike, Utc};

use crate::calendar::DayWindow;
use crate::config::ClockStyle;

use super::{HourMark, NowIndicator, TimeMapper};

/// The 25 hour-line labels, midnight to midnight.
pub fn hour_labels(clock: ClockStyle) -> Vec<String> {
    match clock {
        ClockStyle::TwentyFourHour => (0..=24)
            .map(|hour| format!("{:02}:00", hour % 24))
            .collect(),
        ClockStyle::TwelveHour => (0..=24)
            .map(|hour| match hour % 24 {
                0 => "12 AM".to_string(),
                12 => "Noon".to_string(),
                h if h < 12 => format!("{h} AM"),
                h => format!("{} PM", h - 12),
            })
            .collect(),
    }
}

/// Hour whose label the now-line would cover, if any.
fn covered_hour(now: NaiveTime) -> Option<u32> {
    let minute = now.minute();
    if minute > 39 {
        Some(now.hour() + 1)
    } else if minute < 21 {
        Some(now.hour())
    } else {
        None
    }
}

pub fn hour_marks(mapper: &TimeMapper, clock: ClockStyle, now: Option<NaiveTime>) -> Vec<HourMark> {
    let hidden = now.and_then(covered_hour);
    hour_labels(clock)
        .into_iter()
        .enumerate()
        .map(|(hour, label)| {
            let hour = hour as u32;
            HourMark {
                hour,
                y: mapper.position_of(hour as f32),
                label,
                hidden: hidden == Some(hour),
            }
        })
        .collect()
}

pub fn now_label(time: NaiveTime, clock: ClockStyle) -> String {
    match clock {
        ClockStyle::TwentyFourHour => time.format("%H:%M").to_string(),
        ClockStyle::TwelveHour => time.format("%-I:%M").to_string(),
    }
}

/// The current-time line, when `now` falls on the displayed day.
pub fn now_indicator(
    now: DateTime<Utc>,
    window: &DayWindow,
    mapper: &TimeMapper,
    clock: ClockStyle,
) -> Option<NowIndicator> {
    if !window.contains(now) {
        return None;
    }
    let time = window.local_time(now);
    Some(NowIndicator {
        time,
        y: mapper.position_of(window.hour_fraction(now)),
        label: now_label(time, clock),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn twenty_four_hour_labels() {
        let labels = hour_labels(ClockStyle::TwentyFourHour);
        assert_eq!(labels.len(), 25);
        assert_eq!(labels[0], "00:00");
        assert_eq!(labels[13], "13:00");
        assert_eq!(labels[24], "00:00");
    }

    #[test]
    fn twelve_hour_labels() {
        let labels = hour_labels(ClockStyle::TwelveHour);
        assert_eq!(labels[0], "12 AM");
        assert_eq!(labels[1], "1 AM");
        assert_eq!(labels[12], "Noon");
        assert_eq!(labels[13], "1 PM");
        assert_eq!(labels[24], "12 AM");
    }

    #[test]
    fn now_hides_nearby_label() {
        let mapper = TimeMapper::new(45.0, 10.0);
        let marks = hour_marks(&mapper, ClockStyle::TwentyFourHour, Some(time(9, 45)));
        let hidden: Vec<u32> = marks.iter().filter(|m| m.hidden).map(|m| m.hour).collect();
        assert_eq!(hidden, vec![10]);

        let marks = hour_marks(&mapper, ClockStyle::TwentyFourHour, Some(time(9, 10)));
        assert!(marks[9].hidden);

        let marks = hour_marks(&mapper, ClockStyle::TwentyFourHour, Some(time(9, 30)));
        assert!(marks.iter().all(|m| !m.hidden));
    }

    #[test]
    fn indicator_only_on_its_day() {
        let mapper = TimeMapper::new(45.0, 10.0);
        let window = DayWindow::utc(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let indicator = now_indicator(now, &window, &mapper, ClockStyle::TwentyFourHour).unwrap();
        assert_eq!(indicator.y, 437.5);
        assert_eq!(indicator.label, "09:30");

        let tomorrow = Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap();
        assert!(now_indicator(tomorrow, &window, &mapper, ClockStyle::TwentyFourHour).is_none());
    }
}
