//! Day windows in a display calendar.
//!
//! A day is the half-open range from local midnight to the next local
//! midnight of its time zone, so DST transition days are 23 or 25 hours long.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("unknown time zone '{0}'")]
    UnknownZone(String),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("local time {0} does not exist in {1}")]
    NonexistentLocalTime(NaiveDateTime, Tz),
}

pub fn parse_zone(name: &str) -> Result<Tz, CalendarError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| CalendarError::UnknownZone(name.to_string()))
}

pub fn parse_date(value: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidDate(value.to_string()))
}

/// Resolves a wall-clock time in `zone`. Ambiguous times take the earlier
/// instant; times skipped by a DST gap move forward to the first valid minute.
pub fn resolve_local(zone: Tz, local: NaiveDateTime) -> Result<DateTime<Utc>, CalendarError> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            // Gaps are at most a few hours; walk forward until the clock exists.
            let mut probe = local;
            for _ in 0..(4 * 60) {
                probe += Duration::minutes(1);
                if let Some(dt) = zone.from_local_datetime(&probe).earliest() {
                    return Ok(dt.with_timezone(&Utc));
                }
            }
            Err(CalendarError::NonexistentLocalTime(local, zone))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub date: NaiveDate,
    pub zone: Tz,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    pub fn new(date: NaiveDate, zone: Tz) -> Result<Self, CalendarError> {
        let next = date
            .succ_opt()
            .ok_or_else(|| CalendarError::InvalidDate(date.to_string()))?;
        let start = resolve_local(zone, date.and_time(NaiveTime::MIN))?;
        let end = resolve_local(zone, next.and_time(NaiveTime::MIN))?;
        Ok(Self {
            date,
            zone,
            start,
            end,
        })
    }

    /// The day containing `instant` in `zone`.
    pub fn containing(instant: DateTime<Utc>, zone: Tz) -> Result<Self, CalendarError> {
        Self::new(instant.with_timezone(&zone).date_naive(), zone)
    }

    pub fn utc(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN).and_utc();
        Self {
            date,
            zone: Tz::UTC,
            start,
            end: start + Duration::days(1),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Whether `[start, end)` shares any instant with the day. A zero-length
    /// interval participates when its instant lies inside the day.
    pub fn intersects(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        if end <= start {
            return self.contains(start);
        }
        start < self.end && end > self.start
    }

    pub fn clamp(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        instant.clamp(self.start, self.end)
    }

    pub fn previous(&self) -> Result<Self, CalendarError> {
        let date = self
            .date
            .pred_opt()
            .ok_or_else(|| CalendarError::InvalidDate(self.date.to_string()))?;
        Self::new(date, self.zone)
    }

    pub fn next(&self) -> Result<Self, CalendarError> {
        let date = self
            .date
            .succ_opt()
            .ok_or_else(|| CalendarError::InvalidDate(self.date.to_string()))?;
        Self::new(date, self.zone)
    }

    /// Wall-clock hours since local midnight, in `[0, 24]`. The window end
    /// maps to 24 so events running past midnight reach the bottom edge.
    pub fn hour_fraction(&self, instant: DateTime<Utc>) -> f32 {
        if instant >= self.end {
            return 24.0;
        }
        if instant <= self.start {
            return 0.0;
        }
        let local = instant.with_timezone(&self.zone);
        time_hours(local.time())
    }

    pub fn local_time(&self, instant: DateTime<Utc>) -> NaiveTime {
        instant.with_timezone(&self.zone).time()
    }

    /// The instant of `time` on this day; falls back to the window start when
    /// the wall-clock time is unrepresentable.
    pub fn at(&self, time: NaiveTime) -> DateTime<Utc> {
        resolve_local(self.zone, self.date.and_time(time)).unwrap_or(self.start)
    }
}

pub fn time_hours(time: NaiveTime) -> f32 {
    time.hour() as f32 + time.minute() as f32 / 60.0 + time.second() as f32 / 3600.0
}
