use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Naive layouts are already wall-clock time and are read as written.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Offset-carrying layouts RFC 3339 does not cover, such as minute precision.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
];

/// Calendar hour and minute of a date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallClock {
    pub hour: u32,
    pub minute: u32,
}

impl WallClock {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    fn from_time<T: Timelike>(t: &T) -> Self {
        Self {
            hour: t.hour(),
            minute: t.minute(),
        }
    }
}

/// Zone in which offset-carrying timestamps are read as wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClockZone {
    /// The host's local zone.
    #[default]
    Local,
    Utc,
    /// Keep the offset written in the timestamp itself.
    AsWritten,
    Fixed { offset_minutes: i32 },
}

impl ClockZone {
    pub fn validate(self) -> Result<()> {
        if let ClockZone::Fixed { offset_minutes } = self {
            fixed_offset(offset_minutes)?;
        }
        Ok(())
    }

    fn wall_clock(self, dt: &DateTime<FixedOffset>) -> Result<WallClock> {
        Ok(match self {
            ClockZone::Local => WallClock::from_time(&dt.with_timezone(&Local)),
            ClockZone::Utc => WallClock::from_time(&dt.with_timezone(&Utc)),
            ClockZone::AsWritten => WallClock::from_time(dt),
            ClockZone::Fixed { offset_minutes } => {
                WallClock::from_time(&dt.with_timezone(&fixed_offset(offset_minutes)?))
            }
        })
    }
}

fn fixed_offset(offset_minutes: i32) -> Result<FixedOffset> {
    offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| Error::InvalidConfig(format!("offset of {offset_minutes} minutes")))
}

/// Extract the wall-clock hour and minute of an ISO-8601 date-time.
pub fn parse_wall_clock(value: &str, zone: ClockZone) -> Result<WallClock> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return zone.wall_clock(&dt);
    }
    // `Z` is spelled out so the offset layouts below can read it.
    let with_offset = match trimmed.strip_suffix(['Z', 'z']) {
        Some(stem) => format!("{stem}+00:00"),
        None => trimmed.to_string(),
    };
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&with_offset, fmt).ok())
    {
        return zone.wall_clock(&dt);
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| WallClock::from_time(&naive))
        .ok_or_else(|| Error::InvalidTimestamp {
            value: value.to_string(),
        })
}

/// Fractional hours from `current` until `target`.
///
/// The whole-hour difference wraps once into the next day when negative. The
/// minute term is added afterwards and is not wrapped, so a target earlier in the
/// same hour gives a small negative result.
pub fn remaining_hours(current: WallClock, target: WallClock) -> f64 {
    let mut hours = target.hour as i64 - current.hour as i64;
    if hours < 0 {
        hours += 24;
    }
    hours as f64 + (target.minute as f64 - current.minute as f64) / 60.0
}

/// Target time of day as a fractional hour.
pub fn target_hour_of_day(target: WallClock) -> f64 {
    target.hour as f64 + target.minute as f64 / 60.0
}

/// The two time figures handed to the dose model for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    pub remaining_hours: f64,
    pub target_hour: f64,
}

impl Timing {
    pub fn between(current: WallClock, target: WallClock) -> Self {
        Self {
            remaining_hours: remaining_hours(current, target),
            target_hour: target_hour_of_day(target),
        }
    }
}
