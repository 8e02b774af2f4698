//! Wall-clock time sources and timezone resolution.

use std::fmt;

use chrono::{FixedOffset, Local, NaiveTime, Utc};
use dial_core::ClockTime;
use tracing::warn;

/// Anything that can report the current time of day.
pub trait ClockSource: fmt::Debug + Send {
    fn now(&self) -> ClockTime;
}

/// A resolved timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// The system's local zone.
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Local => write!(f, "system"),
            Zone::Utc => write!(f, "UTC"),
            Zone::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

/// Resolve a configured zone name, falling back to the system zone.
///
/// Accepts "system", "local", "UTC", "Z" and fixed offsets such as
/// "+09:00", "-0530", "UTC+5" or "GMT-03:30". An unknown name is logged
/// and treated as the system zone.
pub fn resolve_zone(name: &str) -> Zone {
    parse_zone(name).unwrap_or_else(|| {
        warn!(zone = name, "unknown timezone, using system zone");
        Zone::Local
    })
}

fn parse_zone(name: &str) -> Option<Zone> {
    let name = name.trim();
    match name.to_ascii_lowercase().as_str() {
        "" | "system" | "local" => return Some(Zone::Local),
        "utc" | "z" | "gmt" => return Some(Zone::Utc),
        _ => {}
    }

    let upper = name.to_ascii_uppercase();
    let offset = upper
        .strip_prefix("UTC")
        .or_else(|| upper.strip_prefix("GMT"))
        .unwrap_or(&upper);
    parse_offset(offset).map(Zone::Fixed)
}

/// Parse "+HH", "+HH:MM" or "+HHMM" (either sign).
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() > 2 => rest.split_at(2),
        None => (rest, "0"),
    };
    if hours.is_empty() || minutes.is_empty() {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Reads the system clock in a resolved zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    zone: Zone,
}

impl SystemClock {
    pub fn new(zone: Zone) -> Self {
        Self { zone }
    }

    /// Build from a zone name; see [`resolve_zone`].
    pub fn from_name(name: &str) -> Self {
        Self::new(resolve_zone(name))
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }
}

impl ClockSource for SystemClock {
    fn now(&self) -> ClockTime {
        match self.zone {
            Zone::Local => ClockTime::from_timelike(&Local::now()),
            Zone::Utc => ClockTime::from_timelike(&Utc::now()),
            Zone::Fixed(offset) => ClockTime::from_timelike(&Utc::now().with_timezone(&offset)),
        }
    }
}

/// A clock frozen at one time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub ClockTime);

impl ClockSource for FixedClock {
    fn now(&self) -> ClockTime {
        self.0
    }
}

/// Parse "HH:MM:SS" or "HH:MM" into a clock time.
pub fn parse_clock_time(s: &str) -> Result<ClockTime, chrono::ParseError> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map(|t| ClockTime::from_timelike(&t))
}
