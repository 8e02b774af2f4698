//! Hand angles from wall-clock time.

use chrono::Timelike;

/// Wall-clock time of day as sampled from a clock source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockTime {
    /// 0-23.
    pub hour: u32,
    /// 0-59.
    pub minute: u32,
    /// 0-59.
    pub second: u32,
    /// Sub-second part in nanoseconds.
    pub nanos: u32,
}

impl ClockTime {
    pub const fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            nanos: 0,
        }
    }

    /// Capture the time-of-day fields of any chrono time value.
    pub fn from_timelike<T: Timelike>(t: &T) -> Self {
        Self {
            hour: t.hour(),
            minute: t.minute(),
            // chrono reports a leap second as second 59 with nanos >= 1e9
            second: t.second().min(59),
            nanos: t.nanosecond().min(999_999_999),
        }
    }
}

/// Hand angles in degrees clockwise from 12 o'clock, each in 0.0..360.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

/// Compute hand angles for `time`.
///
/// The minute hand drifts with the seconds and the hour hand with the
/// minutes; the second hand steps once per second.
pub fn compute_hand_angles(time: &ClockTime) -> HandAngles {
    let second = (time.second as f32 * 6.0).rem_euclid(360.0);
    let minute = (time.minute as f32 * 6.0 + time.second as f32 * 0.1).rem_euclid(360.0);
    let hour = ((time.hour % 12) as f32 * 30.0 + time.minute as f32 * 0.5).rem_euclid(360.0);
    HandAngles {
        hour,
        minute,
        second,
    }
}
