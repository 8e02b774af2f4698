//! Looping phase values derived from shared elapsed time.

use std::time::Duration;

use dial_core::Easing;

/// A phase that loops from 0 to `range` once per `period`, forever.
///
/// The phase is a pure function of elapsed time: the first elapsed value seen
/// becomes the origin, and every later value is measured against it. Frame
/// rate never accumulates into drift.
#[derive(Debug, Clone)]
pub struct PhaseDriver {
    period: Duration,
    range: f32,
    easing: Easing,
    origin: Option<Duration>,
    value: f32,
}

impl PhaseDriver {
    pub fn new(period: Duration, range: f32, easing: Easing) -> Self {
        Self {
            period,
            range,
            easing,
            origin: None,
            value: 0.0,
        }
    }

    /// Recompute the phase for `elapsed` and return it.
    pub fn advance(&mut self, elapsed: Duration) -> f32 {
        let origin = *self.origin.get_or_insert(elapsed);
        self.value = self.value_at(elapsed.saturating_sub(origin));
        self.value
    }

    /// Phase as of the last [`advance`](Self::advance).
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Phase `since` after the origin.
    pub fn value_at(&self, since: Duration) -> f32 {
        let period = self.period.as_nanos();
        if period == 0 {
            return 0.0;
        }
        let fraction = (since.as_nanos() % period) as f64 / period as f64;
        self.range * self.easing.transform(fraction as f32)
    }
}
