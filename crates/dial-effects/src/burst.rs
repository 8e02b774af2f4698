//! Trigger-driven burst amplitude with cancel-then-restart semantics.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use dial_core::Easing;
use tracing::{debug, warn};

/// How often a running envelope writes a new amplitude (~120 Hz).
const BURST_TICK: Duration = Duration::from_millis(8);

/// Rise-then-decay shape of a burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub rise: Duration,
    pub rise_easing: Easing,
    pub decay: Duration,
    pub decay_easing: Easing,
}

impl Envelope {
    pub const fn new(
        rise: Duration,
        rise_easing: Easing,
        decay: Duration,
        decay_easing: Easing,
    ) -> Self {
        Self {
            rise,
            rise_easing,
            decay,
            decay_easing,
        }
    }

    /// Rise plus decay.
    pub fn total(&self) -> Duration {
        self.rise + self.decay
    }

    /// Amplitude `since` after the trigger, always in 0.0-1.0.
    pub fn amplitude_at(&self, since: Duration) -> f32 {
        let value = if since < self.rise {
            self.rise_easing
                .transform(since.as_secs_f32() / self.rise.as_secs_f32())
        } else if since < self.total() {
            let t = (since - self.rise).as_secs_f32() / self.decay.as_secs_f32();
            1.0 - self.decay_easing.transform(t)
        } else {
            0.0
        };
        value.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Default)]
struct BurstState {
    /// Bumped by every trigger; workers of older generations stop writing.
    generation: u64,
    amplitude: f32,
    /// When the live envelope started. Reads past its end see 0.
    started: Option<Instant>,
}

/// Burst amplitude shared between the draw loop and the envelope worker.
///
/// At most one envelope is ever live: [`trigger`](Burst::trigger) advances
/// the generation and resets the amplitude to 0 under the lock before the
/// new worker starts, and workers only write while holding the lock and
/// while their generation is current. A cancelled envelope therefore cannot
/// write after the restart. Reads at or past `rise + decay` see 0 whether or
/// not the worker has made its final write yet.
#[derive(Debug, Clone)]
pub struct Burst {
    envelope: Envelope,
    state: Arc<Mutex<BurstState>>,
}

impl Burst {
    pub fn new(envelope: Envelope) -> Self {
        Self {
            envelope,
            state: Arc::new(Mutex::new(BurstState::default())),
        }
    }

    /// Current amplitude, 0.0 at rest.
    pub fn amplitude(&self) -> f32 {
        let Ok(state) = self.state.lock() else {
            return 0.0;
        };
        match state.started {
            Some(started) if started.elapsed() < self.envelope.total() => state.amplitude,
            _ => 0.0,
        }
    }

    /// Cancel any running envelope and start a new one from 0.
    ///
    /// Returns immediately; the envelope runs on its own thread.
    pub fn trigger(&self) -> BurstTask {
        let start = Instant::now();
        let generation = match self.state.lock() {
            Ok(mut state) => {
                state.generation = state.generation.wrapping_add(1);
                state.amplitude = 0.0;
                state.started = Some(start);
                state.generation
            }
            Err(_) => return BurstTask::completed(),
        };
        debug!(generation, "burst triggered");

        let envelope = self.envelope;
        let state = Arc::clone(&self.state);
        let spawned = thread::Builder::new()
            .name("burst-envelope".into())
            .spawn(move || run_envelope(envelope, start, &state, generation));

        match spawned {
            Ok(handle) => BurstTask {
                handle: Some(handle),
            },
            Err(e) => {
                warn!(error = %e, "failed to spawn burst envelope");
                BurstTask::completed()
            }
        }
    }
}

fn run_envelope(envelope: Envelope, start: Instant, state: &Mutex<BurstState>, generation: u64) {
    let total = envelope.total();
    loop {
        // wake no later than the end so the final 0 lands on time
        thread::sleep(BURST_TICK.min(total.saturating_sub(start.elapsed())));
        let since = start.elapsed();
        let done = since >= total;
        let value = if done {
            0.0
        } else {
            envelope.amplitude_at(since)
        };

        match state.lock() {
            Ok(mut s) if s.generation == generation => {
                s.amplitude = value;
                if done {
                    s.started = None;
                }
            }
            Ok(_) => {
                debug!(generation, "burst cancelled");
                return;
            }
            Err(_) => return,
        }

        if done {
            return;
        }
    }
}

/// Handle to a running (or already finished) burst envelope.
///
/// Dropping the handle detaches the envelope; it keeps running.
#[derive(Debug)]
#[must_use = "dropping the task detaches the envelope; call `join` to wait for it"]
pub struct BurstTask {
    handle: Option<JoinHandle<()>>,
}

impl BurstTask {
    /// A task that has nothing to do.
    pub fn completed() -> Self {
        Self { handle: None }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Block until the envelope finishes or is cancelled.
    pub fn join(self) {
        if let Some(handle) = self.handle
            && handle.join().is_err()
        {
            warn!("burst envelope worker panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_envelope() -> Envelope {
        Envelope::new(
            Duration::from_millis(40),
            Easing::EaseOutCubic,
            Duration::from_millis(60),
            Easing::Linear,
        )
    }

    #[test]
    fn test_envelope_shape() {
        let env = test_envelope();
        assert_eq!(env.amplitude_at(Duration::ZERO), 0.0);
        assert_eq!(env.amplitude_at(Duration::from_millis(40)), 1.0);
        assert!((env.amplitude_at(Duration::from_millis(70)) - 0.5).abs() < 1e-3);
        assert_eq!(env.amplitude_at(Duration::from_millis(100)), 0.0);
        assert_eq!(env.amplitude_at(Duration::from_secs(5)), 0.0);
    }

    #[test]
    fn test_envelope_bounded() {
        let env = Envelope::new(
            Duration::from_millis(260),
            Easing::EaseOutCubic,
            Duration::from_millis(750),
            Easing::EaseOutCubic,
        );
        for ms in 0..1200 {
            let a = env.amplitude_at(Duration::from_millis(ms));
            assert!((0.0..=1.0).contains(&a));
        }
    }

    #[test]
    fn test_rest_before_trigger() {
        let burst = Burst::new(test_envelope());
        assert_eq!(burst.amplitude(), 0.0);
    }

    #[test]
    fn test_trigger_returns_to_rest() {
        let burst = Burst::new(test_envelope());
        let task = burst.trigger();
        task.join();
        assert_eq!(burst.amplitude(), 0.0);
    }

    #[test]
    fn test_trigger_does_not_block() {
        let burst = Burst::new(Envelope::new(
            Duration::from_millis(500),
            Easing::Linear,
            Duration::from_millis(500),
            Easing::Linear,
        ));
        let started = Instant::now();
        let task = burst.trigger();
        assert!(started.elapsed() < Duration::from_millis(400));
        assert!(!task.is_finished());
        task.join();
    }

    #[test]
    fn test_retrigger_restarts_from_zero() {
        let burst = Burst::new(Envelope::new(
            Duration::from_millis(200),
            Easing::Linear,
            Duration::from_millis(200),
            Easing::Linear,
        ));
        let first = burst.trigger();
        thread::sleep(Duration::from_millis(150));
        let before = burst.amplitude();
        assert!(before > 0.5, "{before}");

        let second = burst.trigger();
        assert_eq!(burst.amplitude(), 0.0);

        // the first worker sees the new generation and exits without writing
        first.join();
        thread::sleep(Duration::from_millis(30));
        let rising = burst.amplitude();
        assert!(rising > 0.0 && rising < before, "{rising} vs {before}");

        second.join();
        assert_eq!(burst.amplitude(), 0.0);
    }

    #[test]
    fn test_at_rest_by_end_of_envelope() {
        let env = test_envelope();
        let burst = Burst::new(env);
        for _ in 0..10 {
            let task = burst.trigger();
            thread::sleep(env.total());
            assert_eq!(burst.amplitude(), 0.0);
            drop(task);
        }
    }

    #[test]
    fn test_join_survives_worker_panic() {
        let task = BurstTask {
            handle: Some(thread::spawn(|| panic!("worker failed"))),
        };
        task.join();
    }

    #[test]
    fn test_observed_amplitude_stays_bounded() {
        let burst = Burst::new(test_envelope());
        let mut tasks = Vec::new();
        for _ in 0..5 {
            tasks.push(burst.trigger());
            for _ in 0..5 {
                let a = burst.amplitude();
                assert!((0.0..=1.0).contains(&a));
                thread::sleep(Duration::from_millis(2));
            }
        }
        for task in tasks {
            task.join();
        }
        assert_eq!(burst.amplitude(), 0.0);
    }

    #[test]
    fn test_completed_task() {
        let task = BurstTask::completed();
        assert!(task.is_finished());
        task.join();
    }
}
