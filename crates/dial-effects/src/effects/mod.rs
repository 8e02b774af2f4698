//! The four animation variants.

mod aurora;
mod breathing;
mod cosmic_stars;
mod water_ripples;

pub use aurora::AuroraEffect;
pub use breathing::BreathingEffect;
pub use cosmic_stars::{CosmicStarsEffect, DEFAULT_STAR_SEED, Layer, STAR_COUNT, Star};
pub use water_ripples::WaterRipplesEffect;

use std::time::Duration;

use dial_core::Easing;

use crate::burst::{Burst, BurstTask, Envelope};
use crate::phase::PhaseDriver;

/// Per-effect animated state: the looping phase and the burst amplitude.
#[derive(Debug, Clone)]
struct Motion {
    phase: PhaseDriver,
    burst: Burst,
}

impl Motion {
    fn new(period: Duration, range: f32, easing: Easing, envelope: Envelope) -> Self {
        Self {
            phase: PhaseDriver::new(period, range, easing),
            burst: Burst::new(envelope),
        }
    }

    fn advance(motion: &mut Option<Motion>, elapsed: Duration) {
        if let Some(m) = motion {
            m.phase.advance(elapsed);
        }
    }

    fn trigger(motion: &Option<Motion>) -> BurstTask {
        motion
            .as_ref()
            .map_or_else(BurstTask::completed, |m| m.burst.trigger())
    }

    fn phase(motion: &Option<Motion>) -> Option<f32> {
        motion.as_ref().map(|m| m.phase.value())
    }

    fn amplitude(motion: &Option<Motion>) -> f32 {
        motion.as_ref().map_or(0.0, |m| m.burst.amplitude())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use dial_core::{AnimationKind, DisplayList, Point, Size};

    use super::*;
    use crate::Effect;

    fn all_effects() -> Vec<Box<dyn Effect>> {
        vec![
            Box::new(BreathingEffect::new()),
            Box::new(AuroraEffect::new()),
            Box::new(CosmicStarsEffect::new()),
            Box::new(WaterRipplesEffect::new()),
        ]
    }

    #[test]
    fn test_kinds_are_distinct() {
        let kinds: Vec<_> = all_effects().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, AnimationKind::selectable().collect::<Vec<_>>());
    }

    #[test]
    fn test_draw_before_initialize_is_noop() {
        for mut effect in all_effects() {
            let mut list = DisplayList::new(Size::new(400.0, 400.0), 1.0);
            effect.advance(Duration::from_secs(1));
            effect.draw(&mut list, Point::new(200.0, 200.0), 150.0);
            assert!(list.is_empty(), "{:?} drew before initialize", effect.kind());
            assert_eq!(effect.phase(), None);
            assert_eq!(effect.burst_amplitude(), 0.0);
            let task = effect.trigger();
            assert!(task.is_finished());
        }
    }

    #[test]
    fn test_draw_after_initialize_paints() {
        for mut effect in all_effects() {
            effect.initialize();
            effect.advance(Duration::from_millis(1234));
            let mut list = DisplayList::new(Size::new(400.0, 400.0), 1.0);
            effect.draw(&mut list, Point::new(200.0, 200.0), 150.0);
            assert!(!list.is_empty(), "{:?} drew nothing", effect.kind());
            assert_eq!(effect.phase(), Some(0.0));
        }
    }

    #[test]
    fn test_trigger_runs_and_settles() {
        for mut effect in all_effects() {
            effect.initialize();
            effect.trigger().join();
            assert_eq!(effect.burst_amplitude(), 0.0);
        }
    }

    #[test]
    fn test_reinitialize_restarts_phase() {
        let mut effect = AuroraEffect::new();
        effect.initialize();
        effect.advance(Duration::from_secs(10));
        effect.advance(Duration::from_secs(14));
        assert!((effect.phase().unwrap_or_default() - 90.0).abs() < 1e-3);

        effect.initialize();
        effect.advance(Duration::from_secs(20));
        assert_eq!(effect.phase(), Some(0.0));
    }
}
