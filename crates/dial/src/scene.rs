//! Clock state driven once per frame: time sampling, hand angles, effects.

use std::time::{Duration, Instant};

use dial_core::{
    AnimationKind, ClockTime, FaceStyle, HandAngles, SecondHandSpring, Size, Surface,
    compute_hand_angles, draw_face,
};
use dial_effects::AnimationManager;
use tracing::info;

use crate::clock::ClockSource;

/// Face radius in dp on a surface sized exactly for it.
pub const CLOCK_RADIUS_DP: f32 = 150.0;

/// Room left around the face for effects that draw outside the rim.
pub const FACE_MARGIN_DP: f32 = 110.0;

/// Density that fits the face plus its margin into `size`.
pub fn density_for(size: Size) -> f32 {
    size.min_dimension() / 2.0 / (CLOCK_RADIUS_DP + FACE_MARGIN_DP)
}

/// Everything needed to paint one frame of the clock.
#[derive(Debug)]
pub struct Scene {
    clock: Box<dyn ClockSource>,
    manager: AnimationManager,
    spring: SecondHandSpring,
    style: FaceStyle,
    selected: AnimationKind,
    started: Instant,
    /// Elapsed time at the latest tick.
    elapsed: Duration,
    /// Latest sampled time.
    time: Option<ClockTime>,
    /// Elapsed time at which the clock is next sampled.
    next_sample: Duration,
}

impl Scene {
    /// Build a scene and initialize every registered effect.
    pub fn new(
        clock: Box<dyn ClockSource>,
        mut manager: AnimationManager,
        spring: SecondHandSpring,
        style: FaceStyle,
        selected: AnimationKind,
    ) -> Self {
        manager.initialize_all();
        Self {
            clock,
            manager,
            spring,
            style,
            selected,
            started: Instant::now(),
            elapsed: Duration::ZERO,
            time: None,
            next_sample: Duration::ZERO,
        }
    }

    /// Advance to wall time `now`.
    pub fn tick(&mut self, now: Instant) {
        self.tick_elapsed(now.saturating_duration_since(self.started));
    }

    /// Advance to `elapsed` since the scene was created.
    ///
    /// Effects see every tick. The clock is re-sampled once per second,
    /// aligned to the sampled sub-second so the hand steps close to the real
    /// second boundary. A new second re-targets the second hand and fires the
    /// selected effect's burst.
    pub fn tick_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
        self.manager.advance(elapsed);

        if self.time.is_some() && elapsed < self.next_sample {
            return;
        }
        let sampled = self.clock.now();
        let until_next = Duration::from_secs(1) - Duration::from_nanos(sampled.nanos.into());
        self.next_sample = elapsed + until_next;

        let second_changed = self.time.is_none_or(|t| t.second != sampled.second);
        self.time = Some(sampled);
        if second_changed {
            let angles = compute_hand_angles(&sampled);
            self.spring.retarget(angles.second, elapsed);
            // the envelope runs on its own; dropping the handle detaches it
            drop(self.manager.trigger(self.selected));
        }
    }

    /// Change the selected animation and fire its burst.
    pub fn select(&mut self, kind: AnimationKind) {
        if kind != self.selected {
            info!(from = %self.selected, to = %kind, "animation selected");
        }
        self.selected = kind;
        drop(self.manager.trigger(kind));
    }

    pub fn selected(&self) -> AnimationKind {
        self.selected
    }

    /// Latest sampled time, `None` before the first tick.
    #[cfg(test)]
    pub fn time(&self) -> Option<ClockTime> {
        self.time
    }

    /// Hand angles as displayed: the second hand comes from the spring.
    pub fn angles(&self) -> HandAngles {
        let Some(time) = self.time else {
            return HandAngles::default();
        };
        HandAngles {
            second: self.spring.angle_at(self.elapsed),
            ..compute_hand_angles(&time)
        }
    }

    pub fn manager(&self) -> &AnimationManager {
        &self.manager
    }

    #[cfg(test)]
    pub fn spring(&self) -> &SecondHandSpring {
        &self.spring
    }

    pub fn style_mut(&mut self) -> &mut FaceStyle {
        &mut self.style
    }

    /// Face radius for `surface`, never negative.
    pub fn radius_for(surface: &dyn Surface) -> f32 {
        (surface.size().min_dimension() / 2.0 - surface.dp(FACE_MARGIN_DP)).max(0.0)
    }

    /// Paint the selected effect only. NONE paints nothing.
    pub fn paint_backdrop(&self, surface: &mut dyn Surface) {
        let center = surface.center();
        let radius = Self::radius_for(surface);
        self.manager.draw(self.selected, surface, center, radius);
    }

    /// Paint ticks, numerals and hands.
    pub fn paint_face(&self, surface: &mut dyn Surface) {
        let center = surface.center();
        let radius = Self::radius_for(surface);
        draw_face(surface, center, radius, &self.angles(), &self.style);
    }

    /// Paint a full frame: backdrop first, the face on top.
    pub fn paint(&self, surface: &mut dyn Surface) {
        self.paint_backdrop(surface);
        self.paint_face(surface);
    }
}
