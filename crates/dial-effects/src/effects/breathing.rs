//! Breathing: a slow sinusoidal swell with concentric rings.

use std::f32::consts::{FRAC_PI_2, TAU};
use std::time::Duration;

use dial_core::{AnimationKind, BlendMode, Easing, Paint, Point, Rgba, Surface, wrap_degrees};

use super::Motion;
use crate::burst::{BurstTask, Envelope};
use crate::effect::Effect;

const PERIOD: Duration = Duration::from_millis(4200);

const ENVELOPE: Envelope = Envelope::new(
    Duration::from_millis(240),
    Easing::EaseOutCubic,
    Duration::from_millis(820),
    Easing::LinearOutSlowIn,
);

const RING_COUNT: usize = 3;

/// Amplitudes below this are treated as rest and draw no ripple.
const RIPPLE_THRESHOLD: f32 = 0.001;

#[derive(Debug, Default)]
pub struct BreathingEffect {
    motion: Option<Motion>,
}

impl BreathingEffect {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for BreathingEffect {
    fn kind(&self) -> AnimationKind {
        AnimationKind::Breathing
    }

    fn initialize(&mut self) {
        self.motion = Some(Motion::new(PERIOD, TAU, Easing::LinearOutSlowIn, ENVELOPE));
    }

    fn advance(&mut self, elapsed: Duration) {
        Motion::advance(&mut self.motion, elapsed);
    }

    fn draw(&self, surface: &mut dyn Surface, center: Point, radius: f32) {
        let Some(motion) = &self.motion else {
            return;
        };
        let phase = motion.phase.value();
        let accent = motion.burst.amplitude();

        let base_scale = 1.0 + 0.06 * phase.sin();
        // softening that breathes in phase with the swell
        let breath_alpha = 0.25 + 0.20 * (0.5 - 0.5 * phase.cos());

        let hue = wrap_degrees(180.0 + 40.0 * (phase * 0.5).sin());
        let main = Rgba::hsv(hue, 0.55, 1.0, 1.0);
        let edge = Rgba::hsv(hue + 25.0, 0.65, 1.0, 1.0);

        let inner_glow = Paint::radial(
            vec![
                main.with_alpha(0.12 + breath_alpha * 0.15),
                Rgba::TRANSPARENT,
            ],
            center,
            radius * 1.1 * (1.0 + 0.05 * (phase + FRAC_PI_2).sin()),
        );
        surface.fill_circle(center, radius * 1.1 * base_scale, &inner_glow, BlendMode::Plus);

        surface.fill_circle(
            center,
            radius * base_scale,
            &Paint::Solid(main.with_alpha(0.08 + breath_alpha * 0.18)),
            BlendMode::SrcOver,
        );

        for i in 0..RING_COUNT {
            let i = i as f32;
            let ring_scale = base_scale * (1.0 + (i + 1.0) * 0.06);
            let width = surface.dp(2.5 - i * 0.5);
            let ring_alpha = (0.22 - i * 0.06) * (0.7 + 0.3 * breath_alpha);
            surface.stroke_circle(
                center,
                radius * ring_scale,
                width,
                &Paint::Solid(edge.with_alpha(ring_alpha.max(0.04))),
                1.0,
                BlendMode::Plus,
            );
        }

        if accent > RIPPLE_THRESHOLD {
            let ripple_radius = radius * (1.0 + 0.5 * accent);
            let fade = 1.0 - accent;
            let ripple_alpha = fade * fade * 0.45;
            let width = surface.dp(3.0 + 6.0 * fade);
            surface.stroke_circle(
                center,
                ripple_radius,
                width,
                &Paint::Solid(edge.with_alpha(ripple_alpha)),
                1.0,
                BlendMode::Plus,
            );
        }
    }

    fn trigger(&self) -> BurstTask {
        Motion::trigger(&self.motion)
    }

    fn phase(&self) -> Option<f32> {
        Motion::phase(&self.motion)
    }

    fn burst_amplitude(&self) -> f32 {
        Motion::amplitude(&self.motion)
    }
}

#[cfg(test)]
mod tests {
    use dial_core::{DisplayList, Primitive, Size, Style};

    use super::*;

    fn draw_at(effect: &BreathingEffect, radius: f32) -> DisplayList {
        let mut list = DisplayList::new(Size::new(400.0, 400.0), 1.0);
        effect.draw(&mut list, Point::new(200.0, 200.0), radius);
        list
    }

    #[test]
    fn test_at_rest_draws_glow_body_and_three_rings() {
        let mut effect = BreathingEffect::new();
        effect.initialize();
        effect.advance(Duration::ZERO);
        let list = draw_at(&effect, 100.0);

        assert_eq!(list.circle_count(), 2 + RING_COUNT);
        let strokes = list
            .primitives()
            .iter()
            .filter(|p| {
                matches!(
                    p,
                    Primitive::Circle {
                        style: Style::Stroke { .. },
                        ..
                    }
                )
            })
            .count();
        assert_eq!(strokes, RING_COUNT);
    }

    #[test]
    fn test_rings_grow_outward() {
        let mut effect = BreathingEffect::new();
        effect.initialize();
        effect.advance(Duration::ZERO);
        let list = draw_at(&effect, 100.0);

        let radii: Vec<f32> = list
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Circle {
                    radius,
                    style: Style::Stroke { .. },
                    ..
                } => Some(*radius),
                _ => None,
            })
            .collect();
        // phase 0: base scale 1.0, rings at 1.06, 1.12, 1.18
        assert!((radii[0] - 106.0).abs() < 1e-3);
        assert!((radii[1] - 112.0).abs() < 1e-3);
        assert!((radii[2] - 118.0).abs() < 1e-3);
    }

    #[test]
    fn test_swell_follows_phase() {
        let mut effect = BreathingEffect::new();
        effect.initialize();
        effect.advance(Duration::ZERO);
        let body_at_rest = body_radius(&draw_at(&effect, 100.0));

        // a quarter of the way in time is past a quarter turn with the slow-in curve
        effect.advance(PERIOD / 4);
        let phase = effect.phase().unwrap_or_default();
        assert!(phase > 0.0 && phase < TAU);
        let body = body_radius(&draw_at(&effect, 100.0));
        assert!((body - 100.0 * (1.0 + 0.06 * phase.sin())).abs() < 1e-3);
        assert!((body_at_rest - 100.0).abs() < 1e-3);
    }

    fn body_radius(list: &DisplayList) -> f32 {
        match &list.primitives()[1] {
            Primitive::Circle { radius, .. } => *radius,
            other => panic!("unexpected primitive {other:?}"),
        }
    }
}
