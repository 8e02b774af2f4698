//! Water ripples: a pool of light with lagging rings and drifting sparkles.

use std::f32::consts::TAU;
use std::time::Duration;

use dial_core::{AnimationKind, BlendMode, Easing, Paint, Point, Rgba, Surface, wrap_degrees};

use super::Motion;
use crate::burst::{BurstTask, Envelope};
use crate::effect::Effect;

const PERIOD: Duration = Duration::from_millis(6000);

const ENVELOPE: Envelope = Envelope::new(
    Duration::from_millis(220),
    Easing::EaseOutCubic,
    Duration::from_millis(820),
    Easing::Linear,
);

const BAND_COUNT: usize = 7;
const SPARKLE_COUNT: usize = 5;

/// Outermost ring lags this fraction of a cycle behind the innermost.
const MAX_LAG: f32 = 0.65;

const WATER_LIGHT: Rgba = Rgba::from_argb(0xFF38BDF8);
const WATER_DEEP: Rgba = Rgba::from_argb(0xFF0EA5E9);

/// Static ring descriptor.
#[derive(Debug, Clone, PartialEq)]
struct Band {
    /// Distance outside the base radius.
    offset_dp: f32,
    stroke_dp: f32,
    alpha: f32,
    /// Fraction of a cycle this ring trails the phase by (0-1).
    lag: f32,
}

impl Band {
    fn generate(count: usize) -> Vec<Band> {
        let last = count.saturating_sub(1).max(1) as f32;
        (0..count)
            .map(|i| {
                let t = i as f32 / last;
                Band {
                    offset_dp: 10.0 + 12.0 * i as f32,
                    stroke_dp: (2.2 - 1.2 * t).max(0.8),
                    alpha: (0.36 - 0.045 * i as f32).max(0.05),
                    lag: t * MAX_LAG,
                }
            })
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct WaterRipplesEffect {
    motion: Option<Motion>,
    bands: Vec<Band>,
}

impl WaterRipplesEffect {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for WaterRipplesEffect {
    fn kind(&self) -> AnimationKind {
        AnimationKind::WaterRipples
    }

    fn initialize(&mut self) {
        self.motion = Some(Motion::new(PERIOD, 1.0, Easing::Linear, ENVELOPE));
        self.bands = Band::generate(BAND_COUNT);
    }

    fn advance(&mut self, elapsed: Duration) {
        Motion::advance(&mut self.motion, elapsed);
    }

    fn draw(&self, surface: &mut dyn Surface, center: Point, radius: f32) {
        let Some(motion) = &self.motion else {
            return;
        };
        let phase = motion.phase.value();
        let splash = motion.burst.amplitude();

        // water body
        let base_radius = radius * (0.68 + 0.16 * splash);
        let body = Paint::radial(
            vec![
                WATER_LIGHT.with_alpha(0.18 + 0.12 * splash),
                WATER_DEEP.with_alpha(0.10 + 0.10 * splash),
                Rgba::TRANSPARENT,
            ],
            center,
            base_radius * 1.25,
        );
        surface.fill_circle(center, base_radius, &body, BlendMode::SrcOver);

        // caustic highlight, offset up and to the right
        let shine = Paint::radial(
            vec![
                Rgba::WHITE.with_alpha(0.12 + 0.12 * splash),
                Rgba::TRANSPARENT,
            ],
            Point::new(center.x + radius * 0.22, center.y - radius * 0.18),
            radius * (0.55 + 0.15 * splash),
        );
        surface.fill_circle(
            center,
            radius * (0.50 + 0.12 * splash),
            &shine,
            BlendMode::Plus,
        );

        let amp = 0.035 + 0.015 * (phase * TAU).sin() + 0.08 * splash;

        for (idx, band) in self.bands.iter().enumerate() {
            let idx = idx as f32;
            let stroke = surface.dp(band.stroke_dp) * (1.0 + 0.35 * splash);
            let alpha = (band.alpha * (0.75 + 0.25 * splash)).clamp(0.0, 1.0);

            let age = (phase - band.lag).rem_euclid(1.0);
            let wobble = 1.0
                + amp * (age * 360.0 + idx * 17.0).to_radians().sin()
                + 0.02 * (age * 720.0 + idx * 33.0).to_radians().cos();
            let r = (radius + surface.dp(band.offset_dp)) * wobble;

            let hue = 195.0 + 12.0 * (age * 360.0).to_radians().sin();
            let c1 = Rgba::hsv(wrap_degrees(hue), 0.55, 1.0, alpha);
            let c2 = Rgba::hsv(wrap_degrees(hue + 18.0), 0.65, 1.0, alpha * 0.9);

            surface.stroke_circle(
                center,
                r,
                stroke,
                &Paint::sweep(vec![c1, c2, c1], center),
                1.0,
                BlendMode::Plus,
            );
            surface.stroke_circle(
                center,
                r * (0.965 - idx * 0.006),
                stroke * 0.55,
                &Paint::sweep(vec![c2, c1, c2], center),
                (alpha * 0.8).clamp(0.0, 1.0),
                BlendMode::Plus,
            );
        }

        for i in 0..SPARKLE_COUNT {
            let i = i as f32;
            let a = (phase * 360.0 + i * 72.0).to_radians();
            let sparkle = Point::new(
                center.x + a.cos() * (radius * (0.34 + 0.10 * i)),
                center.y + a.sin() * (radius * (0.10 + 0.07 * i)),
            );
            let shimmer = (phase * 720.0 + i * 33.0).to_radians().sin().abs();
            let sparkle_alpha = (0.08 + 0.10 * shimmer).clamp(0.0, 0.2);
            let size = surface.dp(1.2 + 0.3 * i);
            surface.fill_circle(
                sparkle,
                size,
                &Paint::Solid(Rgba::WHITE.with_alpha(sparkle_alpha * (1.0 + 0.8 * splash))),
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
