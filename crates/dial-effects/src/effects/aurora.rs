//! Aurora: seven wobbling bands of sweeping color.

use std::time::Duration;

use dial_core::{AnimationKind, BlendMode, Easing, Paint, Point, Rgba, Surface, wrap_degrees};

use super::Motion;
use crate::burst::{BurstTask, Envelope};
use crate::effect::Effect;

const PERIOD: Duration = Duration::from_millis(16_000);

const ENVELOPE: Envelope = Envelope::new(
    Duration::from_millis(260),
    Easing::EaseOutCubic,
    Duration::from_millis(750),
    Easing::EaseOutCubic,
);

const BAND_COUNT: usize = 7;
const BASE_STROKE_DP: f32 = 3.0;
const INNER_OFFSET_DP: f32 = 14.0;
const BAND_STEP_DP: f32 = 7.0;

const GLOW: Rgba = Rgba::from_argb(0xFF00FFC6);

/// Hue stops of the sweep gradient, paired with the alpha weight of each stop.
const SWEEP_STOPS: [(f32, f32); 8] = [
    (160.0, 1.0),
    (190.0, 0.9),
    (220.0, 0.8),
    (280.0, 0.6),
    (330.0, 0.5),
    (20.0, 0.7),
    (80.0, 0.9),
    (160.0, 1.0),
];

/// Static ring descriptor.
#[derive(Debug, Clone, PartialEq)]
struct Band {
    offset_dp: f32,
    stroke_dp: f32,
    alpha: f32,
    hue_shift_deg: f32,
}

impl Band {
    fn generate(count: usize) -> Vec<Band> {
        (0..count)
            .map(|i| {
                let i = i as f32;
                Band {
                    offset_dp: INNER_OFFSET_DP + i * BAND_STEP_DP,
                    stroke_dp: BASE_STROKE_DP - 0.25 * i,
                    alpha: (0.42 - i * 0.05).max(0.06),
                    hue_shift_deg: i * 28.0,
                }
            })
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct AuroraEffect {
    motion: Option<Motion>,
    bands: Vec<Band>,
}

impl AuroraEffect {
    pub fn new() -> Self {
        Self::default()
    }
}

fn aurora_color(hue_deg: f32, alpha: f32) -> Rgba {
    Rgba::hsv(wrap_degrees(hue_deg), 0.65, 1.0, alpha)
}

impl Effect for AuroraEffect {
    fn kind(&self) -> AnimationKind {
        AnimationKind::Aurora
    }

    fn initialize(&mut self) {
        self.motion = Some(Motion::new(PERIOD, 360.0, Easing::Linear, ENVELOPE));
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
        let burst = motion.burst.amplitude();

        let amplitude = 0.85 + 0.10 * (phase + 45.0).to_radians().sin() + 0.35 * burst;

        let glow_radius = radius * (1.25 + 0.15 * burst);
        let glow = Paint::radial(
            vec![
                GLOW.with_alpha(0.10 * (0.6 + burst * 0.8)),
                Rgba::TRANSPARENT,
            ],
            center,
            glow_radius,
        );
        surface.fill_circle(center, glow_radius, &glow, BlendMode::Plus);

        for (idx, band) in self.bands.iter().enumerate() {
            let offset = surface.dp(band.offset_dp);
            let stroke = surface.dp(band.stroke_dp);
            let wobble =
                1.0 + 0.065 * (phase * 2.0 + band.hue_shift_deg * 3.0).to_radians().sin();
            let r = radius + offset * wobble * amplitude;

            let hue_offset = (phase + band.hue_shift_deg) % 360.0;
            let sweep = Paint::sweep(
                SWEEP_STOPS
                    .iter()
                    .map(|(hue, weight)| aurora_color(hue + hue_offset, band.alpha * weight))
                    .collect(),
                center,
            );

            surface.stroke_circle(
                center,
                r,
                stroke * (1.0 + burst * 0.4),
                &sweep,
                1.0,
                BlendMode::Plus,
            );
            surface.stroke_circle(
                center,
                r * (0.97 - 0.01 * idx as f32),
                stroke * 0.55,
                &sweep,
                0.65,
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
