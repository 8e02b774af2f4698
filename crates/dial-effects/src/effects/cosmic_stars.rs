//! Cosmic stars: a seeded star field orbiting the face in three depth layers.

use std::time::Duration;

use dial_core::{AnimationKind, BlendMode, Easing, Paint, Point, Rgba, Surface};
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::Motion;
use crate::burst::{BurstTask, Envelope};
use crate::effect::Effect;

const PERIOD: Duration = Duration::from_millis(24_000);

const ENVELOPE: Envelope = Envelope::new(
    Duration::from_millis(220),
    Easing::EaseOutCubic,
    Duration::from_millis(700),
    Easing::Linear,
);

/// Number of stars in the field.
pub const STAR_COUNT: usize = 140;

/// Seed used when none is configured.
pub const DEFAULT_STAR_SEED: u64 = 1337;

const PALETTE: [Rgba; 6] = [
    Rgba::from_argb(0xFF0044FF),
    Rgba::from_argb(0xFF00AACC),
    Rgba::from_argb(0xFF7722FF),
    Rgba::from_argb(0xFF5555FF),
    Rgba::from_argb(0xFF008866),
    Rgba::from_argb(0xFF222222),
];

/// Depth bucket of a star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Far,
    Mid,
    Near,
}

impl Layer {
    /// Layer for the star at `index`: every 7th is near, every 3rd mid.
    fn for_index(index: usize) -> Self {
        if index % 7 == 0 {
            Layer::Near
        } else if index % 3 == 0 {
            Layer::Mid
        } else {
            Layer::Far
        }
    }

    /// Orbital speed as a multiple of the phase.
    pub fn speed(self) -> f32 {
        match self {
            Layer::Far => 0.12,
            Layer::Mid => 0.35,
            Layer::Near => 0.85,
        }
    }

    pub fn alpha_weight(self) -> f32 {
        match self {
            Layer::Far => 0.7,
            Layer::Mid => 0.85,
            Layer::Near => 1.0,
        }
    }

    /// 0 for far, 1 for mid, 2 for near.
    pub fn depth(self) -> u8 {
        match self {
            Layer::Far => 0,
            Layer::Mid => 1,
            Layer::Near => 2,
        }
    }
}

/// Static descriptor of one star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub base_angle_deg: f32,
    /// Orbit distance outside the face radius.
    pub orbit_dp: f32,
    pub size_dp: f32,
    pub color: Rgba,
    pub layer: Layer,
    pub twinkle_offset_deg: f32,
}

impl Star {
    /// Generate `count` stars from `seed`. Same seed, same field.
    pub fn generate(count: usize, seed: u64) -> Vec<Star> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|i| {
                let layer = Layer::for_index(i);
                let orbit_dp = match layer {
                    Layer::Near => (26 + rng.random_range(0..14)) as f32 * 1.5,
                    Layer::Mid => (36 + rng.random_range(0..28)) as f32 * 1.25,
                    Layer::Far => (48 + rng.random_range(0..56)) as f32,
                };
                let size_dp = match layer {
                    Layer::Near => 1.6 + rng.random::<f32>() * 1.3,
                    Layer::Mid => 1.1 + rng.random::<f32>(),
                    Layer::Far => 0.8 + rng.random::<f32>() * 0.9,
                };
                let color = PALETTE[rng.random_range(0..PALETTE.len())];
                Star {
                    base_angle_deg: rng.random::<f32>() * 360.0,
                    orbit_dp,
                    size_dp,
                    color,
                    layer,
                    twinkle_offset_deg: rng.random::<f32>() * 360.0,
                }
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct CosmicStarsEffect {
    seed: u64,
    motion: Option<Motion>,
    stars: Vec<Star>,
}

impl Default for CosmicStarsEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl CosmicStarsEffect {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_STAR_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            motion: None,
            stars: Vec::new(),
        }
    }

    /// The generated field; empty until initialized.
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}

impl Effect for CosmicStarsEffect {
    fn kind(&self) -> AnimationKind {
        AnimationKind::CosmicStars
    }

    fn initialize(&mut self) {
        self.motion = Some(Motion::new(PERIOD, 360.0, Easing::Linear, ENVELOPE));
        self.stars = Star::generate(STAR_COUNT, self.seed);
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

        let alpha_boost = 1.0 + burst * 0.9;
        let radius_boost = 1.0 + burst * 0.08;

        let sky_radius = radius * 1.35 * radius_boost;
        let sky = Paint::radial(
            vec![
                Rgba::BLACK.with_alpha(0.08 * (0.7 + 0.3 * alpha_boost)),
                Rgba::TRANSPARENT,
            ],
            center,
            sky_radius,
        );
        surface.fill_circle(center, sky_radius, &sky, BlendMode::SrcOver);

        for star in &self.stars {
            let depth = star.layer.depth() as f32;
            let angle = (star.base_angle_deg + phase * star.layer.speed()) % 360.0;
            // orbit outside the clock face
            let orbit = radius + surface.dp(star.orbit_dp) * radius_boost;
            let at = center.polar(orbit, angle.to_radians());

            let twinkle_phase = (phase * (1.8 + 0.4 * depth) + star.twinkle_offset_deg) % 360.0;
            let twinkle = 0.55 + 0.45 * (0.5 + 0.5 * twinkle_phase.to_radians().sin());

            let size = surface.dp(star.size_dp);
            let core_alpha = (0.28 + 0.48 * twinkle) * star.layer.alpha_weight() * alpha_boost;
            let glow_alpha = core_alpha * 0.36;

            surface.fill_circle(
                at,
                size + 1.2,
                &Paint::Solid(Rgba::BLACK.with_alpha((core_alpha * 0.25).clamp(0.0, 0.25))),
                BlendMode::SrcOver,
            );
            surface.fill_circle(
                at,
                size,
                &Paint::Solid(star.color.with_alpha(core_alpha)),
                BlendMode::SrcOver,
            );
            surface.fill_circle(
                at,
                size * (2.2 + 0.8 * twinkle),
                &Paint::Solid(star.color.with_alpha(glow_alpha)),
                BlendMode::Plus,
            );
        }

        let rim = surface.dp(0.75);
        surface.stroke_circle(
            center,
            radius * 1.55 * radius_boost,
            rim,
            &Paint::Solid(Rgba::BLACK.with_alpha(0.035 * (1.0 + burst * 0.5))),
            1.0,
            BlendMode::SrcOver,
        );
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
    use dial_core::{DisplayList, Primitive, Size};

    use super::*;

    #[test]
    fn test_layout_is_deterministic_for_seed() {
        let mut a = CosmicStarsEffect::with_seed(42);
        let mut b = CosmicStarsEffect::with_seed(42);
        a.initialize();
        b.initialize();
        assert_eq!(a.stars().len(), STAR_COUNT);
        assert_eq!(a.stars(), b.stars());
    }

    #[test]
    fn test_reinitialize_keeps_layout() {
        let mut effect = CosmicStarsEffect::new();
        effect.initialize();
        let first = effect.stars().to_vec();
        effect.initialize();
        assert_eq!(effect.stars(), first.as_slice());
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(Star::generate(STAR_COUNT, 1), Star::generate(STAR_COUNT, 2));
    }

    #[test]
    fn test_layers_and_ranges() {
        let stars = Star::generate(STAR_COUNT, DEFAULT_STAR_SEED);
        for (i, star) in stars.iter().enumerate() {
            assert_eq!(star.layer, Layer::for_index(i));
            assert!((0.0..360.0).contains(&star.base_angle_deg));
            assert!((0.0..360.0).contains(&star.twinkle_offset_deg));
            match star.layer {
                Layer::Near => {
                    assert!((39.0..=58.5).contains(&star.orbit_dp));
                    assert!((1.6..=2.9 + 1e-5).contains(&star.size_dp));
                }
                Layer::Mid => {
                    assert!((45.0..=78.75).contains(&star.orbit_dp));
                    assert!((1.1..=2.1 + 1e-5).contains(&star.size_dp));
                }
                Layer::Far => {
                    assert!((48.0..=103.0).contains(&star.orbit_dp));
                    assert!((0.8..=1.7 + 1e-5).contains(&star.size_dp));
                }
            }
            assert!(PALETTE.contains(&star.color));
        }
        assert_eq!(stars[0].layer, Layer::Near);
        assert_eq!(stars[3].layer, Layer::Mid);
        assert_eq!(stars[1].layer, Layer::Far);
        assert_eq!(stars[21].layer, Layer::Near);
    }

    #[test]
    fn test_star_positions_follow_orbit() {
        let mut effect = CosmicStarsEffect::new();
        effect.initialize();
        effect.advance(Duration::ZERO);
        let center = Point::new(300.0, 300.0);
        let radius = 100.0;
        let mut list = DisplayList::new(Size::new(600.0, 600.0), 1.0);
        effect.draw(&mut list, center, radius);

        // sky disc, 3 circles per star, outer rim
        assert_eq!(list.circle_count(), 1 + 3 * STAR_COUNT + 1);

        let star = &effect.stars()[0];
        let expected = center.polar(radius + star.orbit_dp, star.base_angle_deg.to_radians());
        match &list.primitives()[2] {
            Primitive::Circle {
                center: at, radius, ..
            } => {
                assert!(at.distance_to(expected) < 1e-3);
                assert!((radius - star.size_dp).abs() < 1e-4);
            }
            other => panic!("unexpected primitive {other:?}"),
        }
    }

    #[test]
    fn test_near_layer_orbits_fastest() {
        assert!(Layer::Near.speed() > Layer::Mid.speed());
        assert!(Layer::Mid.speed() > Layer::Far.speed());
        assert!(Layer::Near.alpha_weight() > Layer::Far.alpha_weight());
    }
}
