//! Paints (solid and gradient) and blend modes.

use std::f32::consts::TAU;

use crate::color::Rgba;
use crate::geometry::Point;

/// How a primitive combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Normal alpha compositing.
    #[default]
    SrcOver,
    /// Additive: source and destination channels are summed.
    Plus,
}

/// Fill for a primitive. Gradient stops are spaced evenly from 0.0 to 1.0.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    /// Colors run outward from `center`, reaching the last stop at `radius`.
    Radial {
        center: Point,
        radius: f32,
        stops: Vec<Rgba>,
    },
    /// Colors run clockwise around `center`, starting at 3 o'clock.
    Sweep { center: Point, stops: Vec<Rgba> },
}

impl Paint {
    pub fn radial(stops: Vec<Rgba>, center: Point, radius: f32) -> Self {
        Paint::Radial {
            center,
            radius,
            stops,
        }
    }

    pub fn sweep(stops: Vec<Rgba>, center: Point) -> Self {
        Paint::Sweep { center, stops }
    }

    /// Evaluate the paint at a surface point.
    pub fn color_at(&self, point: Point) -> Rgba {
        match self {
            Paint::Solid(c) => *c,
            Paint::Radial {
                center,
                radius,
                stops,
            } => {
                let t = if *radius > 0.0 {
                    center.distance_to(point) / radius
                } else {
                    1.0
                };
                sample_stops(stops, t)
            }
            Paint::Sweep { center, stops } => {
                let d = point - *center;
                let angle = d.y.atan2(d.x).rem_euclid(TAU);
                sample_stops(stops, angle / TAU)
            }
        }
    }
}

fn sample_stops(stops: &[Rgba], t: f32) -> Rgba {
    match stops {
        [] => Rgba::TRANSPARENT,
        [only] => *only,
        _ => {
            let t = t.clamp(0.0, 1.0);
            let scaled = t * (stops.len() - 1) as f32;
            let idx = (scaled.floor() as usize).min(stops.len() - 2);
            stops[idx].lerp(stops[idx + 1], scaled - idx as f32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radial_fades_outward() {
        let paint = Paint::radial(
            vec![Rgba::WHITE, Rgba::TRANSPARENT],
            Point::new(0.0, 0.0),
            10.0,
        );
        assert_eq!(paint.color_at(Point::new(0.0, 0.0)).a, 1.0);
        assert!((paint.color_at(Point::new(5.0, 0.0)).a - 0.5).abs() < 1e-5);
        assert_eq!(paint.color_at(Point::new(0.0, 30.0)).a, 0.0);
    }

    #[test]
    fn test_sweep_starts_at_three_oclock() {
        let paint = Paint::sweep(
            vec![Rgba::RED, Rgba::GREEN, Rgba::RED],
            Point::new(0.0, 0.0),
        );
        assert_eq!(paint.color_at(Point::new(5.0, 0.0)), Rgba::RED);
        // half way round (9 o'clock) is the middle stop
        let mid = paint.color_at(Point::new(-5.0, 0.0));
        assert!((mid.g - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_stops_are_transparent() {
        let paint = Paint::sweep(Vec::new(), Point::default());
        assert_eq!(paint.color_at(Point::new(1.0, 1.0)), Rgba::TRANSPARENT);
    }
}
