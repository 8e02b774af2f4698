//! Easing curves for phase drivers and burst envelopes.

/// Maps linear progress in 0.0-1.0 to eased progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Fast start, gentle landing: cubic-bezier(0.33, 1, 0.68, 1).
    EaseOutCubic,
    /// Linear start, slow settle: cubic-bezier(0, 0, 0.2, 1).
    LinearOutSlowIn,
}

/// Bisection steps when solving the bezier for x. 2^-24 is below f32 precision.
const SOLVE_ITERATIONS: usize = 24;

impl Easing {
    /// Eased value for `t`. Input is clamped, endpoints are exact.
    pub fn transform(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => cubic_bezier(0.33, 1.0, 0.68, 1.0, t),
            Easing::LinearOutSlowIn => cubic_bezier(0.0, 0.0, 0.2, 1.0, t),
        }
    }
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    // x(s) is monotonic for control x values in 0..1, so bisection converges
    let mut lo = 0.0_f32;
    let mut hi = 1.0_f32;
    let mut s = t;
    for _ in 0..SOLVE_ITERATIONS {
        s = (lo + hi) / 2.0;
        if bezier_component(x1, x2, s) < t {
            lo = s;
        } else {
            hi = s;
        }
    }
    bezier_component(y1, y2, s)
}

fn bezier_component(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_exact() {
        for easing in [Easing::Linear, Easing::EaseOutCubic, Easing::LinearOutSlowIn] {
            assert_eq!(easing.transform(0.0), 0.0);
            assert_eq!(easing.transform(1.0), 1.0);
            assert_eq!(easing.transform(-3.0), 0.0);
            assert_eq!(easing.transform(7.0), 1.0);
        }
    }

    #[test]
    fn test_ease_out_leads_linear() {
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!(Easing::EaseOutCubic.transform(t) > t);
            assert!(Easing::LinearOutSlowIn.transform(t) >= t - 1e-4);
        }
    }

    #[test]
    fn test_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = Easing::EaseOutCubic.transform(i as f32 / 100.0);
            assert!(v + 1e-5 >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_linear_bezier_is_identity() {
        assert!((cubic_bezier(0.25, 0.25, 0.75, 0.75, 0.3) - 0.3).abs() < 1e-4);
    }
}
