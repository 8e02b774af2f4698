//! The capability every animation variant implements.

use std::fmt;
use std::time::Duration;

use dial_core::{AnimationKind, Point, Surface};

use crate::burst::BurstTask;

/// One procedural animation drawn behind the clock face.
///
/// Lifecycle: [`initialize`](Effect::initialize) allocates the phase driver,
/// the burst and any static geometry. Until then [`advance`](Effect::advance)
/// and [`draw`](Effect::draw) do nothing and [`trigger`](Effect::trigger)
/// returns a completed task. Initializing again restarts the phase.
pub trait Effect: fmt::Debug + Send {
    fn kind(&self) -> AnimationKind;

    fn initialize(&mut self);

    /// Update the continuous phase from the render loop's elapsed time.
    fn advance(&mut self, elapsed: Duration);

    /// Paint outward from `center`, sizing everything from `radius`.
    fn draw(&self, surface: &mut dyn Surface, center: Point, radius: f32);

    /// Restart the burst envelope without blocking.
    fn trigger(&self) -> BurstTask;

    /// Current phase, `None` before initialization.
    fn phase(&self) -> Option<f32>;

    /// Current burst amplitude, 0.0 at rest or before initialization.
    fn burst_amplitude(&self) -> f32;
}
