//! Core types for the dial analog clock.
//!
//! Holds everything the effect engine and the terminal front end share:
//! the [`AnimationKind`] identifier, colors and paints, the [`Surface`]
//! drawing capability with its recording [`DisplayList`], easing curves,
//! the hand-angle model with its second-hand spring, and the painter for
//! the clock face itself.

mod angles;
mod color;
mod easing;
mod face;
mod geometry;
mod kind;
mod paint;
mod spring;
mod surface;

pub use angles::{ClockTime, HandAngles, compute_hand_angles};
pub use color::{Rgba, wrap_degrees};
pub use easing::Easing;
pub use face::{FacePalette, FaceStyle, draw_face, draw_rotated_line};
pub use geometry::{Point, Size};
pub use kind::{AnimationKind, ParseKindError};
pub use paint::{BlendMode, Paint};
pub use spring::{DEFAULT_STIFFNESS, SecondHandSpring};
pub use surface::{DisplayList, Primitive, Style, Surface};
