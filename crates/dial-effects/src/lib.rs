//! Decorative animations for the dial clock.
//!
//! Each [`Effect`] owns a continuous phase, advanced from the render loop's
//! shared elapsed time, and a [`Burst`] amplitude that rises and decays
//! whenever the effect is triggered. The [`AnimationManager`] keeps one
//! effect per [`AnimationKind`](dial_core::AnimationKind) and dispatches
//! draw and trigger calls to the selected one.

mod burst;
mod effect;
mod effects;
mod manager;
mod phase;

pub use burst::{Burst, BurstTask, Envelope};
pub use effect::Effect;
pub use effects::{
    AuroraEffect, BreathingEffect, CosmicStarsEffect, DEFAULT_STAR_SEED, Layer, STAR_COUNT, Star,
    WaterRipplesEffect,
};
pub use manager::AnimationManager;
pub use phase::PhaseDriver;
