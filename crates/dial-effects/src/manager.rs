//! Registry of effects keyed by animation kind.

use std::time::Duration;

use dial_core::{AnimationKind, Point, Surface};
use tracing::debug;

use crate::burst::BurstTask;
use crate::effect::Effect;
use crate::effects::{AuroraEffect, BreathingEffect, CosmicStarsEffect, WaterRipplesEffect};

/// Owns at most one effect per kind, in registration order.
#[derive(Debug, Default)]
pub struct AnimationManager {
    effects: Vec<(AnimationKind, Box<dyn Effect>)>,
}

impl AnimationManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager holding the four built-in effects, not yet initialized.
    pub fn with_default_effects(star_seed: u64) -> Self {
        let mut manager = Self::new();
        manager.register(Box::new(BreathingEffect::new()));
        manager.register(Box::new(AuroraEffect::new()));
        manager.register(Box::new(CosmicStarsEffect::with_seed(star_seed)));
        manager.register(Box::new(WaterRipplesEffect::new()));
        manager
    }

    /// Insert `effect` under its kind, returning the instance it replaced.
    ///
    /// A replacement keeps the original registration slot.
    pub fn register(&mut self, effect: Box<dyn Effect>) -> Option<Box<dyn Effect>> {
        let kind = effect.kind();
        match self.effects.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, slot)) => {
                debug!(%kind, "replacing registered effect");
                Some(std::mem::replace(slot, effect))
            }
            None => {
                debug!(%kind, "registering effect");
                self.effects.push((kind, effect));
                None
            }
        }
    }

    /// Remove the effect for `kind`, if any.
    pub fn unregister(&mut self, kind: AnimationKind) -> Option<Box<dyn Effect>> {
        let index = self.effects.iter().position(|(k, _)| *k == kind)?;
        debug!(%kind, "unregistering effect");
        Some(self.effects.remove(index).1)
    }

    pub fn get(&self, kind: AnimationKind) -> Option<&dyn Effect> {
        self.effects
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, effect)| effect.as_ref())
    }

    /// Registered kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = AnimationKind> + '_ {
        self.effects.iter().map(|(kind, _)| *kind)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Initialize every registered effect in registration order.
    pub fn initialize_all(&mut self) {
        for (kind, effect) in &mut self.effects {
            debug!(%kind, "initializing effect");
            effect.initialize();
        }
    }

    /// Forward the render loop's elapsed time to every effect.
    pub fn advance(&mut self, elapsed: Duration) {
        for (_, effect) in &mut self.effects {
            effect.advance(elapsed);
        }
    }

    /// Draw the effect for `kind`. Unregistered kinds, NONE included, draw nothing.
    pub fn draw(&self, kind: AnimationKind, surface: &mut dyn Surface, center: Point, radius: f32) {
        if let Some(effect) = self.get(kind) {
            effect.draw(surface, center, radius);
        }
    }

    /// Restart the burst of the effect for `kind` without blocking.
    pub fn trigger(&self, kind: AnimationKind) -> BurstTask {
        match self.get(kind) {
            Some(effect) => effect.trigger(),
            None => BurstTask::completed(),
        }
    }
}
