//! Animation identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which decorative animation is drawn behind the clock face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKind {
    /// Draw nothing behind the face.
    #[default]
    None,
    Breathing,
    Aurora,
    CosmicStars,
    WaterRipples,
}

impl AnimationKind {
    /// Every kind, in declaration order.
    pub const ALL: [AnimationKind; 5] = [
        AnimationKind::None,
        AnimationKind::Breathing,
        AnimationKind::Aurora,
        AnimationKind::CosmicStars,
        AnimationKind::WaterRipples,
    ];

    /// Kinds offered to the user for selection (everything except `None`).
    pub fn selectable() -> impl Iterator<Item = AnimationKind> {
        Self::ALL.into_iter().filter(|k| *k != AnimationKind::None)
    }

    /// Human readable label for selectors and help lines.
    pub fn label(self) -> &'static str {
        match self {
            AnimationKind::None => "None",
            AnimationKind::Breathing => "Breathing",
            AnimationKind::Aurora => "Aurora",
            AnimationKind::CosmicStars => "Cosmic Stars",
            AnimationKind::WaterRipples => "Water Ripples",
        }
    }

    /// Stable identifier used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            AnimationKind::None => "none",
            AnimationKind::Breathing => "breathing",
            AnimationKind::Aurora => "aurora",
            AnimationKind::CosmicStars => "cosmic_stars",
            AnimationKind::WaterRipples => "water_ripples",
        }
    }

    /// Cycle to the next kind, wrapping around through `None`.
    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Cycle to the previous kind, wrapping around through `None`.
    pub fn prev(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Position in [`AnimationKind::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|k| *k == self).unwrap_or(0)
    }

    /// Look a kind up by its position in [`AnimationKind::ALL`].
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known animation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown animation `{0}` (expected one of: none, breathing, aurora, cosmic_stars, water_ripples)")]
pub struct ParseKindError(pub String);

impl FromStr for AnimationKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectable_excludes_none() {
        let kinds: Vec<_> = AnimationKind::selectable().collect();
        assert_eq!(kinds.len(), 4);
        assert!(!kinds.contains(&AnimationKind::None));
        assert_eq!(kinds[0], AnimationKind::Breathing);
        assert_eq!(kinds[3], AnimationKind::WaterRipples);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(AnimationKind::WaterRipples.next(), AnimationKind::None);
        assert_eq!(AnimationKind::None.prev(), AnimationKind::WaterRipples);
        assert_eq!(AnimationKind::Aurora.next().prev(), AnimationKind::Aurora);
    }

    #[test]
    fn test_parse() {
        assert_eq!("cosmic-stars".parse(), Ok(AnimationKind::CosmicStars));
        assert_eq!("Water Ripples".parse(), Ok(AnimationKind::WaterRipples));
        assert_eq!("NONE".parse(), Ok(AnimationKind::None));
        assert!("sparkles".parse::<AnimationKind>().is_err());
    }
}
