//! Core types used throughout Fusion

use std::borrow::Borrow;
use std::fmt;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Identifier of an item type ("Bread", "Sandwich", ...)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKind(String);

impl ItemKind {
    /// Create an item kind from any string-like name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The kind's name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemKind {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ItemKind {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for ItemKind {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ItemKind {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ItemKind {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Axis-aligned rectangle that freshly spawned items are scattered over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnArea {
    /// Lower-left corner
    pub min: Vec2,
    /// Upper-right corner
    pub max: Vec2,
}

impl Default for SpawnArea {
    fn default() -> Self {
        Self {
            min: Vec2::new(-5.0, -3.0),
            max: Vec2::new(5.0, 3.0),
        }
    }
}

impl SpawnArea {
    /// Create a spawn area from two corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Whether both corners are finite, `min` lies below and left of (or on)
    /// `max`, and the extent between them fits in an `f32`
    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && (self.max - self.min).is_finite()
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
    }

    /// Check whether a point lies inside the area (edges included)
    pub fn contains(&self, point: Vec2) -> bool {
        let lo = self.min.min(self.max);
        let hi = self.min.max(self.max);
        point.cmpge(lo).all() && point.cmple(hi).all()
    }

    /// Draw a uniformly distributed point inside the area.
    ///
    /// Corners given in the wrong order are swapped rather than rejected, and a
    /// zero-width area always yields its single coordinate.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let lo = self.min.min(self.max);
        let hi = self.min.max(self.max);
        Vec2::new(rng.gen_range(lo.x..=hi.x), rng.gen_range(lo.y..=hi.y))
    }
}

/// Point halfway between `a` and `b`
pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_item_kind_compares_with_str() {
        let kind = ItemKind::from("Bread");
        assert_eq!(kind, "Bread");
        assert_eq!(kind.to_string(), "Bread");
        assert!(!kind.is_blank());
        assert!(ItemKind::new("  ").is_blank());
    }

    #[test]
    fn test_random_point_stays_inside() {
        let area = SpawnArea::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            assert!(area.contains(area.random_point(&mut rng)));
        }
    }

    #[test]
    fn test_degenerate_area() {
        let area = SpawnArea::new(Vec2::new(2.0, -1.0), Vec2::new(2.0, -1.0));
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(area.random_point(&mut rng), Vec2::new(2.0, -1.0));
    }

    #[test]
    fn test_inverted_corners() {
        let area = SpawnArea::new(Vec2::new(1.0, 1.0), Vec2::new(-1.0, -1.0));
        assert!(!area.is_well_formed());
        let mut rng = StdRng::seed_from_u64(5);
        assert!(area.contains(area.random_point(&mut rng)));
    }

    #[test]
    fn test_unbounded_area_is_not_well_formed() {
        assert!(SpawnArea::default().is_well_formed());
        let infinite = SpawnArea::new(Vec2::new(f32::NEG_INFINITY, -3.0), Vec2::new(5.0, 3.0));
        assert!(!infinite.is_well_formed());
        let nan = SpawnArea::new(Vec2::new(0.0, f32::NAN), Vec2::new(5.0, 3.0));
        assert!(!nan.is_well_formed());
        let too_wide = SpawnArea::new(Vec2::new(-3.0e38, -3.0), Vec2::new(3.0e38, 3.0));
        assert!(!too_wide.is_well_formed());
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(midpoint(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)), Vec2::ZERO);
    }
}
