//! Discovery tracking
//!
//! Remembers which item kinds the player has produced so far and decides
//! when enough have been found to win.

use std::collections::HashSet;

use fusion_core::ItemKind;

/// Number of unique discoveries needed to win by default.
pub const TOTAL_DISCOVERIES: usize = 30;

/// Snapshot of the discovery counter, as shown in the "12 / 30" label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryProgress {
    pub count: usize,
    pub total: usize,
}

impl DiscoveryProgress {
    /// Fraction found, clamped to 0.0..=1.0
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        (self.count as f32 / self.total as f32).min(1.0)
    }
}

impl std::fmt::Display for DiscoveryProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.count, self.total)
    }
}

/// The set of discovered item kinds.
///
/// Within a session the set only grows; `reset` is the one way to shrink it.
#[derive(Debug, Clone)]
pub struct DiscoveryTracker {
    known: HashSet<ItemKind>,
    /// Discovery order, for listing.
    order: Vec<ItemKind>,
    threshold: usize,
}

impl DiscoveryTracker {
    pub fn new(threshold: usize) -> Self {
        Self {
            known: HashSet::new(),
            order: Vec::new(),
            threshold,
        }
    }

    pub fn is_discovered(&self, kind: &str) -> bool {
        self.known.contains(kind)
    }

    /// Add `kind` to the set. Returns `true` only the first time a kind is seen.
    pub fn record(&mut self, kind: &ItemKind) -> bool {
        if self.known.contains(kind.as_str()) {
            return false;
        }
        self.known.insert(kind.clone());
        self.order.push(kind.clone());
        true
    }

    /// Forget everything, then mark each seed kind as discovered.
    pub fn reset<'a>(&mut self, seed: impl IntoIterator<Item = &'a ItemKind>) {
        self.known.clear();
        self.order.clear();
        for kind in seed {
            self.record(kind);
        }
    }

    pub fn count(&self) -> usize {
        self.order.len()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Discoveries still missing before victory
    pub fn remaining(&self) -> usize {
        self.threshold.saturating_sub(self.count())
    }

    pub fn is_victory(&self) -> bool {
        self.count() >= self.threshold
    }

    pub fn progress(&self) -> DiscoveryProgress {
        DiscoveryProgress {
            count: self.count(),
            total: self.threshold,
        }
    }

    /// Discovered kinds, oldest first
    pub fn discovered(&self) -> impl Iterator<Item = &ItemKind> {
        self.order.iter()
    }
}

impl Default for DiscoveryTracker {
    fn default() -> Self {
        Self::new(TOTAL_DISCOVERIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(name: &str) -> ItemKind {
        ItemKind::from(name)
    }

    #[test]
    fn test_record_is_idempotent() {
        let mut tracker = DiscoveryTracker::default();
        assert!(tracker.record(&kind("Sandwich")));
        assert_eq!(tracker.count(), 1);
        for _ in 0..3 {
            assert!(!tracker.record(&kind("Sandwich")));
        }
        assert_eq!(tracker.count(), 1);
        assert!(tracker.is_discovered("Sandwich"));
        assert!(!tracker.is_discovered("Sushi"));
    }

    #[test]
    fn test_reset_reseeds() {
        let mut tracker = DiscoveryTracker::default();
        tracker.record(&kind("Sandwich"));
        tracker.record(&kind("Omelette"));

        let starters = [kind("Bread"), kind("Cheese"), kind("Bread")];
        tracker.reset(&starters);
        assert_eq!(tracker.count(), 2);
        assert!(tracker.is_discovered("Bread"));
        assert!(!tracker.is_discovered("Sandwich"));
        let order: Vec<_> = tracker.discovered().map(ItemKind::as_str).collect();
        assert_eq!(order, vec!["Bread", "Cheese"]);
    }

    #[test]
    fn test_victory_threshold() {
        let mut tracker = DiscoveryTracker::new(3);
        tracker.record(&kind("A"));
        tracker.record(&kind("B"));
        assert!(!tracker.is_victory());
        assert_eq!(tracker.remaining(), 1);
        tracker.record(&kind("C"));
        assert!(tracker.is_victory());
        tracker.record(&kind("D"));
        assert!(tracker.is_victory());
        assert_eq!(tracker.remaining(), 0);
    }

    #[test]
    fn test_progress_label() {
        let mut tracker = DiscoveryTracker::default();
        tracker.record(&kind("Bread"));
        let progress = tracker.progress();
        assert_eq!(progress.to_string(), "1 / 30");
        assert!((progress.fraction() - 1.0 / 30.0).abs() < f32::EPSILON);
    }
}
