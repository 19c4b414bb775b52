use fusion_core::{ItemKind, Vec2};
use tracing::trace;

use crate::handle::{HandleAllocator, ItemHandle};
use crate::storage::SparseSet;

/// A live item in the play area.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub position: Vec2,
}

impl Item {
    pub fn new(kind: impl Into<ItemKind>, position: Vec2) -> Self {
        Self {
            kind: kind.into(),
            position,
        }
    }
}

/// Owns every live item. Handles into it are weak: they never keep an item
/// alive and go stale as soon as the item is despawned.
#[derive(Debug, Default)]
pub struct ItemWorld {
    handles: HandleAllocator,
    items: SparseSet<Item>,
}

impl ItemWorld {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- Lifecycle ----

    /// Place a new item in the world.
    pub fn spawn(&mut self, kind: impl Into<ItemKind>, position: Vec2) -> ItemHandle {
        let handle = self.handles.allocate();
        let item = Item::new(kind, position);
        trace!(%handle, kind = %item.kind, "item spawned");
        self.items.insert(handle.index, item);
        debug_assert_eq!(self.items.len(), self.handles.len());
        handle
    }

    /// Remove an item, handing it back. Stale handles yield `None` and leave
    /// the world untouched.
    pub fn despawn(&mut self, handle: ItemHandle) -> Option<Item> {
        if !self.handles.deallocate(handle) {
            return None;
        }
        let item = self.items.remove(handle.index);
        trace!(%handle, "item despawned");
        item
    }

    /// Despawn every item, returning the handles that were destroyed.
    pub fn clear(&mut self) -> Vec<ItemHandle> {
        let handles = self.handles();
        for &handle in &handles {
            self.handles.deallocate(handle);
        }
        self.items.clear();
        handles
    }

    // ---- Lookup ----

    pub fn is_alive(&self, handle: ItemHandle) -> bool {
        self.handles.is_alive(handle)
    }

    pub fn get(&self, handle: ItemHandle) -> Option<&Item> {
        if !self.handles.is_alive(handle) {
            return None;
        }
        self.items.get(handle.index)
    }

    pub fn get_mut(&mut self, handle: ItemHandle) -> Option<&mut Item> {
        if !self.handles.is_alive(handle) {
            return None;
        }
        self.items.get_mut(handle.index)
    }

    /// Live handles in slot order.
    pub fn handles(&self) -> Vec<ItemHandle> {
        self.handles.live_handles().collect()
    }

    /// Live items in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemHandle, &Item)> {
        self.handles
            .live_handles()
            .filter_map(move |handle| self.items.get(handle.index).map(|item| (handle, item)))
    }

    /// Number of live items of the given kind.
    pub fn count_of(&self, kind: &str) -> usize {
        self.items.iter().filter(|(_, item)| item.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_and_despawn() {
        let mut world = ItemWorld::new();
        let bread = world.spawn("Bread", Vec2::new(-1.0, 0.0));
        assert!(world.is_alive(bread));
        assert_eq!(world.len(), 1);
        assert_eq!(world.get(bread).unwrap().kind, "Bread");

        let removed = world.despawn(bread).unwrap();
        assert_eq!(removed.position, Vec2::new(-1.0, 0.0));
        assert!(!world.is_alive(bread));
        assert!(world.is_empty());
    }

    #[test]
    fn stale_handle_does_not_see_new_item() {
        let mut world = ItemWorld::new();
        let bread = world.spawn("Bread", Vec2::ZERO);
        world.despawn(bread);

        let cheese = world.spawn("Cheese", Vec2::ONE);
        assert_eq!(cheese.index(), bread.index());
        assert_eq!(world.get(bread), None);
        assert!(world.despawn(bread).is_none());
        assert_eq!(world.get(cheese).unwrap().kind, "Cheese");
    }

    #[test]
    fn clear_invalidates_everything() {
        let mut world = ItemWorld::new();
        let a = world.spawn("Egg", Vec2::ZERO);
        let b = world.spawn("Rice", Vec2::ZERO);
        let cleared = world.clear();
        assert_eq!(cleared, vec![a, b]);
        assert!(world.is_empty());
        assert!(!world.is_alive(a));
        assert!(!world.is_alive(b));

        let c = world.spawn("Egg", Vec2::ZERO);
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert_eq!(world.iter().count(), 1);
    }

    #[test]
    fn iteration_and_counts() {
        let mut world = ItemWorld::new();
        world.spawn("Egg", Vec2::ZERO);
        let rice = world.spawn("Rice", Vec2::ZERO);
        world.spawn("Egg", Vec2::ONE);
        world.get_mut(rice).unwrap().position = Vec2::new(3.0, 2.0);

        assert_eq!(world.count_of("Egg"), 2);
        assert_eq!(world.count_of("Rice"), 1);
        let kinds: Vec<_> = world.iter().map(|(_, item)| item.kind.as_str()).collect();
        assert_eq!(kinds, vec!["Egg", "Rice", "Egg"]);
        assert_eq!(world.get(rice).unwrap().position, Vec2::new(3.0, 2.0));
    }
}
