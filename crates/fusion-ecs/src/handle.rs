use std::fmt;

/// A generational handle to a live item. Compact u32 slot + generation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemHandle {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl ItemHandle {
    /// Build a handle from raw parts (mainly for testing stale lookups).
    pub fn from_raw(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// The slot this handle points at.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The generation of the slot when this handle was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Item({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    generation: u32,
    alive: bool,
}

/// Hands out item handles and recycles freed slots under a new generation.
#[derive(Debug, Default)]
pub struct HandleAllocator {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    live: usize,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a handle, reusing the most recently freed slot if there is one.
    pub fn allocate(&mut self) -> ItemHandle {
        self.live += 1;
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.alive = true;
            return ItemHandle {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            alive: true,
        });
        ItemHandle {
            index,
            generation: 0,
        }
    }

    /// Release a handle. Returns `false` for handles that are already dead or stale.
    pub fn deallocate(&mut self, handle: ItemHandle) -> bool {
        if !self.is_alive(handle) {
            return false;
        }
        let slot = &mut self.slots[handle.index as usize];
        slot.alive = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(handle.index);
        self.live -= 1;
        true
    }

    /// Whether the handle still refers to the item it was issued for.
    pub fn is_alive(&self, handle: ItemHandle) -> bool {
        self.slots
            .get(handle.index as usize)
            .is_some_and(|slot| slot.alive && slot.generation == handle.generation)
    }

    /// Every currently live handle, in slot order.
    pub fn live_handles(&self) -> impl Iterator<Item = ItemHandle> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.alive)
            .map(|(index, slot)| ItemHandle {
                index: index as u32,
                generation: slot.generation,
            })
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_sequential() {
        let mut alloc = HandleAllocator::new();
        let a = alloc.allocate();
        let b = alloc.allocate();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(a.generation(), 0);
        assert_eq!(alloc.len(), 2);
    }

    #[test]
    fn freed_slot_gets_new_generation() {
        let mut alloc = HandleAllocator::new();
        let first = alloc.allocate();
        assert!(alloc.deallocate(first));
        let second = alloc.allocate();
        assert_eq!(second.index(), first.index());
        assert_eq!(second.generation(), 1);
        assert_ne!(first, second);
        assert!(!alloc.is_alive(first));
        assert!(alloc.is_alive(second));
    }

    #[test]
    fn stale_handle_cannot_be_freed_twice() {
        let mut alloc = HandleAllocator::new();
        let h = alloc.allocate();
        assert!(alloc.deallocate(h));
        assert!(!alloc.deallocate(h));
        assert!(alloc.is_empty());
    }

    #[test]
    fn out_of_range_handle_is_dead() {
        let alloc = HandleAllocator::new();
        assert!(!alloc.is_alive(ItemHandle::from_raw(7, 0)));
    }

    #[test]
    fn live_handles_skip_freed_slots() {
        let mut alloc = HandleAllocator::new();
        let a = alloc.allocate();
        let b = alloc.allocate();
        let c = alloc.allocate();
        alloc.deallocate(b);
        let live: Vec<_> = alloc.live_handles().collect();
        assert_eq!(live, vec![a, c]);
    }
}
