/// Sparse-set storage keyed by slot index. O(1) insert/remove/lookup with a
/// packed value array for iteration.
#[derive(Debug)]
pub(crate) struct SparseSet<T> {
    /// Slot index -> position in `dense`.
    sparse: Vec<Option<usize>>,
    dense: Vec<T>,
    /// Slot index of each dense entry.
    owners: Vec<u32>,
}

impl<T> SparseSet<T> {
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
            owners: Vec::new(),
        }
    }

    /// Store `value` for `index`, returning the value it replaced.
    pub fn insert(&mut self, index: u32, value: T) -> Option<T> {
        let idx = index as usize;
        if idx >= self.sparse.len() {
            self.sparse.resize(idx + 1, None);
        }
        match self.sparse[idx] {
            Some(dense_idx) => Some(std::mem::replace(&mut self.dense[dense_idx], value)),
            None => {
                self.sparse[idx] = Some(self.dense.len());
                self.dense.push(value);
                self.owners.push(index);
                None
            }
        }
    }

    pub fn get(&self, index: u32) -> Option<&T> {
        let dense_idx = (*self.sparse.get(index as usize)?)?;
        self.dense.get(dense_idx)
    }

    pub fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        let dense_idx = (*self.sparse.get(index as usize)?)?;
        self.dense.get_mut(dense_idx)
    }

    /// Take the value stored for `index` out of the set.
    pub fn remove(&mut self, index: u32) -> Option<T> {
        let dense_idx = self.sparse.get_mut(index as usize)?.take()?;
        let value = self.dense.swap_remove(dense_idx);
        self.owners.swap_remove(dense_idx);
        // The former last entry now lives at `dense_idx`.
        if let Some(&moved) = self.owners.get(dense_idx) {
            self.sparse[moved as usize] = Some(dense_idx);
        }
        Some(value)
    }

    /// (slot index, value) pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.owners.iter().copied().zip(self.dense.iter())
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn clear(&mut self) {
        self.sparse.clear();
        self.dense.clear();
        self.owners.clear();
    }
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut set = SparseSet::new();
        assert_eq!(set.insert(5, "five"), None);
        assert_eq!(set.get(5), Some(&"five"));
        assert_eq!(set.get(0), None);
        assert_eq!(set.get(99), None);
    }

    #[test]
    fn insert_replaces() {
        let mut set = SparseSet::new();
        set.insert(0, 1);
        assert_eq!(set.insert(0, 2), Some(1));
        assert_eq!(set.get(0), Some(&2));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_keeps_others_reachable() {
        let mut set = SparseSet::new();
        set.insert(0, 'a');
        set.insert(1, 'b');
        set.insert(2, 'c');
        assert_eq!(set.remove(0), Some('a'));
        assert_eq!(set.remove(0), None);
        assert_eq!(set.get(1), Some(&'b'));
        assert_eq!(set.get(2), Some(&'c'));
        assert_eq!(set.len(), 2);

        assert_eq!(set.remove(2), Some('c'));
        assert_eq!(set.get(1), Some(&'b'));
    }

    #[test]
    fn get_mut_and_iter() {
        let mut set = SparseSet::new();
        set.insert(10, 100);
        set.insert(20, 200);
        *set.get_mut(20).unwrap() += 1;
        let mut items: Vec<_> = set.iter().collect();
        items.sort_by_key(|(idx, _)| *idx);
        assert_eq!(items, vec![(10, &100), (20, &201)]);
    }
}
