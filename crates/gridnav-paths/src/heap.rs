//! Indexed binary min-heap with decrease-key.
//!
//! [`IndexedHeap`] stores lightweight keys (cell indices, in the A* search).
//! Ordering and each key's current position live in a caller-owned
//! [`HeapSlots`] store, which lets the heap find any key in O(1) and re-sift
//! it after its priority improves. `std::collections::BinaryHeap` cannot do
//! that, which forces lazy deletion and duplicate entries instead.

use std::cmp::Ordering;

/// Ordering and position bookkeeping for the keys of an [`IndexedHeap`].
pub trait HeapSlots<K> {
    /// `Less` when `a` must be popped before `b`.
    fn compare(&self, a: K, b: K) -> Ordering;

    /// Last position recorded for `key` by [`set_heap_index`](Self::set_heap_index).
    fn heap_index(&self, key: K) -> usize;

    /// Record that `key` now lives at `index` in the heap array.
    fn set_heap_index(&mut self, key: K, index: usize);
}

/// Array-backed binary min-heap whose keys remember their own position.
#[derive(Debug, Clone)]
pub struct IndexedHeap<K> {
    items: Vec<K>,
}

impl<K> Default for IndexedHeap<K> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<K: Copy + PartialEq> IndexedHeap<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Heap with room for `capacity` keys before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every key but keep the backing storage.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The key [`pop`](Self::pop) would return next.
    #[inline]
    pub fn peek(&self) -> Option<K> {
        self.items.first().copied()
    }

    /// Whether `key` is currently in the heap. O(1).
    #[inline]
    pub fn contains<S: HeapSlots<K>>(&self, slots: &S, key: K) -> bool {
        self.items.get(slots.heap_index(key)) == Some(&key)
    }

    /// Insert `key` and restore heap order. O(log n).
    pub fn push<S: HeapSlots<K>>(&mut self, slots: &mut S, key: K) {
        let index = self.items.len();
        slots.set_heap_index(key, index);
        self.items.push(key);
        self.sift_up(slots, index);
    }

    /// Remove and return the minimum key. O(log n).
    pub fn pop<S: HeapSlots<K>>(&mut self, slots: &mut S) -> Option<K> {
        if self.items.is_empty() {
            return None;
        }
        let first = self.items.swap_remove(0);
        if let Some(&moved) = self.items.first() {
            slots.set_heap_index(moved, 0);
            self.sift_down(slots, 0);
        }
        Some(first)
    }

    /// Restore heap order after `key`'s priority improved. O(log n).
    ///
    /// Only moves the key towards the root; a key whose priority got worse
    /// must be removed and pushed again instead.
    pub fn decrease_key<S: HeapSlots<K>>(&mut self, slots: &mut S, key: K) {
        let index = slots.heap_index(key);
        debug_assert!(self.items.get(index) == Some(&key), "key is not in the heap");
        self.sift_up(slots, index);
    }

    fn sift_up<S: HeapSlots<K>>(&mut self, slots: &mut S, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if slots.compare(self.items[index], self.items[parent]) != Ordering::Less {
                break;
            }
            self.swap(slots, index, parent);
            index = parent;
        }
    }

    fn sift_down<S: HeapSlots<K>>(&mut self, slots: &mut S, mut index: usize) {
        let len = self.items.len();
        loop {
            let left = index * 2 + 1;
            if left >= len {
                return;
            }
            let right = left + 1;
            let mut child = left;
            if right < len && slots.compare(self.items[right], self.items[left]) == Ordering::Less {
                child = right;
            }
            if slots.compare(self.items[child], self.items[index]) != Ordering::Less {
                return;
            }
            self.swap(slots, index, child);
            index = child;
        }
    }

    #[inline]
    fn swap<S: HeapSlots<K>>(&mut self, slots: &mut S, a: usize, b: usize) {
        self.items.swap(a, b);
        slots.set_heap_index(self.items[a], a);
        slots.set_heap_index(self.items[b], b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngExt;

    /// Priorities indexed by key, plus each key's heap position.
    #[derive(Default)]
    struct Slots {
        priority: Vec<i32>,
        index: Vec<usize>,
    }

    impl Slots {
        fn with_priorities(priority: Vec<i32>) -> Self {
            let index = vec![usize::MAX; priority.len()];
            Self { priority, index }
        }
    }

    impl HeapSlots<usize> for Slots {
        fn compare(&self, a: usize, b: usize) -> Ordering {
            self.priority[a].cmp(&self.priority[b])
        }

        fn heap_index(&self, key: usize) -> usize {
            self.index[key]
        }

        fn set_heap_index(&mut self, key: usize, index: usize) {
            self.index[key] = index;
        }
    }

    fn drain(heap: &mut IndexedHeap<usize>, slots: &mut Slots) -> Vec<i32> {
        let mut out = Vec::new();
        while let Some(k) = heap.pop(slots) {
            out.push(slots.priority[k]);
        }
        out
    }

    #[test]
    fn pops_in_priority_order() {
        let mut slots = Slots::with_priorities(vec![5, 3, 8, 1, 9, 2]);
        let mut heap = IndexedHeap::with_capacity(6);
        for k in 0..6 {
            heap.push(&mut slots, k);
        }
        assert_eq!(heap.len(), 6);
        assert_eq!(heap.peek(), Some(3));
        assert_eq!(drain(&mut heap, &mut slots), vec![1, 2, 3, 5, 8, 9]);
        assert!(heap.is_empty());
        assert_eq!(heap.pop(&mut slots), None);
    }

    #[test]
    fn decrease_key_moves_item_up() {
        let mut slots = Slots::with_priorities(vec![10, 20, 30, 40]);
        let mut heap = IndexedHeap::new();
        for k in 0..4 {
            heap.push(&mut slots, k);
        }
        slots.priority[3] = 5;
        heap.decrease_key(&mut slots, 3);
        assert_eq!(heap.pop(&mut slots), Some(3));
        assert_eq!(drain(&mut heap, &mut slots), vec![10, 20, 30]);
    }

    #[test]
    fn contains_survives_pop_of_other_items() {
        let mut slots = Slots::with_priorities(vec![4, 1, 7]);
        let mut heap = IndexedHeap::new();
        for k in 0..3 {
            heap.push(&mut slots, k);
        }
        assert_eq!(heap.pop(&mut slots), Some(1));
        assert!(!heap.contains(&slots, 1));
        assert!(heap.contains(&slots, 0));
        assert!(heap.contains(&slots, 2));
        assert_eq!(heap.pop(&mut slots), Some(0));
        assert!(!heap.contains(&slots, 0));
        assert!(heap.contains(&slots, 2));
    }

    #[test]
    fn contains_false_for_never_inserted_key() {
        let mut slots = Slots::with_priorities(vec![1, 2, 3]);
        let mut heap = IndexedHeap::new();
        heap.push(&mut slots, 0);
        heap.push(&mut slots, 1);
        assert!(!heap.contains(&slots, 2));
        // A stale index pointing at an occupied slot is not enough.
        slots.index[2] = 0;
        assert!(!heap.contains(&slots, 2));
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut slots = Slots::with_priorities((0..64).collect());
        let mut heap = IndexedHeap::with_capacity(64);
        for k in 0..64 {
            heap.push(&mut slots, k);
        }
        let cap = heap.items.capacity();
        heap.clear();
        assert!(heap.is_empty());
        assert!(!heap.contains(&slots, 0));
        assert_eq!(heap.items.capacity(), cap);
    }

    #[test]
    fn random_interleaving_pops_non_decreasing() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let n = 200;
            let mut slots = Slots::with_priorities((0..n).map(|_| rng.random_range(0..1000)).collect());
            let mut heap = IndexedHeap::with_capacity(n);
            let mut inserted = vec![false; n];
            let mut popped = Vec::new();
            for _ in 0..600 {
                match rng.random_range(0..3u32) {
                    0 => {
                        let k = rng.random_range(0..n);
                        if !inserted[k] {
                            inserted[k] = true;
                            heap.push(&mut slots, k);
                        }
                    }
                    1 => {
                        let k = rng.random_range(0..n);
                        if heap.contains(&slots, k) {
                            slots.priority[k] -= rng.random_range(0..200);
                            heap.decrease_key(&mut slots, k);
                        }
                    }
                    _ => {
                        if let Some(k) = heap.pop(&mut slots) {
                            // Nothing left in the heap may beat what was just popped.
                            if let Some(next) = heap.peek() {
                                assert!(slots.priority[next] >= slots.priority[k]);
                            }
                            popped.push(k);
                        }
                    }
                }
            }
            let rest = drain(&mut heap, &mut slots);
            assert!(rest.windows(2).all(|w| w[0] <= w[1]), "{rest:?}");
            for k in popped {
                assert!(!heap.contains(&slots, k));
            }
        }
    }
}
