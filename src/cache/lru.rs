//! Recency List Module
//!
//! Slab-backed doubly-linked list that keeps cache entries in recency order.

use crate::cache::CacheEntry;

// == Node ==
#[derive(Debug)]
struct Node<V> {
    entry: CacheEntry<V>,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Orders entries from most recently used to least recently used.
///
/// - Front (head) = most recently used
/// - Back (tail) = least recently used
///
/// Nodes live in a `Vec` and are addressed by slot index. Freed slots are
/// reused, so a slot stays valid until the entry in it is removed. All
/// structural operations are O(1).
#[derive(Debug)]
pub struct RecencyList<V> {
    nodes: Vec<Option<Node<V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<V> Default for RecencyList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RecencyList<V> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the number of entries in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot of the most recently used entry.
    pub fn front(&self) -> Option<usize> {
        self.head
    }

    /// Slot of the least recently used entry.
    pub fn back(&self) -> Option<usize> {
        self.tail
    }

    /// Slot following `slot` towards the back.
    pub fn next_of(&self, slot: usize) -> Option<usize> {
        self.node(slot).and_then(|node| node.next)
    }

    pub fn get(&self, slot: usize) -> Option<&CacheEntry<V>> {
        self.node(slot).map(|node| &node.entry)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut CacheEntry<V>> {
        self.nodes
            .get_mut(slot)
            .and_then(Option::as_mut)
            .map(|node| &mut node.entry)
    }

    // == Push Front ==
    /// Inserts an entry as the most recently used and returns its slot.
    pub fn push_front(&mut self, entry: CacheEntry<V>) -> usize {
        let node = Node {
            entry,
            prev: None,
            next: None,
        };

        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };

        self.link_front(slot);
        self.len += 1;
        slot
    }

    // == Move To Front ==
    /// Marks the entry in `slot` as most recently used.
    pub fn move_to_front(&mut self, slot: usize) {
        if self.head == Some(slot) || self.node(slot).is_none() {
            return;
        }
        self.unlink(slot);
        self.link_front(slot);
    }

    // == Remove ==
    /// Removes the entry in `slot` and frees the slot.
    pub fn remove(&mut self, slot: usize) -> Option<CacheEntry<V>> {
        self.node(slot)?;
        self.unlink(slot);
        let node = self.nodes[slot].take()?;
        self.free.push(slot);
        self.len -= 1;
        Some(node.entry)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    pub fn pop_back(&mut self) -> Option<CacheEntry<V>> {
        let slot = self.tail?;
        self.remove(slot)
    }

    // == Clear ==
    /// Drops every entry and releases all slots.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn node(&self, slot: usize) -> Option<&Node<V>> {
        self.nodes.get(slot).and_then(Option::as_ref)
    }

    /// Detaches `slot` from its neighbours, leaving the node in place.
    fn unlink(&mut self, slot: usize) {
        let Some(node) = self.nodes[slot].as_mut() else {
            return;
        };
        let (prev, next) = (node.prev.take(), node.next.take());

        match prev {
            Some(p) => {
                if let Some(prev_node) = self.nodes[p].as_mut() {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(n) => {
                if let Some(next_node) = self.nodes[n].as_mut() {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Attaches a detached `slot` at the head.
    fn link_front(&mut self, slot: usize) {
        let old_head = self.head;

        if let Some(node) = self.nodes[slot].as_mut() {
            node.prev = None;
            node.next = old_head;
        }
        if let Some(h) = old_head {
            if let Some(head_node) = self.nodes[h].as_mut() {
                head_node.prev = Some(slot);
            }
        }

        self.head = Some(slot);
        if self.tail.is_none() {
            self.tail = Some(slot);
        }
    }
}

// == Iterator ==
/// Front-to-back iterator over a [`RecencyList`].
pub struct Iter<'a, V> {
    list: &'a RecencyList<V>,
    cursor: Option<usize>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a CacheEntry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.entry)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn entry(key: &str) -> CacheEntry<u32> {
        CacheEntry::new(key.to_string(), 0, Duration::from_secs(60))
    }

    fn keys(list: &RecencyList<u32>) -> Vec<String> {
        list.iter().map(|e| e.key.clone()).collect()
    }

    /// Walks the list back-to-front through the `prev` links.
    fn keys_backwards(list: &RecencyList<u32>) -> Vec<String> {
        let mut out = Vec::new();
        let mut cursor = list.back();
        while let Some(slot) = cursor {
            let node = list.node(slot).unwrap();
            out.push(node.entry.key.clone());
            cursor = node.prev;
        }
        out
    }

    #[test]
    fn test_list_new() {
        let list: RecencyList<u32> = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = RecencyList::new();

        list.push_front(entry("a"));
        list.push_front(entry("b"));
        list.push_front(entry("c"));

        assert_eq!(list.len(), 3);
        assert_eq!(keys(&list), ["c", "b", "a"]);
        assert_eq!(keys_backwards(&list), ["a", "b", "c"]);
    }

    #[test]
    fn test_move_to_front() {
        let mut list = RecencyList::new();

        let a = list.push_front(entry("a"));
        list.push_front(entry("b"));
        list.push_front(entry("c"));

        list.move_to_front(a);

        assert_eq!(keys(&list), ["a", "c", "b"]);
        assert_eq!(keys_backwards(&list), ["b", "c", "a"]);
        assert_eq!(list.get(list.back().unwrap()).unwrap().key, "b");
    }

    #[test]
    fn test_move_to_front_keeps_links_consistent() {
        let mut list = RecencyList::new();

        let a = list.push_front(entry("a"));
        let b = list.push_front(entry("b"));
        let c = list.push_front(entry("c"));

        // front=[c, b, a]=back
        list.move_to_front(a); // [a, c, b]
        list.move_to_front(c); // [c, a, b]
        list.move_to_front(b); // [b, c, a]
        list.move_to_front(b); // already at front

        assert_eq!(keys(&list), ["b", "c", "a"]);
        assert_eq!(keys_backwards(&list), ["a", "c", "b"]);
    }

    #[test]
    fn test_pop_back() {
        let mut list = RecencyList::new();

        list.push_front(entry("a"));
        list.push_front(entry("b"));
        list.push_front(entry("c"));

        assert_eq!(list.pop_back().unwrap().key, "a");
        assert_eq!(list.pop_back().unwrap().key, "b");
        assert_eq!(list.len(), 1);
        assert_eq!(list.pop_back().unwrap().key, "c");
        assert!(list.pop_back().is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_middle() {
        let mut list = RecencyList::new();

        list.push_front(entry("a"));
        let b = list.push_front(entry("b"));
        list.push_front(entry("c"));

        let removed = list.remove(b).unwrap();

        assert_eq!(removed.key, "b");
        assert_eq!(list.len(), 2);
        assert_eq!(keys(&list), ["c", "a"]);
        assert_eq!(keys_backwards(&list), ["a", "c"]);
    }

    #[test]
    fn test_remove_vacant_slot() {
        let mut list = RecencyList::new();

        let a = list.push_front(entry("a"));
        assert!(list.remove(a).is_some());

        assert!(list.remove(a).is_none());
        assert!(list.remove(42).is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_slots_are_reused() {
        let mut list = RecencyList::new();

        let a = list.push_front(entry("a"));
        list.push_front(entry("b"));
        list.remove(a);

        let c = list.push_front(entry("c"));

        assert_eq!(c, a);
        assert_eq!(keys(&list), ["c", "b"]);
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut list = RecencyList::new();

        let a = list.push_front(entry("a"));
        list.push_front(entry("b"));

        list.get_mut(a).unwrap().value = 99;

        assert_eq!(list.get(a).unwrap().value, 99);
        assert_eq!(keys(&list), ["b", "a"]);
    }

    #[test]
    fn test_next_of_walks_front_to_back() {
        let mut list = RecencyList::new();

        let a = list.push_front(entry("a"));
        let b = list.push_front(entry("b"));

        assert_eq!(list.front(), Some(b));
        assert_eq!(list.next_of(b), Some(a));
        assert_eq!(list.next_of(a), None);
    }

    #[test]
    fn test_clear() {
        let mut list = RecencyList::new();

        list.push_front(entry("a"));
        list.push_front(entry("b"));
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);

        list.push_front(entry("c"));
        assert_eq!(keys(&list), ["c"]);
    }
}
