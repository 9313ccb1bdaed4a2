//! LRU List Module
//!
//! Recency ordering for LRU eviction, backed by an arena of linked nodes.

// == Node Handle ==
/// Stable handle to a node in an [`LruList`].
///
/// A handle stays valid until its node is removed; afterwards the slot may be
/// reused by a later push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<T> {
    item: T,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU List ==
/// Doubly-linked recency list stored in a slot arena.
///
/// - Head = least recently used (oldest)
/// - Tail = most recently used (newest)
///
/// Every operation is O(1): callers keep the [`NodeId`] returned by
/// [`push_newest`](Self::push_newest) and use it to reposition or remove the node.
#[derive(Debug)]
pub struct LruList<T> {
    slots: Vec<Option<Node<T>>>,
    /// Vacant slot indices available for reuse
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for LruList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LruList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Newest ==
    /// Appends `item` at the newest end and returns its handle.
    pub fn push_newest(&mut self, item: T) -> NodeId {
        let node = Node {
            item,
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        self.link_tail(idx);
        self.len += 1;
        NodeId(idx)
    }

    // == Move To Newest ==
    /// Marks a node as just used. Unknown handles are ignored.
    pub fn move_to_newest(&mut self, id: NodeId) {
        if self.node(id.0).is_none() || self.tail == Some(id.0) {
            return;
        }
        self.unlink(id.0);
        self.link_tail(id.0);
    }

    // == Remove ==
    /// Removes a node by handle and returns its item.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        self.node(id.0)?;
        self.unlink(id.0);
        let node = self.slots[id.0].take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.item)
    }

    // == Pop Oldest ==
    /// Removes and returns the least recently used item.
    pub fn pop_oldest(&mut self) -> Option<T> {
        let head = self.head?;
        self.remove(NodeId(head))
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.node(id.0).map(|node| &node.item)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .map(|node| &mut node.item)
    }

    // == Length ==
    /// Returns the number of linked items.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iterate ==
    /// Iterates items from oldest to newest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn node(&self, idx: usize) -> Option<&Node<T>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<T>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    /// Detaches `idx` from its neighbours, leaving the slot occupied.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.node(idx) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = None;
        }
    }

    fn link_tail(&mut self, idx: usize) {
        let old_tail = self.tail;
        if let Some(node) = self.node_mut(idx) {
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(t) => {
                if let Some(node) = self.node_mut(t) {
                    node.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }
}

/// Oldest-to-newest iterator over an [`LruList`].
pub struct Iter<'a, T> {
    list: &'a LruList<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.item)
    }
}
