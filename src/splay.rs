//! A self-adjusting (splay) tree. Every access - successful or not -
//! rotates the accessed node all the way up to the root, so recently and
//! frequently used keys cluster near the top. No balance bookkeeping is
//! kept; the tree's guarantee is amortized: `O(lg N)` per operation
//! averaged over a sequence, not bounded per operation.
//!
//! Like [`crate::avl`], nodes live in a `Vec` arena with owning child
//! indices and a non-owning `parent` back-reference; splaying walks the
//! parent chain bottom-up applying zig, zig-zig, and zig-zag steps.
//!
//! # Examples
//!
//! ```
//! use docindex::splay::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [3, 1, 4, 1, 5] {
//!     tree.insert(key, ());
//! }
//!
//! // Lookups restructure the tree: the hit ends up at the root.
//! assert!(tree.search(&4).is_some());
//! assert_eq!(tree.root_key(), Some(&4));
//!
//! // A miss promotes the last node on the search path instead: 2
//! // bottoms out below 3.
//! assert!(tree.search(&2).is_none());
//! assert_eq!(tree.root_key(), Some(&3));
//! ```

use std::cmp::Ordering;

/// Index of a node within the tree's backing arena.
type NodeId = usize;

#[derive(Clone, Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Option<NodeId>,
    right: Option<NodeId>,
    /// Non-owning back-reference to the parent. `None` for the root.
    parent: Option<NodeId>,
}

/// A self-adjusting Binary Search Tree (a splay tree) mapping keys to
/// values.
#[derive(Clone, Debug)]
pub struct Tree<K, V> {
    nodes: Vec<Node<K, V>>,
    root: Option<NodeId>,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Tree<K, V> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// The number of nodes stored in the tree.
    pub fn len(&self) -> usize {
        // There is no delete, so every arena slot is live.
        self.nodes.len()
    }

    /// Whether the tree holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The key currently at the root: the most recently accessed key,
    /// or on the heels of a miss, the last key on that search path.
    pub fn root_key(&self) -> Option<&K> {
        self.root.map(|id| &self.nodes[id].key)
    }

    /// Inserts the given key and value and splays the new node to the
    /// root, returning `true` if a node was created. Inserting a key that
    /// is already present keeps the stored value and returns `false`, but
    /// still splays the existing node to the root - the access-pattern
    /// side effect happens either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use docindex::splay::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1, 2));
    /// assert!(tree.insert(5, 6));
    /// assert_eq!(tree.root_key(), Some(&5));
    ///
    /// // The duplicate is refused but 1 still moves to the root.
    /// assert!(!tree.insert(1, 3));
    /// assert_eq!(tree.root_key(), Some(&1));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool
    where
        K: Ord,
    {
        let mut cur = match self.root {
            Some(id) => id,
            None => {
                let id = self.push(key, value, None);
                self.root = Some(id);
                return true;
            }
        };

        loop {
            cur = match key.cmp(&self.nodes[cur].key) {
                Ordering::Less => match self.nodes[cur].left {
                    Some(left) => left,
                    None => {
                        let id = self.push(key, value, Some(cur));
                        self.nodes[cur].left = Some(id);
                        self.splay(id);
                        return true;
                    }
                },
                Ordering::Equal => {
                    self.splay(cur);
                    return false;
                }
                Ordering::Greater => match self.nodes[cur].right {
                    Some(right) => right,
                    None => {
                        let id = self.push(key, value, Some(cur));
                        self.nodes[cur].right = Some(id);
                        self.splay(id);
                        return true;
                    }
                },
            };
        }
    }

    /// Searches for the given key, splaying the accessed node to the
    /// root. On a hit the found node becomes the root and its value is
    /// returned; on a miss the last node visited on the search path
    /// becomes the root and `None` is returned. Either way the amortized
    /// cost guarantee is preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use docindex::splay::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.search(&1), Some(&2));
    /// assert_eq!(tree.search(&42), None);
    /// ```
    pub fn search(&mut self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        if self.splay_to(key) {
            let id = self.root.expect("splaying a hit leaves a root");
            Some(&self.nodes[id].value)
        } else {
            None
        }
    }

    /// Mutable access to the value associated with the given key. Splays
    /// exactly like [`Tree::search`], so on a hit the value returned is
    /// the root's.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V>
    where
        K: Ord,
    {
        if self.splay_to(key) {
            let id = self.root.expect("splaying a hit leaves a root");
            Some(&mut self.nodes[id].value)
        } else {
            None
        }
    }

    /// All keys in ascending order (an in-order traversal).
    pub fn keys(&self) -> Vec<&K> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.collect_in_order(self.root, &mut out);
        out
    }

    /// All keys in preorder (node before children). The preorder of a BST
    /// uniquely determines its shape, which makes this useful for
    /// diagnostics and shape assertions.
    pub fn pre_order_keys(&self) -> Vec<&K> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.collect_pre_order(self.root, &mut out);
        out
    }

    /// Descends from the root and splays the last node visited, which is
    /// the matching node on a hit and its closest ancestor on a miss.
    /// Returns whether the key was found (and is now the root).
    fn splay_to(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        let mut cur = match self.root {
            Some(id) => id,
            None => return false,
        };

        loop {
            cur = match key.cmp(&self.nodes[cur].key) {
                Ordering::Less => match self.nodes[cur].left {
                    Some(left) => left,
                    None => {
                        self.splay(cur);
                        return false;
                    }
                },
                Ordering::Equal => {
                    self.splay(cur);
                    return true;
                }
                Ordering::Greater => match self.nodes[cur].right {
                    Some(right) => right,
                    None => {
                        self.splay(cur);
                        return false;
                    }
                },
            };
        }
    }

    fn push(&mut self, key: K, value: V, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            key,
            value,
            left: None,
            right: None,
            parent,
        });
        id
    }

    /// Rotates the node with the given id one level up, above its parent.
    /// A left child rotates right over its parent, a right child rotates
    /// left; the displaced middle subtree swaps sides, and the parent,
    /// child, and grandparent links all move in this one step.
    ///
    /// ## Panics
    ///
    /// When called on the root.
    fn rotate_up(&mut self, id: NodeId) {
        let parent = self.nodes[id].parent.expect("cannot rotate the root up");
        let grand = self.nodes[parent].parent;

        if self.nodes[parent].left == Some(id) {
            let moved = self.nodes[id].right.take();
            self.nodes[parent].left = moved;
            if let Some(moved) = moved {
                self.nodes[moved].parent = Some(parent);
            }
            self.nodes[id].right = Some(parent);
        } else {
            let moved = self.nodes[id].left.take();
            self.nodes[parent].right = moved;
            if let Some(moved) = moved {
                self.nodes[moved].parent = Some(parent);
            }
            self.nodes[id].left = Some(parent);
        }

        self.nodes[parent].parent = Some(id);
        self.nodes[id].parent = grand;
        match grand {
            None => self.root = Some(id),
            Some(g) => {
                if self.nodes[g].left == Some(parent) {
                    self.nodes[g].left = Some(id);
                } else {
                    self.nodes[g].right = Some(id);
                }
            }
        }
    }

    /// Moves the node with the given id to the root with zig, zig-zig,
    /// and zig-zag steps:
    ///
    /// - **zig**: the parent is the root - one rotation.
    /// - **zig-zig**: node, parent, and grandparent form a straight line -
    ///   rotate the parent over the grandparent first, then the node.
    /// - **zig-zag**: the line bends - rotate the node up twice.
    fn splay(&mut self, id: NodeId) {
        while let Some(parent) = self.nodes[id].parent {
            match self.nodes[parent].parent {
                None => self.rotate_up(id),
                Some(grand) => {
                    let straight = (self.nodes[grand].left == Some(parent))
                        == (self.nodes[parent].left == Some(id));
                    if straight {
                        self.rotate_up(parent);
                        self.rotate_up(id);
                    } else {
                        self.rotate_up(id);
                        self.rotate_up(id);
                    }
                }
            }
        }

        if cfg!(debug_assertions) {
            assert_eq!(self.root, Some(id));
        }
    }

    fn collect_in_order<'a>(&'a self, link: Option<NodeId>, out: &mut Vec<&'a K>) {
        if let Some(id) = link {
            self.collect_in_order(self.nodes[id].left, out);
            out.push(&self.nodes[id].key);
            self.collect_in_order(self.nodes[id].right, out);
        }
    }

    fn collect_pre_order<'a>(&'a self, link: Option<NodeId>, out: &mut Vec<&'a K>) {
        if let Some(id) = link {
            out.push(&self.nodes[id].key);
            self.collect_pre_order(self.nodes[id].left, out);
            self.collect_pre_order(self.nodes[id].right, out);
        }
    }

    /// Walks the whole tree asserting key ordering and that parent
    /// back-references agree with the owning child links.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self)
    where
        K: Ord,
    {
        if let Some(root) = self.root {
            assert_eq!(self.nodes[root].parent, None);
            self.check_subtree(root);
        }
        let keys = self.keys();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(keys.len(), self.len());
    }

    #[cfg(test)]
    fn check_subtree(&self, id: NodeId)
    where
        K: Ord,
    {
        let node = &self.nodes[id];
        if let Some(left) = node.left {
            assert!(self.nodes[left].key < node.key);
            assert_eq!(self.nodes[left].parent, Some(id));
            self.check_subtree(left);
        }
        if let Some(right) = node.right {
            assert!(self.nodes[right].key > node.key);
            assert_eq!(self.nodes[right].parent, Some(id));
            self.check_subtree(right);
        }
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::HashMap;

    use super::*;
    use crate::test::quick::Op;

    fn do_ops<K, V>(ops: &[Op<K, V>], tree: &mut Tree<K, V>, map: &mut HashMap<K, V>)
    where
        K: std::hash::Hash + Eq + Clone + Ord + std::fmt::Debug,
        V: std::fmt::Debug + PartialEq + Clone,
    {
        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let created = tree.insert(k.clone(), v.clone());
                    assert_eq!(created, !map.contains_key(k));
                    map.entry(k.clone()).or_insert_with(|| v.clone());
                    // Insert splays: hit or duplicate, k is now the root.
                    assert_eq!(tree.root_key(), Some(k));
                }
                Op::Search(k) => {
                    let expected = map.get(k);
                    assert_eq!(tree.search(k).map(|v| v.clone()), expected.cloned());
                    if expected.is_some() {
                        assert_eq!(tree.root_key(), Some(k));
                    }
                }
            }
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
            let mut tree = Tree::new();
            let mut map = HashMap::new();

            do_ops(&ops, &mut tree, &mut map);
            tree.check_invariants();
            map.keys().all(|key| tree.search(key).copied() == map.get(key).copied())
        }
    }

    quickcheck::quickcheck! {
        fn contains(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x, *x);
            }

            xs.iter().all(|x| tree.search(x) == Some(x))
        }
    }

    quickcheck::quickcheck! {
        fn in_order_is_strictly_sorted(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x, ());
            }

            tree.keys().windows(2).all(|w| w[0] < w[1])
        }
    }
}
