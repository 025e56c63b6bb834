//! A height-balanced (AVL) tree. After every insert the tree walks back
//! up the insertion path and restores the balance invariant with
//! rotations, so the height - and with it the worst-case search cost -
//! stays `O(lg N)` no matter the insertion order.
//!
//! Nodes live in a `Vec` arena and link to each other by index. The
//! child indices are the owning edges; each node also carries a
//! non-owning `parent` index so the post-insert retracing and the
//! rotations can walk upward without recursion. Both directions are
//! updated together inside each rotation, so the two views of the tree
//! never disagree.
//!
//! # Examples
//!
//! ```
//! use docindex::avl::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [1, 2, 3, 4, 5, 6, 7] {
//!     tree.insert(key, key * 10);
//! }
//!
//! assert_eq!(tree.find(&6), Some(&60));
//! // Sorted input would pile up seven levels in a plain BST.
//! assert_eq!(tree.height(), 3);
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
    /// Height of the subtree rooted here. A node with no children has a
    /// height of 1.
    height: usize,
}

/// A self-balancing Binary Search Tree (specifically, an AVL tree)
/// mapping keys to values.
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

    /// The key currently at the root, if any.
    pub fn root_key(&self) -> Option<&K> {
        self.root.map(|id| &self.nodes[id].key)
    }

    /// The height of the tree (0 when empty). The AVL invariant keeps
    /// this at most `1.44 * lg(len + 2)`.
    pub fn height(&self) -> usize {
        self.link_height(self.root)
    }

    /// Inserts the given key and value, returning `true` if a new node was
    /// created. Inserting a key that is already present is a no-op that
    /// keeps the stored value and returns `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use docindex::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1, 2));
    /// assert!(!tree.insert(1, 3));
    /// assert_eq!(tree.find(&1), Some(&2));
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
                        self.retrace(cur);
                        return true;
                    }
                },
                Ordering::Equal => return false,
                Ordering::Greater => match self.nodes[cur].right {
                    Some(right) => right,
                    None => {
                        let id = self.push(key, value, Some(cur));
                        self.nodes[cur].right = Some(id);
                        self.retrace(cur);
                        return true;
                    }
                },
            };
        }
    }

    /// Potentially finds the value associated with the given key. If no
    /// node has the corresponding key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use docindex::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.find(&1), Some(&2));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        self.locate(key).map(|id| &self.nodes[id].value)
    }

    /// Mutable access to the value associated with the given key.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V>
    where
        K: Ord,
    {
        match self.locate(key) {
            Some(id) => Some(&mut self.nodes[id].value),
            None => None,
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

    /// Standard binary search descent from the root.
    fn locate(&self, key: &K) -> Option<NodeId>
    where
        K: Ord,
    {
        let mut cur = self.root;
        while let Some(id) = cur {
            cur = match key.cmp(&self.nodes[id].key) {
                Ordering::Less => self.nodes[id].left,
                Ordering::Equal => return Some(id),
                Ordering::Greater => self.nodes[id].right,
            };
        }
        None
    }

    fn push(&mut self, key: K, value: V, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            key,
            value,
            left: None,
            right: None,
            parent,
            height: 1,
        });
        id
    }

    fn link_height(&self, link: Option<NodeId>) -> usize {
        link.map_or(0, |id| self.nodes[id].height)
    }

    /// Adjusts the height of the node to be the max of its children's
    /// heights + 1.
    fn fix_height(&mut self, id: NodeId) {
        let height = self
            .link_height(self.nodes[id].left)
            .max(self.link_height(self.nodes[id].right))
            + 1;
        self.nodes[id].height = height;
    }

    /// The difference in height between the left and right subtrees.
    /// The AVL invariant keeps this in `{-1, 0, 1}` between operations.
    fn balance_factor(&self, id: NodeId) -> isize {
        let left = self.link_height(self.nodes[id].left) as isize;
        let right = self.link_height(self.nodes[id].right) as isize;
        left - right
    }

    /// Walks from the parent of a freshly attached leaf back up to the
    /// root, recomputing heights and rebalancing every ancestor whose
    /// balance factor left `{-1, 0, 1}`. After a rotation the walk
    /// continues from the parent of the rotated subtree's new root.
    fn retrace(&mut self, start: NodeId) {
        let mut cur = Some(start);
        while let Some(id) = cur {
            self.fix_height(id);
            let subtree = match self.balance_factor(id) {
                2 => {
                    let left = self.nodes[id].left.expect("left-heavy node has a left child");
                    if self.balance_factor(left) < 0 {
                        // Left-Right: rotate the left child left first.
                        self.rotate_left(left);
                    }
                    self.rotate_right(id)
                }
                -2 => {
                    let right = self
                        .nodes[id]
                        .right
                        .expect("right-heavy node has a right child");
                    if self.balance_factor(right) > 0 {
                        // Right-Left: rotate the right child right first.
                        self.rotate_right(right);
                    }
                    self.rotate_left(id)
                }
                _ => id,
            };

            if cfg!(debug_assertions) {
                assert!(self.balance_factor(subtree).abs() <= 1);
            }
            cur = self.nodes[subtree].parent;
        }
    }

    /// Rotate the subtree rooted at `y` to the right: its left child
    /// moves up to become the subtree root and `y` becomes that child's
    /// right child. Returns the new subtree root.
    ///
    /// ```text
    ///       y             x
    ///      / \           / \
    ///     x   T3  ->   T1   y
    ///    / \               / \
    ///  T1   T2           T2   T3
    /// ```
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    fn rotate_right(&mut self, y: NodeId) -> NodeId {
        let x = self.nodes[y].left.expect("right rotation requires a left child");
        let t2 = self.nodes[x].right;

        self.nodes[y].left = t2;
        if let Some(t2) = t2 {
            self.nodes[t2].parent = Some(y);
        }

        self.replace_child(y, x);
        self.nodes[x].right = Some(y);
        self.nodes[y].parent = Some(x);

        self.fix_height(y);
        self.fix_height(x);
        x
    }

    /// Mirror image of [`Tree::rotate_right`]: the right child moves up.
    ///
    /// ## Panics
    ///
    /// When called on a node without a right child.
    fn rotate_left(&mut self, x: NodeId) -> NodeId {
        let y = self.nodes[x].right.expect("left rotation requires a right child");
        let t2 = self.nodes[y].left;

        self.nodes[x].right = t2;
        if let Some(t2) = t2 {
            self.nodes[t2].parent = Some(x);
        }

        self.replace_child(x, y);
        self.nodes[y].left = Some(x);
        self.nodes[x].parent = Some(y);

        self.fix_height(x);
        self.fix_height(y);
        y
    }

    /// Points whatever owned `old` (its parent, or the tree root slot) at
    /// `new` instead, and fixes `new`'s parent back-reference to match.
    fn replace_child(&mut self, old: NodeId, new: NodeId) {
        let up = self.nodes[old].parent;
        self.nodes[new].parent = up;
        match up {
            None => self.root = Some(new),
            Some(p) => {
                if self.nodes[p].left == Some(old) {
                    self.nodes[p].left = Some(new);
                } else {
                    self.nodes[p].right = Some(new);
                }
            }
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

    /// Walks the whole tree asserting every structural invariant: key
    /// ordering, stored heights, balance factors, and that parent
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

        let left_height = self.link_height(node.left);
        let right_height = self.link_height(node.right);
        assert_eq!(node.height, left_height.max(right_height) + 1);
        assert!(left_height.abs_diff(right_height) <= 1);
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::HashMap;

    use super::*;
    use crate::test::quick::Op;

    fn do_ops<K, V>(ops: &[Op<K, V>], tree: &mut Tree<K, V>, map: &mut HashMap<K, V>)
    where
        K: std::hash::Hash + Eq + Clone + Ord,
        V: std::fmt::Debug + PartialEq + Clone,
    {
        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let created = tree.insert(k.clone(), v.clone());
                    assert_eq!(created, !map.contains_key(k));
                    map.entry(k.clone()).or_insert_with(|| v.clone());
                }
                Op::Search(k) => {
                    assert_eq!(tree.find(k), map.get(k));
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
            map.keys().all(|key| tree.find(key) == map.get(key))
        }
    }

    quickcheck::quickcheck! {
        fn balanced_after_every_insert(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x, *x);
                tree.check_invariants();
            }

            xs.iter().all(|x| tree.find(x) == Some(x))
        }
    }
}
