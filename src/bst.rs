//! The baseline unbalanced BST. Nodes own their children through plain
//! `Box` links and nothing is ever rotated, so the shape of the tree is
//! entirely determined by insertion order. Sorted input degenerates it
//! into a linked list - that worst case is exactly what the other two
//! engines exist to avoid, and what the benchmark harness demonstrates.
//!
//! # Examples
//!
//! ```
//! use docindex::bst::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! assert!(tree.insert(1, 2));
//! assert_eq!(tree.find(&1), Some(&2));
//!
//! // Inserting the same key again is a no-op that keeps the old value.
//! assert!(!tree.insert(1, 3));
//! assert_eq!(tree.find(&1), Some(&2));
//! ```

use std::cmp::Ordering;

type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Clone, Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

/// An unbalanced Binary Search Tree mapping keys to values.
#[derive(Clone, Debug)]
pub struct Tree<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Tree<K, V> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of nodes stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The key currently at the root, if any. For this engine the root is
    /// simply the first key ever inserted.
    pub fn root_key(&self) -> Option<&K> {
        self.root.as_ref().map(|n| &n.key)
    }

    /// Inserts the given key and value, returning `true` if a new node was
    /// created. Inserting a key that is already present is a no-op that
    /// keeps the stored value and returns `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use docindex::bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1, 2));
    /// assert!(!tree.insert(1, 3));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool
    where
        K: Ord,
    {
        let mut cur = &mut self.root;
        while let Some(node) = cur {
            cur = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => return false,
                Ordering::Greater => &mut node.right,
            };
        }
        *cur = Some(Box::new(Node {
            key,
            value,
            left: None,
            right: None,
        }));
        self.len += 1;
        true
    }

    /// Potentially finds the value associated with the given key. If no
    /// node has the corresponding key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use docindex::bst::Tree;
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
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            cur = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Some(&node.value),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Mutable access to the value associated with the given key.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V>
    where
        K: Ord,
    {
        let mut cur = self.root.as_deref_mut();
        while let Some(node) = cur {
            cur = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }
        None
    }

    /// All keys in ascending order (an in-order traversal).
    pub fn keys(&self) -> Vec<&K> {
        fn walk<'a, K, V>(link: &'a Link<K, V>, out: &mut Vec<&'a K>) {
            if let Some(node) = link {
                walk(&node.left, out);
                out.push(&node.key);
                walk(&node.right, out);
            }
        }

        let mut out = Vec::with_capacity(self.len);
        walk(&self.root, &mut out);
        out
    }

    /// All keys in preorder (node before children). The preorder of a BST
    /// uniquely determines its shape, which makes this useful for
    /// diagnostics and shape assertions.
    pub fn pre_order_keys(&self) -> Vec<&K> {
        fn walk<'a, K, V>(link: &'a Link<K, V>, out: &mut Vec<&'a K>) {
            if let Some(node) = link {
                out.push(&node.key);
                walk(&node.left, out);
                walk(&node.right, out);
            }
        }

        let mut out = Vec::with_capacity(self.len);
        walk(&self.root, &mut out);
        out
    }
}
