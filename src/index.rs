//! The uniform facade over the three tree engines. A [`TreeIndex`] is
//! bound to one [`Variant`] at construction and dispatches every insert
//! and search to that engine for the rest of its life - the engines are
//! never mixed on one underlying tree.
//!
//! `search` takes `&mut self` across the board because the splay engine
//! restructures on every lookup; for the other two it is a plain read.
//!
//! # Examples
//!
//! ```
//! use docindex::index::{TreeIndex, Variant};
//!
//! let mut index = TreeIndex::new(Variant::Avl);
//! index.insert(1, "first");
//! index.insert(2, "second");
//!
//! assert_eq!(index.search(&2), Some(&"second"));
//! assert_eq!(index.search(&3), None);
//! assert_eq!(index.variant(), Variant::Avl);
//! ```

use std::fmt;

use crate::{avl, bst, splay};

/// Selects which tree engine a [`TreeIndex`] is backed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// The unbalanced baseline ([`crate::bst`]).
    Bst,
    /// Height-balanced with rotations on insert ([`crate::avl`]).
    Avl,
    /// Self-adjusting via splaying on every access ([`crate::splay`]).
    Splay,
}

impl Variant {
    /// Every variant, in the order the benchmark reports them.
    pub const ALL: [Variant; 3] = [Variant::Bst, Variant::Avl, Variant::Splay];
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Bst => "bst",
            Variant::Avl => "avl",
            Variant::Splay => "splay",
        };
        f.write_str(name)
    }
}

/// A key-value index backed by the tree engine chosen at construction.
#[derive(Clone, Debug)]
pub enum TreeIndex<K, V> {
    /// Backed by the unbalanced BST engine.
    Bst(bst::Tree<K, V>),
    /// Backed by the AVL engine.
    Avl(avl::Tree<K, V>),
    /// Backed by the splay engine.
    Splay(splay::Tree<K, V>),
}

impl<K, V> TreeIndex<K, V> {
    /// Creates an empty index backed by the given engine.
    pub fn new(variant: Variant) -> Self {
        match variant {
            Variant::Bst => Self::Bst(bst::Tree::new()),
            Variant::Avl => Self::Avl(avl::Tree::new()),
            Variant::Splay => Self::Splay(splay::Tree::new()),
        }
    }

    /// The engine this index was constructed with.
    pub fn variant(&self) -> Variant {
        match self {
            Self::Bst(_) => Variant::Bst,
            Self::Avl(_) => Variant::Avl,
            Self::Splay(_) => Variant::Splay,
        }
    }

    /// Inserts the given key and value, returning `true` if a new node
    /// was created. A duplicate key is a no-op that keeps the stored
    /// value (the splay engine still splays the existing node).
    pub fn insert(&mut self, key: K, value: V) -> bool
    where
        K: Ord,
    {
        match self {
            Self::Bst(t) => t.insert(key, value),
            Self::Avl(t) => t.insert(key, value),
            Self::Splay(t) => t.insert(key, value),
        }
    }

    /// Looks up the value associated with the given key. Takes `&mut
    /// self` because the splay engine moves the accessed node to the
    /// root; the other engines leave the tree untouched.
    pub fn search(&mut self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        match self {
            Self::Bst(t) => t.find(key),
            Self::Avl(t) => t.find(key),
            Self::Splay(t) => t.search(key),
        }
    }

    /// Mutable access to the value associated with the given key, e.g.
    /// for a front end updating a document's verification status.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V>
    where
        K: Ord,
    {
        match self {
            Self::Bst(t) => t.find_mut(key),
            Self::Avl(t) => t.find_mut(key),
            Self::Splay(t) => t.find_mut(key),
        }
    }

    /// The number of nodes stored in the index.
    pub fn len(&self) -> usize {
        match self {
            Self::Bst(t) => t.len(),
            Self::Avl(t) => t.len(),
            Self::Splay(t) => t.len(),
        }
    }

    /// Whether the index holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The key currently at the root of the underlying tree.
    pub fn root_key(&self) -> Option<&K> {
        match self {
            Self::Bst(t) => t.root_key(),
            Self::Avl(t) => t.root_key(),
            Self::Splay(t) => t.root_key(),
        }
    }

    /// All keys in ascending order (an in-order traversal).
    pub fn keys(&self) -> Vec<&K> {
        match self {
            Self::Bst(t) => t.keys(),
            Self::Avl(t) => t.keys(),
            Self::Splay(t) => t.keys(),
        }
    }

    /// All keys in preorder, uniquely identifying the tree's shape.
    pub fn pre_order_keys(&self) -> Vec<&K> {
        match self {
            Self::Bst(t) => t.pre_order_keys(),
            Self::Avl(t) => t.pre_order_keys(),
            Self::Splay(t) => t.pre_order_keys(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, Status};

    #[test]
    fn variant_is_fixed_at_construction() {
        for variant in Variant::ALL {
            let index: TreeIndex<u64, ()> = TreeIndex::new(variant);
            assert_eq!(index.variant(), variant);
            assert!(index.is_empty());
        }
    }

    #[test]
    fn insert_then_search_all_variants() {
        for variant in Variant::ALL {
            let mut index = TreeIndex::new(variant);
            for key in [50, 30, 70, 20, 40] {
                assert!(index.insert(key, key * 2), "variant {}", variant);
            }

            assert_eq!(index.len(), 5);
            for key in [50, 30, 70, 20, 40] {
                assert_eq!(index.search(&key), Some(&(key * 2)), "variant {}", variant);
            }
            assert_eq!(index.search(&99), None);
            assert_eq!(index.keys(), [&20, &30, &40, &50, &70]);
        }
    }

    #[test]
    fn status_update_through_find_mut() {
        let mut index = TreeIndex::new(Variant::Splay);
        index.insert(12, Document::new(12, "A12", "pdf"));

        index.find_mut(&12).unwrap().status = Status::Verified;
        assert_eq!(index.search(&12).unwrap().status, Status::Verified);
        // The splay engine moved the touched document to the root.
        assert_eq!(index.root_key(), Some(&12));
    }

    #[test]
    fn display_names() {
        assert_eq!(Variant::Bst.to_string(), "bst");
        assert_eq!(Variant::Avl.to_string(), "avl");
        assert_eq!(Variant::Splay.to_string(), "splay");
    }
}
