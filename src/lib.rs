//! This crate indexes document records by key through one of three
//! interchangeable Binary Search Tree (BST) engines.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert and find stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key,
//! an associated value, and sometimes child `Node`s. The most important
//! invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! Searching for a key takes `O(height)` (where `height` is defined as the
//! longest path from the root `Node` to a leaf `Node`), so the engines
//! differ in how they keep that height in check:
//!
//! - [`bst`] does nothing - its height depends entirely on insertion order.
//! - [`avl`] rebalances with rotations on every insert so the height stays
//!   `O(lg N)` where `N` is the number of nodes.
//! - [`splay`] rotates every accessed node up to the root, giving `O(lg N)`
//!   cost amortized over a sequence of operations rather than per operation.
//!
//! The [`index`] module wraps the three behind one facade chosen at
//! construction time, and [`bench`] measures their insert/search cost.

#![deny(missing_docs)]

pub mod avl;
pub mod bench;
pub mod bst;
pub mod document;
pub mod index;
pub mod splay;
