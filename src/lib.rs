//! An AVL tree layered over a parent-linked binary search tree.
//!
//! [`BinarySearchTree`] is the ordering engine: insertion, lookup, removal
//! with successor promotion and height bookkeeping. [`AvlTree`] delegates
//! every structural change to it and then restores balance with single and
//! double rotations. [`render`] produces read-only textual views of either.
//!
//! ```
//! use avl_engine::{AvlTree, TraversalMode};
//!
//! let mut tree = AvlTree::new();
//! for value in [10, 20, 30] {
//!     tree.insert(value);
//! }
//! assert_eq!(tree.rotations().left, 1);
//! assert_eq!(tree.render(TraversalMode::LeftToRight).unwrap(), "20\n10 30");
//! ```
//!
//! Trees assume exclusive access during each call. Wrap them in a
//! [`Mutex`](std::sync::Mutex) to share them between threads.

mod avl;
mod bst;
mod config;
mod error;
mod iter;
mod node;
mod render;

pub use avl::{AvlTree, Rotations};
pub use bst::BinarySearchTree;
pub use config::{AvlConfig, BalanceStrategy, DeletePolicy};
pub use error::ConfigurationError;
pub use iter::Iter;
pub use node::{NodeRef, EMPTY_HEIGHT};
pub use render::{render, TraversalMode, DEFAULT_FIELD_WIDTH, MAX_ENTIRE_HEIGHT};

#[cfg(test)]
mod tests;
