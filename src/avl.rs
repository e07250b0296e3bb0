use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;

use crate::bst::BinarySearchTree;
use crate::config::{AvlConfig, BalanceStrategy, DeletePolicy};
use crate::error::ConfigurationError;
use crate::iter::Iter;
use crate::node::{Link, Node, NodePtr, NodeRef};
use crate::render::TraversalMode;

/// A self-balancing binary search tree.
///
/// Structural changes go through the [`BinarySearchTree`] engine; afterwards
/// the tree restores the AVL condition with single or double rotations.
///
/// ```
/// use avl_engine::AvlTree;
/// let mut tree = AvlTree::new();
/// for value in 1..=7 {
///     tree.insert(value);
/// }
/// assert_eq!(tree.height(), 2);
/// assert_eq!(tree.root().unwrap().value(), &4);
/// assert!(tree.remove(&4));
/// assert!(tree.search(&4).is_none());
/// ```
pub struct AvlTree<V> {
    tree: BinarySearchTree<V>,
    config: AvlConfig,
    rotations: Rotations,
}

/// Number of rotations a tree has performed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rotations {
    pub left: u64,
    pub right: u64,
}

impl Rotations {
    pub fn total(&self) -> u64 {
        self.left + self.right
    }
}

impl<V> AvlTree<V> {
    /// Creates an empty tree with the default configuration.
    /// No memory is allocated until the first value is inserted.
    pub fn new() -> Self {
        Self {
            tree: BinarySearchTree::new(),
            config: AvlConfig::default(),
            rotations: Rotations::default(),
        }
    }

    /// Creates an empty tree with the given configuration.
    pub fn with_config(config: AvlConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        log::debug!("avl tree configured with {:?}", config);
        Ok(Self {
            tree: BinarySearchTree::new(),
            config,
            rotations: Rotations::default(),
        })
    }

    pub fn config(&self) -> &AvlConfig {
        &self.config
    }

    /// Returns the rotations performed since creation or the last [`clear`](Self::clear).
    pub fn rotations(&self) -> Rotations {
        self.rotations
    }

    /// Returns true if the tree contains no values.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of values in the tree.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns the height of the root node, or -1 for an empty tree.
    pub fn height(&self) -> i32 {
        self.tree.height()
    }

    /// Returns a view of the root node.
    pub fn root(&self) -> Option<NodeRef<'_, V>> {
        self.tree.root()
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.rotations = Rotations::default();
    }

    /// Returns an iterator over the values in ascending order.
    pub fn iter(&self) -> Iter<'_, V> {
        self.tree.iter()
    }

    /// Returns true if every node satisfies the AVL condition.
    pub fn is_balanced(&self) -> bool {
        let mut balanced = true;
        self.tree.preorder(|node_ptr| {
            if (Node::left_height(node_ptr) - Node::right_height(node_ptr)).abs() > 1 {
                balanced = false;
            }
        });
        balanced
    }

    /// Restores the AVL condition everywhere. Each pass visits nodes bottom-up
    /// and rotates wherever sibling heights differ by more than one; passes
    /// repeat until one performs no rotation.
    pub fn balance(&mut self) {
        let rotations_before = self.rotations.total();
        let mut passes = 0;
        loop {
            let pass_start = self.rotations.total();
            let root = self.tree.root;
            self.balance_subtree(root);
            passes += 1;
            if self.rotations.total() == pass_start {
                break;
            }
        }
        log::debug!(
            "balance performed {} rotations in {} passes",
            self.rotations.total() - rotations_before,
            passes
        );
    }

    /// Renders the tree using the configured field width.
    pub fn render(&self, mode: TraversalMode) -> Result<String, ConfigurationError>
    where
        V: fmt::Display,
    {
        self.render_with_width(mode, self.config.field_width)
    }

    /// Renders the tree in the given traversal order.
    /// `max_field_width` is the column width of the `Entire` layout.
    pub fn render_with_width(
        &self,
        mode: TraversalMode,
        max_field_width: usize,
    ) -> Result<String, ConfigurationError>
    where
        V: fmt::Display,
    {
        self.tree.render_with_width(mode, max_field_width)
    }

    fn balance_subtree(&mut self, link: Link<V>) {
        if let Some(node_ptr) = link {
            self.balance_subtree(unsafe { node_ptr.as_ref().left });
            self.balance_subtree(unsafe { node_ptr.as_ref().right });
            if (Node::left_height(node_ptr) - Node::right_height(node_ptr)).abs() > 1 {
                let top_ptr = self.rebalance_node(node_ptr);
                self.tree.update_heights(unsafe { top_ptr.as_ref().parent });
            }
        }
    }

    /// Rebalances nodes starting from given position up to the root node.
    /// Stops once a subtree keeps its previous height, as nothing above it changes then.
    fn rebalance_path(&mut self, start_from: Link<V>) {
        let mut current = start_from;
        while let Some(node_ptr) = current {
            let old_height = unsafe { node_ptr.as_ref().height };
            let top_ptr = self.rebalance_node(node_ptr);
            if unsafe { top_ptr.as_ref().height } == old_height {
                break;
            }
            current = unsafe { top_ptr.as_ref().parent };
        }
    }

    /// Restores AVL condition (balance) at given node if necessary and adjusts height.
    /// Returns the node at the top of the subtree afterwards.
    fn rebalance_node(&mut self, node_ptr: NodePtr<V>) -> NodePtr<V> {
        let left_height = Node::left_height(node_ptr);
        let right_height = Node::right_height(node_ptr);
        if left_height > right_height + 1 {
            // Left heavy, double rotation if the left child leans right
            if let Some(left_ptr) = unsafe { node_ptr.as_ref().left } {
                if Node::right_height(left_ptr) > Node::left_height(left_ptr) {
                    self.rotate_left(left_ptr);
                }
            }
            self.rotate_right(node_ptr)
        } else if right_height > left_height + 1 {
            // Right heavy, double rotation if the right child leans left
            if let Some(right_ptr) = unsafe { node_ptr.as_ref().right } {
                if Node::left_height(right_ptr) > Node::right_height(right_ptr) {
                    self.rotate_right(right_ptr);
                }
            }
            self.rotate_left(node_ptr)
        } else {
            Node::adjust_height(node_ptr);
            node_ptr
        }
    }

    fn rotate_left(&mut self, mut node_ptr: NodePtr<V>) -> NodePtr<V> {
        unsafe {
            debug_assert!(node_ptr.as_ref().right.is_some(), "left rotation needs a right child");
            let Some(mut right_ptr) = node_ptr.as_ref().right else {
                return node_ptr;
            };
            node_ptr.as_mut().right = right_ptr.as_ref().left;
            if let Some(mut right_left_ptr) = right_ptr.as_ref().left {
                right_left_ptr.as_mut().parent = Some(node_ptr);
            }

            right_ptr.as_mut().parent = node_ptr.as_ref().parent;
            self.tree
                .replace_child(node_ptr.as_ref().parent, node_ptr, Some(right_ptr));

            right_ptr.as_mut().left = Some(node_ptr);
            node_ptr.as_mut().parent = Some(right_ptr);

            Node::adjust_height(node_ptr);
            Node::adjust_height(right_ptr);
            self.rotations.left += 1;
            log::trace!("rotated left, subtree height now {}", right_ptr.as_ref().height);
            right_ptr
        }
    }

    fn rotate_right(&mut self, mut node_ptr: NodePtr<V>) -> NodePtr<V> {
        unsafe {
            debug_assert!(node_ptr.as_ref().left.is_some(), "right rotation needs a left child");
            let Some(mut left_ptr) = node_ptr.as_ref().left else {
                return node_ptr;
            };
            node_ptr.as_mut().left = left_ptr.as_ref().right;
            if let Some(mut left_right_ptr) = left_ptr.as_ref().right {
                left_right_ptr.as_mut().parent = Some(node_ptr);
            }

            left_ptr.as_mut().parent = node_ptr.as_ref().parent;
            self.tree
                .replace_child(node_ptr.as_ref().parent, node_ptr, Some(left_ptr));

            left_ptr.as_mut().right = Some(node_ptr);
            node_ptr.as_mut().parent = Some(left_ptr);

            Node::adjust_height(node_ptr);
            Node::adjust_height(left_ptr);
            self.rotations.right += 1;
            log::trace!("rotated right, subtree height now {}", left_ptr.as_ref().height);
            left_ptr
        }
    }
}

impl<V: Ord> AvlTree<V> {
    /// Inserts a value and rebalances.
    /// Returns false, leaving the tree untouched, if the value is already present.
    pub fn insert(&mut self, value: V) -> bool {
        let Some(node_ptr) = self.tree.attach(value) else {
            return false;
        };
        let parent = unsafe { node_ptr.as_ref().parent };
        match self.config.balance_strategy {
            BalanceStrategy::Path => self.rebalance_path(parent),
            BalanceStrategy::FullTree => {
                self.tree.update_heights(parent);
                self.balance();
            }
        }
        true
    }

    /// Returns a view of the node holding the given value.
    pub fn search<Q>(&self, value: &Q) -> Option<NodeRef<'_, V>>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.search(value)
    }

    /// Returns a reference to the value in the tree that is equal to the given value.
    pub fn get<Q>(&self, value: &Q) -> Option<&V>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(value)
    }

    /// Returns true if the tree contains the given value.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains(value)
    }

    /// Removes a value from the tree.
    /// Returns whether the value was previously in the tree.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take(value).is_some()
    }

    /// Removes and returns the value in the tree that is equal to the given value.
    /// Balance is restored afterwards unless the delete policy is
    /// [`DeletePolicy::Preserve`].
    pub fn take<Q>(&mut self, value: &Q) -> Option<V>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (value, dirty) = self.tree.detach(value)?;
        match (self.config.delete_policy, self.config.balance_strategy) {
            (DeletePolicy::Preserve, _) => {
                log::trace!("removal done, balance left unchecked");
                self.tree.update_heights(dirty);
            }
            (DeletePolicy::Rebalance, BalanceStrategy::Path) => self.rebalance_path(dirty),
            (DeletePolicy::Rebalance, BalanceStrategy::FullTree) => {
                self.tree.update_heights(dirty);
                self.balance();
            }
        }
        Some(value)
    }

    /// Returns true if an in-order walk yields strictly increasing values.
    pub fn is_valid(&self) -> bool {
        self.tree.is_valid()
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        self.tree.check_consistency();
        if self.config.delete_policy == DeletePolicy::Rebalance {
            assert!(self.is_balanced());
        }
    }
}

impl<V> Default for AvlTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for AvlTree<V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            config: self.config,
            rotations: self.rotations,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for AvlTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<V: Ord> FromIterator<V> for AvlTree<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<V: Ord> Extend<V> for AvlTree<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, V> IntoIterator for &'a AvlTree<V> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
