use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

use crate::error::ConfigurationError;
use crate::iter::Iter;
use crate::node::{Link, LinkPtr, Node, NodePtr, NodeRef};
use crate::render::{self, TraversalMode};

/// An unbalanced binary search tree with parent links and cached heights.
///
/// This is the ordering engine underneath [`AvlTree`](crate::AvlTree). It
/// never rotates, so its shape depends on insertion order.
///
/// ```
/// use avl_engine::BinarySearchTree;
/// let mut tree = BinarySearchTree::new();
/// for value in [5, 4, 7] {
///     tree.insert(value);
/// }
/// assert_eq!(tree.root().unwrap().value(), &5);
/// assert!(tree.remove(&5));
/// assert_eq!(tree.root().unwrap().value(), &7);
/// ```
pub struct BinarySearchTree<V> {
    pub(crate) root: Link<V>,
    num_nodes: usize,
}

#[allow(clippy::enum_variant_names)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

impl<V> BinarySearchTree<V> {
    /// Creates an empty tree.
    /// No memory is allocated until the first value is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the tree contains no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of values in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the root node, or -1 for an empty tree.
    pub fn height(&self) -> i32 {
        Node::height_of(self.root)
    }

    /// Returns a view of the root node.
    pub fn root(&self) -> Option<NodeRef<'_, V>> {
        NodeRef::from_link(self.root)
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        self.postorder(|node_ptr| drop(unsafe { Node::destroy(node_ptr) }));
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns an iterator over the values in ascending order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.root, self.num_nodes)
    }

    /// Recomputes every cached height bottom-up.
    pub fn recalculate_heights(&mut self) {
        self.postorder(Node::adjust_height);
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
        render::render(self.root(), mode, max_field_width)
    }

    /// Refreshes cached heights from `start_from` up to the root node.
    /// Stops at the first node whose height does not change.
    pub(crate) fn update_heights(&mut self, start_from: Link<V>) {
        let mut current = start_from;
        while let Some(node_ptr) = current {
            let old_height = unsafe { node_ptr.as_ref().height };
            Node::adjust_height(node_ptr);
            if unsafe { node_ptr.as_ref().height } == old_height {
                break;
            }
            current = unsafe { node_ptr.as_ref().parent };
        }
    }

    /// Points the slot holding `old_ptr` at `new_link`. That slot is the root
    /// link if `parent` is `None`, otherwise the matching child slot of `parent`.
    pub(crate) fn replace_child(&mut self, parent: Link<V>, old_ptr: NodePtr<V>, new_link: Link<V>) {
        match parent {
            None => self.root = new_link,
            Some(mut parent_ptr) => unsafe {
                if parent_ptr.as_ref().left == Some(old_ptr) {
                    parent_ptr.as_mut().left = new_link;
                } else {
                    debug_assert!(parent_ptr.as_ref().right == Some(old_ptr));
                    parent_ptr.as_mut().right = new_link;
                }
            },
        }
    }

    /// Detaches a node from the tree without freeing it.
    /// Returns the lowest node whose subtree changed; heights are stale from there up.
    pub(crate) fn unlink_node(&mut self, node_ptr: NodePtr<V>) -> Link<V> {
        unsafe {
            // Check if node to-unlink has right sub tree
            if let Some(mut min_child_ptr) = node_ptr.as_ref().right {
                // Find smallest child node in right sub tree
                let mut min_child_parent_ptr = node_ptr;
                while let Some(left_ptr) = min_child_ptr.as_ref().left {
                    min_child_parent_ptr = min_child_ptr;
                    min_child_ptr = left_ptr;
                }

                // Smallest child node is stem or leaf, unlink from tree
                debug_assert!(min_child_ptr.as_ref().left.is_none());
                self.replace_child(
                    Some(min_child_parent_ptr),
                    min_child_ptr,
                    min_child_ptr.as_ref().right,
                );
                if let Some(mut right_ptr) = min_child_ptr.as_ref().right {
                    right_ptr.as_mut().parent = Some(min_child_parent_ptr);
                }

                // Replace node to-unlink by smallest child node (up to 6 links)
                min_child_ptr.as_mut().left = node_ptr.as_ref().left;
                if let Some(mut left_ptr) = node_ptr.as_ref().left {
                    left_ptr.as_mut().parent = Some(min_child_ptr);
                }

                min_child_ptr.as_mut().right = node_ptr.as_ref().right;
                if let Some(mut right_ptr) = node_ptr.as_ref().right {
                    right_ptr.as_mut().parent = Some(min_child_ptr);
                }

                min_child_ptr.as_mut().parent = node_ptr.as_ref().parent;
                self.replace_child(node_ptr.as_ref().parent, node_ptr, Some(min_child_ptr));

                // The moved node takes over the old height of its new position,
                // so the repair walk can tell when heights stop changing.
                min_child_ptr.as_mut().height = node_ptr.as_ref().height;

                if min_child_parent_ptr == node_ptr {
                    // Smallest child node was the direct right child
                    Some(min_child_ptr)
                } else {
                    Some(min_child_parent_ptr)
                }
            } else {
                // Node to-unlink is stem or leaf, its left child takes its place
                if let Some(mut left_ptr) = node_ptr.as_ref().left {
                    left_ptr.as_mut().parent = node_ptr.as_ref().parent;
                }
                self.replace_child(node_ptr.as_ref().parent, node_ptr, node_ptr.as_ref().left);
                node_ptr.as_ref().parent
            }
        }
    }

    pub(crate) fn preorder<F: FnMut(NodePtr<V>)>(&self, f: F) {
        self.traverse(f, |_| {}, |_| {});
    }

    fn postorder<F: FnMut(NodePtr<V>)>(&self, f: F) {
        self.traverse(|_| {}, |_| {}, f);
    }

    fn traverse<Pre, In, Post>(&self, mut preorder: Pre, mut inorder: In, mut postorder: Post)
    where
        Pre: FnMut(NodePtr<V>),
        In: FnMut(NodePtr<V>),
        Post: FnMut(NodePtr<V>),
    {
        if let Some(mut node_ptr) = self.root {
            let mut dir = Direction::FromParent;
            loop {
                match dir {
                    Direction::FromParent => {
                        preorder(node_ptr);
                        if let Some(left_ptr) = unsafe { node_ptr.as_ref().left } {
                            node_ptr = left_ptr;
                        } else {
                            dir = Direction::FromLeft;
                        }
                    }
                    Direction::FromLeft => {
                        inorder(node_ptr);
                        if let Some(right_ptr) = unsafe { node_ptr.as_ref().right } {
                            node_ptr = right_ptr;
                            dir = Direction::FromParent;
                        } else {
                            dir = Direction::FromRight;
                        }
                    }
                    Direction::FromRight => {
                        // Post order traversal is used for node deletion,
                        // so make sure not to use node pointer after postorder call.
                        if let Some(parent_ptr) = unsafe { node_ptr.as_ref().parent } {
                            if Some(node_ptr) == unsafe { parent_ptr.as_ref().left } {
                                dir = Direction::FromLeft;
                            } else {
                                dir = Direction::FromRight;
                            }
                            postorder(node_ptr);
                            node_ptr = parent_ptr;
                        } else {
                            postorder(node_ptr);
                            break;
                        }
                    }
                }
            }
        }
    }
}

impl<V: Ord> BinarySearchTree<V> {
    /// Inserts a value into the tree.
    /// Returns false, leaving the tree untouched, if the value is already present.
    pub fn insert(&mut self, value: V) -> bool {
        match self.attach(value) {
            Some(node_ptr) => {
                self.update_heights(unsafe { node_ptr.as_ref().parent });
                true
            }
            None => false,
        }
    }

    /// Returns a view of the node holding the given value.
    pub fn search<Q>(&self, value: &Q) -> Option<NodeRef<'_, V>>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        NodeRef::from_link(self.find(value))
    }

    /// Returns a reference to the value in the tree that is equal to the given value.
    pub fn get<Q>(&self, value: &Q) -> Option<&V>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(value).map(|node| node.value())
    }

    /// Returns true if the tree contains the given value.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).is_some()
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
    pub fn take<Q>(&mut self, value: &Q) -> Option<V>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (value, dirty) = self.detach(value)?;
        self.update_heights(dirty);
        Some(value)
    }

    /// Returns true if an in-order walk yields strictly increasing values.
    pub fn is_valid(&self) -> bool {
        self.iter().zip(self.iter().skip(1)).all(|(lhs, rhs)| lhs < rhs)
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        unsafe {
            // Check root link
            if let Some(root_node_ptr) = self.root {
                assert!(root_node_ptr.as_ref().parent.is_none());
            }

            // Check tree nodes
            let mut num_nodes = 0;
            self.preorder(|node_ptr| {
                let mut height = 0;

                // Check link for left child node
                if let Some(left_ptr) = node_ptr.as_ref().left {
                    assert!(left_ptr.as_ref().parent == Some(node_ptr));
                    assert!(left_ptr.as_ref().value < node_ptr.as_ref().value);
                    height = std::cmp::max(height, left_ptr.as_ref().height + 1);
                }

                // Check link for right child node
                if let Some(right_ptr) = node_ptr.as_ref().right {
                    assert!(right_ptr.as_ref().parent == Some(node_ptr));
                    assert!(right_ptr.as_ref().value > node_ptr.as_ref().value);
                    height = std::cmp::max(height, right_ptr.as_ref().height + 1);
                }

                // Check height
                assert!(node_ptr.as_ref().height > crate::node::EMPTY_HEIGHT);
                assert_eq!(node_ptr.as_ref().height, height);

                num_nodes += 1;
            });

            // Check number of nodes and global ordering
            assert_eq!(num_nodes, self.num_nodes);
            assert!(self.is_valid());
        }
    }

    /// Links a new leaf for `value` and returns it, or `None` for a duplicate.
    /// Heights above the new leaf are left stale.
    pub(crate) fn attach(&mut self, value: V) -> Option<NodePtr<V>> {
        let (parent, mut link_ptr) = self.find_insert_pos(&value)?;
        let node_ptr = Node::create(parent, value);
        unsafe {
            *link_ptr.as_mut() = Some(node_ptr);
        }
        self.num_nodes += 1;
        Some(node_ptr)
    }

    /// Unlinks and frees the node holding `value`.
    /// Returns the value together with the position where repair must start.
    pub(crate) fn detach<Q>(&mut self, value: &Q) -> Option<(V, Link<V>)>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node_ptr = self.find(value)?;
        debug_assert!(self.num_nodes >= 1);
        let dirty = self.unlink_node(node_ptr);
        self.num_nodes -= 1;
        Some((unsafe { Node::destroy(node_ptr) }, dirty))
    }

    fn find<Q>(&self, value: &Q) -> Link<V>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(node_ptr) = current {
            current = unsafe {
                match value.cmp(node_ptr.as_ref().value.borrow()) {
                    Ordering::Equal => break,
                    Ordering::Less => node_ptr.as_ref().left,
                    Ordering::Greater => node_ptr.as_ref().right,
                }
            }
        }
        current
    }

    fn find_insert_pos(&mut self, value: &V) -> Option<(Link<V>, LinkPtr<V>)> {
        let mut parent: Link<V> = None;
        let mut link_ptr: LinkPtr<V> = unsafe { LinkPtr::new_unchecked(&mut self.root) };
        unsafe {
            while let Some(mut node_ptr) = *link_ptr.as_ref() {
                parent = Some(node_ptr);
                link_ptr = match value.cmp(&node_ptr.as_ref().value) {
                    Ordering::Equal => return None,
                    Ordering::Less => LinkPtr::new_unchecked(&mut node_ptr.as_mut().left),
                    Ordering::Greater => LinkPtr::new_unchecked(&mut node_ptr.as_mut().right),
                };
            }
        }
        Some((parent, link_ptr))
    }
}

impl<V> Drop for BinarySearchTree<V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<V> Default for BinarySearchTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for BinarySearchTree<V> {
    fn clone(&self) -> Self {
        Self {
            root: self
                .root
                .map(|root_ptr| Node::clone_subtree(root_ptr, None)),
            num_nodes: self.num_nodes,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for BinarySearchTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<V: Ord> FromIterator<V> for BinarySearchTree<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<V: Ord> Extend<V> for BinarySearchTree<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, V> IntoIterator for &'a BinarySearchTree<V> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// The tree owns every node exclusively; raw links never escape a borrow of the tree.
unsafe impl<V: Send> Send for BinarySearchTree<V> {}
unsafe impl<V: Sync> Sync for BinarySearchTree<V> {}
