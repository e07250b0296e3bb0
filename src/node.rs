use std::cmp;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Height of an empty subtree. A leaf has height zero.
pub const EMPTY_HEIGHT: i32 = -1;

pub(crate) type NodePtr<V> = NonNull<Node<V>>;
pub(crate) type Link<V> = Option<NodePtr<V>>;
pub(crate) type LinkPtr<V> = NonNull<Link<V>>;

pub(crate) struct Node<V> {
    pub(crate) value: V,
    pub(crate) left: Link<V>,
    pub(crate) right: Link<V>,
    pub(crate) parent: Link<V>,
    pub(crate) height: i32,
}

impl<V> Node<V> {
    pub(crate) fn create(parent: Link<V>, value: V) -> NodePtr<V> {
        let boxed = Box::new(Node {
            value,
            parent,
            left: None,
            right: None,
            height: 0,
        });
        unsafe { NodePtr::new_unchecked(Box::into_raw(boxed)) }
    }

    /// Frees the node and hands back its value.
    /// The node must already be unreachable from any tree.
    pub(crate) unsafe fn destroy(node_ptr: NodePtr<V>) -> V {
        let boxed = Box::from_raw(node_ptr.as_ptr());
        boxed.value
    }

    pub(crate) fn height_of(link: Link<V>) -> i32 {
        match link {
            None => EMPTY_HEIGHT,
            Some(node_ptr) => unsafe { node_ptr.as_ref().height },
        }
    }

    pub(crate) fn left_height(node_ptr: NodePtr<V>) -> i32 {
        Self::height_of(unsafe { node_ptr.as_ref().left })
    }

    pub(crate) fn right_height(node_ptr: NodePtr<V>) -> i32 {
        Self::height_of(unsafe { node_ptr.as_ref().right })
    }

    pub(crate) fn adjust_height(mut node_ptr: NodePtr<V>) {
        let height = 1 + cmp::max(Self::left_height(node_ptr), Self::right_height(node_ptr));
        unsafe { node_ptr.as_mut().height = height };
    }

    /// Deep-copies the subtree below `node_ptr`, keeping shape and cached heights.
    pub(crate) fn clone_subtree(node_ptr: NodePtr<V>, parent: Link<V>) -> NodePtr<V>
    where
        V: Clone,
    {
        unsafe {
            let node = node_ptr.as_ref();
            let mut copy_ptr = Node::create(parent, node.value.clone());
            copy_ptr.as_mut().height = node.height;
            copy_ptr.as_mut().left = node
                .left
                .map(|left_ptr| Self::clone_subtree(left_ptr, Some(copy_ptr)));
            copy_ptr.as_mut().right = node
                .right
                .map(|right_ptr| Self::clone_subtree(right_ptr, Some(copy_ptr)));
            copy_ptr
        }
    }
}

/// A read-only view of a node inside a tree.
///
/// The view borrows the tree, so the tree cannot be modified while any
/// `NodeRef` into it is alive. Two views are the same node when
/// [`NodeRef::ptr_eq`] holds; comparing values is not enough to identify
/// a position.
///
/// ```
/// use avl_engine::AvlTree;
/// let mut tree = AvlTree::new();
/// for value in [10, 20, 30] {
///     tree.insert(value);
/// }
/// let root = tree.root().unwrap();
/// assert_eq!(root.value(), &20);
/// assert_eq!(root.height(), 1);
/// assert_eq!(root.left().unwrap().value(), &10);
/// assert!(root.right().unwrap().parent().unwrap().ptr_eq(&root));
/// ```
pub struct NodeRef<'a, V> {
    node_ptr: NodePtr<V>,
    marker: PhantomData<&'a Node<V>>,
}

impl<'a, V> NodeRef<'a, V> {
    pub(crate) fn new(node_ptr: NodePtr<V>) -> Self {
        Self {
            node_ptr,
            marker: PhantomData,
        }
    }

    pub(crate) fn from_link(link: Link<V>) -> Option<Self> {
        link.map(Self::new)
    }

    fn node(&self) -> &'a Node<V> {
        unsafe { &*self.node_ptr.as_ptr() }
    }

    /// Returns the value stored in this node.
    pub fn value(&self) -> &'a V {
        &self.node().value
    }

    /// Returns the cached height of the subtree rooted here.
    pub fn height(&self) -> i32 {
        self.node().height
    }

    /// Returns the left child.
    pub fn left(&self) -> Option<NodeRef<'a, V>> {
        Self::from_link(self.node().left)
    }

    /// Returns the right child.
    pub fn right(&self) -> Option<NodeRef<'a, V>> {
        Self::from_link(self.node().right)
    }

    /// Returns the parent node, or `None` for the root.
    pub fn parent(&self) -> Option<NodeRef<'a, V>> {
        Self::from_link(self.node().parent)
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.node().left.is_none() && self.node().right.is_none()
    }

    /// Returns true if the node has no parent.
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    /// Returns true if this node sits in its parent's left slot.
    pub fn is_left_child(&self) -> bool {
        match self.node().parent {
            None => false,
            Some(parent_ptr) => {
                let left = unsafe { parent_ptr.as_ref().left };
                left == Some(self.node_ptr)
            }
        }
    }

    /// Returns true if this node sits in its parent's right slot.
    pub fn is_right_child(&self) -> bool {
        match self.node().parent {
            None => false,
            Some(parent_ptr) => {
                let right = unsafe { parent_ptr.as_ref().right };
                right == Some(self.node_ptr)
            }
        }
    }

    /// Right subtree height minus left subtree height.
    pub fn balance_factor(&self) -> i32 {
        Node::right_height(self.node_ptr) - Node::left_height(self.node_ptr)
    }

    /// Returns true if both views point at the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.node_ptr == other.node_ptr
    }
}

impl<V> Clone for NodeRef<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for NodeRef<'_, V> {}

impl<V: fmt::Debug> fmt::Debug for NodeRef<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("value", self.value())
            .field("height", &self.height())
            .finish()
    }
}
