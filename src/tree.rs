use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::item::Keyed;
use crate::node::{Color, Node};
use crate::sequence::SortedSequence;

/// A red-black tree augmented with subtree sizes.
///
/// Nodes live in a `Vec` and refer to each other by index, with slot `0`
/// reserved for a shared black sentinel. Every node records the size of its
/// subtree, which turns rank and select queries into a single root-to-leaf
/// walk, so positional access, lower bound, insertion and removal are all
/// O(log n).
#[derive(Clone, Debug)]
pub struct OrderStatisticTree<T, Ix = DefaultIx> {
    /// Vector that stores nodes
    pub(crate) nodes: Vec<Node<T, Ix>>,
    /// Root of the tree
    pub(crate) root: NodeIndex<Ix>,
}

impl<T, Ix> OrderStatisticTree<T, Ix>
where
    Ix: IndexType,
{
    /// Creates a new `OrderStatisticTree` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = vec![Self::new_sentinel()];
        nodes.reserve(capacity);
        OrderStatisticTree {
            nodes,
            root: Self::sentinel(),
        }
    }

    /// Create a new sentinel node
    fn new_sentinel() -> Node<T, Ix> {
        Node {
            item: None,
            size: 0,
            left: None,
            right: None,
            parent: None,
            color: Color::Black,
        }
    }

    /// Create a new tree node
    fn new_node(item: T) -> Node<T, Ix> {
        Node {
            item: Some(item),
            size: 1,
            left: Some(Self::sentinel()),
            right: Some(Self::sentinel()),
            parent: Some(Self::sentinel()),
            color: Color::Red,
        }
    }

    /// Get the sentinel node index
    fn sentinel() -> NodeIndex<Ix> {
        NodeIndex::new(0)
    }

    /// Find the node holding the element at `position`.
    fn select(&self, mut position: usize) -> Option<NodeIndex<Ix>> {
        let mut x = self.root;
        while !self.node_ref(x, Node::is_sentinel) {
            let left_size = self.left_ref(x, Node::size);
            match position.cmp(&left_size) {
                Ordering::Less => x = self.node_ref(x, Node::left),
                Ordering::Equal => return Some(x),
                Ordering::Greater => {
                    position -= left_size + 1;
                    x = self.node_ref(x, Node::right);
                }
            }
        }
        None
    }
}

impl<T> OrderStatisticTree<T> {
    /// Create an empty `OrderStatisticTree`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
}

impl<T, Ix> Default for OrderStatisticTree<T, Ix>
where
    Ix: IndexType,
{
    #[inline]
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T, Ix> SortedSequence<T> for OrderStatisticTree<T, Ix>
where
    T: Keyed,
    Ix: IndexType,
{
    #[inline]
    fn len(&self) -> usize {
        self.node_ref(self.root, Node::size)
    }

    /// Counts the elements whose key is less than `key`.
    fn lower_bound<Q>(&self, key: &Q) -> usize
    where
        T::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut rank = 0;
        let mut x = self.root;
        while let Some(item) = self.node_ref(x, Node::item) {
            if key.cmp(item.key().borrow()).is_gt() {
                rank += self.left_ref(x, Node::size) + 1;
                x = self.node_ref(x, Node::right);
            } else {
                x = self.node_ref(x, Node::left);
            }
        }
        rank
    }

    #[inline]
    fn get(&self, position: usize) -> Option<&T> {
        self.select(position)
            .and_then(|x| self.node_ref(x, Node::item))
    }

    #[inline]
    fn get_mut(&mut self, position: usize) -> Option<&mut T> {
        let x = self.select(position)?;
        self.node_mut(x, Node::item_mut)
    }

    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    fn insert(&mut self, item: T) -> usize {
        let node_idx = NodeIndex::new(self.nodes.len());
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0
                || node_idx.index() < <Ix as IndexType>::max().index(),
            "Reached maximum number of nodes"
        );
        self.nodes.push(Self::new_node(item));
        let position = self.insert_inner(node_idx);
        log::trace!("inserted {node_idx:?} at position {position}");
        position
    }

    fn remove_at(&mut self, position: usize) -> Option<T> {
        let node_idx = self.select(position)?;
        self.remove_inner(node_idx);
        // Swap the node with the last node stored in the vector and update indices
        let mut node = self.nodes.swap_remove(node_idx.index());
        let old = NodeIndex::<Ix>::new(self.nodes.len());
        self.update_idx(old, node_idx);
        log::trace!("removed {node_idx:?} at position {position}");
        node.take_item()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Self::new_sentinel());
        self.root = Self::sentinel();
    }

    fn into_sorted_vec(mut self) -> Vec<T> {
        let mut items = Vec::with_capacity(self.len());
        let mut stack = self.left_link(self.root);
        while let Some(x) = stack.pop() {
            let right = self.node_ref(x, Node::right);
            stack.extend(self.left_link(right));
            if let Some(item) = self.node_mut(x, Node::take_item) {
                items.push(item);
            }
        }
        items
    }
}

impl<T, Ix> OrderStatisticTree<T, Ix>
where
    T: Keyed,
    Ix: IndexType,
{
    /// Key of the element stored in a node, `None` for the sentinel.
    fn key(&self, x: NodeIndex<Ix>) -> Option<&T::Key> {
        self.node_ref(x, Node::item).map(Keyed::key)
    }

    /// Insert a node into the tree, returning its position.
    fn insert_inner(&mut self, z: NodeIndex<Ix>) -> usize {
        let mut y = Self::sentinel();
        let mut x = self.root;
        let mut position = 0;

        while !self.node_ref(x, Node::is_sentinel) {
            y = x;
            if self.key(z) < self.key(x) {
                x = self.node_ref(x, Node::left);
            } else {
                position += self.left_ref(x, Node::size) + 1;
                x = self.node_ref(x, Node::right);
            }
        }
        self.node_mut(z, Node::set_parent(y));
        if self.node_ref(y, Node::is_sentinel) {
            self.root = z;
        } else {
            if self.key(z) < self.key(y) {
                self.node_mut(y, Node::set_left(z));
            } else {
                self.node_mut(y, Node::set_right(z));
            }
            self.update_size_bottom_up(y);
        }
        self.node_mut(z, Node::set_color(Color::Red));

        self.insert_fixup(z);

        position
    }
}

impl<T, Ix> OrderStatisticTree<T, Ix>
where
    Ix: IndexType,
{
    /// Remove a node from the tree.
    fn remove_inner(&mut self, z: NodeIndex<Ix>) {
        let mut y = z;
        let mut y_orig_color = self.node_ref(y, Node::color);
        let x;
        if self.left_ref(z, Node::is_sentinel) {
            x = self.node_ref(z, Node::right);
            self.transplant(z, x);
            self.update_size_bottom_up(self.node_ref(z, Node::parent));
        } else if self.right_ref(z, Node::is_sentinel) {
            x = self.node_ref(z, Node::left);
            self.transplant(z, x);
            self.update_size_bottom_up(self.node_ref(z, Node::parent));
        } else {
            y = self.tree_minimum(self.node_ref(z, Node::right));
            let mut p = y;
            y_orig_color = self.node_ref(y, Node::color);
            x = self.node_ref(y, Node::right);
            if self.node_ref(y, Node::parent) == z {
                self.node_mut(x, Node::set_parent(y));
            } else {
                self.transplant(y, x);
                p = self.node_ref(y, Node::parent);
                self.node_mut(y, Node::set_right(self.node_ref(z, Node::right)));
                self.right_mut(y, Node::set_parent(y));
            }
            self.transplant(z, y);
            self.node_mut(y, Node::set_left(self.node_ref(z, Node::left)));
            self.left_mut(y, Node::set_parent(y));
            self.node_mut(y, Node::set_color(self.node_ref(z, Node::color)));

            self.update_size_bottom_up(p);
        }

        if matches!(y_orig_color, Color::Black) {
            self.remove_fixup(x);
        }
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while self.parent_ref(z, Node::is_red) {
            if self.grand_parent_ref(z, Node::is_sentinel) {
                break;
            }
            if self.is_left_child(self.node_ref(z, Node::parent)) {
                let y = self.grand_parent_ref(z, Node::right);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_right_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.left_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.right_rotate(self.parent_ref(z, Node::parent));
                }
            } else {
                let y = self.grand_parent_ref(z, Node::left);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_left_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.right_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.left_rotate(self.parent_ref(z, Node::parent));
                }
            }
        }
        self.node_mut(self.root, Node::set_color(Color::Black));
    }

    /// Restore red-black tree properties after a remove.
    fn remove_fixup(&mut self, mut x: NodeIndex<Ix>) {
        while x != self.root && self.node_ref(x, Node::is_black) {
            let mut w;
            if self.is_left_child(x) {
                w = self.parent_ref(x, Node::right);
                if self.node_ref(w, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::right);
                }
                if self.node_ref(w, Node::is_sentinel) {
                    break;
                }
                if self.left_ref(w, Node::is_black) && self.right_ref(w, Node::is_black) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.right_ref(w, Node::is_black) {
                        self.left_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.right_rotate(w);
                        w = self.parent_ref(x, Node::right);
                    }
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.right_mut(w, Node::set_color(Color::Black));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            } else {
                w = self.parent_ref(x, Node::left);
                if self.node_ref(w, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::left);
                }
                if self.node_ref(w, Node::is_sentinel) {
                    break;
                }
                if self.right_ref(w, Node::is_black) && self.left_ref(w, Node::is_black) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.left_ref(w, Node::is_black) {
                        self.right_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.left_rotate(w);
                        w = self.parent_ref(x, Node::left);
                    }
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.left_mut(w, Node::set_color(Color::Black));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            }
        }
        self.node_mut(x, Node::set_color(Color::Black));
    }

    /// Binary tree left rotate.
    fn left_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.right_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::right);
        self.node_mut(x, Node::set_right(self.node_ref(y, Node::left)));
        if !self.left_ref(y, Node::is_sentinel) {
            self.left_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_left(x));

        self.rotate_update_size(x, y);
    }

    /// Binary tree right rotate.
    fn right_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.left_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::left);
        self.node_mut(x, Node::set_left(self.node_ref(y, Node::right)));
        if !self.right_ref(y, Node::is_sentinel) {
            self.right_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_right(x));

        self.rotate_update_size(x, y);
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, Node::set_parent(self.node_ref(x, Node::parent)));
        if self.parent_ref(x, Node::is_sentinel) {
            self.root = y;
        } else if self.is_left_child(x) {
            self.parent_mut(x, Node::set_left(y));
        } else {
            self.parent_mut(x, Node::set_right(y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Update subtree sizes after a rotation.
    ///
    /// `y` takes over the whole subtree `x` used to root.
    fn rotate_update_size(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, Node::set_size(self.node_ref(x, Node::size)));
        self.recalculate_size(x);
    }

    /// Update subtree sizes towards the root
    fn update_size_bottom_up(&mut self, x: NodeIndex<Ix>) {
        let mut p = x;
        while !self.node_ref(p, Node::is_sentinel) {
            self.recalculate_size(p);
            p = self.node_ref(p, Node::parent);
        }
    }

    /// Recalculate the subtree size from left and right children
    fn recalculate_size(&mut self, x: NodeIndex<Ix>) {
        let size = self.left_ref(x, Node::size) + self.right_ref(x, Node::size) + 1;
        self.node_mut(x, Node::set_size(size));
    }

    /// Find the node with the minimum key.
    fn tree_minimum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.left_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Replace one subtree as a child of its parent with another subtree.
    fn transplant(&mut self, u: NodeIndex<Ix>, v: NodeIndex<Ix>) {
        if self.parent_ref(u, Node::is_sentinel) {
            self.root = v;
        } else if self.is_left_child(u) {
            self.parent_mut(u, Node::set_left(v));
        } else {
            self.parent_mut(u, Node::set_right(v));
        }
        self.node_mut(v, Node::set_parent(self.node_ref(u, Node::parent)));
    }

    /// Check if a node is a left child of its parent.
    fn is_left_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::left) == node
    }

    /// Check if a node is a right child of its parent.
    fn is_right_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::right) == node
    }

    /// Collects a link of nodes on the left, ending with the leftmost one.
    fn left_link(&self, mut x: NodeIndex<Ix>) -> Vec<NodeIndex<Ix>> {
        let mut nodes = vec![];
        while !self.node_ref(x, Node::is_sentinel) {
            nodes.push(x);
            x = self.node_ref(x, Node::left);
        }
        nodes
    }

    /// Update node links after the node at `old` was moved to `new`.
    fn update_idx(&mut self, old: NodeIndex<Ix>, new: NodeIndex<Ix>) {
        if self.root == old {
            self.root = new;
        }
        if self.nodes.get(new.index()).is_some() {
            if !self.parent_ref(new, Node::is_sentinel) {
                if self.parent_ref(new, Node::left) == old {
                    self.parent_mut(new, Node::set_left(new));
                } else {
                    self.parent_mut(new, Node::set_right(new));
                }
            }
            self.left_mut(new, Node::set_parent(new));
            self.right_mut(new, Node::set_parent(new));
        }
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a, T, Ix> OrderStatisticTree<T, Ix>
where
    Ix: IndexType,
{
    fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<T, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&self.nodes[idx])
    }

    fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&self.nodes[idx])
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn grand_parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&self.nodes[grand_parent_idx])
    }

    fn left_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&mut self.nodes[idx])
    }

    fn right_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&mut self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }

    fn grand_parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<T, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&mut self.nodes[grand_parent_idx])
    }
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    use super::*;
    use crate::item::Item;

    type Tree = OrderStatisticTree<Item<i32, i32>>;

    impl Tree {
        /// 1. Every node is either red or black.
        /// 2. The root is black.
        /// 3. Every leaf (NIL) is black.
        /// 4. If a node is red, then both its children are black.
        /// 5. For each node, all simple paths from the node to descendant leaves contain the
        /// same number of black nodes.
        fn check_rb_properties(&self) {
            assert!(matches!(
                self.node_ref(self.root, Node::color),
                Color::Black
            ));
            self.check_children_color(self.root);
            let _ignore = self.check_black_height(self.root);
        }

        fn check_children_color(&self, x: NodeIndex<u32>) {
            if self.node_ref(x, Node::is_sentinel) {
                return;
            }
            self.check_children_color(self.node_ref(x, Node::left));
            self.check_children_color(self.node_ref(x, Node::right));
            if self.node_ref(x, Node::is_red) {
                assert!(matches!(self.left_ref(x, Node::color), Color::Black));
                assert!(matches!(self.right_ref(x, Node::color), Color::Black));
            }
        }

        fn check_black_height(&self, x: NodeIndex<u32>) -> usize {
            if self.node_ref(x, Node::is_sentinel) {
                return 0;
            }
            let lefth = self.check_black_height(self.node_ref(x, Node::left));
            let righth = self.check_black_height(self.node_ref(x, Node::right));
            assert_eq!(lefth, righth);
            if self.node_ref(x, Node::is_black) {
                return lefth + 1;
            }
            lefth
        }

        fn check_size(&self) {
            let _ignore = self.check_size_inner(self.root);
            assert_eq!(self.len(), self.nodes.len() - 1);
        }

        fn check_size_inner(&self, x: NodeIndex<u32>) -> usize {
            if self.node_ref(x, Node::is_sentinel) {
                return 0;
            }
            let size = self.check_size_inner(self.node_ref(x, Node::left))
                + self.check_size_inner(self.node_ref(x, Node::right))
                + 1;
            assert_eq!(self.node_ref(x, Node::size), size);
            size
        }

        fn keys(&self) -> Vec<i32> {
            (0..self.len())
                .filter_map(|i| self.get(i))
                .map(|item| item.key)
                .collect()
        }
    }

    fn unique_keys(seed: [u8; 32], count: usize) -> Vec<i32> {
        let mut rng = StdRng::from_seed(seed);
        let mut keys: Vec<i32> = (0..count as i32 * 4).collect();
        keys.shuffle(&mut rng);
        keys.truncate(count);
        keys
    }

    #[test]
    fn red_black_tree_properties_is_satisfied() {
        for seed in [[0; 32], [1; 32], [2; 32]] {
            let mut tree = Tree::new();
            for k in unique_keys(seed, 1000) {
                let _ignore = tree.insert(Item::new(k, k));
            }
            tree.check_rb_properties();
            tree.check_size();
        }
    }

    #[test]
    fn sizes_hold_after_every_remove() {
        for seed in [[0; 32], [1; 32], [2; 32]] {
            let mut rng = StdRng::from_seed(seed);
            let mut tree = Tree::new();
            for k in unique_keys(seed, 500) {
                let _ignore = tree.insert(Item::new(k, k));
            }
            while !tree.is_empty() {
                let position = rng.gen_range(0..tree.len());
                assert!(tree.remove_at(position).is_some());
                tree.check_rb_properties();
                tree.check_size();
            }
            assert_eq!(tree.nodes.len(), 1);
        }
    }

    #[test]
    fn positions_follow_sorted_order() {
        let keys = unique_keys([7; 32], 300);
        let mut tree = Tree::new();
        let mut model: Vec<i32> = Vec::new();
        for k in keys {
            let expected = model.partition_point(|m| *m < k);
            model.insert(expected, k);
            assert_eq!(tree.insert(Item::new(k, 0)), expected);
        }
        assert_eq!(tree.keys(), model);
        for probe in -1..1300 {
            assert_eq!(tree.lower_bound(&probe), model.partition_point(|m| *m < probe));
        }
    }

    #[test]
    fn get_mut_changes_value_in_place() {
        let mut tree = Tree::new();
        for k in [3, 1, 2] {
            let _ignore = tree.insert(Item::new(k, 0));
        }
        if let Some(item) = tree.get_mut(1) {
            item.value = 20;
        }
        assert_eq!(tree.get(1).map(|item| (item.key, item.value)), Some((2, 20)));
        assert!(tree.get(3).is_none());
        assert!(tree.get_mut(3).is_none());
    }

    #[test]
    fn into_sorted_vec_is_in_order() {
        let mut tree = Tree::new();
        for k in unique_keys([3; 32], 200) {
            let _ignore = tree.insert(Item::new(k, k * 2));
        }
        let expected = tree.keys();
        let items = tree.into_sorted_vec();
        assert_eq!(items.iter().map(|item| item.key).collect::<Vec<_>>(), expected);
        assert!(items.iter().all(|item| item.value == item.key * 2));
    }

    #[test]
    fn tree_clear_is_ok() {
        let mut tree = Tree::new();
        let _ignore = tree.insert(Item::new(1, 1));
        let _ignore = tree.insert(Item::new(2, 2));
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.nodes.len(), 1);
        assert!(tree.nodes[0].is_sentinel());
        assert!(tree.remove_at(0).is_none());
    }

    #[test]
    fn usize_index_tree_works() {
        let mut tree: OrderStatisticTree<Item<i32, ()>, usize> = OrderStatisticTree::default();
        for k in [5, 4, 3, 2, 1] {
            let _ignore = tree.insert(Item::new(k, ()));
        }
        assert_eq!(tree.lower_bound(&3), 2);
        assert_eq!(tree.remove_at(0).map(|item| item.key), Some(1));
        assert_eq!(tree.len(), 4);
    }
}
