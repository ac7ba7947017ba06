//! The canonical comparator for [`Node`]s.
//!
//! Nodes are ordered first by kind, in the order:
//!
//! `Leaf < Sum < Product < Fraction < Unary < Binary < NAry`
//!
//! Nodes of the same kind are then ordered by their number of children, then by the value
//! attached to them (the value of a leaf, the offset of a sum, or the coefficient of a product),
//! then by function name, and finally by comparing their children pairwise from left to right.
//!
//! The comparator is total, and two nodes compare equal exactly when they are structurally
//! identical. The [`PartialEq`], [`Eq`], [`PartialOrd`], [`Ord`], and [`Hash`] implementations
//! for [`Node`] are all derived from it.

use crate::node::Node;
use std::{cmp::Ordering, hash::{Hash, Hasher}};

/// Returns the priority of the node's kind. Lower priorities are ordered first.
fn rank(node: &Node) -> u8 {
    match node {
        Node::Leaf(_) => 0,
        Node::Sum { .. } => 1,
        Node::Product { .. } => 2,
        Node::Fraction(..) => 3,
        Node::Unary { .. } => 4,
        Node::Binary { .. } => 5,
        Node::NAry { .. } => 6,
    }
}

/// Compares two nodes in canonical order.
pub fn compare(a: &Node, b: &Node) -> Ordering {
    rank(a).cmp(&rank(b))
        .then_with(|| a.children().len().cmp(&b.children().len()))
        .then_with(|| a.attached_value().cmp(&b.attached_value()))
        .then_with(|| a.function_name().cmp(&b.function_name()))
        .then_with(|| {
            a.children()
                .zip(b.children())
                .map(|(a, b)| compare(a, b))
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        })
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        compare(self, other).is_eq()
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

/// Hashes exactly the parts of the node that [`compare`] looks at, so that nodes that compare
/// equal hash equally.
impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        rank(self).hash(state);
        self.children().len().hash(state);
        self.attached_value().hash(state);
        self.function_name().hash(state);
        for child in self.children() {
            child.hash(state);
        }
    }
}
