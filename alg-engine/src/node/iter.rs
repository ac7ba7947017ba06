use super::Node;
use std::slice;

/// An iterator over the direct children of a [`Node`], from left to right.
///
/// This iterator is created by [`Node::children`].
#[derive(Debug, Clone)]
pub enum Children<'a> {
    /// The children are stored contiguously.
    Slice(slice::Iter<'a, Node>),

    /// The numerator and denominator of a fraction, in that order.
    Pair(Option<&'a Node>, Option<&'a Node>),
}

impl<'a> Children<'a> {
    /// Creates an iterator over the children of the given node.
    pub fn new(node: &'a Node) -> Self {
        match node {
            Node::Leaf(_) => Self::Slice(<&[Node]>::default().iter()),
            Node::Sum { terms, .. } => Self::Slice(terms.iter()),
            Node::Product { factors, .. } => Self::Slice(factors.iter()),
            Node::Fraction(num, den) => Self::Pair(Some(num), Some(den)),
            Node::Unary { arg, .. } => Self::Slice(slice::from_ref(&**arg).iter()),
            Node::Binary { args, .. } => Self::Slice(args.iter()),
            Node::NAry { args, .. } => Self::Slice(args.iter()),
        }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Slice(iter) => iter.next(),
            Self::Pair(first, second) => first.take().or_else(|| second.take()),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for Children<'_> {
    fn len(&self) -> usize {
        match self {
            Self::Slice(iter) => iter.len(),
            Self::Pair(first, second) => first.is_some() as usize + second.is_some() as usize,
        }
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match self {
            Self::Slice(iter) => iter.next_back(),
            Self::Pair(first, second) => second.take().or_else(|| first.take()),
        }
    }
}

/// An iterator that iteratively traverses the tree of nodes in left-to-right post-order (i.e.
/// depth-first).
///
/// This iterator is created by [`Node::post_order_iter`].
pub struct NodeIter<'a> {
    stack: Vec<&'a Node>,
    last_visited: Option<&'a Node>,
}

impl<'a> NodeIter<'a> {
    /// Creates a new iterator that traverses the tree of nodes in left-to-right post-order (i.e.
    /// depth-first).
    pub fn new(node: &'a Node) -> Self {
        Self {
            stack: vec![node],
            last_visited: None,
        }
    }

    /// Pops the current node in the stack and marks it as the last visited node.
    fn visit(&mut self) -> Option<&'a Node> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given node matches the last visited node.
    fn is_last_visited(&self, node: &'a Node) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, node),
            None => false,
        }
    }
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = *self.stack.last()?;
            match node.children().last() {
                // leaves, and nodes whose children have all been visited
                None => return self.visit(),
                Some(last) if self.is_last_visited(last) => return self.visit(),
                Some(_) => self.stack.extend(node.children().rev()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::node::{make_fraction, make_sum, make_unary};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn post_order() {
        // sin(x)/cos(y) + tan(z)
        let node = make_sum(vec![
            make_fraction(make_unary("sin", Node::symbol("x")), make_unary("cos", Node::symbol("y")))
                .unwrap(),
            make_unary("tan", Node::symbol("z")),
        ]);

        let visited = node.post_order_iter()
            .map(|node| node.to_string())
            .collect::<Vec<_>>();
        assert_eq!(visited, vec![
            "x", "sin(x)", "y", "cos(y)", "sin(x)/cos(y)",
            "z", "tan(z)",
            "sin(x)/cos(y) + tan(z)",
        ]);
    }
}
