//! Lazy hierarchical traversal.
//!
//! [`Traversal`] walks a tree of nodes in depth-first or breadth-first order
//! without recursion, pulling children only when their parent is yielded.
//! Taking a prefix of the iterator therefore touches a prefix of the tree,
//! which keeps traversal cheap over large or unbounded hierarchies.
//!
//! There is no cycle guard: feeding a graph with a cycle produces an
//! unbounded sequence. Callers traverse trees.

use std::collections::VecDeque;
use std::fmt;

/// Visit order for [`Traversal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    DepthFirst,
    BreadthFirst,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalOrder::DepthFirst => write!(f, "depth-first"),
            TraversalOrder::BreadthFirst => write!(f, "breadth-first"),
        }
    }
}

/// Iterator over a node hierarchy, driven by a children function.
///
/// The children function may return `None` for nodes that cannot be
/// expanded; this is equivalent to returning no children. It runs exactly
/// once per yielded node, at the moment that node is yielded.
pub struct Traversal<N, F> {
    order: TraversalOrder,
    queue: VecDeque<N>,
    children: F,
}

/// Traverse the hierarchy under `root`, yielding `root` first.
pub fn traverse<N, F>(order: TraversalOrder, root: N, children: F) -> Traversal<N, F>
where
    F: FnMut(&N) -> Option<Vec<N>>,
{
    traverse_all(order, [root], children)
}

/// Traverse a forest of `roots` in the given order.
///
/// Depth-first exhausts each root's subtree before moving to the next root;
/// breadth-first interleaves by depth across all of them.
pub fn traverse_all<N, R, F>(order: TraversalOrder, roots: R, children: F) -> Traversal<N, F>
where
    R: IntoIterator<Item = N>,
    F: FnMut(&N) -> Option<Vec<N>>,
{
    Traversal {
        order,
        queue: roots.into_iter().collect(),
        children,
    }
}

impl<N, F> Iterator for Traversal<N, F>
where
    F: FnMut(&N) -> Option<Vec<N>>,
{
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let node = self.queue.pop_front()?;
        if let Some(children) = (self.children)(&node) {
            match self.order {
                TraversalOrder::DepthFirst => {
                    for child in children.into_iter().rev() {
                        self.queue.push_front(child);
                    }
                }
                TraversalOrder::BreadthFirst => self.queue.extend(children),
            }
        }
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Everything already queued will be yielded; expansion is unbounded.
        (self.queue.len(), None)
    }
}

impl<N, F> std::iter::FusedIterator for Traversal<N, F> where F: FnMut(&N) -> Option<Vec<N>> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, Clone, PartialEq)]
    struct Node {
        name: &'static str,
        children: Vec<Node>,
    }

    fn leaf(name: &'static str) -> Node {
        Node {
            name,
            children: Vec::new(),
        }
    }

    fn node(name: &'static str, children: Vec<Node>) -> Node {
        Node { name, children }
    }

    fn sample() -> Node {
        node(
            "root",
            vec![node("a", vec![leaf("a1"), leaf("a2")]), leaf("b")],
        )
    }

    fn expand(n: &Node) -> Option<Vec<Node>> {
        if n.children.is_empty() {
            None
        } else {
            Some(n.children.clone())
        }
    }

    fn names(t: impl Iterator<Item = Node>) -> Vec<&'static str> {
        t.map(|n| n.name).collect()
    }

    #[test]
    fn test_depth_first_order() {
        let visited = names(traverse(TraversalOrder::DepthFirst, sample(), expand));
        assert_eq!(visited, vec!["root", "a", "a1", "a2", "b"]);
    }

    #[test]
    fn test_breadth_first_order() {
        let visited = names(traverse(TraversalOrder::BreadthFirst, sample(), expand));
        assert_eq!(visited, vec!["root", "a", "b", "a1", "a2"]);
    }

    #[test]
    fn test_single_node_yields_itself() {
        for order in [TraversalOrder::DepthFirst, TraversalOrder::BreadthFirst] {
            let visited = names(traverse(order, leaf("only"), expand));
            assert_eq!(visited, vec!["only"], "{order}");
        }
    }

    #[test]
    fn test_empty_forest_yields_nothing() {
        let mut t = traverse_all(TraversalOrder::DepthFirst, Vec::<Node>::new(), expand);
        assert!(t.next().is_none());
    }

    #[test]
    fn test_forest_keeps_root_order() {
        let roots = vec![node("x", vec![leaf("x1")]), leaf("y")];
        let depth = names(traverse_all(TraversalOrder::DepthFirst, roots.clone(), expand));
        assert_eq!(depth, vec!["x", "x1", "y"]);
        let breadth = names(traverse_all(TraversalOrder::BreadthFirst, roots, expand));
        assert_eq!(breadth, vec!["x", "y", "x1"]);
    }

    #[test]
    fn test_children_pulled_only_when_yielded() {
        let calls = Cell::new(0usize);
        let count_expand = |n: &Node| {
            calls.set(calls.get() + 1);
            expand(n)
        };
        let mut t = traverse(TraversalOrder::DepthFirst, sample(), count_expand);
        assert_eq!(calls.get(), 0);
        assert_eq!(t.next().unwrap().name, "root");
        assert_eq!(calls.get(), 1);
        assert_eq!(t.next().unwrap().name, "a");
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_unbounded_expansion_supports_take() {
        let taken: Vec<usize> = traverse(TraversalOrder::BreadthFirst, 0usize, |n| {
            Some(vec![n + 1])
        })
        .take(5)
        .collect();
        assert_eq!(taken, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let count = traverse(TraversalOrder::DepthFirst, 0usize, |n| {
            if *n < 100_000 {
                Some(vec![n + 1])
            } else {
                None
            }
        })
        .count();
        assert_eq!(count, 100_001);
    }

    #[test]
    fn test_size_hint_tracks_queue() {
        let mut t = traverse(TraversalOrder::BreadthFirst, sample(), expand);
        assert_eq!(t.size_hint(), (1, None));
        t.next();
        assert_eq!(t.size_hint(), (2, None));
    }
}
