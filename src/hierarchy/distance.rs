//! Inheritance trees with hop distances.
//!
//! [`compute_tree`] walks declared edges breadth-first from a root type and
//! records how many hops away each supertype is. Every type appears at most
//! once, at its minimum distance; diamonds collapse under whichever path
//! reaches them first. Adapter selection ranks candidates with these
//! distances.

use crate::core::errors::{Error, Result};
use crate::core::types::{TypeKey, TypeKind};
use crate::hierarchy::catalog::{TypeCatalog, TypeEntry};
use serde::Serialize;
use std::collections::{HashSet, VecDeque};

/// One type in an inheritance tree, `distance` hops from the root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InheritanceNode {
    key: TypeKey,
    kind: TypeKind,
    distance: usize,
    children: Vec<InheritanceNode>,
}

impl InheritanceNode {
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn distance(&self) -> usize {
        self.distance
    }

    pub fn children(&self) -> &[InheritanceNode] {
        &self.children
    }

    /// Locate `key` anywhere in this tree.
    pub fn find(&self, key: &TypeKey) -> Option<&InheritanceNode> {
        self.iter().find(|node| &node.key == key)
    }

    /// Distance of `key` from this tree's root, if present.
    pub fn distance_to(&self, key: &TypeKey) -> Option<usize> {
        self.find(key).map(|node| node.distance)
    }

    /// Preorder walk of the tree, root first.
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter { stack: vec![self] }
    }

    /// Number of nodes in the tree, root included.
    pub fn size(&self) -> usize {
        self.iter().count()
    }
}

/// Iterative preorder iterator over an [`InheritanceNode`] tree.
pub struct NodeIter<'a> {
    stack: Vec<&'a InheritanceNode>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a InheritanceNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Supertypes a node expands into: the base class first, then declared
/// interfaces the base chain does not already provide. Redeclaring an
/// inherited interface never shortens its distance; the interface keeps the
/// depth of the type that first introduced it. Interfaces have no base, so
/// all of their extended super-interfaces pass through.
fn introduced_supertypes<'a>(catalog: &TypeCatalog, entry: &'a TypeEntry) -> Vec<&'a TypeKey> {
    let mut targets: Vec<&TypeKey> = Vec::new();
    if let Some(base) = entry.base() {
        targets.push(base);
    }
    for iface in entry.interfaces() {
        let provided_by_base = entry
            .base()
            .is_some_and(|base| catalog.is_assignable(base, iface));
        if !provided_by_base {
            targets.push(iface);
        }
    }
    targets
}

struct Slot {
    key: TypeKey,
    kind: TypeKind,
    distance: usize,
    parent: usize,
    built: Vec<InheritanceNode>,
}

/// Build the inheritance tree rooted at `root`.
///
/// Breadth-first over declared edges, so a type discovered through two paths
/// lands at the shorter one; equal-length paths are broken by declaration
/// order. The catalog is validated acyclic at build time, which is what
/// guarantees this walk terminates.
pub fn compute_tree(catalog: &TypeCatalog, root: &TypeKey) -> Result<InheritanceNode> {
    let root_entry = catalog
        .entry(root)
        .ok_or_else(|| Error::unknown_type(root.clone(), "inheritance tree root"))?;

    let mut arena: Vec<Slot> = vec![Slot {
        key: root.clone(),
        kind: root_entry.kind(),
        distance: 0,
        parent: 0,
        built: Vec::new(),
    }];
    let mut seen: HashSet<TypeKey> = HashSet::new();
    seen.insert(root.clone());
    let mut queue: VecDeque<usize> = VecDeque::new();
    queue.push_back(0);

    while let Some(current) = queue.pop_front() {
        let (current_key, current_distance) =
            (arena[current].key.clone(), arena[current].distance);
        if let Some(entry) = catalog.entry(&current_key) {
            for target in introduced_supertypes(catalog, entry) {
                if seen.contains(target) {
                    continue;
                }
                seen.insert(target.clone());
                if let Some(target_entry) = catalog.entry(target) {
                    arena.push(Slot {
                        key: target.clone(),
                        kind: target_entry.kind(),
                        distance: current_distance + 1,
                        parent: current,
                        built: Vec::new(),
                    });
                    queue.push_back(arena.len() - 1);
                }
            }
        }
    }

    // Children occupy higher arena indices than their parent, so a reverse
    // sweep always finishes a subtree before attaching it.
    for ix in (1..arena.len()).rev() {
        let mut children = std::mem::take(&mut arena[ix].built);
        children.reverse();
        let node = InheritanceNode {
            key: arena[ix].key.clone(),
            kind: arena[ix].kind,
            distance: arena[ix].distance,
            children,
        };
        let parent = arena[ix].parent;
        arena[parent].built.push(node);
    }
    let mut children = std::mem::take(&mut arena[0].built);
    children.reverse();
    log::trace!(
        "inheritance tree for `{root}`: {} nodes",
        children.iter().map(InheritanceNode::size).sum::<usize>() + 1
    );
    Ok(InheritanceNode {
        key: arena[0].key.clone(),
        kind: arena[0].kind,
        distance: 0,
        children,
    })
}

/// Hop distance from `from` to `to`, following the same expansion rule as
/// [`compute_tree`]. `Ok(None)` means `to` is not among `from`'s supertypes.
pub fn distance_between(
    catalog: &TypeCatalog,
    from: &TypeKey,
    to: &TypeKey,
) -> Result<Option<usize>> {
    let from_entry = catalog
        .entry(from)
        .ok_or_else(|| Error::unknown_type(from.clone(), "distance query"))?;
    if from == to {
        return Ok(Some(0));
    }

    let mut seen: HashSet<TypeKey> = HashSet::new();
    seen.insert(from.clone());
    let mut queue: VecDeque<(TypeKey, usize)> = VecDeque::new();
    for target in introduced_supertypes(catalog, from_entry) {
        seen.insert(target.clone());
        queue.push_back((target.clone(), 1));
    }

    while let Some((key, distance)) = queue.pop_front() {
        if &key == to {
            return Ok(Some(distance));
        }
        if let Some(entry) = catalog.entry(&key) {
            for target in introduced_supertypes(catalog, entry) {
                if !seen.contains(target) {
                    seen.insert(target.clone());
                    queue.push_back((target.clone(), distance + 1));
                }
            }
        }
    }
    Ok(None)
}
