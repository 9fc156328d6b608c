//! Explicit type table: classes, interfaces and their declared edges.
//!
//! The catalog replaces runtime reflection: every type the engine can reason
//! about is registered up front through [`TypeCatalogBuilder`], validated,
//! then frozen. Distance computation and adapter lookup read only this table.

use crate::core::errors::{Error, Result};
use crate::core::types::{TypeKey, TypeKind};
use im::{HashMap, HashSet, Vector};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One catalogued type with its directly-declared edges.
///
/// For a class, `interfaces` are the interfaces the class itself declares;
/// for an interface, they are the super-interfaces it directly extends.
#[derive(Debug, Clone)]
pub struct TypeEntry {
    key: TypeKey,
    kind: TypeKind,
    base: Option<TypeKey>,
    interfaces: Vector<TypeKey>,
}

impl TypeEntry {
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn base(&self) -> Option<&TypeKey> {
        self.base.as_ref()
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &TypeKey> {
        self.interfaces.iter()
    }
}

/// Counts describing a built catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub types: usize,
    pub classes: usize,
    pub interfaces: usize,
    pub declared_edges: usize,
}

/// Immutable table of types and declared inheritance edges.
///
/// Built once through [`TypeCatalog::builder`], read-only afterwards, so it
/// can be shared across threads behind an `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    entries: HashMap<TypeKey, TypeEntry>,
    order: Vector<TypeKey>,
    ancestors: HashMap<TypeKey, HashSet<TypeKey>>,
}

impl TypeCatalog {
    pub fn builder() -> TypeCatalogBuilder {
        TypeCatalogBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn entry(&self, key: &TypeKey) -> Option<&TypeEntry> {
        self.entries.get(key)
    }

    pub fn kind(&self, key: &TypeKey) -> Option<TypeKind> {
        self.entries.get(key).map(|e| e.kind)
    }

    pub fn base_of(&self, key: &TypeKey) -> Option<&TypeKey> {
        self.entries.get(key).and_then(|e| e.base.as_ref())
    }

    /// Directly-declared interface edges of `key` (empty for unknown keys).
    pub fn interfaces_of(&self, key: &TypeKey) -> impl Iterator<Item = &TypeKey> {
        self.entries
            .get(key)
            .into_iter()
            .flat_map(|e| e.interfaces.iter())
    }

    /// Registration order of catalogued keys.
    pub fn keys(&self) -> impl Iterator<Item = &TypeKey> {
        self.order.iter()
    }

    /// Every type reachable from `key` through declared edges, `key` excluded.
    pub fn ancestors_of(&self, key: &TypeKey) -> Option<&HashSet<TypeKey>> {
        self.ancestors.get(key)
    }

    /// Whether a value of runtime type `from` can stand in for `to`.
    ///
    /// True when the keys are equal or `to` is reachable from `from` through
    /// declared edges. Unknown keys are never assignable.
    pub fn is_assignable(&self, from: &TypeKey, to: &TypeKey) -> bool {
        if from == to {
            return self.entries.contains_key(from);
        }
        self.entries.contains_key(to)
            && self
                .ancestors
                .get(from)
                .is_some_and(|reachable| reachable.contains(to))
    }

    pub fn stats(&self) -> CatalogStats {
        let classes = self
            .entries
            .values()
            .filter(|e| e.kind == TypeKind::Class)
            .count();
        let declared_edges = self
            .entries
            .values()
            .map(|e| e.interfaces.len() + usize::from(e.base.is_some()))
            .sum();
        CatalogStats {
            types: self.entries.len(),
            classes,
            interfaces: self.entries.len() - classes,
            declared_edges,
        }
    }
}

#[derive(Debug, Clone)]
struct PendingType {
    key: TypeKey,
    kind: TypeKind,
    base: Option<TypeKey>,
    interfaces: Vec<TypeKey>,
}

/// Builder collecting type declarations; all validation happens in
/// [`TypeCatalogBuilder::build`] so a whole catalog's problems surface at once.
#[derive(Debug, Default)]
pub struct TypeCatalogBuilder {
    pending: Vec<PendingType>,
    violations: Vec<String>,
}

impl TypeCatalogBuilder {
    /// Declare a class with no base class.
    pub fn class(self, key: impl Into<TypeKey>) -> Self {
        self.push(key.into(), TypeKind::Class, None, Vec::new())
    }

    /// Declare a class extending `base`.
    pub fn class_extends(self, key: impl Into<TypeKey>, base: impl Into<TypeKey>) -> Self {
        self.push(key.into(), TypeKind::Class, Some(base.into()), Vec::new())
    }

    /// Add directly-declared interfaces to an already-declared type.
    pub fn implements<I, K>(mut self, key: impl Into<TypeKey>, interfaces: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<TypeKey>,
    {
        let key = key.into();
        let mut interfaces: Vec<TypeKey> = interfaces.into_iter().map(Into::into).collect();
        match self.pending.iter_mut().rfind(|p| p.key == key) {
            Some(entry) => entry.interfaces.append(&mut interfaces),
            None => self
                .violations
                .push(format!("`{key}` declares interfaces but is not registered")),
        }
        self
    }

    /// Declare an interface extending nothing.
    pub fn interface(self, key: impl Into<TypeKey>) -> Self {
        self.push(key.into(), TypeKind::Interface, None, Vec::new())
    }

    /// Declare an interface extending the given super-interfaces.
    pub fn interface_extends<I, K>(self, key: impl Into<TypeKey>, supers: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<TypeKey>,
    {
        let supers = supers.into_iter().map(Into::into).collect();
        self.push(key.into(), TypeKind::Interface, None, supers)
    }

    fn push(
        mut self,
        key: TypeKey,
        kind: TypeKind,
        base: Option<TypeKey>,
        interfaces: Vec<TypeKey>,
    ) -> Self {
        self.pending.push(PendingType {
            key,
            kind,
            base,
            interfaces,
        });
        self
    }

    /// Validate every declaration and freeze the catalog.
    ///
    /// All violations are reported in one error: duplicate keys, references
    /// to unregistered types, class/interface kind mismatches, and cycles
    /// through declared edges. A built catalog is guaranteed acyclic, which
    /// is what lets distance computation run without a termination guard.
    pub fn build(self) -> Result<TypeCatalog> {
        let mut violations = self.violations;
        let mut entries: HashMap<TypeKey, TypeEntry> = HashMap::new();
        let mut order: Vector<TypeKey> = Vector::new();

        for pending in &self.pending {
            if entries.contains_key(&pending.key) {
                violations.push(format!("duplicate type `{}`", pending.key));
                continue;
            }
            entries.insert(
                pending.key.clone(),
                TypeEntry {
                    key: pending.key.clone(),
                    kind: pending.kind,
                    base: pending.base.clone(),
                    interfaces: pending.interfaces.iter().cloned().collect(),
                },
            );
            order.push_back(pending.key.clone());
        }

        for entry in entries.values() {
            if let Some(base) = &entry.base {
                match entries.get(base).map(|b| b.kind) {
                    None => violations.push(format!(
                        "`{}` extends `{base}` which is not registered",
                        entry.key
                    )),
                    Some(TypeKind::Interface) => violations.push(format!(
                        "`{}` extends `{base}` which is an interface, not a class",
                        entry.key
                    )),
                    Some(TypeKind::Class) => {}
                }
            }
            for iface in &entry.interfaces {
                match entries.get(iface).map(|i| i.kind) {
                    None => violations.push(format!(
                        "`{}` declares `{iface}` which is not registered",
                        entry.key
                    )),
                    Some(TypeKind::Class) => violations.push(format!(
                        "`{}` declares `{iface}` as an interface, but it is a class",
                        entry.key
                    )),
                    Some(TypeKind::Interface) => {}
                }
            }
        }

        if violations.is_empty() {
            if let Some(cycle_member) = find_cycle(&entries, &order) {
                violations.push(format!(
                    "cyclic type declaration involving `{cycle_member}`"
                ));
            }
        }

        if !violations.is_empty() {
            return Err(Error::catalog(violations.join("; ")));
        }

        let ancestors = compute_ancestor_closure(&entries, &order);
        let catalog = TypeCatalog {
            entries,
            order,
            ancestors,
        };
        let stats = catalog.stats();
        log::debug!(
            "type catalog built: {} types ({} classes, {} interfaces, {} edges)",
            stats.types,
            stats.classes,
            stats.interfaces,
            stats.declared_edges
        );
        Ok(catalog)
    }
}

fn declared_edges<'a>(entry: &'a TypeEntry) -> impl Iterator<Item = &'a TypeKey> {
    entry.base.iter().chain(entry.interfaces.iter())
}

/// Iterative three-color cycle check over declared edges.
fn find_cycle(entries: &HashMap<TypeKey, TypeEntry>, order: &Vector<TypeKey>) -> Option<TypeKey> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        InProgress,
        Done,
    }

    let mut marks: std::collections::HashMap<&TypeKey, Mark> = std::collections::HashMap::new();

    for start in order {
        if marks.contains_key(start) {
            continue;
        }
        // Stack frames carry the edge iterator position by index.
        let mut stack: Vec<(&TypeKey, usize)> = vec![(start, 0)];
        marks.insert(start, Mark::InProgress);
        while let Some((key, edge_ix)) = stack.pop() {
            let entry = &entries[key];
            let next = declared_edges(entry).nth(edge_ix);
            match next {
                Some(target) => {
                    stack.push((key, edge_ix + 1));
                    match marks.get(target) {
                        Some(Mark::InProgress) => return Some(target.clone()),
                        Some(Mark::Done) => {}
                        None => {
                            marks.insert(target, Mark::InProgress);
                            stack.push((target, 0));
                        }
                    }
                }
                None => {
                    marks.insert(key, Mark::Done);
                }
            }
        }
    }
    None
}

/// Reachability closure per key (self excluded), computed once at build time.
fn compute_ancestor_closure(
    entries: &HashMap<TypeKey, TypeEntry>,
    order: &Vector<TypeKey>,
) -> HashMap<TypeKey, HashSet<TypeKey>> {
    let mut closure: HashMap<TypeKey, HashSet<TypeKey>> = HashMap::new();
    for key in order {
        let mut reachable: HashSet<TypeKey> = HashSet::new();
        let mut queue: VecDeque<&TypeKey> = VecDeque::new();
        queue.push_back(key);
        while let Some(current) = queue.pop_front() {
            for target in declared_edges(&entries[current]) {
                if !reachable.contains(target) {
                    reachable.insert(target.clone());
                    queue.push_back(target);
                }
            }
        }
        closure.insert(key.clone(), reachable);
    }
    closure
}
