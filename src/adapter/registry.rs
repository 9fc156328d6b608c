//! Adapter registration table.
//!
//! Each registration names a source type, a target type and an invocation
//! closure. The table is assembled through [`AdapterRegistryBuilder`],
//! validated against a [`TypeCatalog`] and frozen; selection and invocation
//! live in [`crate::adapter::service`].

use crate::core::errors::{Error, Result};
use crate::core::types::{TypeKey, Typed};
use crate::hierarchy::catalog::TypeCatalog;
use im::{HashSet, Vector};
use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Output of an adapter invocation, downcast by the caller.
pub type AdaptedValue = Box<dyn Any>;

/// Adapter invocation closure. Returning `Ok(None)` means the adapter
/// declined this particular value; errors abort the whole resolution.
pub type AdapterFn = dyn Fn(&dyn Typed) -> Result<Option<AdaptedValue>> + Send + Sync;

/// One (source, target, invoke) entry, tagged with its insertion index.
#[derive(Clone)]
pub struct AdapterRegistration {
    source: TypeKey,
    target: TypeKey,
    invoke: Arc<AdapterFn>,
    index: usize,
}

impl AdapterRegistration {
    pub fn source(&self) -> &TypeKey {
        &self.source
    }

    pub fn target(&self) -> &TypeKey {
        &self.target
    }

    /// Position in registration order; the final tie-breaker during selection.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn invoke(&self, value: &dyn Typed) -> Result<Option<AdaptedValue>> {
        (self.invoke)(value)
    }
}

impl fmt::Debug for AdapterRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistration")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

/// Counts describing a built registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub registrations: usize,
    pub distinct_sources: usize,
    pub distinct_targets: usize,
}

/// Immutable adapter table bound to the catalog it was validated against.
#[derive(Debug, Clone)]
pub struct AdapterRegistry {
    catalog: Arc<TypeCatalog>,
    registrations: Vector<AdapterRegistration>,
}

impl AdapterRegistry {
    pub fn builder() -> AdapterRegistryBuilder {
        AdapterRegistryBuilder::default()
    }

    pub fn catalog(&self) -> &Arc<TypeCatalog> {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AdapterRegistration> {
        self.registrations.get(index)
    }

    /// Registrations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &AdapterRegistration> {
        self.registrations.iter()
    }

    /// Registrations applicable to a value of type `runtime` requested as
    /// `required`: the value must be assignable to the registration's source
    /// and the registration's target assignable to the requested type.
    /// Insertion order is preserved; ranking happens in the service.
    pub fn candidates(&self, runtime: &TypeKey, required: &TypeKey) -> Vec<&AdapterRegistration> {
        self.registrations
            .iter()
            .filter(|reg| {
                self.catalog.is_assignable(runtime, &reg.source)
                    && self.catalog.is_assignable(&reg.target, required)
            })
            .collect()
    }

    pub fn stats(&self) -> RegistryStats {
        let sources: HashSet<&TypeKey> = self.registrations.iter().map(|r| &r.source).collect();
        let targets: HashSet<&TypeKey> = self.registrations.iter().map(|r| &r.target).collect();
        RegistryStats {
            registrations: self.registrations.len(),
            distinct_sources: sources.len(),
            distinct_targets: targets.len(),
        }
    }
}

/// Builder collecting registrations; validation happens in
/// [`AdapterRegistryBuilder::build`] against the supplied catalog.
#[derive(Default)]
pub struct AdapterRegistryBuilder {
    pending: Vec<(TypeKey, TypeKey, Arc<AdapterFn>)>,
}

impl AdapterRegistryBuilder {
    /// Register an adapter from `source` to `target`.
    pub fn register<F>(
        self,
        source: impl Into<TypeKey>,
        target: impl Into<TypeKey>,
        invoke: F,
    ) -> Self
    where
        F: Fn(&dyn Typed) -> Result<Option<AdaptedValue>> + Send + Sync + 'static,
    {
        self.register_arc(source, target, Arc::new(invoke))
    }

    /// Register a shared adapter closure, useful when one closure serves
    /// several (source, target) pairs.
    pub fn register_arc(
        mut self,
        source: impl Into<TypeKey>,
        target: impl Into<TypeKey>,
        invoke: Arc<AdapterFn>,
    ) -> Self {
        self.pending.push((source.into(), target.into(), invoke));
        self
    }

    /// Check every registration's keys against the catalog and freeze.
    ///
    /// Multiple registrations for the same (source, target) pair are allowed;
    /// insertion order decides between them at selection time.
    pub fn build(self, catalog: Arc<TypeCatalog>) -> Result<AdapterRegistry> {
        let mut violations: Vec<String> = Vec::new();
        for (source, target, _) in &self.pending {
            if !catalog.contains(source) {
                violations.push(format!("adapter source `{source}` is not catalogued"));
            }
            if !catalog.contains(target) {
                violations.push(format!("adapter target `{target}` is not catalogued"));
            }
        }
        if !violations.is_empty() {
            return Err(Error::registry(violations.join("; ")));
        }

        let registrations: Vector<AdapterRegistration> = self
            .pending
            .into_iter()
            .enumerate()
            .map(|(index, (source, target, invoke))| AdapterRegistration {
                source,
                target,
                invoke,
                index,
            })
            .collect();
        log::debug!("adapter registry built: {} registrations", registrations.len());
        Ok(AdapterRegistry {
            catalog,
            registrations,
        })
    }
}
