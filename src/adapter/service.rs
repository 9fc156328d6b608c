//! Adapter selection and invocation.
//!
//! [`AdapterService`] answers "give me this value as that type": it filters
//! the registry down to applicable registrations, ranks them by inheritance
//! distance and invokes the winner. Selections are cached per
//! (runtime type, requested type) pair, which is sound because both the
//! catalog and the registry are frozen at build time.

use crate::adapter::registry::{AdaptedValue, AdapterRegistration, AdapterRegistry};
use crate::core::errors::{Error, Result};
use crate::core::types::{TypeKey, Typed};
use crate::hierarchy::catalog::TypeCatalog;
use crate::hierarchy::distance::{compute_tree, distance_between};
use dashmap::DashMap;
use std::sync::Arc;

/// Resolves and invokes adapters against a frozen registry.
///
/// Selection ranks every applicable registration by how far the value's
/// runtime type is from the registration's source, then how far the
/// registration's target is from the requested type, then registration
/// order. Lower is better on all three, so the most specific adapter wins
/// and ties are deterministic.
pub struct AdapterService {
    catalog: Arc<TypeCatalog>,
    registry: Arc<AdapterRegistry>,
    cache: DashMap<(TypeKey, TypeKey), Option<usize>>,
}

impl AdapterService {
    pub fn new(registry: Arc<AdapterRegistry>) -> Self {
        Self {
            catalog: registry.catalog().clone(),
            registry,
            cache: DashMap::new(),
        }
    }

    pub fn catalog(&self) -> &Arc<TypeCatalog> {
        &self.catalog
    }

    pub fn registry(&self) -> &Arc<AdapterRegistry> {
        &self.registry
    }

    /// Pick the winning registration for a value of type `runtime` requested
    /// as `required`. `Ok(None)` means no registration applies.
    pub fn select(
        &self,
        runtime: &TypeKey,
        required: &TypeKey,
    ) -> Result<Option<&AdapterRegistration>> {
        if !self.catalog.contains(runtime) {
            return Err(Error::unknown_type(runtime.clone(), "adapter source value"));
        }
        if !self.catalog.contains(required) {
            return Err(Error::unknown_type(
                required.clone(),
                "requested adapter target",
            ));
        }

        let cache_key = (runtime.clone(), required.clone());
        if let Some(cached) = self.cache.get(&cache_key) {
            log::trace!("adapter selection cache hit for `{runtime}` -> `{required}`");
            return Ok((*cached).and_then(|index| self.registry.get(index)));
        }

        let selected = self.rank(runtime, required)?;
        self.cache.insert(cache_key, selected);
        Ok(selected.and_then(|index| self.registry.get(index)))
    }

    fn rank(&self, runtime: &TypeKey, required: &TypeKey) -> Result<Option<usize>> {
        let candidates = self.registry.candidates(runtime, required);
        if candidates.is_empty() {
            log::trace!("no adapter candidates for `{runtime}` -> `{required}`");
            return Ok(None);
        }

        let runtime_tree = compute_tree(&self.catalog, runtime)?;
        let mut best: Option<((usize, usize, usize), usize)> = None;
        for reg in candidates {
            let Some(source_distance) = runtime_tree.distance_to(reg.source()) else {
                continue;
            };
            let Some(target_distance) = distance_between(&self.catalog, reg.target(), required)?
            else {
                continue;
            };
            let rank = (source_distance, target_distance, reg.index());
            if best.is_none_or(|(current, _)| rank < current) {
                best = Some((rank, reg.index()));
            }
        }

        match best {
            Some(((source_distance, target_distance, _), index)) => {
                log::trace!(
                    "selected adapter #{index} for `{runtime}` -> `{required}` \
                     (source distance {source_distance}, target distance {target_distance})"
                );
                Ok(Some(index))
            }
            None => Ok(None),
        }
    }

    /// Adapt `value` to `target` via the closest registered adapter.
    ///
    /// `Ok(None)` covers both "no adapter applies" and "the winning adapter
    /// declined this value"; a declining winner ends the resolution rather
    /// than falling through to a farther candidate. Invocation failures are
    /// wrapped with the attempted (source, target) pair.
    pub fn adapt(&self, value: &dyn Typed, target: &TypeKey) -> Result<Option<AdaptedValue>> {
        let runtime = value.type_key();
        let Some(registration) = self.select(&runtime, target)? else {
            return Ok(None);
        };
        match registration.invoke(value) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                let err = Error::adapter_invocation(runtime, target.clone(), err);
                log::debug!("adapter invocation failed: {err}");
                Err(err)
            }
        }
    }

    /// Adapt `value` to `target` and downcast the result to `T`.
    pub fn adapt_as<T: 'static>(&self, value: &dyn Typed, target: &TypeKey) -> Result<Option<T>> {
        match self.adapt(value, target)? {
            Some(adapted) => match adapted.downcast::<T>() {
                Ok(typed) => Ok(Some(*typed)),
                Err(_) => Err(Error::output_type(
                    target.clone(),
                    std::any::type_name::<T>(),
                )),
            },
            None => Ok(None),
        }
    }

    /// (selections that found an adapter, total cached selections).
    pub fn cache_stats(&self) -> (usize, usize) {
        let resolved = self
            .cache
            .iter()
            .filter(|entry| entry.value().is_some())
            .count();
        (resolved, self.cache.len())
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
