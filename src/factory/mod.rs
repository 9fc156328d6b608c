//! Node construction pipeline.
//!
//! Hierarchical views are built by factories: each [`NodeFactory`] knows
//! which model values it can represent and how to build a node for them
//! under an already-built parent. [`AggregateFactory`] composes many
//! factories into one, [`DecoratingFactory`] post-processes whatever its
//! inner factory produces.

pub mod aggregate;
pub mod decorate;

pub use aggregate::AggregateFactory;
pub use decorate::DecoratingFactory;

use crate::core::errors::Result;
use crate::core::types::Typed;

/// Builds nodes of type `N` from model values.
pub trait NodeFactory<N>: Send + Sync {
    /// Whether this factory can represent `item` at all.
    fn supports(&self, item: &dyn Typed) -> bool;

    /// Build a node for `item` under `parent`.
    ///
    /// A factory may support an item and still return `Ok(None)`; when it is
    /// the selected factory, that decision stands and no other factory is
    /// consulted.
    fn create(&self, parent: Option<&N>, item: &dyn Typed) -> Result<Option<N>>;

    /// Fallback factories are consulted only when no regular factory
    /// supports an item, regardless of registration order.
    fn is_fallback(&self) -> bool {
        false
    }
}

/// Post-processes nodes produced by a [`NodeFactory`].
pub trait NodeDecorator<N>: Send + Sync {
    /// Whether this decorator applies to `node`.
    fn supports(&self, node: &N) -> bool;

    /// Transform `node`. Failures abort the creation that produced it.
    fn decorate(&self, node: N) -> Result<N>;
}
