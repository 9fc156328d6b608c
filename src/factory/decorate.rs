//! Post-processing wrapper around a factory.

use crate::core::errors::Result;
use crate::core::types::Typed;
use crate::factory::{NodeDecorator, NodeFactory};
use std::sync::Arc;

/// Runs every applicable decorator, in registration order, over each node
/// the inner factory produces. Support and fallback status are the inner
/// factory's; when the inner factory produces nothing there is nothing to
/// decorate.
pub struct DecoratingFactory<N> {
    inner: Arc<dyn NodeFactory<N>>,
    decorators: Vec<Arc<dyn NodeDecorator<N>>>,
}

impl<N> DecoratingFactory<N> {
    pub fn new(inner: Arc<dyn NodeFactory<N>>, decorators: Vec<Arc<dyn NodeDecorator<N>>>) -> Self {
        Self { inner, decorators }
    }
}

impl<N> NodeFactory<N> for DecoratingFactory<N> {
    fn supports(&self, item: &dyn Typed) -> bool {
        self.inner.supports(item)
    }

    fn create(&self, parent: Option<&N>, item: &dyn Typed) -> Result<Option<N>> {
        let Some(mut node) = self.inner.create(parent, item)? else {
            return Ok(None);
        };
        for decorator in &self.decorators {
            if decorator.supports(&node) {
                node = decorator.decorate(node)?;
            }
        }
        Ok(Some(node))
    }

    fn is_fallback(&self) -> bool {
        self.inner.is_fallback()
    }
}
