//! Composition of many factories into one.

use crate::core::errors::Result;
use crate::core::types::Typed;
use crate::factory::NodeFactory;
use std::sync::Arc;

/// Presents a list of factories as a single [`NodeFactory`].
///
/// Members are consulted in registration order, except that fallback
/// members always come after every regular member; the partition is stable,
/// so relative order within each group is preserved. The first member
/// supporting an item decides the outcome, even when that decision is
/// "no node".
pub struct AggregateFactory<N> {
    members: Vec<Arc<dyn NodeFactory<N>>>,
}

impl<N> AggregateFactory<N> {
    pub fn new(members: Vec<Arc<dyn NodeFactory<N>>>) -> Self {
        let (regular, fallback): (Vec<_>, Vec<_>) =
            members.into_iter().partition(|f| !f.is_fallback());
        let mut members = regular;
        members.extend(fallback);
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<N> NodeFactory<N> for AggregateFactory<N> {
    fn supports(&self, item: &dyn Typed) -> bool {
        self.members.iter().any(|f| f.supports(item))
    }

    fn create(&self, parent: Option<&N>, item: &dyn Typed) -> Result<Option<N>> {
        match self.members.iter().find(|f| f.supports(item)) {
            Some(factory) => factory.create(parent, item),
            None => {
                log::trace!("no factory supports `{}`", item.type_key());
                Ok(None)
            }
        }
    }
}
