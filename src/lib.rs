// Export modules for library usage
pub mod adapter;
pub mod core;
pub mod factory;
pub mod hierarchy;
pub mod traverse;

// Re-export commonly used types at the crate root
pub use crate::adapter::{
    AdaptedValue, AdapterFn, AdapterRegistration, AdapterRegistry, AdapterService,
};
pub use crate::core::{Error, Result, ResultExt, TypeKey, TypeKind, Typed};
pub use crate::factory::{AggregateFactory, DecoratingFactory, NodeDecorator, NodeFactory};
pub use crate::hierarchy::{
    compute_tree, distance_between, load_catalog_from_path, CatalogSpec, InheritanceNode,
    TypeCatalog,
};
pub use crate::traverse::{traverse, traverse_all, Traversal, TraversalOrder};
