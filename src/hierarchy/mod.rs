pub mod catalog;
pub mod distance;
pub mod loader;

pub use catalog::{CatalogStats, TypeCatalog, TypeCatalogBuilder, TypeEntry};
pub use distance::{compute_tree, distance_between, InheritanceNode, NodeIter};
pub use loader::{load_catalog_from_path, CatalogSpec, TypeSpec};
