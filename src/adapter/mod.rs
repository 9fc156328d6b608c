pub mod registry;
pub mod service;

pub use registry::{
    AdaptedValue, AdapterFn, AdapterRegistration, AdapterRegistry, AdapterRegistryBuilder,
    RegistryStats,
};
pub use service::AdapterService;
