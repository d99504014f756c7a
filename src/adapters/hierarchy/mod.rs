//! Hierarchy configuration sources.

mod static_provider;
mod yaml_provider;

pub use static_provider::StaticHierarchyProvider;
pub use yaml_provider::YamlHierarchyProvider;
