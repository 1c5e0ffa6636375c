use crate::data::components::{CatalogError, Component, ComponentCatalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub cells: usize,
    pub scaffolds: usize,
    pub growth_factors: usize,
}

/// Source of catalog entries. Implementations are read-only.
pub trait ComponentRepository {
    fn stats(&self) -> Result<CatalogStats, CatalogError>;
    fn components(&self) -> Result<Vec<Component>, CatalogError>;
    fn component(&self, id: &str) -> Result<Option<Component>, CatalogError>;

    /// Load and validate everything into a catalog.
    fn load_catalog(&self) -> Result<ComponentCatalog, CatalogError> {
        ComponentCatalog::new(self.components()?)
    }
}
