use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CATALOG_SCHEMA_VERSION: u32 = 1;

/// Ids the rule tables key on.
pub mod ids {
    pub const STEM: &str = "stem";
    pub const FIBROBLAST: &str = "fibroblast";
    pub const ENDOTHELIAL: &str = "endothelial";
    pub const CARDIOMYOCYTE: &str = "cardiomyocyte";
    pub const OSTEOBLAST: &str = "osteoblast";
    pub const NEURON: &str = "neuron";

    pub const COLLAGEN: &str = "collagen";
    pub const ALGINATE: &str = "alginate";
    pub const POLYMER: &str = "polymer";
    pub const HYDROXYAPATITE: &str = "hydroxyapatite";

    pub const VEGF: &str = "vegf";
    pub const BMP2: &str = "bmp2";
    pub const NGF: &str = "ngf";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "cells")]
    Cells,
    #[serde(rename = "scaffolds")]
    Scaffolds,
    #[serde(rename = "growth-factors")]
    GrowthFactors,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Cells,
        Category::Scaffolds,
        Category::GrowthFactors,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Cells => "cells",
            Category::Scaffolds => "scaffolds",
            Category::GrowthFactors => "growth-factors",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown category: {value}")]
pub struct ParseCategoryError {
    pub value: String,
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cells" => Ok(Category::Cells),
            "scaffolds" => Ok(Category::Scaffolds),
            "growth-factors" => Ok(Category::GrowthFactors),
            _ => Err(ParseCategoryError {
                value: s.to_string(),
            }),
        }
    }
}

/// Category-specific attributes. The `category` tag selects the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum ComponentKind {
    #[serde(rename = "cells")]
    Cell {
        #[serde(default)]
        shape: String,
        #[serde(default)]
        color: String,
    },
    #[serde(rename = "scaffolds")]
    Scaffold {
        stiffness: u32,
        #[serde(default)]
        pattern: String,
    },
    #[serde(rename = "growth-factors")]
    GrowthFactor {
        #[serde(default)]
        symbol: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub wiki: Option<String>,
    #[serde(flatten)]
    pub kind: ComponentKind,
}

impl Component {
    pub fn category(&self) -> Category {
        match self.kind {
            ComponentKind::Cell { .. } => Category::Cells,
            ComponentKind::Scaffold { .. } => Category::Scaffolds,
            ComponentKind::GrowthFactor { .. } => Category::GrowthFactors,
        }
    }

    /// Stiffness for scaffolds, `None` for everything else.
    pub fn stiffness(&self) -> Option<u32> {
        match self.kind {
            ComponentKind::Scaffold { stiffness, .. } => Some(stiffness),
            _ => None,
        }
    }

    fn cell(id: &str, name: &str, description: &str, shape: &str, color: &str, wiki: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            wiki: Some(wiki.to_string()),
            kind: ComponentKind::Cell {
                shape: shape.to_string(),
                color: color.to_string(),
            },
        }
    }

    fn scaffold(
        id: &str,
        name: &str,
        description: &str,
        pattern: &str,
        stiffness: u32,
        wiki: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            wiki: Some(wiki.to_string()),
            kind: ComponentKind::Scaffold {
                stiffness,
                pattern: pattern.to_string(),
            },
        }
    }

    fn growth_factor(id: &str, name: &str, description: &str, symbol: &str, wiki: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            wiki: Some(wiki.to_string()),
            kind: ComponentKind::GrowthFactor {
                symbol: symbol.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub schema_version: u32,
    pub components: Vec<Component>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("content database error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("{0}")]
    Validation(String),
}

/// Validated, read-only set of components. Entries are shared with the
/// layers that reference them.
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    components: Vec<Arc<Component>>,
}

impl ComponentCatalog {
    pub fn new(components: Vec<Component>) -> Result<Self, CatalogError> {
        validate_components(&components)?;
        Ok(Self {
            components: components.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Component>> {
        self.components.iter().find(|component| component.id == id)
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Arc<Component>> {
        self.components
            .iter()
            .filter(move |component| component.category() == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Component>> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

pub fn validate_components(components: &[Component]) -> Result<(), CatalogError> {
    let mut ids = HashSet::new();
    for component in components {
        if component.id.trim().is_empty() {
            return Err(CatalogError::Validation(
                "component id cannot be empty".to_string(),
            ));
        }
        if !ids.insert(component.id.as_str()) {
            return Err(CatalogError::Validation(format!(
                "duplicate component id {}",
                component.id
            )));
        }
        if component.name.trim().is_empty() {
            return Err(CatalogError::Validation(format!(
                "component {} missing name",
                component.id
            )));
        }
        if component.stiffness() == Some(0) {
            return Err(CatalogError::Validation(format!(
                "scaffold {} must have a positive stiffness",
                component.id
            )));
        }
    }
    Ok(())
}

pub fn load_component_catalog(path: impl AsRef<Path>) -> Result<ComponentCatalog, CatalogError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let file: CatalogFile = serde_json::from_str(&raw).map_err(|source| CatalogError::Json {
        path: path.display().to_string(),
        source,
    })?;
    if file.schema_version != CATALOG_SCHEMA_VERSION {
        return Err(CatalogError::Validation(format!(
            "{}: unsupported schema_version {} (expected {})",
            path.display(),
            file.schema_version,
            CATALOG_SCHEMA_VERSION
        )));
    }
    ComponentCatalog::new(file.components)
}

pub fn builtin_components() -> Vec<Component> {
    vec![
        Component::cell(
            ids::STEM,
            "Stem Cells (MSC)",
            "Multipotent stromal cells. Versatile.",
            "blob",
            "#3498db",
            "https://en.wikipedia.org/wiki/Mesenchymal_stem_cell",
        ),
        Component::cell(
            ids::FIBROBLAST,
            "Fibroblasts",
            "Synthesizes extracellular matrix.",
            "elongated",
            "#e67e22",
            "https://en.wikipedia.org/wiki/Fibroblast",
        ),
        Component::cell(
            ids::ENDOTHELIAL,
            "Endothelial Cells",
            "Lining for blood vessels.",
            "scribble",
            "#e74c3c",
            "https://en.wikipedia.org/wiki/Endothelium",
        ),
        Component::cell(
            ids::CARDIOMYOCYTE,
            "Cardiomyocytes",
            "Heart muscle cells.",
            "muscle",
            "#8e44ad",
            "https://en.wikipedia.org/wiki/Cardiomyocyte",
        ),
        Component::cell(
            ids::OSTEOBLAST,
            "Osteoblasts",
            "Bone-forming cells.",
            "angular",
            "#f1c40f",
            "https://en.wikipedia.org/wiki/Osteoblast",
        ),
        Component::cell(
            ids::NEURON,
            "Neurons",
            "Nerve cells.",
            "star",
            "#2ecc71",
            "https://en.wikipedia.org/wiki/Neuron",
        ),
        Component::scaffold(
            ids::COLLAGEN,
            "Collagen I",
            "Natural protein mesh.",
            "mesh",
            2,
            "https://en.wikipedia.org/wiki/Collagen",
        ),
        Component::scaffold(
            ids::ALGINATE,
            "Alginate Hydrogel",
            "Seaweed-derived gel.",
            "bubbles",
            3,
            "https://en.wikipedia.org/wiki/Alginic_acid",
        ),
        Component::scaffold(
            ids::POLYMER,
            "PLA (Rigid)",
            "Biodegradable thermoplastic.",
            "hatch",
            8,
            "https://en.wikipedia.org/wiki/Polylactic_acid",
        ),
        Component::scaffold(
            ids::HYDROXYAPATITE,
            "Hydroxyapatite",
            "Bone mineral.",
            "stones",
            10,
            "https://en.wikipedia.org/wiki/Hydroxyapatite",
        ),
        Component::growth_factor(
            ids::VEGF,
            "VEGF",
            "Angiogenesis factor.",
            "arrow",
            "https://en.wikipedia.org/wiki/Vascular_endothelial_growth_factor",
        ),
        Component::growth_factor(
            ids::BMP2,
            "BMP-2",
            "Bone inducer.",
            "starburst",
            "https://en.wikipedia.org/wiki/Bone_morphogenetic_protein_2",
        ),
        Component::growth_factor(
            ids::NGF,
            "NGF",
            "Nerve growth factor.",
            "lightning",
            "https://en.wikipedia.org/wiki/Nerve_growth_factor",
        ),
    ]
}

/// The catalog shipped with the binary.
pub fn builtin_catalog() -> ComponentCatalog {
    ComponentCatalog {
        components: builtin_components().into_iter().map(Arc::new).collect(),
    }
}
