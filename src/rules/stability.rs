use crate::data::components::{Component, ComponentKind};
use crate::simulation::stack::Layer;

/// Reading for an empty dish.
pub const NEUTRAL_STABILITY: f64 = 0.5;
const SCALE: f64 = 0.6;
const OFFSET: f64 = 0.1;

/// Aggregated scaffold rigidity against cell load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructuralLoad {
    pub support: u32,
    pub load: u32,
}

impl StructuralLoad {
    pub fn from_components<'a>(components: impl IntoIterator<Item = &'a Component>) -> Self {
        let mut totals = Self::default();
        for component in components {
            match component.kind {
                ComponentKind::Scaffold { stiffness, .. } => totals.support += stiffness,
                ComponentKind::Cell { .. } => totals.load += 1,
                ComponentKind::GrowthFactor { .. } => {}
            }
        }
        totals
    }

    pub fn is_collapsed(&self) -> bool {
        self.support == 0 && self.load > 0
    }

    pub fn ratio(&self) -> f64 {
        self.support as f64 / (self.load as f64 * 2.0 + 1.0)
    }
}

pub fn stability(layers: &[Layer]) -> f64 {
    if layers.is_empty() {
        return NEUTRAL_STABILITY;
    }
    stability_of(&StructuralLoad::from_components(
        layers.iter().map(|layer| layer.component.as_ref()),
    ))
}

pub fn stability_of(totals: &StructuralLoad) -> f64 {
    if totals.is_collapsed() {
        return 0.0;
    }
    (totals.ratio() * SCALE + OFFSET).clamp(0.0, 1.0)
}
