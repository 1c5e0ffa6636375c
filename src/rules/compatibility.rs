use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::components::{ids, Component, ComponentKind};
use crate::simulation::stack::Layer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityStatus {
    Compatible,
    Borderline,
    Incompatible,
}

impl CompatibilityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CompatibilityStatus::Compatible => "compatible",
            CompatibilityStatus::Borderline => "borderline",
            CompatibilityStatus::Incompatible => "incompatible",
        }
    }
}

impl fmt::Display for CompatibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of placing one component on top of another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: CompatibilityStatus,
    pub message: String,
}

impl Verdict {
    fn compatible(message: &str) -> Self {
        Self::new(CompatibilityStatus::Compatible, message)
    }

    fn borderline(message: &str) -> Self {
        Self::new(CompatibilityStatus::Borderline, message)
    }

    fn incompatible(message: &str) -> Self {
        Self::new(CompatibilityStatus::Incompatible, message)
    }

    fn new(status: CompatibilityStatus, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }
}

const BONE_MIN_STIFFNESS: u32 = 4;
const NERVE_MAX_STIFFNESS: u32 = 6;
const HEART_MAX_STIFFNESS: u32 = 5;

/// Judge `candidate` against the current top of the stack (`None` when the
/// stack is empty).
pub fn evaluate(previous: Option<&Layer>, candidate: &Component) -> Verdict {
    evaluate_components(previous.map(|layer| layer.component.as_ref()), candidate)
}

pub fn evaluate_components(previous: Option<&Component>, candidate: &Component) -> Verdict {
    let Some(previous) = previous else {
        return evaluate_on_dish(candidate);
    };

    match (&previous.kind, &candidate.kind) {
        (_, ComponentKind::GrowthFactor { .. }) => Verdict::compatible("Factor infused into layer."),
        (ComponentKind::Scaffold { .. }, ComponentKind::Scaffold { .. }) => {
            if previous.id == candidate.id {
                Verdict::compatible("Layer thickening.")
            } else {
                Verdict::borderline("Interface between different materials may be weak.")
            }
        }
        (ComponentKind::Scaffold { stiffness, .. }, ComponentKind::Cell { .. }) => {
            cell_on_scaffold(&previous.id, *stiffness, &candidate.id)
        }
        (ComponentKind::Cell { .. }, ComponentKind::Scaffold { .. }) => {
            Verdict::compatible("Cells encapsulated.")
        }
        (ComponentKind::Cell { .. }, ComponentKind::Cell { .. }) => {
            if previous.id == candidate.id {
                Verdict::compatible("Tissue density increasing.")
            } else {
                Verdict::borderline("Mixed cell population requires careful signaling.")
            }
        }
        (ComponentKind::GrowthFactor { .. }, _) => Verdict::compatible("Standard interaction."),
    }
}

fn evaluate_on_dish(candidate: &Component) -> Verdict {
    match candidate.kind {
        ComponentKind::Scaffold { .. } => {
            Verdict::compatible("Scaffold interaction with dish OK.")
        }
        ComponentKind::Cell { .. } => {
            Verdict::borderline("Cells need a scaffold to adhere properly.")
        }
        ComponentKind::GrowthFactor { .. } => {
            Verdict::incompatible("Growth factors wash away without a matrix.")
        }
    }
}

fn cell_on_scaffold(scaffold_id: &str, stiffness: u32, cell_id: &str) -> Verdict {
    match cell_id {
        ids::OSTEOBLAST if stiffness < BONE_MIN_STIFFNESS => {
            Verdict::borderline("Too soft for bone.")
        }
        ids::NEURON if stiffness > NERVE_MAX_STIFFNESS => {
            Verdict::incompatible("Too hard for nerves.")
        }
        ids::ENDOTHELIAL if scaffold_id == ids::POLYMER => {
            Verdict::incompatible("Surface too rigid for endothelial spreading.")
        }
        ids::CARDIOMYOCYTE if stiffness > HEART_MAX_STIFFNESS => {
            Verdict::borderline("Scaffold slightly too stiff for beating.")
        }
        _ => Verdict::compatible("Good adhesion."),
    }
}
