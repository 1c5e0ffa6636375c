use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::components::{ids, Category};
use crate::simulation::stack::Layer;

const HARD_SCAFFOLDS: [&str; 2] = [ids::HYDROXYAPATITE, ids::POLYMER];
const SOFT_SCAFFOLDS: [&str; 2] = [ids::COLLAGEN, ids::ALGINATE];

pub const OUTCOME_ADJECTIVES: [&str; 6] = [
    "Promising",
    "Unstable",
    "Dense",
    "Fragile",
    "Unexpected",
    "Hybrid",
];

/// Narrative result of incubating the current stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub title: String,
    pub description: String,
}

impl Outcome {
    pub fn empty_dish() -> Self {
        Self::new("Empty Dish", "Nothing to report.")
    }

    fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    fn with_note(mut self, note: &str) -> Self {
        self.description.push(' ');
        self.description.push_str(note);
        self
    }
}

/// Category composition of a stack, reduced to the flags the narrative
/// rules key on.
#[derive(Debug, Clone, Default)]
pub struct StackProfile<'a> {
    pub cells: Vec<&'a str>,
    pub scaffolds: Vec<&'a str>,
    pub factors: Vec<&'a str>,
}

impl<'a> StackProfile<'a> {
    pub fn from_layers(layers: &'a [Layer]) -> Self {
        let mut profile = Self::default();
        for layer in layers {
            let id = layer.component.id.as_str();
            match layer.component.category() {
                Category::Cells => profile.cells.push(id),
                Category::Scaffolds => profile.scaffolds.push(id),
                Category::GrowthFactors => profile.factors.push(id),
            }
        }
        profile
    }

    fn has_cell(&self, id: &str) -> bool {
        self.cells.iter().any(|cell| *cell == id)
    }

    fn has_factor(&self, id: &str) -> bool {
        self.factors.iter().any(|factor| *factor == id)
    }

    pub fn is_hard(&self) -> bool {
        self.scaffolds
            .iter()
            .any(|id| HARD_SCAFFOLDS.iter().any(|hard| hard == id))
    }

    pub fn is_soft(&self) -> bool {
        self.scaffolds
            .iter()
            .any(|id| SOFT_SCAFFOLDS.iter().any(|soft| soft == id))
    }
}

/// Produce the analysis report for `layers`. `rng` is only drawn from when
/// the narrative needs a random adjective.
pub fn generate_outcome<R: Rng + ?Sized>(layers: &[Layer], rng: &mut R) -> Outcome {
    if layers.is_empty() {
        return Outcome::empty_dish();
    }

    let profile = StackProfile::from_layers(layers);
    let has_bone = profile.has_cell(ids::OSTEOBLAST);
    let has_nerve = profile.has_cell(ids::NEURON);
    let has_heart = profile.has_cell(ids::CARDIOMYOCYTE);
    let has_stem = profile.has_cell(ids::STEM);
    let is_hard = profile.is_hard();
    let is_soft = profile.is_soft();

    if has_bone && is_hard {
        let outcome = Outcome::new(
            "Calcified Osteoid",
            "Success! The osteoblasts have begun mineralizing the matrix. Early bone formation detected.",
        );
        if profile.has_factor(ids::BMP2) {
            return outcome.with_note("BMP-2 accelerated the process significantly.");
        }
        return outcome;
    }
    if has_bone && is_soft {
        return Outcome::new(
            "Fibrotic Clump",
            "The matrix was too soft for proper bone signalling. Cells have de-differentiated.",
        );
    }
    if has_nerve && is_soft {
        let outcome = Outcome::new(
            "Neural Network",
            "Neurites are extending through the soft hydrogel. Synaptic connections forming.",
        );
        if profile.has_factor(ids::NGF) {
            return outcome.with_note("NGF caused robust axon growth.");
        }
        return outcome;
    }
    if has_heart && is_soft {
        return Outcome::new(
            "Beating Tissue Patch",
            "Spontaneous contractions observed. The tissue is alive!",
        );
    }
    if has_stem && !profile.scaffolds.is_empty() {
        let adjective = OUTCOME_ADJECTIVES
            .choose(rng)
            .copied()
            .unwrap_or("Unexpected");
        return Outcome::new(
            format!("{} Stem Cluster", adjective),
            "The stem cells are differentiating based on local stiffness cues. Outcome uncertain but interesting.",
        );
    }
    if profile.scaffolds.is_empty() && !profile.cells.is_empty() {
        return Outcome::new(
            "Cell Pellet",
            "Without a scaffold, the cells formed a tight ball and central necrosis is likely.",
        );
    }
    if profile.cells.is_empty() && !profile.scaffolds.is_empty() {
        return Outcome::new(
            "Empty Scaffold",
            "A lonely piece of biomaterial floating in media.",
        );
    }

    Outcome::new(
        "Undefined Aggregate",
        "The cells are confused. No clear structure emerged.",
    )
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    use super::*;
    use crate::data::components::builtin_catalog;
    use crate::rules::compatibility::evaluate;
    use crate::simulation::stack::LayerId;

    /// Fails the test if the generator touches randomness.
    struct NoRandomness;

    impl RngCore for NoRandomness {
        fn next_u32(&mut self) -> u32 {
            panic!("randomness drawn")
        }

        fn next_u64(&mut self) -> u64 {
            panic!("randomness drawn")
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            panic!("randomness drawn")
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            panic!("randomness drawn")
        }
    }

    fn stack_of(component_ids: &[&str]) -> Vec<Layer> {
        let catalog = builtin_catalog();
        let mut layers: Vec<Layer> = Vec::new();
        for (idx, id) in component_ids.iter().enumerate() {
            let component = catalog.get(id).cloned().unwrap();
            let verdict = evaluate(layers.last(), &component);
            layers.push(Layer {
                id: LayerId(idx as u32 + 1),
                component,
                verdict,
            });
        }
        layers
    }

    fn title(component_ids: &[&str]) -> String {
        generate_outcome(&stack_of(component_ids), &mut NoRandomness).title
    }

    #[test]
    fn empty_dish_draws_nothing() {
        assert_eq!(generate_outcome(&[], &mut NoRandomness), Outcome::empty_dish());
    }

    #[test]
    fn bone_on_hard_scaffold_mineralizes() {
        let outcome = generate_outcome(
            &stack_of(&[ids::HYDROXYAPATITE, ids::OSTEOBLAST]),
            &mut NoRandomness,
        );
        assert_eq!(outcome.title, "Calcified Osteoid");
        assert!(outcome.description.contains("mineralizing"));
        assert!(!outcome.description.contains("BMP-2"));

        let boosted = generate_outcome(
            &stack_of(&[ids::HYDROXYAPATITE, ids::OSTEOBLAST, ids::BMP2]),
            &mut NoRandomness,
        );
        assert!(boosted.description.ends_with("BMP-2 accelerated the process significantly."));
    }

    #[test]
    fn nerve_on_soft_scaffold_grows() {
        let outcome =
            generate_outcome(&stack_of(&[ids::COLLAGEN, ids::NEURON]), &mut NoRandomness);
        assert_eq!(outcome.title, "Neural Network");
        assert!(!outcome.description.contains("NGF"));

        let boosted = generate_outcome(
            &stack_of(&[ids::COLLAGEN, ids::NEURON, ids::NGF]),
            &mut NoRandomness,
        );
        assert!(boosted.description.contains("NGF caused robust axon growth."));
    }

    #[test]
    fn narrative_rules_in_order() {
        assert_eq!(title(&[ids::ALGINATE, ids::OSTEOBLAST]), "Fibrotic Clump");
        assert_eq!(
            title(&[ids::POLYMER, ids::COLLAGEN, ids::OSTEOBLAST]),
            "Calcified Osteoid"
        );
        assert_eq!(title(&[ids::ALGINATE, ids::CARDIOMYOCYTE]), "Beating Tissue Patch");
        assert_eq!(title(&[ids::FIBROBLAST]), "Cell Pellet");
        assert_eq!(title(&[ids::NEURON, ids::VEGF]), "Cell Pellet");
        assert_eq!(title(&[ids::POLYMER]), "Empty Scaffold");
        assert_eq!(title(&[ids::POLYMER, ids::NEURON]), "Undefined Aggregate");
        assert_eq!(title(&[ids::VEGF]), "Undefined Aggregate");
    }

    #[test]
    fn stem_cluster_title_is_reproducible_under_seed() {
        let layers = stack_of(&[ids::COLLAGEN, ids::STEM]);
        let first = generate_outcome(&layers, &mut StdRng::seed_from_u64(7));
        let second = generate_outcome(&layers, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);

        let adjective = first.title.trim_end_matches(" Stem Cluster");
        assert!(OUTCOME_ADJECTIVES.contains(&adjective));
        assert!(first.description.contains("Outcome uncertain"));
    }

    #[test]
    fn stem_without_scaffold_is_a_pellet() {
        assert_eq!(title(&[ids::STEM, ids::STEM]), "Cell Pellet");
    }
}
