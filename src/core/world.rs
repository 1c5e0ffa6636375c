use bevy_ecs::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::ecs::{create_schedule, create_world, AnalysisReport, CatalogResource, IgnoredIntents};
use crate::data::components::{Category, ComponentCatalog};
use crate::rules::compatibility::Verdict;
use crate::rules::outcome::Outcome;
use crate::simulation::stack::{Feedback, LayerId, StabilityReading, Stack};

/// Intent-driven commands fed into the ECS each tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SandboxIntent {
    Place { component_id: String },
    Remove { layer_id: LayerId },
    Clear,
    Analyze,
}

/// Resource storing the intents for the next tick.
#[derive(Resource, Default, Debug)]
pub struct IntentQueue(pub Vec<SandboxIntent>);

/// Data snapshot returned to the UI layer after each tick.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub layers: Vec<LayerSummary>,
    pub stability: f64,
    pub feedback: Option<Verdict>,
    /// Component ids from place intents that matched nothing in the catalog.
    pub ignored: Vec<String>,
    /// One outcome per analyze intent of the tick, in submission order.
    pub reports: Vec<Outcome>,
}

#[derive(Debug, Clone)]
pub struct LayerSummary {
    pub id: LayerId,
    pub component_id: String,
    pub name: String,
    pub category: Category,
    pub verdict: Verdict,
}

/// Wrapper around the ECS world and schedule.
pub struct Sandbox {
    world: World,
    schedule: Schedule,
}

impl Sandbox {
    /// Create a sandbox over `catalog`. Without a seed the outcome
    /// narratives are seeded from entropy.
    pub fn new(catalog: ComponentCatalog, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            world: create_world(catalog, rng),
            schedule: create_schedule(),
        }
    }

    /// Run a tick with the provided intents and return a snapshot for rendering.
    pub fn tick(&mut self, intents: Vec<SandboxIntent>) -> Snapshot {
        {
            let mut queue = self.world.resource_mut::<IntentQueue>();
            queue.0 = intents;
        }

        self.schedule.run(&mut self.world);
        Snapshot::capture(&self.world)
    }

    pub fn place(&mut self, component_id: &str) -> Snapshot {
        self.tick(vec![SandboxIntent::Place {
            component_id: component_id.to_string(),
        }])
    }

    pub fn remove(&mut self, layer_id: LayerId) -> Snapshot {
        self.tick(vec![SandboxIntent::Remove { layer_id }])
    }

    pub fn clear(&mut self) -> Snapshot {
        self.tick(vec![SandboxIntent::Clear])
    }

    /// Generate the analysis report for the current stack.
    pub fn analyze(&mut self) -> Outcome {
        self.tick(vec![SandboxIntent::Analyze])
            .reports
            .pop()
            .unwrap_or_else(Outcome::empty_dish)
    }

    /// Current state without running a tick.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.world)
    }

    pub fn catalog(&self) -> &ComponentCatalog {
        &self.world.resource::<CatalogResource>().0
    }
}

impl Snapshot {
    fn capture(world: &World) -> Self {
        let layers = world
            .resource::<Stack>()
            .layers()
            .iter()
            .map(|layer| LayerSummary {
                id: layer.id,
                component_id: layer.component.id.clone(),
                name: layer.component.name.clone(),
                category: layer.component.category(),
                verdict: layer.verdict.clone(),
            })
            .collect();

        Self {
            layers,
            stability: world.resource::<StabilityReading>().0,
            feedback: world.resource::<Feedback>().0.clone(),
            ignored: world.resource::<IgnoredIntents>().0.clone(),
            reports: world.resource::<AnalysisReport>().0.clone(),
        }
    }

    /// Report from the last analyze intent of the tick.
    pub fn report(&self) -> Option<&Outcome> {
        self.reports.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::components::{builtin_catalog, ids};
    use crate::rules::compatibility::CompatibilityStatus;

    fn sandbox() -> Sandbox {
        Sandbox::new(builtin_catalog(), Some(7))
    }

    #[test]
    fn new_sandbox_is_empty_and_neutral() {
        let snapshot = sandbox().snapshot();
        assert!(snapshot.layers.is_empty());
        assert_eq!(snapshot.stability, 0.5);
        assert!(snapshot.feedback.is_none());
        assert!(snapshot.reports.is_empty());
    }

    #[test]
    fn placement_records_frozen_verdict_and_feedback() {
        let mut sandbox = sandbox();
        sandbox.place(ids::POLYMER);
        let snapshot = sandbox.place(ids::ENDOTHELIAL);

        assert_eq!(snapshot.layers.len(), 2);
        assert_eq!(snapshot.layers[0].component_id, ids::POLYMER);
        assert_eq!(snapshot.layers[1].category, Category::Cells);
        let feedback = snapshot.feedback.unwrap();
        assert_eq!(feedback.status, CompatibilityStatus::Incompatible);
        assert_eq!(feedback, snapshot.layers[1].verdict);
    }

    #[test]
    fn unknown_component_is_ignored() {
        let mut sandbox = sandbox();
        sandbox.place(ids::COLLAGEN);
        let snapshot = sandbox.place("unobtainium");

        assert_eq!(snapshot.layers.len(), 1);
        assert_eq!(snapshot.ignored, vec!["unobtainium".to_string()]);
        // Feedback still belongs to the last successful insertion.
        assert_eq!(
            snapshot.feedback.map(|verdict| verdict.status),
            Some(CompatibilityStatus::Compatible)
        );

        let next = sandbox.place(ids::STEM);
        assert!(next.ignored.is_empty());
    }

    #[test]
    fn intents_apply_in_submission_order() {
        let mut sandbox = sandbox();
        let snapshot = sandbox.tick(vec![
            SandboxIntent::Place {
                component_id: ids::COLLAGEN.to_string(),
            },
            SandboxIntent::Place {
                component_id: ids::NEURON.to_string(),
            },
            SandboxIntent::Analyze,
        ]);

        let names: Vec<_> = snapshot.layers.iter().map(|l| l.component_id.as_str()).collect();
        assert_eq!(names, vec![ids::COLLAGEN, ids::NEURON]);
        assert_eq!(
            snapshot.report().map(|outcome| outcome.title.as_str()),
            Some("Neural Network")
        );
    }

    #[test]
    fn analyze_sees_the_stack_at_its_position() {
        let mut sandbox = sandbox();
        let snapshot = sandbox.tick(vec![
            SandboxIntent::Place {
                component_id: ids::HYDROXYAPATITE.to_string(),
            },
            SandboxIntent::Place {
                component_id: ids::OSTEOBLAST.to_string(),
            },
            SandboxIntent::Analyze,
            SandboxIntent::Clear,
        ]);
        assert!(snapshot.layers.is_empty());
        assert_eq!(
            snapshot.report().map(|outcome| outcome.title.as_str()),
            Some("Calcified Osteoid")
        );

        let snapshot = sandbox.tick(vec![
            SandboxIntent::Analyze,
            SandboxIntent::Place {
                component_id: ids::FIBROBLAST.to_string(),
            },
        ]);
        assert_eq!(snapshot.layers.len(), 1);
        assert_eq!(
            snapshot.report().map(|outcome| outcome.title.as_str()),
            Some("Empty Dish")
        );
    }

    #[test]
    fn every_analyze_in_a_tick_gets_a_report() {
        let mut sandbox = sandbox();
        let snapshot = sandbox.tick(vec![
            SandboxIntent::Place {
                component_id: ids::FIBROBLAST.to_string(),
            },
            SandboxIntent::Analyze,
            SandboxIntent::Place {
                component_id: ids::COLLAGEN.to_string(),
            },
            SandboxIntent::Analyze,
        ]);
        let titles: Vec<_> = snapshot.reports.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, vec!["Cell Pellet", "Undefined Aggregate"]);
    }

    #[test]
    fn removal_updates_stability_but_not_verdicts() {
        let mut sandbox = sandbox();
        sandbox.place(ids::POLYMER);
        let with_scaffold = sandbox.place(ids::ENDOTHELIAL);
        assert!(with_scaffold.stability > 0.0);

        let scaffold_id = with_scaffold.layers[0].id;
        let snapshot = sandbox.remove(scaffold_id);
        assert_eq!(snapshot.layers.len(), 1);
        assert_eq!(
            snapshot.layers[0].verdict.status,
            CompatibilityStatus::Incompatible
        );
        // Cells with no support collapse.
        assert_eq!(snapshot.stability, 0.0);
    }

    #[test]
    fn layer_ids_are_not_reused() {
        let mut sandbox = sandbox();
        let first = sandbox.place(ids::COLLAGEN).layers[0].id;
        sandbox.clear();
        let second = sandbox.place(ids::COLLAGEN).layers[0].id;
        assert_ne!(first, second);
    }

    #[test]
    fn clear_resets_stack_and_feedback() {
        let mut sandbox = sandbox();
        sandbox.place(ids::HYDROXYAPATITE);
        sandbox.place(ids::OSTEOBLAST);
        let snapshot = sandbox.clear();
        assert!(snapshot.layers.is_empty());
        assert!(snapshot.feedback.is_none());
        assert_eq!(snapshot.stability, 0.5);
    }

    #[test]
    fn analyze_reports_scenarios() {
        let mut sandbox = sandbox();
        assert_eq!(sandbox.analyze().title, "Empty Dish");

        sandbox.place(ids::HYDROXYAPATITE);
        sandbox.place(ids::OSTEOBLAST);
        assert_eq!(sandbox.analyze().title, "Calcified Osteoid");

        sandbox.clear();
        sandbox.place(ids::FIBROBLAST);
        assert_eq!(sandbox.analyze().title, "Cell Pellet");
    }

    #[test]
    fn report_only_lives_for_the_analyze_tick() {
        let mut sandbox = sandbox();
        sandbox.place(ids::COLLAGEN);
        sandbox.analyze();
        assert!(sandbox.snapshot().report().is_some());
        assert!(sandbox.place(ids::STEM).reports.is_empty());
    }

    #[test]
    fn same_seed_gives_same_stem_narrative() {
        let run = |seed| {
            let mut sandbox = Sandbox::new(builtin_catalog(), Some(seed));
            sandbox.place(ids::ALGINATE);
            sandbox.place(ids::STEM);
            sandbox.analyze()
        };
        let first = run(99);
        assert!(first.title.ends_with("Stem Cluster"));
        assert_eq!(first, run(99));
    }
}
