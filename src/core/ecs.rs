use bevy_ecs::prelude::*;
use bevy_ecs::schedule::SystemSet;
use rand::rngs::StdRng;

use crate::core::world::IntentQueue;
use crate::data::components::ComponentCatalog;
use crate::rules::outcome::Outcome;
use crate::simulation::stack::{Feedback, LayerIdAllocator, StabilityReading, Stack};
use crate::systems::clear_intents_system;
use crate::systems::intake::intake_system;
use crate::systems::stability::stability_system;

/// Canonical tick ordering for the sandbox.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum TickSet {
    Intake,
    Evaluation,
    Cleanup,
}

/// Components available for placement.
#[derive(Resource, Debug, Clone)]
pub struct CatalogResource(pub ComponentCatalog);

/// Random source for outcome narratives.
#[derive(Resource)]
pub struct OutcomeRng(pub StdRng);

/// Reports produced by analyze intents during the last tick, in order.
#[derive(Resource, Debug, Default)]
pub struct AnalysisReport(pub Vec<Outcome>);

/// Place intents from the last tick whose component id was not in the catalog.
#[derive(Resource, Debug, Default)]
pub struct IgnoredIntents(pub Vec<String>);

/// Build the ECS world with baseline resources.
pub fn create_world(catalog: ComponentCatalog, rng: StdRng) -> World {
    let mut world = World::new();
    world.insert_resource(IntentQueue::default());
    world.insert_resource(CatalogResource(catalog));
    world.insert_resource(Stack::default());
    world.insert_resource(LayerIdAllocator::default());
    world.insert_resource(Feedback::default());
    world.insert_resource(StabilityReading::default());
    world.insert_resource(OutcomeRng(rng));
    world.insert_resource(AnalysisReport::default());
    world.insert_resource(IgnoredIntents::default());
    world
}

/// Build the system schedule in the canonical order.
pub fn create_schedule() -> Schedule {
    let mut schedule = Schedule::default();

    schedule.configure_sets(
        (TickSet::Intake, TickSet::Evaluation, TickSet::Cleanup).chain(),
    );

    schedule.add_systems((
        intake_system.in_set(TickSet::Intake),
        stability_system.in_set(TickSet::Evaluation),
        clear_intents_system.in_set(TickSet::Cleanup),
    ));

    schedule
}
