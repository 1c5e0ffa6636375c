use bevy_ecs::prelude::*;
use bevy_utils::tracing::{debug, info, warn};

use crate::core::ecs::{AnalysisReport, CatalogResource, IgnoredIntents, OutcomeRng};
use crate::core::world::{IntentQueue, SandboxIntent};
use crate::rules::outcome::generate_outcome;
use crate::simulation::stack::{Feedback, LayerIdAllocator, Stack};

/// System: applies every intent in submission order. An analyze intent
/// sees the stack as left by the intents before it.
#[allow(clippy::too_many_arguments)]
pub fn intake_system(
    intents: Res<IntentQueue>,
    catalog: Res<CatalogResource>,
    mut stack: ResMut<Stack>,
    mut ids: ResMut<LayerIdAllocator>,
    mut feedback: ResMut<Feedback>,
    mut ignored: ResMut<IgnoredIntents>,
    mut rng: ResMut<OutcomeRng>,
    mut report: ResMut<AnalysisReport>,
) {
    ignored.0.clear();
    report.0.clear();

    for intent in intents.0.iter() {
        match intent {
            SandboxIntent::Place { component_id } => {
                let Some(component) = catalog.0.get(component_id) else {
                    warn!(component_id = %component_id, "unknown component, placement ignored");
                    ignored.0.push(component_id.clone());
                    continue;
                };
                let id = ids.alloc();
                let layer = stack.place(id, component.clone());
                info!(
                    layer = %layer.id,
                    component_id = %layer.component.id,
                    status = %layer.verdict.status,
                    "placed layer"
                );
                feedback.0 = Some(layer.verdict.clone());
            }
            SandboxIntent::Remove { layer_id } => match stack.remove(*layer_id) {
                Some(layer) => info!(layer = %layer.id, component_id = %layer.component.id, "removed layer"),
                None => debug!(layer = %layer_id, "no such layer to remove"),
            },
            SandboxIntent::Clear => {
                stack.clear();
                feedback.0 = None;
                info!("cleared dish");
            }
            SandboxIntent::Analyze => {
                let outcome = generate_outcome(stack.layers(), &mut rng.0);
                info!(title = %outcome.title, layers = stack.len(), "analysis complete");
                report.0.push(outcome);
            }
        }
    }
}
