use bevy_ecs::prelude::*;

use crate::rules::stability::stability;
use crate::simulation::stack::{StabilityReading, Stack};

pub fn stability_system(stack: Res<Stack>, mut reading: ResMut<StabilityReading>) {
    if !stack.is_changed() {
        return;
    }
    reading.0 = stability(stack.layers());
}
