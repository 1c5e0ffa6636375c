pub mod intake;
pub mod stability;

use bevy_ecs::prelude::*;

use crate::core::world::IntentQueue;

/// System: drains the intent queue once every set has seen it.
pub fn clear_intents_system(mut intents: ResMut<IntentQueue>) {
    intents.0.clear();
}
