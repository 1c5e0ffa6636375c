use std::fmt;
use std::sync::Arc;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::components::Component;
use crate::rules::compatibility::{evaluate, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub u32);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One placed component. The verdict is fixed at insertion time.
#[derive(Debug, Clone)]
pub struct Layer {
    pub id: LayerId,
    pub component: Arc<Component>,
    pub verdict: Verdict,
}

/// Hands out layer ids; ids are never reused within a session.
#[derive(Resource, Debug)]
pub struct LayerIdAllocator {
    next: u32,
}

impl Default for LayerIdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl LayerIdAllocator {
    pub fn alloc(&mut self) -> LayerId {
        let id = self.next;
        self.next += 1;
        LayerId(id)
    }
}

/// Ordered bottom-to-top stack of layers.
#[derive(Resource, Debug, Clone, Default)]
pub struct Stack {
    layers: Vec<Layer>,
}

impl Stack {
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn top(&self) -> Option<&Layer> {
        self.layers.last()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Evaluate `component` against the current top and append it.
    pub fn place(&mut self, id: LayerId, component: Arc<Component>) -> &Layer {
        let verdict = evaluate(self.top(), &component);
        self.layers.push(Layer {
            id,
            component,
            verdict,
        });
        &self.layers[self.layers.len() - 1]
    }

    /// Remove a layer by id. Remaining verdicts are left as they were.
    pub fn remove(&mut self, id: LayerId) -> Option<Layer> {
        let idx = self.layers.iter().position(|layer| layer.id == id)?;
        Some(self.layers.remove(idx))
    }

    pub fn clear(&mut self) {
        self.layers.clear();
    }
}

/// Verdict of the most recent placement.
#[derive(Resource, Debug, Clone, Default)]
pub struct Feedback(pub Option<Verdict>);

/// Stability of the stack as of the last tick.
#[derive(Resource, Debug, Clone, Copy)]
pub struct StabilityReading(pub f64);

impl Default for StabilityReading {
    fn default() -> Self {
        Self(crate::rules::stability::NEUTRAL_STABILITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::components::{builtin_catalog, ids};
    use crate::rules::compatibility::CompatibilityStatus;

    #[test]
    fn allocator_is_monotonic() {
        let mut alloc = LayerIdAllocator::default();
        assert_eq!(alloc.alloc(), LayerId(1));
        assert_eq!(alloc.alloc(), LayerId(2));
    }

    #[test]
    fn removal_keeps_frozen_verdicts() {
        let catalog = builtin_catalog();
        let mut alloc = LayerIdAllocator::default();
        let mut stack = Stack::default();

        let polymer = alloc.alloc();
        stack.place(polymer, catalog.get(ids::POLYMER).cloned().unwrap());
        let endothelial = alloc.alloc();
        let placed = stack.place(endothelial, catalog.get(ids::ENDOTHELIAL).cloned().unwrap());
        assert_eq!(placed.verdict.status, CompatibilityStatus::Incompatible);

        assert!(stack.remove(polymer).is_some());
        assert_eq!(stack.len(), 1);
        // Now sitting on the dish, but the verdict is not re-evaluated.
        assert_eq!(
            stack.top().map(|layer| layer.verdict.status),
            Some(CompatibilityStatus::Incompatible)
        );
    }

    #[test]
    fn removing_unknown_layer_is_a_no_op() {
        let mut stack = Stack::default();
        assert!(stack.remove(LayerId(42)).is_none());
        assert!(stack.is_empty());
    }

    #[test]
    fn placements_share_the_catalog_entry() {
        let catalog = builtin_catalog();
        let collagen = catalog.get(ids::COLLAGEN).cloned().unwrap();
        let mut stack = Stack::default();
        stack.place(LayerId(1), Arc::clone(&collagen));
        stack.place(LayerId(2), Arc::clone(&collagen));
        assert!(Arc::ptr_eq(&stack.layers()[0].component, &stack.layers()[1].component));
        assert_eq!(stack.layers()[1].verdict.message, "Layer thickening.");
    }
}
