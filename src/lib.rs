// Re-export core modules for use by the binary or other consumers
pub mod content;
pub mod core;
pub mod data;
pub mod rules;
pub mod simulation;
pub mod systems;
pub mod ui;

// Expose the sandbox wrapper and types needed for interaction
pub use crate::core::config::SandboxConfig;
pub use crate::core::world::{LayerSummary, Sandbox, SandboxIntent, Snapshot};
pub use crate::data::components::{Category, Component, ComponentCatalog};
pub use crate::rules::{evaluate, generate_outcome, stability, CompatibilityStatus, Outcome, Verdict};
