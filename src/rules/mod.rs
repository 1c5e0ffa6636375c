pub mod compatibility;
pub mod outcome;
pub mod stability;

pub use compatibility::{evaluate, evaluate_components, CompatibilityStatus, Verdict};
pub use outcome::{generate_outcome, Outcome, StackProfile, OUTCOME_ADJECTIVES};
pub use stability::{stability, stability_of, StructuralLoad, NEUTRAL_STABILITY};
