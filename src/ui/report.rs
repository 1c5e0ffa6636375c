use crate::core::world::Snapshot;
use crate::data::components::{Category, ComponentCatalog, ComponentKind};
use crate::rules::compatibility::{CompatibilityStatus, Verdict};
use crate::rules::outcome::Outcome;

const GAUGE_SWING_DEGREES: f64 = 50.0;
const CRITICAL_LOW: f64 = 0.2;
const CRITICAL_HIGH: f64 = 0.8;

/// Balance-beam reading of a stability value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityGauge {
    pub value: f64,
    /// Beam tilt; zero when balanced.
    pub tilt_degrees: f64,
    pub critical: bool,
}

impl StabilityGauge {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            tilt_degrees: (value - 0.5) * GAUGE_SWING_DEGREES,
            critical: value < CRITICAL_LOW || value > CRITICAL_HIGH,
        }
    }

    fn label(&self) -> &'static str {
        if self.value < CRITICAL_LOW {
            "collapsing"
        } else if self.value > CRITICAL_HIGH {
            "rigid"
        } else {
            "balanced"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTone {
    Ok,
    Alert,
}

impl From<CompatibilityStatus> for FeedbackTone {
    fn from(status: CompatibilityStatus) -> Self {
        match status {
            CompatibilityStatus::Incompatible => FeedbackTone::Alert,
            CompatibilityStatus::Compatible | CompatibilityStatus::Borderline => FeedbackTone::Ok,
        }
    }
}

/// Border drawn around a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerMarker {
    Plain,
    Dotted,
    Dashed,
}

impl LayerMarker {
    fn glyph(self) -> &'static str {
        match self {
            LayerMarker::Plain => " ",
            LayerMarker::Dotted => "?",
            LayerMarker::Dashed => "!",
        }
    }
}

impl From<CompatibilityStatus> for LayerMarker {
    fn from(status: CompatibilityStatus) -> Self {
        match status {
            CompatibilityStatus::Compatible => LayerMarker::Plain,
            CompatibilityStatus::Borderline => LayerMarker::Dotted,
            CompatibilityStatus::Incompatible => LayerMarker::Dashed,
        }
    }
}

pub fn render_catalog(catalog: &ComponentCatalog, category: Option<Category>) -> String {
    let mut output = String::new();
    let categories: Vec<Category> = match category {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };
    for category in categories {
        output.push_str(&format!("[{}]\n", category));
        for component in catalog.by_category(category) {
            let detail = match &component.kind {
                ComponentKind::Scaffold { stiffness, .. } => format!(" (stiffness {})", stiffness),
                _ => String::new(),
            };
            output.push_str(&format!(
                "  {:<16} {}{} - {}\n",
                component.id, component.name, detail, component.description
            ));
        }
    }
    output
}

pub fn render_feedback(verdict: &Verdict) -> String {
    let prefix = match FeedbackTone::from(verdict.status) {
        FeedbackTone::Ok => "ok",
        FeedbackTone::Alert => "ALERT",
    };
    format!("[{}] {} ({})", prefix, verdict.message, verdict.status)
}

pub fn render_stack(snapshot: &Snapshot) -> String {
    let mut output = String::new();
    output.push_str("=== Culture Dish ===\n");
    if snapshot.layers.is_empty() {
        output.push_str("  Drag components here...\n");
    }
    // Top of the stack first.
    for layer in snapshot.layers.iter().rev() {
        output.push_str(&format!(
            "  {}{:>4} {:<20} {}\n",
            LayerMarker::from(layer.verdict.status).glyph(),
            layer.id.to_string(),
            layer.name,
            layer.verdict.status
        ));
    }
    let gauge = StabilityGauge::new(snapshot.stability);
    output.push_str(&format!(
        "Stability: {:.2} ({}, tilt {:+.0}°){}\n",
        gauge.value,
        gauge.label(),
        gauge.tilt_degrees,
        if gauge.critical { " !" } else { "" }
    ));
    if let Some(feedback) = &snapshot.feedback {
        output.push_str(&format!("Feedback: {}\n", render_feedback(feedback)));
    }
    for id in &snapshot.ignored {
        output.push_str(&format!("Ignored unknown component: {}\n", id));
    }
    output
}

pub fn render_report(outcome: &Outcome) -> String {
    let mut output = String::new();
    output.push_str("=== Analysis Report ===\n");
    output.push_str(&format!("{}\n", outcome.title));
    output.push_str(&format!("{}\n", outcome.description));
    output
}
