use serde::{Deserialize, Serialize};

pub const MANDARIN_LOCALE: &str = "zh-CN";
pub const LEARNER_RATE: f32 = 0.8;

/// Request handed to whatever speech engine the front-end has. Fire and
/// forget: nothing comes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    pub lang: String,
    pub rate: f32,
}

impl SpeechRequest {
    /// Mandarin at the slowed-down learner rate. Returns `None` for blank text.
    pub fn mandarin(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            lang: MANDARIN_LOCALE.to_string(),
            rate: LEARNER_RATE,
        })
    }
}

/// Receives speech requests. The REPL prints them; a browser build would
/// hand them to the platform synthesizer.
pub trait SpeechSink {
    fn speak(&mut self, request: &SpeechRequest);
}

/// Collects requests in memory.
#[derive(Debug, Default)]
pub struct SpeechLog(pub Vec<SpeechRequest>);

impl SpeechSink for SpeechLog {
    fn speak(&mut self, request: &SpeechRequest) {
        self.0.push(request.clone());
    }
}
