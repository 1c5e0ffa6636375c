use thiserror::Error;

use bevy_utils::tracing::{debug, warn};

use crate::data::phrasebook::Phrasebook;
use crate::simulation::speech::SpeechRequest;

pub const NO_TRANSLATION_MESSAGE: &str = "Could not translate. 😔";
pub const OFFLINE_MESSAGE: &str = "Offline / Error 😔";

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("translation service unreachable: {0}")]
    Unreachable(String),
}

/// Fallback translation source used when the phrasebook has no entry.
pub trait Translator {
    /// `Ok(None)` when the service answered but had no translation.
    fn translate(&self, english: &str) -> Result<Option<String>, TranslateError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum TranslationOutcome {
    Translated {
        display: String,
        speech: Option<SpeechRequest>,
    },
    /// Shown in place of a translation; nothing is spoken.
    Fallback(&'static str),
}

impl TranslationOutcome {
    pub fn display(&self) -> &str {
        match self {
            TranslationOutcome::Translated { display, .. } => display,
            TranslationOutcome::Fallback(message) => message,
        }
    }
}

/// Phrasebook first, then `fallback`. Blank input yields `None`.
pub fn translate(
    phrasebook: &Phrasebook,
    fallback: Option<&dyn Translator>,
    input: &str,
) -> Option<TranslationOutcome> {
    let key = input.trim().to_lowercase();
    if key.is_empty() {
        return None;
    }

    if let Some(entry) = phrasebook.lookup(&key) {
        debug!(phrase = %key, "phrasebook hit");
        return Some(TranslationOutcome::Translated {
            display: entry.to_string(),
            speech: SpeechRequest::mandarin(entry.hanzi),
        });
    }

    let Some(fallback) = fallback else {
        return Some(TranslationOutcome::Fallback(NO_TRANSLATION_MESSAGE));
    };
    let outcome = match fallback.translate(&key) {
        Ok(Some(text)) if !text.trim().is_empty() => TranslationOutcome::Translated {
            speech: SpeechRequest::mandarin(&text),
            display: text,
        },
        Ok(_) => TranslationOutcome::Fallback(NO_TRANSLATION_MESSAGE),
        Err(err) => {
            warn!(error = %err, "translation fallback failed");
            TranslationOutcome::Fallback(OFFLINE_MESSAGE)
        }
    };
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(Option<&'static str>);

    impl Translator for Canned {
        fn translate(&self, _english: &str) -> Result<Option<String>, TranslateError> {
            Ok(self.0.map(str::to_string))
        }
    }

    struct Offline;

    impl Translator for Offline {
        fn translate(&self, _english: &str) -> Result<Option<String>, TranslateError> {
            Err(TranslateError::Unreachable("no network".to_string()))
        }
    }

    #[test]
    fn phrasebook_hit_speaks_only_the_characters() {
        let outcome = translate(&Phrasebook, Some(&Offline), "Hello").unwrap();
        assert_eq!(outcome.display(), "你好 (Nǐ hǎo)");
        match outcome {
            TranslationOutcome::Translated { speech, .. } => {
                assert_eq!(speech.map(|s| s.text), Some("你好".to_string()));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn blank_input_does_nothing() {
        assert!(translate(&Phrasebook, None, "   ").is_none());
    }

    #[test]
    fn falls_back_to_service() {
        let service = Canned(Some("火车"));
        let outcome = translate(&Phrasebook, Some(&service), "train").unwrap();
        assert_eq!(outcome.display(), "火车");
    }

    #[test]
    fn service_without_answer_and_offline_service() {
        let outcome = translate(&Phrasebook, Some(&Canned(None)), "train").unwrap();
        assert_eq!(outcome, TranslationOutcome::Fallback(NO_TRANSLATION_MESSAGE));

        let outcome = translate(&Phrasebook, Some(&Offline), "train").unwrap();
        assert_eq!(outcome, TranslationOutcome::Fallback(OFFLINE_MESSAGE));

        let outcome = translate(&Phrasebook, None, "train").unwrap();
        assert_eq!(outcome.display(), NO_TRANSLATION_MESSAGE);
    }
}
