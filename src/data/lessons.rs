use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LESSON_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonCatalog {
    pub schema_version: u32,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: u32,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub color: String,
    pub steps: Vec<LessonStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LessonStep {
    Vocab {
        character: String,
        pinyin: String,
        meaning: String,
        #[serde(default)]
        audio: String,
        #[serde(default)]
        tips: String,
    },
    Grammar {
        title: String,
        explanation: String,
        example: String,
    },
    Quiz {
        question: String,
        options: Vec<String>,
        correct: usize,
    },
}

impl LessonStep {
    pub fn is_quiz(&self) -> bool {
        matches!(self, LessonStep::Quiz { .. })
    }
}

#[derive(Debug, Error)]
pub enum LessonDataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("{0}")]
    Validation(String),
}

pub fn load_lesson_catalog(path: impl AsRef<Path>) -> Result<LessonCatalog, LessonDataError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| LessonDataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let catalog: LessonCatalog =
        serde_json::from_str(&raw).map_err(|source| LessonDataError::Json {
            path: path.display().to_string(),
            source,
        })?;
    if catalog.schema_version != LESSON_SCHEMA_VERSION {
        return Err(LessonDataError::Validation(format!(
            "{}: unsupported schema_version {} (expected {})",
            path.display(),
            catalog.schema_version,
            LESSON_SCHEMA_VERSION
        )));
    }
    catalog.validate()?;
    Ok(catalog)
}

impl LessonCatalog {
    pub fn get(&self, id: u32) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.id == id)
    }

    pub fn validate(&self) -> Result<(), LessonDataError> {
        let mut ids = HashSet::new();
        for lesson in &self.lessons {
            if !ids.insert(lesson.id) {
                return Err(LessonDataError::Validation(format!(
                    "duplicate lesson id {}",
                    lesson.id
                )));
            }
            if lesson.title.trim().is_empty() {
                return Err(LessonDataError::Validation(format!(
                    "lesson {} missing title",
                    lesson.id
                )));
            }
            if lesson.steps.is_empty() {
                return Err(LessonDataError::Validation(format!(
                    "lesson {} has no steps",
                    lesson.id
                )));
            }
            for (idx, step) in lesson.steps.iter().enumerate() {
                if let LessonStep::Quiz {
                    options, correct, ..
                } = step
                {
                    if options.len() < 2 {
                        return Err(LessonDataError::Validation(format!(
                            "lesson {} step {} needs at least two options",
                            lesson.id, idx
                        )));
                    }
                    if *correct >= options.len() {
                        return Err(LessonDataError::Validation(format!(
                            "lesson {} step {} answer index {} out of range",
                            lesson.id, idx, correct
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

fn vocab(character: &str, pinyin: &str, meaning: &str, audio: &str, tips: &str) -> LessonStep {
    LessonStep::Vocab {
        character: character.to_string(),
        pinyin: pinyin.to_string(),
        meaning: meaning.to_string(),
        audio: audio.to_string(),
        tips: tips.to_string(),
    }
}

fn grammar(title: &str, explanation: &str, example: &str) -> LessonStep {
    LessonStep::Grammar {
        title: title.to_string(),
        explanation: explanation.to_string(),
        example: example.to_string(),
    }
}

fn quiz(question: &str, options: &[&str], correct: usize) -> LessonStep {
    LessonStep::Quiz {
        question: question.to_string(),
        options: options.iter().map(|option| option.to_string()).collect(),
        correct,
    }
}

pub fn builtin_lessons() -> LessonCatalog {
    LessonCatalog {
        schema_version: LESSON_SCHEMA_VERSION,
        lessons: vec![
            Lesson {
                id: 1,
                title: "Greetings & Basics".to_string(),
                summary: "Learn to say Hello and introduce yourself.".to_string(),
                color: "#FFB7C5".to_string(),
                steps: vec![
                    vocab(
                        "你好",
                        "Nǐ hǎo",
                        "Hello",
                        "nihao",
                        "Literally 'You Good'. The most common greeting!",
                    ),
                    vocab("我是", "Wǒ shì", "I am", "woshi", "Use this to tell people your name."),
                    grammar(
                        "Subject + Verb",
                        "Chinese grammar is often SVO (Subject + Verb + Object).",
                        "我 (I) + 是 (am) + LingShī.",
                    ),
                    quiz("How do you say 'Hello'?", &["Nǐ hǎo", "Wǒ shì", "Zàijiàn"], 0),
                ],
            },
            Lesson {
                id: 2,
                title: "Numbers 1-10".to_string(),
                summary: "Count to ten in Mandarin.".to_string(),
                color: "#B5EAD7".to_string(),
                steps: vec![
                    vocab("一", "Yī", "One", "yi", "Just one horizontal line. Easy!"),
                    vocab("二", "Èr", "Two", "er", "Two lines. See the pattern?"),
                    vocab("三", "Sān", "Three", "san", "Three lines. Ancient logic!"),
                    quiz("Which character is 'Three'?", &["一", "二", "三"], 2),
                ],
            },
            Lesson {
                id: 3,
                title: "Family Members".to_string(),
                summary: "Mom, Dad, and siblings.".to_string(),
                color: "#C7CEEA".to_string(),
                steps: vec![
                    vocab("爸爸", "Bàba", "Dad", "baba", "Sounds like 'Papa'."),
                    vocab("妈妈", "Māma", "Mom", "mama", "First tone: High and flat."),
                    grammar(
                        "Introduction",
                        "To introduce family: This is my...",
                        "这是 (This is) + 我的 (my) + 爸爸 (dad).",
                    ),
                ],
            },
        ],
    }
}
