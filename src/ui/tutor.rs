use crate::data::lessons::{LessonCatalog, LessonStep};
use crate::simulation::lesson::LessonSession;

const PROGRESS_WIDTH: usize = 20;

pub fn render_lessons(catalog: &LessonCatalog) -> String {
    let mut output = String::new();
    for lesson in &catalog.lessons {
        output.push_str(&format!(
            "  {:>2}. {} - {} ({} steps)\n",
            lesson.id,
            lesson.title,
            lesson.summary,
            lesson.steps.len()
        ));
    }
    output
}

pub fn render_step(step: &LessonStep) -> String {
    match step {
        LessonStep::Vocab {
            character,
            pinyin,
            meaning,
            tips,
            ..
        } => {
            let mut output = format!("{}  [{}]\n{}\n", character, pinyin, meaning);
            if !tips.is_empty() {
                output.push_str(&format!("Tip: {}\n", tips));
            }
            output
        }
        LessonStep::Grammar {
            title,
            explanation,
            example,
        } => format!("{}\n{}\nExample: {}\n", title, explanation, example),
        LessonStep::Quiz {
            question, options, ..
        } => {
            let mut output = format!("{}\n", question);
            for (index, option) in options.iter().enumerate() {
                output.push_str(&format!("  {}) {}\n", index, option));
            }
            output
        }
    }
}

/// Progress bar followed by the current step, or the completion banner.
pub fn render_session(session: &LessonSession) -> String {
    let lesson = session.lesson();
    let Some(step) = session.current() else {
        return format!(
            "Lesson Complete! {} finished, +{} XP\n",
            lesson.title,
            session.reward_xp()
        );
    };

    let filled = (session.progress() * PROGRESS_WIDTH as f64).round() as usize;
    let mut output = format!(
        "{} [{}{}] {}/{}\n",
        lesson.title,
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH.saturating_sub(filled)),
        session.step_index() + 1,
        lesson.steps.len()
    );
    output.push_str(&render_step(step));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::lessons::builtin_lessons;

    #[test]
    fn lists_builtin_lessons() {
        let text = render_lessons(&builtin_lessons());
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn quiz_options_are_numbered_from_zero() {
        let step = LessonStep::Quiz {
            question: "What does 你好 mean?".to_string(),
            options: vec!["Goodbye".to_string(), "Hello".to_string()],
            correct: 1,
        };
        let text = render_step(&step);
        assert!(text.contains("0) Goodbye"));
        assert!(text.contains("1) Hello"));
    }

    #[test]
    fn completed_session_shows_reward() {
        let catalog = builtin_lessons();
        let mut session = LessonSession::start(catalog.lessons[0].clone());
        while let Some(step) = session.current().cloned() {
            match step {
                LessonStep::Quiz { correct, .. } => {
                    session.answer(correct).unwrap();
                }
                _ => session.advance().unwrap(),
            }
        }
        assert!(render_session(&session).contains("+50 XP"));
    }
}
