use thiserror::Error;

use crate::data::lessons::{Lesson, LessonStep};

pub const COMPLETION_XP: u32 = 50;
pub const CORRECT_ANSWER_MESSAGE: &str = "Perfect! 🌟";
pub const WRONG_ANSWER_MESSAGE: &str = "Not quite, try again! 💗";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizVerdict {
    Correct,
    Incorrect,
}

impl QuizVerdict {
    pub fn message(self) -> &'static str {
        match self {
            QuizVerdict::Correct => CORRECT_ANSWER_MESSAGE,
            QuizVerdict::Incorrect => WRONG_ANSWER_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LessonError {
    /// The current step is a quiz and has to be answered instead.
    #[error("answer the quiz to continue")]
    AnswerRequired,
    /// `answer` was called on a step that is not a quiz.
    #[error("this step is not a quiz")]
    NotAQuiz,
    #[error("lesson already complete")]
    Completed,
}

/// Walks one lesson step by step.
#[derive(Debug, Clone)]
pub struct LessonSession {
    lesson: Lesson,
    step: usize,
}

impl LessonSession {
    pub fn start(lesson: Lesson) -> Self {
        Self { lesson, step: 0 }
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn step_index(&self) -> usize {
        self.step
    }

    /// The step on screen, or `None` once every step has been passed.
    pub fn current(&self) -> Option<&LessonStep> {
        self.lesson.steps.get(self.step)
    }

    pub fn is_complete(&self) -> bool {
        self.step >= self.lesson.steps.len()
    }

    /// Fraction of the progress bar filled, counting the current step.
    pub fn progress(&self) -> f64 {
        let total = self.lesson.steps.len();
        if total == 0 {
            return 1.0;
        }
        ((self.step + 1) as f64 / total as f64).min(1.0)
    }

    pub fn advance(&mut self) -> Result<(), LessonError> {
        let is_quiz = match self.current() {
            None => return Err(LessonError::Completed),
            Some(step) => step.is_quiz(),
        };
        if is_quiz {
            return Err(LessonError::AnswerRequired);
        }
        self.step += 1;
        Ok(())
    }

    /// Check a quiz answer; a correct answer moves on to the next step.
    pub fn answer(&mut self, selected: usize) -> Result<QuizVerdict, LessonError> {
        let correct = match self.current() {
            None => return Err(LessonError::Completed),
            Some(LessonStep::Quiz { correct, .. }) => *correct,
            Some(_) => return Err(LessonError::NotAQuiz),
        };
        if selected == correct {
            self.step += 1;
            Ok(QuizVerdict::Correct)
        } else {
            Ok(QuizVerdict::Incorrect)
        }
    }

    pub fn reward_xp(&self) -> u32 {
        if self.is_complete() {
            COMPLETION_XP
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::lessons::builtin_lessons;

    fn session(id: u32) -> LessonSession {
        LessonSession::start(builtin_lessons().get(id).cloned().unwrap())
    }

    #[test]
    fn walks_through_greetings() {
        let mut lesson = session(1);
        assert_eq!(lesson.progress(), 0.25);
        lesson.advance().unwrap();
        lesson.advance().unwrap();
        lesson.advance().unwrap();

        assert_eq!(lesson.advance(), Err(LessonError::AnswerRequired));
        assert_eq!(lesson.answer(2), Ok(QuizVerdict::Incorrect));
        assert_eq!(lesson.step_index(), 3);
        assert_eq!(lesson.answer(0), Ok(QuizVerdict::Correct));

        assert!(lesson.is_complete());
        assert!(lesson.current().is_none());
        assert_eq!(lesson.reward_xp(), COMPLETION_XP);
        assert_eq!(lesson.advance(), Err(LessonError::Completed));
    }

    #[test]
    fn answering_a_vocab_step_is_rejected() {
        let mut lesson = session(2);
        assert_eq!(lesson.answer(0), Err(LessonError::NotAQuiz));
        assert_eq!(lesson.reward_xp(), 0);
    }

    #[test]
    fn lesson_without_quiz_completes_by_advancing() {
        let mut lesson = session(3);
        while !lesson.is_complete() {
            lesson.advance().unwrap();
        }
        assert_eq!(lesson.progress(), 1.0);
    }

    #[test]
    fn verdict_messages() {
        assert_eq!(QuizVerdict::Correct.message(), "Perfect! 🌟");
        assert_eq!(QuizVerdict::Incorrect.message(), "Not quite, try again! 💗");
    }
}
