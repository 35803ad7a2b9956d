//! Answer sheet grading

use serde::{Deserialize, Serialize};
use super::arithmetic::{is_correct, round_to_cents};
use super::sequence::QuestionSequence;
use super::QuizError;

/// Full marks for an exam
pub const FULL_SCORE: f64 = 100.0;

/// Outcome of grading one answer sheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Number of correctly answered questions
    pub correct: usize,
    /// Number of questions in the exam
    pub total: usize,
    /// Score out of [`FULL_SCORE`], rounded to two decimals
    pub score: f64,
}

/// Grade `answers` against `questions`, position by position
///
/// Missing answers count as wrong and surplus answers are ignored. An exam
/// without questions scores 0. A question that cannot be evaluated (e.g. a
/// division by zero) fails the whole grading.
pub fn grade(questions: &QuestionSequence, answers: &[f64]) -> Result<Grade, QuizError> {
    let mut correct = 0;
    let mut total = 0;

    for (position, question) in questions.iter().enumerate() {
        let expected = question.answer()?;
        if let Some(&answer) = answers.get(position) {
            if is_correct(expected, answer) {
                correct += 1;
            }
        }
        total += 1;
    }

    let score = if total == 0 {
        0.0
    } else {
        round_to_cents(correct as f64 * FULL_SCORE / total as f64)
    };

    Ok(Grade { correct, total, score })
}
