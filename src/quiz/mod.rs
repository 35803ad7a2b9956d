//! Quiz core
//!
//! Storage-agnostic question handling: arithmetic evaluation, question
//! sequences and their randomization, and grading. Nothing in this module
//! performs I/O or logs; every failure is returned to the caller.

pub mod arithmetic;
pub mod sequence;
pub mod grading;

use thiserror::Error;

pub use arithmetic::{evaluate, evaluate_code, is_correct, round_to_cents, OperatorCode, ANSWER_TOLERANCE};
pub use sequence::{
    build_question_list, build_question_list_with, fisher_yates, free_question_list,
    free_question_list_with, randomize, randomize_with, HeapAllocator, NodeAllocator,
    QuestionNode, QuestionRecord, QuestionSequence,
};
pub use grading::{grade, Grade, FULL_SCORE};

/// Errors raised by the quiz core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// Operator code outside 0-3
    #[error("Invalid operator code: {0}")]
    InvalidOperator(i64),

    /// Division with a zero divisor
    #[error("Division by zero")]
    DivisionByZero,

    /// A sequence node could not be allocated
    #[error("Question node allocation failed")]
    AllocationFailed,

    /// A required argument was absent
    #[error("Missing required input: {0}")]
    NullInput(&'static str),
}

/// Capability to fetch the question records of an exam
///
/// Implemented by whatever stores the questions; the core only sees the
/// ordered records it returns.
pub trait QuestionSource {
    /// Error type of the backing store
    type Error: From<QuizError>;

    /// Fetch up to `max_count` question records of `exam_id`, in stored order
    fn fetch_questions(&self, exam_id: &str, max_count: usize) -> Result<Vec<QuestionRecord>, Self::Error>;
}

/// Fetch the questions of an exam and build them into a sequence
///
/// An empty `exam_id` is rejected with [`QuizError::NullInput`] before the
/// source is consulted.
pub fn load_question_list<S: QuestionSource + ?Sized>(
    source: &S,
    exam_id: &str,
    max_count: usize,
) -> Result<QuestionSequence, S::Error> {
    if exam_id.is_empty() {
        return Err(QuizError::NullInput("exam_id").into());
    }
    let records = source.fetch_questions(exam_id, max_count)?;
    Ok(build_question_list(&records)?)
}
