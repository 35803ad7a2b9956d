//! Question operations
//!
//! Questions are stored next to their exam in the examination store.
//! `Classroom` is the [`QuestionSource`] the quiz core loads sequences from.

use tracing::info;
use crate::error::{ExamError, Result};
use crate::database::{queries, ExamKey, Question, QuestionKey};
use crate::quiz::{self, OperatorCode, QuestionRecord, QuestionSequence, QuestionSource, QuizError};
use crate::utils::generate_uuid;
use crate::DEFAULT_QUERY_LIMIT;
use super::classroom::Classroom;

fn validate_operands(question: &Question) -> Result<()> {
    if !question.num1.is_finite() || !question.num2.is_finite() {
        return Err(ExamError::Validation(format!(
            "Operands of question {} must be finite",
            question.id
        )));
    }
    if question.op == OperatorCode::Div && question.num2 == 0.0 {
        return Err(QuizError::DivisionByZero.into());
    }
    Ok(())
}

impl Classroom {
    fn validate_question(&self, question: &Question) -> Result<()> {
        validate_operands(question)?;
        if self.get_exam(ExamKey::Id, &question.exam_id)?.is_none() {
            return Err(ExamError::ExamNotFound(question.exam_id.clone()));
        }
        Ok(())
    }

    /// Create a question with a new ID from a raw operator code
    pub fn add_question(&self, exam_id: &str, num1: f64, op: i64, num2: f64) -> Result<Question> {
        let question = Question {
            id: generate_uuid(),
            exam_id: exam_id.to_string(),
            num1,
            op: OperatorCode::from_code(op)?,
            num2,
        };
        self.insert_question(&question)?;
        Ok(question)
    }

    /// Store a question as given
    pub fn insert_question(&self, question: &Question) -> Result<()> {
        self.validate_question(question)?;
        queries::insert_question(self.exam_conn()?, question)?;
        info!("[Classroom] Added question {} to exam {}", question.id, question.exam_id);
        Ok(())
    }

    /// Update a question
    pub fn edit_question(&self, question: &Question) -> Result<()> {
        self.validate_question(question)?;
        queries::update_question(self.exam_conn()?, question)?;
        info!("[Classroom] Updated question {}", question.id);
        Ok(())
    }

    /// Delete a question
    pub fn delete_question(&self, question_id: &str) -> Result<()> {
        queries::delete_question(self.exam_conn()?, question_id)?;
        info!("[Classroom] Deleted question {}", question_id);
        Ok(())
    }

    /// Get the first question whose `key` column equals `content`
    pub fn get_question(&self, key: QuestionKey, content: &str) -> Result<Option<Question>> {
        queries::get_question_by(self.exam_conn()?, key, content)
    }

    /// Like [`Classroom::get_question`] with the key given by column name
    pub fn find_question(&self, key: &str, content: &str) -> Result<Option<Question>> {
        self.get_question(key.parse()?, content)
    }

    /// List the questions of an exam in stored order
    pub fn list_questions(&self, exam_id: &str, limit: usize) -> Result<Vec<Question>> {
        queries::query_questions(self.exam_conn()?, exam_id, limit)
    }

    /// Load the questions of an exam as a sequence, in stored order
    pub fn question_list(&self, exam_id: &str) -> Result<QuestionSequence> {
        quiz::load_question_list(self, exam_id, DEFAULT_QUERY_LIMIT)
    }
}

impl QuestionSource for Classroom {
    type Error = ExamError;

    fn fetch_questions(&self, exam_id: &str, max_count: usize) -> Result<Vec<QuestionRecord>> {
        let questions = self.list_questions(exam_id, max_count)?;
        Ok(questions.iter().map(Question::record).collect())
    }
}
