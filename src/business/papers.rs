//! Exam papers and answer submission
//!
//! A randomized exam is shuffled with a seeded `StdRng`. The seed travels
//! with the paper so grading can rebuild exactly the order the student saw.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};
use crate::error::{ExamError, Result};
use crate::database::{queries, Exam, ExamPaper, Score, UserKey};
use crate::quiz::{self, Grade, QuestionSequence, QuizError};
use crate::utils::{generate_seed, generate_uuid};
use crate::MAX_PAPER_SEED;
use super::classroom::Classroom;

fn check_seed(seed: Option<u64>) -> Result<()> {
    match seed {
        Some(seed) if seed > MAX_PAPER_SEED => Err(ExamError::Validation(format!(
            "Seed {} exceeds {}",
            seed, MAX_PAPER_SEED
        ))),
        _ => Ok(()),
    }
}

impl Classroom {
    /// Questions of `exam` in the order a given seed produces
    ///
    /// Non-random exams ignore the seed and keep stored order.
    fn ordered_questions(&self, exam: &Exam, seed: Option<u64>) -> Result<QuestionSequence> {
        let stored = self.question_list(&exam.id)?;
        if !exam.random_question {
            return Ok(stored);
        }

        let seed = seed.ok_or(QuizError::NullInput("seed"))?;
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(quiz::randomize(&stored, &mut rng)?)
    }

    /// Build the paper handed out for an exam
    ///
    /// For a randomized exam a seed is drawn when none is given, and is
    /// recorded in the paper. Non-random papers carry no seed. Seeds above
    /// [`MAX_PAPER_SEED`] are rejected.
    pub fn exam_paper(&self, exam_id: &str, seed: Option<u64>) -> Result<ExamPaper> {
        check_seed(seed)?;
        let exam = self.require_exam(exam_id)?;
        let seed = if exam.random_question {
            Some(seed.unwrap_or_else(generate_seed))
        } else {
            None
        };

        let questions = self.ordered_questions(&exam, seed)?.to_records();
        info!("[Classroom] Prepared paper for exam {} with {} questions", exam.id, questions.len());

        Ok(ExamPaper { exam, seed, questions })
    }

    /// Grade an answer sheet and record the score
    ///
    /// `answers` are positional against the paper built with the same
    /// `seed`. After the exam ends submission is refused unless the exam
    /// allows late answers; late scores are flagged as expired.
    ///
    /// Every accepted submission adds a score row, so a student may answer
    /// the same exam more than once. [`Classroom::get_score`] returns the
    /// earliest of them; [`Classroom::list_scores`] returns them all.
    pub fn submit_answers(
        &self,
        user_id: &str,
        exam_id: &str,
        answers: &[f64],
        seed: Option<u64>,
        now: i64,
    ) -> Result<Grade> {
        let user = self.get_user(UserKey::Id, user_id)?
            .ok_or_else(|| ExamError::UserNotFound(user_id.to_string()))?;
        if !user.permission().answer {
            return Err(ExamError::PermissionDenied(format!("{} may not answer exams", user.username)));
        }

        check_seed(seed)?;
        let exam = self.require_exam(exam_id)?;
        let expired = exam.is_expired(now);
        if expired && !exam.allow_answer_when_expired {
            warn!("[Classroom] Late submission of {} to exam {} refused", user_id, exam_id);
            return Err(ExamError::ExamClosed(exam.name));
        }

        let questions = self.ordered_questions(&exam, seed)?;
        let grade = quiz::grade(&questions, answers)?;

        let score = Score {
            id: generate_uuid(),
            exam_id: exam.id.clone(),
            user_id: user.id.clone(),
            score: grade.score,
            expired,
        };
        queries::insert_score(self.score_conn()?, &score)?;

        info!(
            "[Classroom] {} scored {} ({}/{}) in exam {}",
            user.username, grade.score, grade.correct, grade.total, exam.id
        );
        Ok(grade)
    }
}
