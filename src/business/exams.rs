//! Exam operations

use tracing::{debug, info};
use crate::error::{ExamError, Result};
use crate::database::{queries, Exam, ExamFilter, ExamKey};
use crate::utils::{format_unix, generate_uuid};
use crate::{DEFAULT_QUERY_LIMIT, EXAM_NAME_MAX_BYTES};
use super::classroom::Classroom;

fn validate_exam(exam: &Exam) -> Result<()> {
    if exam.name.is_empty() {
        return Err(ExamError::Validation("Exam name is empty".to_string()));
    }
    if exam.name.len() > EXAM_NAME_MAX_BYTES {
        return Err(ExamError::Validation(format!("Exam name {} is too long", exam.name)));
    }
    if exam.start_time >= exam.end_time {
        return Err(ExamError::Validation(format!(
            "Exam {} ends before it starts",
            exam.name
        )));
    }
    Ok(())
}

/// Exam window as UTC text for log lines
pub fn describe_window(exam: &Exam) -> String {
    let show = |ts: i64| format_unix(ts).unwrap_or_else(|| ts.to_string());
    format!("{} to {}", show(exam.start_time), show(exam.end_time))
}

/// Pick the exam to show at `now` from exams sorted by start time
///
/// The first running exam wins; otherwise the nearest upcoming one.
pub fn select_current_exam(exams: &[Exam], now: i64) -> Option<&Exam> {
    exams
        .iter()
        .find(|exam| exam.is_active(now))
        .or_else(|| exams.iter().find(|exam| exam.start_time > now))
}

impl Classroom {
    /// Create an exam with a new ID
    pub fn add_exam(
        &self,
        name: &str,
        start_time: i64,
        end_time: i64,
        allow_answer_when_expired: bool,
        random_question: bool,
    ) -> Result<Exam> {
        let exam = Exam {
            id: generate_uuid(),
            name: name.to_string(),
            start_time,
            end_time,
            allow_answer_when_expired,
            random_question,
        };
        self.insert_exam(&exam)?;
        Ok(exam)
    }

    /// Store an exam as given
    pub fn insert_exam(&self, exam: &Exam) -> Result<()> {
        validate_exam(exam)?;
        queries::insert_exam(self.exam_conn()?, exam)?;
        info!("[Classroom] Added exam {} ({}), {}", exam.name, exam.id, describe_window(exam));
        Ok(())
    }

    /// Update an exam
    pub fn edit_exam(&self, exam: &Exam) -> Result<()> {
        validate_exam(exam)?;
        queries::update_exam(self.exam_conn()?, exam)?;
        info!("[Classroom] Updated exam {}, {}", exam.id, describe_window(exam));
        Ok(())
    }

    /// Delete an exam together with its questions
    pub fn delete_exam(&self, exam_id: &str) -> Result<()> {
        let removed = queries::delete_exam(self.exam_conn()?, exam_id)?;
        info!("[Classroom] Deleted exam {} and {} questions", exam_id, removed);
        Ok(())
    }

    /// Get the first exam whose `key` column equals `content`
    pub fn get_exam(&self, key: ExamKey, content: &str) -> Result<Option<Exam>> {
        queries::get_exam_by(self.exam_conn()?, key, content)
    }

    /// Like [`Classroom::get_exam`] with the key given by column name
    pub fn find_exam(&self, key: &str, content: &str) -> Result<Option<Exam>> {
        self.get_exam(key.parse()?, content)
    }

    /// Get an exam by ID or fail with [`ExamError::ExamNotFound`]
    pub fn require_exam(&self, exam_id: &str) -> Result<Exam> {
        self.get_exam(ExamKey::Id, exam_id)?
            .ok_or_else(|| ExamError::ExamNotFound(exam_id.to_string()))
    }

    /// List exams matching `filter`, ordered by start time
    pub fn list_exams(&self, filter: &ExamFilter, limit: usize) -> Result<Vec<Exam>> {
        queries::query_exams(self.exam_conn()?, filter, limit)
    }

    /// The exam a student should see at `now`
    pub fn current_exam(&self, now: i64) -> Result<Option<Exam>> {
        let exams = self.list_exams(&ExamFilter::default(), DEFAULT_QUERY_LIMIT)?;
        let current = select_current_exam(&exams, now).cloned();
        debug!(
            "[Classroom] Current exam at {}: {:?}",
            now,
            current.as_ref().map(|exam| exam.id.as_str())
        );
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Classroom) {
        let temp_dir = TempDir::new().unwrap();
        let classroom = Classroom::initialize(temp_dir.path()).unwrap();
        (temp_dir, classroom)
    }

    fn exam(id: &str, start: i64, end: i64) -> Exam {
        Exam {
            id: id.to_string(),
            name: format!("Exam {}", id),
            start_time: start,
            end_time: end,
            allow_answer_when_expired: false,
            random_question: false,
        }
    }

    #[test]
    fn test_describe_window() {
        let january = exam("jan", 1735689600, 1735693200);
        assert_eq!(describe_window(&january), "2025-01-01 00:00:00 to 2025-01-01 01:00:00");

        let out_of_range = exam("far", 0, i64::MAX);
        assert_eq!(
            describe_window(&out_of_range),
            format!("1970-01-01 00:00:00 to {}", i64::MAX)
        );
    }

    #[test]
    fn test_select_current_exam() {
        let exams = vec![exam("a", 100, 200), exam("b", 150, 300), exam("c", 400, 500)];

        assert_eq!(select_current_exam(&exams, 160).unwrap().id, "a");
        assert_eq!(select_current_exam(&exams, 250).unwrap().id, "b");
        assert_eq!(select_current_exam(&exams, 320).unwrap().id, "c");
        assert_eq!(select_current_exam(&exams, 50).unwrap().id, "a");
        assert!(select_current_exam(&exams, 500).is_none());
        assert!(select_current_exam(&[], 0).is_none());
    }

    #[test]
    fn test_add_exam_validation() {
        let (_dir, classroom) = setup();
        assert!(matches!(classroom.add_exam("", 1, 2, false, false), Err(ExamError::Validation(_))));
        assert!(matches!(classroom.add_exam("Quiz", 2, 2, false, false), Err(ExamError::Validation(_))));
        assert!(matches!(
            classroom.add_exam(&"x".repeat(91), 1, 2, false, false),
            Err(ExamError::Validation(_))
        ));

        let created = classroom.add_exam(&"x".repeat(90), 1, 2, true, true).unwrap();
        assert_eq!(classroom.require_exam(&created.id).unwrap(), created);
    }

    #[test]
    fn test_find_exam() {
        let (_dir, classroom) = setup();
        let created = classroom.add_exam("January monthly", 10, 20, false, true).unwrap();
        assert_eq!(classroom.find_exam("name", "January monthly").unwrap(), Some(created));
        assert!(classroom.find_exam("id", "missing").unwrap().is_none());
        assert!(matches!(classroom.find_exam("end_time", "20"), Err(ExamError::InvalidQueryKey(_))));
    }

    #[test]
    fn test_edit_and_delete_exam() {
        let (_dir, classroom) = setup();
        let mut created = classroom.add_exam("Quiz", 10, 20, false, false).unwrap();

        created.end_time = 30;
        classroom.edit_exam(&created).unwrap();
        assert_eq!(classroom.require_exam(&created.id).unwrap().end_time, 30);

        classroom.delete_exam(&created.id).unwrap();
        assert!(matches!(classroom.require_exam(&created.id), Err(ExamError::ExamNotFound(_))));
        assert!(matches!(classroom.edit_exam(&created), Err(ExamError::ExamNotFound(_))));
    }

    #[test]
    fn test_current_exam_from_store() {
        let (_dir, classroom) = setup();
        assert!(classroom.current_exam(100).unwrap().is_none());

        classroom.insert_exam(&exam("later", 400, 500)).unwrap();
        classroom.insert_exam(&exam("now", 100, 200)).unwrap();

        assert_eq!(classroom.current_exam(150).unwrap().unwrap().id, "now");
        assert_eq!(classroom.current_exam(250).unwrap().unwrap().id, "later");
        assert!(classroom.current_exam(600).unwrap().is_none());
    }
}
