//! Integration tests for examcore
//!
//! Each test works on a throwaway classroom folder.

use examcore::database::{ExamFilter, ScoreFilter, UserFilter};
use examcore::quiz::{self, grade};
use examcore::{Classroom, ExamError, ExamPaper, OperatorCode, QuestionRecord, Role};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

/// Questions of the sample monthly exam
const SAMPLE_QUESTIONS: [(f64, i64, f64); 5] = [
    (23.4, 3, 18.9),
    (56.4, 1, 70.0),
    (85.8, 0, 15.8),
    (52.9, 2, 58.0),
    (27.1, 1, 36.2),
];

const START: i64 = 1_735_689_600;
const END: i64 = START + 3600;

fn setup_classroom() -> (Classroom, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let classroom = Classroom::initialize(temp_dir.path()).unwrap();
    (classroom, temp_dir)
}

fn answers_for(paper: &ExamPaper) -> Vec<f64> {
    paper.questions.iter().map(|q| q.answer().unwrap()).collect()
}

#[test]
fn test_full_exam_flow() {
    let (classroom, _temp_dir) = setup_classroom();

    let teacher = classroom.register_teacher("Li Hua", 1001, "lihua", "chalk").unwrap();
    let student = classroom
        .add_student(&teacher.id, "Zhou Jing", "Data Science", 3083067581, "zhoujing", "pencil")
        .unwrap();

    let logged_in = classroom.login("zhoujing", "pencil").unwrap();
    assert_eq!(logged_in.id, student.id);
    assert!(logged_in.permission().answer);

    let exam = classroom.add_exam("January monthly", START, END, false, true).unwrap();
    for (num1, op, num2) in SAMPLE_QUESTIONS {
        classroom.add_question(&exam.id, num1, op, num2).unwrap();
    }

    assert_eq!(classroom.current_exam(START + 60).unwrap().unwrap().id, exam.id);

    let paper = classroom.exam_paper(&exam.id, None).unwrap();
    let seed = paper.seed.unwrap();
    assert_eq!(paper.questions.len(), 5);

    // The paper survives a JSON round trip to the front end
    let paper = ExamPaper::from_json(&paper.to_json().unwrap()).unwrap();

    let mut answers = answers_for(&paper);
    answers[4] += 1.0;
    let result = classroom
        .submit_answers(&student.id, &exam.id, &answers, Some(seed), START + 600)
        .unwrap();
    assert_eq!(result.correct, 4);
    assert_eq!(result.score, 80.0);

    let recorded = classroom.get_score(&exam.id, &student.id).unwrap().unwrap();
    assert_eq!(recorded.score, 80.0);
    assert!(!recorded.expired);

    let sheet = ScoreFilter { exam_id: Some(exam.id.clone()), ..ScoreFilter::default() };
    assert_eq!(classroom.list_scores(&sheet, 100).unwrap().len(), 1);
}

#[test]
fn test_reopen_keeps_data() {
    let temp_dir = TempDir::new().unwrap();
    let teacher_id = {
        let mut classroom = Classroom::initialize(temp_dir.path()).unwrap();
        let teacher = classroom.register_teacher("Li Hua", 1001, "lihua", "chalk").unwrap();
        classroom.close();
        teacher.id
    };

    let classroom = Classroom::open(temp_dir.path()).unwrap();
    let teacher = classroom.login("lihua", "chalk").unwrap();
    assert_eq!(teacher.id, teacher_id);
    assert_eq!(teacher.role, Role::Teacher);
}

#[test]
fn test_open_missing_classroom() {
    let temp_dir = TempDir::new().unwrap();
    assert!(matches!(
        Classroom::open(temp_dir.path()),
        Err(ExamError::DatabaseError(_))
    ));
}

#[test]
fn test_paper_order_matches_core_randomize() {
    let (classroom, _temp_dir) = setup_classroom();
    let exam = classroom.add_exam("Shuffled", START, END, false, true).unwrap();
    for (num1, op, num2) in SAMPLE_QUESTIONS {
        classroom.add_question(&exam.id, num1, op, num2).unwrap();
    }

    let stored = classroom.question_list(&exam.id).unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    let shuffled = quiz::randomize(&stored, &mut rng).unwrap();

    let paper = classroom.exam_paper(&exam.id, Some(99)).unwrap();
    assert_eq!(paper.questions, shuffled.to_records());

    // Input sequence is untouched by shuffling
    assert_eq!(stored.to_records()[0], QuestionRecord::new(23.4, OperatorCode::Div, 18.9));
    quiz::free_question_list(shuffled);
    assert_eq!(stored.len(), 5);
}

#[test]
fn test_paper_answers_grade_in_paper_order() {
    let (classroom, _temp_dir) = setup_classroom();
    let exam = classroom.add_exam("Shuffled", START, END, false, true).unwrap();
    for (num1, op, num2) in SAMPLE_QUESTIONS {
        classroom.add_question(&exam.id, num1, op, num2).unwrap();
    }

    // A sequence rebuilt from the paper grades its own answers as correct
    let paper = classroom.exam_paper(&exam.id, Some(5)).unwrap();
    let answers = answers_for(&paper);
    let sequence = quiz::build_question_list(&paper.questions).unwrap();
    assert_eq!(grade(&sequence, &answers).unwrap().correct, 5);
}

#[test]
fn test_expired_exam_submission() {
    let (classroom, _temp_dir) = setup_classroom();
    let teacher = classroom.register_teacher("Li Hua", 1001, "lihua", "chalk").unwrap();
    let student = classroom
        .add_student(&teacher.id, "Zhou Jing", "", 2001, "zhoujing", "pencil")
        .unwrap();

    let strict = classroom.add_exam("Strict", START, END, false, false).unwrap();
    let lenient = classroom.add_exam("Lenient", START, END, true, false).unwrap();
    classroom.add_question(&lenient.id, 6.0, 2, 7.0).unwrap();

    assert!(matches!(
        classroom.submit_answers(&student.id, &strict.id, &[], None, END + 1),
        Err(ExamError::ExamClosed(_))
    ));

    let result = classroom
        .submit_answers(&student.id, &lenient.id, &[42.0], None, END + 1)
        .unwrap();
    assert_eq!(result.score, 100.0);
    assert!(classroom.get_score(&lenient.id, &student.id).unwrap().unwrap().expired);
}

#[test]
fn test_delete_exam_cascades_to_questions() {
    let (classroom, _temp_dir) = setup_classroom();
    let exam = classroom.add_exam("Temporary", START, END, false, false).unwrap();
    for (num1, op, num2) in SAMPLE_QUESTIONS {
        classroom.add_question(&exam.id, num1, op, num2).unwrap();
    }

    classroom.delete_exam(&exam.id).unwrap();
    assert!(classroom.list_questions(&exam.id, 100).unwrap().is_empty());
    assert!(classroom.list_exams(&ExamFilter::default(), 100).unwrap().is_empty());
}

#[test]
fn test_teacher_lists_own_students() {
    let (classroom, _temp_dir) = setup_classroom();
    let first = classroom.register_teacher("Li Hua", 1001, "lihua", "chalk").unwrap();
    let second = classroom.register_teacher("Wang Fang", 1002, "wangfang", "ink").unwrap();

    classroom.add_student(&first.id, "Zhou Jing", "Data Science", 2001, "zhoujing", "a").unwrap();
    classroom.add_student(&first.id, "Chen Yu", "Data Science", 2002, "chenyu", "b").unwrap();
    classroom.add_student(&second.id, "Sun Lei", "AI", 2003, "sunlei", "c").unwrap();

    let mine = UserFilter {
        belong_to: Some(first.id.clone()),
        role: Some(Role::Student),
        ..UserFilter::default()
    };
    assert_eq!(classroom.list_users(&mine, 100).unwrap().len(), 2);

    let class = UserFilter { class_name: Some("Data%".to_string()), ..UserFilter::default() };
    assert_eq!(classroom.list_users(&class, 100).unwrap().len(), 2);

    let teachers = UserFilter { role: Some(Role::Teacher), ..UserFilter::default() };
    assert_eq!(classroom.list_users(&teachers, 100).unwrap().len(), 2);
}
