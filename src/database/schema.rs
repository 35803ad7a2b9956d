//! Database schema definitions
//!
//! Exams and questions live in the examination store, scores and users each
//! have a store of their own.

/// SQL to create the examinations table
pub const CREATE_EXAMINATIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS examinations (
    id                          TEXT PRIMARY KEY NOT NULL,
    name                        TEXT NOT NULL,
    start_time                  INTEGER NOT NULL,
    end_time                    INTEGER NOT NULL,
    allow_answer_when_expired   INTEGER NOT NULL,
    random_question             INTEGER NOT NULL
)
"#;

/// SQL to create the questions table
pub const CREATE_QUESTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS questions (
    id          TEXT PRIMARY KEY NOT NULL,
    exam_id     TEXT NOT NULL,
    num1        REAL NOT NULL,
    op          INTEGER NOT NULL,
    num2        REAL NOT NULL
)
"#;

/// SQL to create the scores table
pub const CREATE_SCORES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS scores (
    id              TEXT PRIMARY KEY NOT NULL,
    exam_id         TEXT NOT NULL,
    user_id         TEXT NOT NULL,
    score           REAL NOT NULL,
    expired_flag    INTEGER NOT NULL
)
"#;

/// SQL to create the users table
pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id          TEXT PRIMARY KEY NOT NULL,
    username    TEXT NOT NULL UNIQUE,
    hashpass    TEXT NOT NULL,
    salt        TEXT NOT NULL,
    role        INTEGER NOT NULL,
    name        TEXT NOT NULL,
    class_name  TEXT NOT NULL DEFAULT '',
    number      INTEGER NOT NULL,
    belong_to   TEXT NOT NULL DEFAULT ''
)
"#;

/// The three database files of a classroom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Store {
    /// Exams and their questions
    Examination,
    /// Exam scores
    Score,
    /// Students and teachers
    User,
}

impl Store {
    /// All stores in creation order
    pub const ALL: [Store; 3] = [Store::Examination, Store::Score, Store::User];

    /// File name inside the database folder
    pub fn file_name(self) -> &'static str {
        match self {
            Store::Examination => crate::EXAMINATION_DB,
            Store::Score => crate::SCORES_DB,
            Store::User => crate::USER_DB,
        }
    }

    /// Table creation statements for this store, in order
    pub fn tables(self) -> &'static [&'static str] {
        match self {
            Store::Examination => &[CREATE_EXAMINATIONS_TABLE, CREATE_QUESTIONS_TABLE],
            Store::Score => &[CREATE_SCORES_TABLE],
            Store::User => &[CREATE_USERS_TABLE],
        }
    }
}
