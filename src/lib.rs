//! # Examcore
//!
//! A classroom arithmetic examination manager on SQLite.
//!
//! ## Features
//!
//! - Two-operand arithmetic questions graded to two decimal places
//! - Question sequences with seeded, uniform shuffling
//! - Teacher and student accounts with salted SHA-512 passwords
//! - Exams, questions and scores kept in three SQLite stores
//!
//! ## Example
//!
//! ```no_run
//! use examcore::Classroom;
//! use std::path::Path;
//!
//! let classroom = Classroom::initialize(Path::new("/path/to/classroom")).unwrap();
//! let teacher = classroom.register_teacher("Li Hua", 1001, "lihua", "chalk").unwrap();
//! let exam = classroom.add_exam("Monthly", 1735689600, 1735693200, false, true).unwrap();
//! classroom.add_question(&exam.id, 23.4, 3, 18.9).unwrap();
//!
//! let paper = classroom.exam_paper(&exam.id, None).unwrap();
//! for question in &paper.questions {
//!     println!("{} = ?", question);
//! }
//! ```

pub mod quiz;
pub mod database;
pub mod business;
pub mod crypto;
pub mod utils;
pub mod logging;
pub mod error;

// Re-export main types
pub use error::{ExamError, Result};
pub use quiz::{OperatorCode, QuestionRecord, QuestionSequence, QuizError, Grade};
pub use database::models::{Exam, ExamPaper, Permission, Question, Role, Score, User};
pub use business::{Classroom, StorePaths};
pub use logging::init_file_logging;

/// Folder holding the database files
pub const DB_FOLDER: &str = "db";

/// Exams and questions database filename
pub const EXAMINATION_DB: &str = "examination.db";

/// Scores database filename
pub const SCORES_DB: &str = "score.db";

/// Users database filename
pub const USER_DB: &str = "user.db";

/// Folder holding the log file
pub const LOG_FOLDER: &str = "logs";

/// Log filename
pub const LOG_FILE: &str = "latest.log";

/// Minimum username length
pub const USERNAME_MIN_LENGTH: usize = 3;

/// Maximum username length
pub const USERNAME_MAX_LENGTH: usize = 24;

/// Maximum real name length in bytes
pub const NAME_MAX_BYTES: usize = 45;

/// Maximum exam name length in bytes
pub const EXAM_NAME_MAX_BYTES: usize = 90;

/// Maximum class name length in bytes
pub const CLASS_NAME_MAX_BYTES: usize = 30;

/// Password salt length
pub const SALT_LENGTH: usize = 16;

/// Largest paper shuffle seed; every seed up to it survives a JSON number
/// read as an IEEE double
pub const MAX_PAPER_SEED: u64 = (1 << 53) - 1;

/// Row limit for listings that have no caller-supplied limit
pub const DEFAULT_QUERY_LIMIT: usize = 999;
