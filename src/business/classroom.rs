//! Main Classroom API
//!
//! This module provides the primary interface for interacting with the
//! three Examcore stores of a classroom folder.

use std::fs;
use std::path::{Path, PathBuf};
use rusqlite::Connection;
use tracing::info;
use crate::error::Result;
use crate::database::{Database, Store};
use crate::{DB_FOLDER, LOG_FILE, LOG_FOLDER};

/// File locations of a classroom, all derived from one root folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    /// Root folder
    pub root: PathBuf,
    /// Folder holding the database files
    pub db_folder: PathBuf,
    /// Folder holding the log file
    pub log_folder: PathBuf,
}

impl StorePaths {
    /// Derive all locations from `root`
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            db_folder: root.join(DB_FOLDER),
            log_folder: root.join(LOG_FOLDER),
        }
    }

    /// Database file of `store`
    pub fn store(&self, store: Store) -> PathBuf {
        self.db_folder.join(store.file_name())
    }

    /// Default log file
    pub fn log_file(&self) -> PathBuf {
        self.log_folder.join(LOG_FILE)
    }
}

/// Main classroom interface
pub struct Classroom {
    /// File locations
    pub(crate) paths: StorePaths,
    /// Exams and questions
    pub(crate) examination: Database,
    /// Scores
    pub(crate) scores: Database,
    /// Users
    pub(crate) users: Database,
}

impl Classroom {
    /// Create the folders and tables under `root` and open the stores
    ///
    /// Safe to call on an already initialized root; existing data is kept.
    pub fn initialize(root: &Path) -> Result<Self> {
        let paths = StorePaths::new(root);
        fs::create_dir_all(&paths.db_folder)?;
        fs::create_dir_all(&paths.log_folder)?;

        let examination = Database::create(&paths.store(Store::Examination), Store::Examination)?;
        let scores = Database::create(&paths.store(Store::Score), Store::Score)?;
        let users = Database::create(&paths.store(Store::User), Store::User)?;

        info!("[Classroom] Initialized stores in {}", paths.db_folder.display());

        Ok(Self { paths, examination, scores, users })
    }

    /// Open the stores of an initialized root
    ///
    /// Fails if any of the three database files is missing.
    pub fn open(root: &Path) -> Result<Self> {
        let paths = StorePaths::new(root);

        let examination = Database::open(&paths.store(Store::Examination))?;
        let scores = Database::open(&paths.store(Store::Score))?;
        let users = Database::open(&paths.store(Store::User))?;

        info!("[Classroom] Opened stores in {}", paths.db_folder.display());

        Ok(Self { paths, examination, scores, users })
    }

    /// File locations of this classroom
    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Close every store
    pub fn close(&mut self) {
        self.examination.close();
        self.scores.close();
        self.users.close();
    }

    /// Check if all stores are open
    pub fn is_open(&self) -> bool {
        self.examination.is_open() && self.scores.is_open() && self.users.is_open()
    }

    pub(crate) fn exam_conn(&self) -> Result<&Connection> {
        self.examination.connection()
    }

    pub(crate) fn score_conn(&self) -> Result<&Connection> {
        self.scores.connection()
    }

    pub(crate) fn user_conn(&self) -> Result<&Connection> {
        self.users.connection()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExamError;
    use tempfile::TempDir;

    #[test]
    fn test_store_paths() {
        let paths = StorePaths::new(Path::new("/srv/class"));
        assert_eq!(paths.store(Store::User), PathBuf::from("/srv/class/db/user.db"));
        assert_eq!(paths.store(Store::Score), PathBuf::from("/srv/class/db/score.db"));
        assert_eq!(paths.log_file(), PathBuf::from("/srv/class/logs/latest.log"));
    }

    #[test]
    fn test_initialize_creates_layout() {
        let temp_dir = TempDir::new().unwrap();
        let classroom = Classroom::initialize(temp_dir.path()).unwrap();

        assert!(classroom.is_open());
        assert!(temp_dir.path().join("logs").is_dir());
        for store in Store::ALL {
            assert!(classroom.paths().store(store).exists());
        }
    }

    #[test]
    fn test_initialize_twice_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        {
            let classroom = Classroom::initialize(temp_dir.path()).unwrap();
            classroom.exam_conn().unwrap().execute(
                "INSERT INTO questions (id, exam_id, num1, op, num2) VALUES ('q', 'e', 1.0, 0, 2.0)",
                [],
            ).unwrap();
        }

        let classroom = Classroom::initialize(temp_dir.path()).unwrap();
        let count: i64 = classroom.exam_conn().unwrap()
            .query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_open_requires_stores() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            Classroom::open(temp_dir.path()),
            Err(ExamError::DatabaseError(_))
        ));

        drop(Classroom::initialize(temp_dir.path()).unwrap());
        assert!(Classroom::open(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_close() {
        let temp_dir = TempDir::new().unwrap();
        let mut classroom = Classroom::initialize(temp_dir.path()).unwrap();
        classroom.close();
        assert!(!classroom.is_open());
        assert!(classroom.user_conn().is_err());
    }
}
