//! SQL query operations for database access
//!
//! This module provides low-level query functions, one per statement.
//! For validated, logged operations use the `Classroom` API.

use rusqlite::{Connection, OptionalExtension, Row, params};
use rusqlite::types::Type;
use crate::error::{ExamError, Result};
use crate::quiz::OperatorCode;
use super::models::{
    Exam, ExamFilter, ExamKey, Question, QuestionKey, Role, Score, ScoreFilter, User, UserFilter,
    UserKey,
};

/// `LIKE` pattern that matches any value
const MATCH_ALL: &str = "%";

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

// ============================================================================
// Row mapping
// ============================================================================

const USER_COLUMNS: &str = "id, username, role, name, class_name, number, belong_to";
const EXAM_COLUMNS: &str = "id, name, start_time, end_time, allow_answer_when_expired, random_question";
const QUESTION_COLUMNS: &str = "id, exam_id, num1, op, num2";
const SCORE_COLUMNS: &str = "id, exam_id, user_id, score, expired_flag";

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        role: Role::from(row.get::<_, i64>(2)?),
        name: row.get(3)?,
        class_name: row.get(4)?,
        number: row.get(5)?,
        belong_to: row.get(6)?,
    })
}

fn exam_from_row(row: &Row) -> rusqlite::Result<Exam> {
    Ok(Exam {
        id: row.get(0)?,
        name: row.get(1)?,
        start_time: row.get(2)?,
        end_time: row.get(3)?,
        allow_answer_when_expired: row.get::<_, i32>(4)? != 0,
        random_question: row.get::<_, i32>(5)? != 0,
    })
}

fn operator_from_row(row: &Row, idx: usize) -> rusqlite::Result<OperatorCode> {
    let code: i64 = row.get(idx)?;
    OperatorCode::from_code(code)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(err)))
}

fn question_from_row(row: &Row) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get(0)?,
        exam_id: row.get(1)?,
        num1: row.get(2)?,
        op: operator_from_row(row, 3)?,
        num2: row.get(4)?,
    })
}

fn score_from_row(row: &Row) -> rusqlite::Result<Score> {
    Ok(Score {
        id: row.get(0)?,
        exam_id: row.get(1)?,
        user_id: row.get(2)?,
        score: row.get(3)?,
        expired: row.get::<_, i32>(4)? != 0,
    })
}

// ============================================================================
// Users queries
// ============================================================================

/// User row including credentials
#[derive(Debug, Clone)]
pub struct StoredUser {
    /// Profile
    pub user: User,
    /// Hex SHA-512 of salt + password
    pub hashpass: String,
    /// Password salt
    pub salt: String,
}

/// Insert a new user
pub fn insert_user(conn: &Connection, stored: &StoredUser) -> Result<()> {
    let user = &stored.user;
    conn.execute(
        "INSERT INTO users (id, username, hashpass, salt, role, name, class_name, number, belong_to)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            user.id,
            user.username,
            stored.hashpass,
            stored.salt,
            user.role.code(),
            user.name,
            user.class_name,
            user.number,
            user.belong_to
        ],
    )?;
    Ok(())
}

/// Get the first user whose `key` column equals `content`
pub fn get_user_by(conn: &Connection, key: UserKey, content: &str) -> Result<Option<User>> {
    let sql = format!("SELECT {} FROM users WHERE {} = ?1 LIMIT 1", USER_COLUMNS, key.column());
    conn.query_row(&sql, params![content], user_from_row)
        .optional()
        .map_err(Into::into)
}

/// Get a user together with stored credentials
pub fn get_stored_user(conn: &Connection, key: UserKey, content: &str) -> Result<Option<StoredUser>> {
    let sql = format!(
        "SELECT {}, hashpass, salt FROM users WHERE {} = ?1 LIMIT 1",
        USER_COLUMNS,
        key.column()
    );
    conn.query_row(&sql, params![content], |row| {
        Ok(StoredUser {
            user: user_from_row(row)?,
            hashpass: row.get(7)?,
            salt: row.get(8)?,
        })
    })
    .optional()
    .map_err(Into::into)
}

/// List users matching `filter`, at most `limit` rows
pub fn query_users(conn: &Connection, filter: &UserFilter, limit: usize) -> Result<Vec<User>> {
    let sql = format!(
        "SELECT {} FROM users
         WHERE name LIKE ?1 AND class_name LIKE ?2 AND (?3 IS NULL OR role = ?3)
           AND CAST(number AS TEXT) LIKE ?4 AND belong_to LIKE ?5
         LIMIT ?6",
        USER_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;

    let users = stmt.query_map(
        params![
            filter.name.as_deref().unwrap_or(MATCH_ALL),
            filter.class_name.as_deref().unwrap_or(MATCH_ALL),
            filter.role.map(Role::code),
            filter.number.as_deref().unwrap_or(MATCH_ALL),
            filter.belong_to.as_deref().unwrap_or(MATCH_ALL),
            sql_limit(limit)
        ],
        user_from_row,
    )?;

    users.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into)
}

/// Update a user's profile fields
pub fn update_user(conn: &Connection, user: &User) -> Result<()> {
    let rows = conn.execute(
        "UPDATE users SET username = ?, role = ?, name = ?, class_name = ?, number = ?, belong_to = ?
         WHERE id = ?",
        params![
            user.username,
            user.role.code(),
            user.name,
            user.class_name,
            user.number,
            user.belong_to,
            user.id
        ],
    )?;
    if rows == 0 {
        return Err(ExamError::UserNotFound(user.id.clone()));
    }
    Ok(())
}

/// Replace a user's password hash and salt
pub fn update_user_password(conn: &Connection, user_id: &str, hashpass: &str, salt: &str) -> Result<()> {
    let rows = conn.execute(
        "UPDATE users SET hashpass = ?, salt = ? WHERE id = ?",
        params![hashpass, salt, user_id],
    )?;
    if rows == 0 {
        return Err(ExamError::UserNotFound(user_id.to_string()));
    }
    Ok(())
}

/// Delete a user
pub fn delete_user(conn: &Connection, user_id: &str) -> Result<()> {
    let rows = conn.execute("DELETE FROM users WHERE id = ?", params![user_id])?;
    if rows == 0 {
        return Err(ExamError::UserNotFound(user_id.to_string()));
    }
    Ok(())
}

// ============================================================================
// Exams queries
// ============================================================================

/// Insert a new exam
pub fn insert_exam(conn: &Connection, exam: &Exam) -> Result<()> {
    conn.execute(
        "INSERT INTO examinations (id, name, start_time, end_time, allow_answer_when_expired, random_question)
         VALUES (?, ?, ?, ?, ?, ?)",
        params![
            exam.id,
            exam.name,
            exam.start_time,
            exam.end_time,
            exam.allow_answer_when_expired as i32,
            exam.random_question as i32
        ],
    )?;
    Ok(())
}

/// Get the first exam whose `key` column equals `content`
pub fn get_exam_by(conn: &Connection, key: ExamKey, content: &str) -> Result<Option<Exam>> {
    let sql = format!("SELECT {} FROM examinations WHERE {} = ?1 LIMIT 1", EXAM_COLUMNS, key.column());
    conn.query_row(&sql, params![content], exam_from_row)
        .optional()
        .map_err(Into::into)
}

/// List exams matching `filter` ordered by start time, at most `limit` rows
pub fn query_exams(conn: &Connection, filter: &ExamFilter, limit: usize) -> Result<Vec<Exam>> {
    let sql = format!(
        "SELECT {} FROM examinations
         WHERE name LIKE ?1 AND (?2 IS NULL OR start_time >= ?2) AND (?3 IS NULL OR end_time <= ?3)
         ORDER BY start_time
         LIMIT ?4",
        EXAM_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;

    let exams = stmt.query_map(
        params![
            filter.name.as_deref().unwrap_or(MATCH_ALL),
            filter.start_after,
            filter.end_before,
            sql_limit(limit)
        ],
        exam_from_row,
    )?;

    exams.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into)
}

/// Update an exam
pub fn update_exam(conn: &Connection, exam: &Exam) -> Result<()> {
    let rows = conn.execute(
        "UPDATE examinations SET name = ?, start_time = ?, end_time = ?, allow_answer_when_expired = ?, random_question = ?
         WHERE id = ?",
        params![
            exam.name,
            exam.start_time,
            exam.end_time,
            exam.allow_answer_when_expired as i32,
            exam.random_question as i32,
            exam.id
        ],
    )?;
    if rows == 0 {
        return Err(ExamError::ExamNotFound(exam.id.clone()));
    }
    Ok(())
}

/// Delete an exam and its questions
///
/// Returns the number of questions removed with it.
pub fn delete_exam(conn: &Connection, exam_id: &str) -> Result<usize> {
    let rows = conn.execute("DELETE FROM examinations WHERE id = ?", params![exam_id])?;
    if rows == 0 {
        return Err(ExamError::ExamNotFound(exam_id.to_string()));
    }
    let questions = conn.execute("DELETE FROM questions WHERE exam_id = ?", params![exam_id])?;
    Ok(questions)
}

// ============================================================================
// Questions queries
// ============================================================================

/// Insert a new question
pub fn insert_question(conn: &Connection, question: &Question) -> Result<()> {
    conn.execute(
        "INSERT INTO questions (id, exam_id, num1, op, num2) VALUES (?, ?, ?, ?, ?)",
        params![question.id, question.exam_id, question.num1, question.op.code(), question.num2],
    )?;
    Ok(())
}

/// Get the first question whose `key` column equals `content`
pub fn get_question_by(conn: &Connection, key: QuestionKey, content: &str) -> Result<Option<Question>> {
    let sql = format!(
        "SELECT {} FROM questions WHERE {} = ?1 ORDER BY rowid LIMIT 1",
        QUESTION_COLUMNS,
        key.column()
    );
    conn.query_row(&sql, params![content], question_from_row)
        .optional()
        .map_err(Into::into)
}

/// List the questions of an exam in insertion order, at most `limit` rows
pub fn query_questions(conn: &Connection, exam_id: &str, limit: usize) -> Result<Vec<Question>> {
    let sql = format!(
        "SELECT {} FROM questions WHERE exam_id = ?1 ORDER BY rowid LIMIT ?2",
        QUESTION_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;

    let questions = stmt.query_map(params![exam_id, sql_limit(limit)], question_from_row)?;

    questions.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into)
}

/// Update a question
pub fn update_question(conn: &Connection, question: &Question) -> Result<()> {
    let rows = conn.execute(
        "UPDATE questions SET exam_id = ?, num1 = ?, op = ?, num2 = ? WHERE id = ?",
        params![question.exam_id, question.num1, question.op.code(), question.num2, question.id],
    )?;
    if rows == 0 {
        return Err(ExamError::QuestionNotFound(question.id.clone()));
    }
    Ok(())
}

/// Delete a question
pub fn delete_question(conn: &Connection, question_id: &str) -> Result<()> {
    let rows = conn.execute("DELETE FROM questions WHERE id = ?", params![question_id])?;
    if rows == 0 {
        return Err(ExamError::QuestionNotFound(question_id.to_string()));
    }
    Ok(())
}

// ============================================================================
// Scores queries
// ============================================================================

/// Insert a new score
pub fn insert_score(conn: &Connection, score: &Score) -> Result<()> {
    conn.execute(
        "INSERT INTO scores (id, exam_id, user_id, score, expired_flag) VALUES (?, ?, ?, ?, ?)",
        params![score.id, score.exam_id, score.user_id, score.score, score.expired as i32],
    )?;
    Ok(())
}

/// Get the first score of a user in an exam
pub fn get_score(conn: &Connection, exam_id: &str, user_id: &str) -> Result<Option<Score>> {
    let sql = format!(
        "SELECT {} FROM scores WHERE exam_id = ?1 AND user_id = ?2 ORDER BY rowid LIMIT 1",
        SCORE_COLUMNS
    );
    conn.query_row(&sql, params![exam_id, user_id], score_from_row)
        .optional()
        .map_err(Into::into)
}

/// List scores matching `filter`, at most `limit` rows
pub fn query_scores(conn: &Connection, filter: &ScoreFilter, limit: usize) -> Result<Vec<Score>> {
    let sql = format!(
        "SELECT {} FROM scores WHERE exam_id LIKE ?1 AND user_id LIKE ?2 ORDER BY rowid LIMIT ?3",
        SCORE_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;

    let scores = stmt.query_map(
        params![
            filter.exam_id.as_deref().unwrap_or(MATCH_ALL),
            filter.user_id.as_deref().unwrap_or(MATCH_ALL),
            sql_limit(limit)
        ],
        score_from_row,
    )?;

    scores.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into)
}

/// Update a score
pub fn update_score(conn: &Connection, score: &Score) -> Result<()> {
    let rows = conn.execute(
        "UPDATE scores SET exam_id = ?, user_id = ?, score = ?, expired_flag = ? WHERE id = ?",
        params![score.exam_id, score.user_id, score.score, score.expired as i32, score.id],
    )?;
    if rows == 0 {
        return Err(ExamError::ScoreNotFound(score.id.clone()));
    }
    Ok(())
}

/// Delete a score
pub fn delete_score(conn: &Connection, score_id: &str) -> Result<()> {
    let rows = conn.execute("DELETE FROM scores WHERE id = ?", params![score_id])?;
    if rows == 0 {
        return Err(ExamError::ScoreNotFound(score_id.to_string()));
    }
    Ok(())
}
