//! Data models for Examcore database entities

use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::ExamError;
use crate::quiz::{OperatorCode, QuestionRecord};

/// Role of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Role {
    /// Student (code 0)
    Student,
    /// Teacher (code 1)
    Teacher,
    /// Any other stored code
    Unknown(i64),
}

impl Role {
    /// Integer code used in the database
    pub fn code(self) -> i64 {
        match self {
            Role::Student => 0,
            Role::Teacher => 1,
            Role::Unknown(code) => code,
        }
    }
}

impl From<i64> for Role {
    fn from(code: i64) -> Self {
        match code {
            0 => Role::Student,
            1 => Role::Teacher,
            other => Role::Unknown(other),
        }
    }
}

impl From<Role> for i64 {
    fn from(role: Role) -> Self {
        role.code()
    }
}

/// What a user is allowed to do, derived from the role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Permission {
    /// Student: answer exams
    pub answer: bool,
    /// Student: view own profile and scores
    pub inspect_personal_info: bool,
    /// Student: view exam information
    pub inspect_exam_info: bool,
    /// Teacher: create, edit and delete exams
    pub manage_exam: bool,
    /// Teacher: add, edit and delete students
    pub manage_student: bool,
    /// Teacher: view student profiles and scores
    pub inspect_student_info: bool,
    /// Teacher: view exam score sheets
    pub inspect_exam_scores: bool,
    /// Everyone: edit own credentials
    pub edit_own_info: bool,
}

impl Permission {
    /// Permissions granted to `role`
    ///
    /// Unknown roles may only edit their own information.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Student => Self {
                answer: true,
                inspect_personal_info: true,
                inspect_exam_info: true,
                edit_own_info: true,
                ..Self::default()
            },
            Role::Teacher => Self {
                manage_exam: true,
                manage_student: true,
                inspect_student_info: true,
                inspect_exam_scores: true,
                edit_own_info: true,
                ..Self::default()
            },
            Role::Unknown(_) => Self {
                edit_own_info: true,
                ..Self::default()
            },
        }
    }
}

/// Student or teacher account (without credentials)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// UUID
    pub id: String,
    /// Login name, 3-24 ASCII letters and digits
    pub username: String,
    /// Role
    pub role: Role,
    /// Real name
    pub name: String,
    /// Class name (students only, may be empty)
    pub class_name: String,
    /// Student or staff number
    pub number: u32,
    /// Owning teacher ID (students only, may be empty)
    pub belong_to: String,
}

impl User {
    /// Permissions of this user
    pub fn permission(&self) -> Permission {
        Permission::for_role(self.role)
    }
}

/// Examination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    /// UUID
    pub id: String,
    /// Display name
    pub name: String,
    /// Start, unix seconds
    pub start_time: i64,
    /// End, unix seconds
    pub end_time: i64,
    /// Accept submissions after `end_time`
    pub allow_answer_when_expired: bool,
    /// Shuffle question order per paper
    pub random_question: bool,
}

impl Exam {
    /// True if `now` falls in `[start_time, end_time)`
    pub fn is_active(&self, now: i64) -> bool {
        self.start_time <= now && now < self.end_time
    }

    /// True if `now` is past the end of the exam
    pub fn is_expired(&self, now: i64) -> bool {
        now > self.end_time
    }
}

/// Stored exam question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// UUID
    pub id: String,
    /// Owning exam ID
    pub exam_id: String,
    /// First operand
    pub num1: f64,
    /// Operator
    pub op: OperatorCode,
    /// Second operand
    pub num2: f64,
}

impl Question {
    /// Operand and operator part of the question
    pub fn record(&self) -> QuestionRecord {
        QuestionRecord::new(self.num1, self.op, self.num2)
    }
}

/// Recorded exam score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// UUID
    pub id: String,
    /// Exam ID
    pub exam_id: String,
    /// User ID
    pub user_id: String,
    /// Score out of 100
    pub score: f64,
    /// Submitted after the exam ended
    pub expired: bool,
}

/// Exam handed to a student: metadata plus questions in presentation order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamPaper {
    /// Exam metadata
    pub exam: Exam,
    /// Shuffle seed, present when the exam randomizes question order
    pub seed: Option<u64>,
    /// Questions in the order they are shown
    pub questions: Vec<QuestionRecord>,
}

impl ExamPaper {
    /// Encode as JSON for a front end
    pub fn to_json(&self) -> Result<String, ExamError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a paper previously produced by [`ExamPaper::to_json`]
    pub fn from_json(json: &str) -> Result<Self, ExamError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Column a single user lookup matches on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserKey {
    /// `id`
    Id,
    /// `number`
    Number,
    /// `name`
    Name,
    /// `username`
    Username,
}

impl UserKey {
    /// Column name
    pub fn column(self) -> &'static str {
        match self {
            UserKey::Id => "id",
            UserKey::Number => "number",
            UserKey::Name => "name",
            UserKey::Username => "username",
        }
    }
}

impl FromStr for UserKey {
    type Err = ExamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(UserKey::Id),
            "number" => Ok(UserKey::Number),
            "name" => Ok(UserKey::Name),
            "username" => Ok(UserKey::Username),
            other => Err(ExamError::InvalidQueryKey(other.to_string())),
        }
    }
}

/// Column a single exam lookup matches on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamKey {
    /// `id`
    Id,
    /// `name`
    Name,
}

impl ExamKey {
    /// Column name
    pub fn column(self) -> &'static str {
        match self {
            ExamKey::Id => "id",
            ExamKey::Name => "name",
        }
    }
}

impl FromStr for ExamKey {
    type Err = ExamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(ExamKey::Id),
            "name" => Ok(ExamKey::Name),
            other => Err(ExamError::InvalidQueryKey(other.to_string())),
        }
    }
}

/// Column a single question lookup matches on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKey {
    /// `id`
    Id,
    /// `exam_id`
    ExamId,
}

impl QuestionKey {
    /// Column name
    pub fn column(self) -> &'static str {
        match self {
            QuestionKey::Id => "id",
            QuestionKey::ExamId => "exam_id",
        }
    }
}

impl FromStr for QuestionKey {
    type Err = ExamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(QuestionKey::Id),
            "exam_id" => Ok(QuestionKey::ExamId),
            other => Err(ExamError::InvalidQueryKey(other.to_string())),
        }
    }
}

/// Filter for listing users
///
/// Text fields are SQL `LIKE` patterns; `None` matches everything.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Pattern on `name`
    pub name: Option<String>,
    /// Pattern on `class_name`
    pub class_name: Option<String>,
    /// Exact role
    pub role: Option<Role>,
    /// Pattern on the decimal `number`
    pub number: Option<String>,
    /// Pattern on `belong_to`
    pub belong_to: Option<String>,
}

/// Filter for listing exams
#[derive(Debug, Clone, Default)]
pub struct ExamFilter {
    /// `LIKE` pattern on `name`
    pub name: Option<String>,
    /// Only exams starting at or after this time
    pub start_after: Option<i64>,
    /// Only exams ending at or before this time
    pub end_before: Option<i64>,
}

/// Filter for listing scores
#[derive(Debug, Clone, Default)]
pub struct ScoreFilter {
    /// `LIKE` pattern on `exam_id`
    pub exam_id: Option<String>,
    /// `LIKE` pattern on `user_id`
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_codes() {
        assert_eq!(Role::from(0), Role::Student);
        assert_eq!(Role::from(1), Role::Teacher);
        assert_eq!(Role::from(7), Role::Unknown(7));
        assert_eq!(Role::Unknown(7).code(), 7);
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "1");
    }

    #[test]
    fn test_permissions_by_role() {
        let student = Permission::for_role(Role::Student);
        assert!(student.answer && student.inspect_exam_info && student.edit_own_info);
        assert!(!student.manage_exam && !student.manage_student);

        let teacher = Permission::for_role(Role::Teacher);
        assert!(teacher.manage_exam && teacher.manage_student && teacher.inspect_exam_scores);
        assert!(!teacher.answer);

        let unknown = Permission::for_role(Role::Unknown(5));
        assert_eq!(unknown, Permission { edit_own_info: true, ..Permission::default() });
    }

    #[test]
    fn test_exam_window() {
        let exam = Exam {
            id: "e".to_string(),
            name: "Monthly".to_string(),
            start_time: 100,
            end_time: 200,
            allow_answer_when_expired: false,
            random_question: false,
        };
        assert!(!exam.is_active(99));
        assert!(exam.is_active(100));
        assert!(!exam.is_active(200));
        assert!(!exam.is_expired(200));
        assert!(exam.is_expired(201));
    }

    #[test]
    fn test_query_keys() {
        assert_eq!("username".parse::<UserKey>().unwrap(), UserKey::Username);
        assert_eq!(UserKey::Number.column(), "number");
        assert!(matches!("hashpass".parse::<UserKey>(), Err(ExamError::InvalidQueryKey(_))));
        assert_eq!("name".parse::<ExamKey>().unwrap().column(), "name");
        assert!("start_time".parse::<ExamKey>().is_err());
        assert_eq!("exam_id".parse::<QuestionKey>().unwrap(), QuestionKey::ExamId);
        assert!("num1".parse::<QuestionKey>().is_err());
    }

    #[test]
    fn test_exam_paper_json() {
        let paper = ExamPaper {
            exam: Exam {
                id: "e".to_string(),
                name: "Monthly".to_string(),
                start_time: 1,
                end_time: 2,
                allow_answer_when_expired: true,
                random_question: true,
            },
            seed: Some(42),
            questions: vec![QuestionRecord::new(1.5, OperatorCode::Mul, 2.0)],
        };
        let json = serde_json::to_value(&paper).unwrap();
        assert_eq!(json["seed"], 42);
        assert_eq!(json["questions"][0]["op"], 2);
        let back: ExamPaper = serde_json::from_value(json).unwrap();
        assert_eq!(back, paper);

        let text = paper.to_json().unwrap();
        assert_eq!(ExamPaper::from_json(&text).unwrap(), paper);
        assert!(matches!(ExamPaper::from_json("{"), Err(ExamError::Serialization(_))));
    }
}
