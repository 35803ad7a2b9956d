//! Arithmetic evaluation and answer checking
//!
//! Every exam question is a two-operand expression with one of four
//! operators. Answers are compared after rounding to two decimal places.

use std::fmt;
use serde::{Deserialize, Serialize};
use super::QuizError;

/// Maximum distance between two cent-rounded values that still counts as equal
pub const ANSWER_TOLERANCE: f64 = 0.005;

/// Operator of a question, stored as an integer code 0-3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum OperatorCode {
    /// Addition (code 0)
    Add,
    /// Subtraction (code 1)
    Sub,
    /// Multiplication (code 2)
    Mul,
    /// Division (code 3)
    Div,
}

impl OperatorCode {
    /// All operators in code order
    pub const ALL: [OperatorCode; 4] = [
        OperatorCode::Add,
        OperatorCode::Sub,
        OperatorCode::Mul,
        OperatorCode::Div,
    ];

    /// Decode a stored operator code
    ///
    /// Codes outside 0-3 are rejected with [`QuizError::InvalidOperator`].
    pub fn from_code(code: i64) -> Result<Self, QuizError> {
        match code {
            0 => Ok(OperatorCode::Add),
            1 => Ok(OperatorCode::Sub),
            2 => Ok(OperatorCode::Mul),
            3 => Ok(OperatorCode::Div),
            other => Err(QuizError::InvalidOperator(other)),
        }
    }

    /// Integer code used in the database
    pub fn code(self) -> i64 {
        match self {
            OperatorCode::Add => 0,
            OperatorCode::Sub => 1,
            OperatorCode::Mul => 2,
            OperatorCode::Div => 3,
        }
    }

    /// Display symbol
    pub fn symbol(self) -> char {
        match self {
            OperatorCode::Add => '+',
            OperatorCode::Sub => '-',
            OperatorCode::Mul => '×',
            OperatorCode::Div => '÷',
        }
    }
}

impl TryFrom<i64> for OperatorCode {
    type Error = QuizError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        OperatorCode::from_code(code)
    }
}

impl From<OperatorCode> for i64 {
    fn from(op: OperatorCode) -> Self {
        op.code()
    }
}

impl fmt::Display for OperatorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Compute `a op b`
///
/// Division by zero is reported as [`QuizError::DivisionByZero`] rather than
/// returning a value, so it can never be mistaken for a legitimate `0`.
///
/// # Example
///
/// ```
/// use examcore::quiz::{evaluate, OperatorCode, QuizError};
///
/// assert_eq!(evaluate(6.0, OperatorCode::Mul, 7.0).unwrap(), 42.0);
/// assert_eq!(evaluate(1.0, OperatorCode::Div, 0.0), Err(QuizError::DivisionByZero));
/// ```
pub fn evaluate(a: f64, op: OperatorCode, b: f64) -> Result<f64, QuizError> {
    match op {
        OperatorCode::Add => Ok(a + b),
        OperatorCode::Sub => Ok(a - b),
        OperatorCode::Mul => Ok(a * b),
        OperatorCode::Div if b == 0.0 => Err(QuizError::DivisionByZero),
        OperatorCode::Div => Ok(a / b),
    }
}

/// Compute `a op b` from a raw operator code
pub fn evaluate_code(a: f64, code: i64, b: f64) -> Result<f64, QuizError> {
    evaluate(a, OperatorCode::from_code(code)?, b)
}

/// Round to two decimal places
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Check a user's answer against the expected result
///
/// Both values are rounded to two decimals and compared with
/// [`ANSWER_TOLERANCE`], never with raw float equality.
pub fn is_correct(expected: f64, actual: f64) -> bool {
    if expected == actual {
        return true;
    }
    (round_to_cents(expected) - round_to_cents(actual)).abs() < ANSWER_TOLERANCE
}
