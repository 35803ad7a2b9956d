//! Business logic layer for Examcore
//!
//! This module provides the high-level Classroom API for managing
//! users, exams, questions, papers and scores.

pub mod classroom;
pub mod users;
pub mod exams;
pub mod questions;
pub mod papers;
pub mod scores;

pub use classroom::{Classroom, StorePaths};
pub use exams::{describe_window, select_current_exam};
pub use users::{validate_name, validate_number, validate_username};
