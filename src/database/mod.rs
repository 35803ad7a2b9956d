//! Database layer for Examcore
//!
//! Handles SQLite database operations including:
//! - Schema creation for the examination, score and user stores
//! - CRUD operations for exams, questions, scores and users

pub mod models;
pub mod schema;
pub mod connection;
pub mod queries;

pub use connection::Database;
pub use schema::Store;
pub use models::*;
