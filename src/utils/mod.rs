//! Identifier, salt and time helpers

mod common;
mod id_gen;

pub use common::{format_unix, DB_DATE_FORMAT};
pub use id_gen::{generate_id, generate_salt, generate_seed, generate_uuid};
