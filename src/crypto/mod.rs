//! Password hashing for Examcore accounts
//!
//! Passwords are never stored. Each account keeps a random salt and the
//! lowercase hex SHA-512 digest of `salt + password`.

mod hash;

pub use hash::{sha512_hex, hash_password, verify_password};
