//! ID generation utilities

use rand::Rng;

/// Characters used for ID and salt generation
const ID_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random alphanumeric string of specified length
pub fn generate_id(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ID_CHARS.len());
            ID_CHARS[idx] as char
        })
        .collect()
}

/// Generate a password salt (16 characters)
pub fn generate_salt() -> String {
    generate_id(crate::SALT_LENGTH)
}

/// Generate a record ID (hyphenated UUID v4, 36 characters)
pub fn generate_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Generate a seed for shuffling an exam paper, at most `MAX_PAPER_SEED`
pub fn generate_seed() -> u64 {
    rand::rng().random_range(0..=crate::MAX_PAPER_SEED)
}
