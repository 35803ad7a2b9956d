//! SHA-512 digests for password storage

use sha2::{Digest, Sha512};

/// Calculate SHA-512 of input string and return as lowercase hex string (128 chars)
///
/// # Example
///
/// ```
/// use examcore::crypto::sha512_hex;
///
/// assert_eq!(sha512_hex("abc").len(), 128);
/// assert!(sha512_hex("abc").starts_with("ddaf35a193617aba"));
/// ```
pub fn sha512_hex(input: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();

    result.iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Hash a password with its salt
///
/// The salt is prepended to the password before hashing.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut salted = String::with_capacity(salt.len() + password.len());
    salted.push_str(salt);
    salted.push_str(password);
    sha512_hex(&salted)
}

/// Check a password against a stored salt and hash
pub fn verify_password(salt: &str, password: &str, hashpass: &str) -> bool {
    hash_password(salt, password) == hashpass
}
