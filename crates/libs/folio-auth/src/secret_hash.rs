//! Secure password hashing and verification using Argon2.
//!
//! Passwords are stored only as salted Argon2 hashes so that a leaked user
//! table does not yield plaintext credentials. Hashing embeds a fresh random
//! salt on every call; verification re-derives the hash from the parameters
//! carried inside the stored string.
//!
//! # Examples
//!
//! ```rust
//! use folio_auth::secret_hash::{generate_secret_hash, is_secret_valid};
//!
//! let password = "user_password_123";
//! let hash = generate_secret_hash(password).unwrap();
//!
//! assert!(is_secret_valid(password, &hash));
//! assert!(!is_secret_valid("wrong_password", &hash));
//! ```

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{self, PasswordHashString, SaltString},
};
use rand::rngs::OsRng;

use crate::prelude::*;

/// Generates a secure hash for the provided password.
///
/// Uses Argon2 with a randomly generated salt; two calls with the same
/// password produce different hashes. The returned string embeds the salt
/// and parameters and is safe to store as-is.
///
/// # Example
///
/// ```rust
/// use folio_auth::secret_hash::generate_secret_hash;
///
/// let hash = generate_secret_hash("my_secure_password").unwrap();
/// ```
pub fn generate_secret_hash(pw: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    Ok(argon2.hash_password(pw.as_bytes(), &salt)?.to_string())
}

/// Verifies a password against a stored hash.
///
/// Returns `false` rather than erroring when the stored hash cannot be
/// parsed; a corrupted hash column must read as "wrong password", not as a
/// server fault. Comparison is Argon2's constant-time verification.
pub fn is_secret_valid(pw: &str, hash: &str) -> bool {
    let Ok(hash) = PasswordHashString::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(pw.as_bytes(), &hash.password_hash())
        .is_ok()
}

impl From<password_hash::Error> for Error {
    fn from(value: password_hash::Error) -> Self {
        Self::PasswordHash(value)
    }
}
