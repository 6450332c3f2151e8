use crate::error::AppError;

/// Derives a one-way salted hash for storage. The plaintext never leaves
/// this function; callers must only persist the returned hash.
pub fn hash_password(plaintext: &str) -> Result<String, AppError> {
    Ok(bcrypt::hash(plaintext, bcrypt::DEFAULT_COST)?)
}

/// Checks a candidate password against a stored hash. A missing or
/// malformed stored hash counts as a mismatch rather than an error, so a
/// broken account can never authenticate. Comparison timing is handled by
/// bcrypt itself.
pub fn verify_password(stored_hash: &str, candidate: &str) -> bool {
    if stored_hash.is_empty() {
        return false;
    }

    bcrypt::verify(candidate, stored_hash).unwrap_or(false)
}
