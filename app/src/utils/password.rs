const HASH_COST: u32 = 10;

pub fn hash_password(password: &str) -> Result<String, anyhow::Error> {
    bcrypt::hash(password, HASH_COST).map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
}

/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or_else(|e| {
        tracing::warn!("Stored password hash could not be verified: {}", e);
        false
    })
}
