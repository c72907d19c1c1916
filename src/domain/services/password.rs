use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::domain::error::DomainError;

/// Hash a plaintext password with Argon2id and a fresh random salt.
///
/// The returned PHC string carries the salt and cost parameters, so it is
/// self-describing and safe to store as-is.
pub fn hash(plain_password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(plain_password.as_bytes(), &salt)
        .map_err(|e| DomainError::Hashing(e.to_string()))?
        .to_string();

    Ok(hash)
}

/// Verify a plaintext password against a stored PHC hash string.
///
/// Returns `Ok(false)` on a mismatch; errors only when the stored hash
/// cannot be parsed.
pub fn verify(plain_password: &str, hashed_password: &str) -> Result<bool, DomainError> {
    let parsed_hash =
        PasswordHash::new(hashed_password).map_err(|e| DomainError::Hashing(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(plain_password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_not_the_plaintext() {
        let password = "my_secure_password";
        let hashed = hash(password).unwrap();

        assert_ne!(password, hashed);
        assert!(verify(password, &hashed).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hashed = hash("my_secure_password").unwrap();

        assert!(!verify("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let result = verify("my_secure_password", "not_a_phc_string");

        assert!(matches!(result, Err(DomainError::Hashing(_))));
    }
}
