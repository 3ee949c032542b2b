// Password hashing and generation module

use crate::error::{AuthError, AuthResult};
use bcrypt::{hash, verify, DEFAULT_COST};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Bcrypt cost factor for password hashing.
pub const BCRYPT_COST: u32 = DEFAULT_COST;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (bcrypt has a 72-byte limit)
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Length of auto-generated credentials
pub const GENERATED_PASSWORD_LENGTH: usize = 16;

/// Hash a password using bcrypt.
///
/// Runs on the blocking thread pool to keep the async runtime responsive.
///
/// # Arguments
/// * `password` - Plain text password to hash
/// * `cost` - Optional bcrypt cost (defaults to BCRYPT_COST)
///
/// # Errors
/// Returns `AuthError::HashingError` if bcrypt fails
pub async fn hash_password(password: &str, cost: Option<u32>) -> AuthResult<String> {
    let password = password.to_string();
    let cost = cost.unwrap_or(BCRYPT_COST);

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| AuthError::HashingError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashingError(format!("Task join error: {}", e)))?
}

/// Verify a password against a bcrypt hash.
///
/// # Returns
/// `Ok(true)` if password matches, `Ok(false)` if not, `Err` on failure
pub async fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &hash).map_err(|e| AuthError::HashingError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashingError(format!("Task join error: {}", e)))?
}

/// Validate password meets length requirements.
///
/// # Errors
/// Returns `AuthError::WeakPassword` with the specific reason
pub fn validate_password(password: &str) -> AuthResult<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at most {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }

    Ok(())
}

/// Generate a random alphanumeric credential.
///
/// Used by the automatic password reset; the plaintext is returned to the
/// caller exactly once and only its hash is stored.
pub fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify_password() {
        let password = "SecurePassword123!";
        let hash = hash_password(password, Some(4)).await.expect("Failed to hash");
        assert!(hash.starts_with("$2"));

        let verified = verify_password(password, &hash).await.expect("Failed to verify");
        assert!(verified);

        let wrong = verify_password("WrongPassword", &hash).await.expect("Failed to verify");
        assert!(!wrong);
    }

    #[test]
    fn test_validate_password_too_short() {
        let result = validate_password("short");
        assert!(matches!(result, Err(AuthError::WeakPassword(_))));
    }

    #[test]
    fn test_validate_password_too_long() {
        let long = "x".repeat(80);
        let result = validate_password(&long);
        assert!(matches!(result, Err(AuthError::WeakPassword(_))));
    }

    #[test]
    fn test_validate_password_valid() {
        assert!(validate_password("MySecurePassword123!").is_ok());
    }

    #[test]
    fn test_generated_passwords_differ() {
        let a = generate_password();
        let b = generate_password();
        assert_eq!(a.len(), GENERATED_PASSWORD_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
