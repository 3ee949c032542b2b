// JWT issuing and validation module

use crate::error::{AuthError, AuthResult};
use atrium_commons::{UserId, UserName};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Default JWT expiration time in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Issuer for Atrium tokens
pub const ATRIUM_ISSUER: &str = "atrium";

/// Process-wide signing configuration, installed once at startup.
static JWT_CONFIG: OnceCell<JwtConfig> = OnceCell::new();

#[derive(Debug, Clone)]
struct JwtConfig {
    secret: String,
}

/// Install the shared JWT signing secret.
///
/// Called from server bootstrap before the first request is served.
/// Subsequent calls are ignored, which keeps test harnesses that build
/// multiple apps in one process safe.
pub fn init_jwt_config(secret: &str) {
    let _ = JWT_CONFIG.set(JwtConfig { secret: secret.to_string() });
}

fn jwt_config() -> AuthResult<&'static JwtConfig> {
    JWT_CONFIG
        .get()
        .ok_or_else(|| AuthError::HashingError("JWT configuration not initialized".to_string()))
}

/// JWT claims for Atrium access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Username (custom claim)
    pub username: Option<UserName>,
}

impl JwtClaims {
    /// Create new claims for a user.
    ///
    /// # Arguments
    /// * `user_id` - User's unique identifier
    /// * `username` - Username
    /// * `expiry_hours` - Token expiration in hours (defaults to DEFAULT_JWT_EXPIRY_HOURS)
    pub fn new(user_id: &UserId, username: &UserName, expiry_hours: Option<i64>) -> Self {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::hours(expiry_hours.unwrap_or(DEFAULT_JWT_EXPIRY_HOURS));

        Self {
            sub: user_id.to_string(),
            iss: ATRIUM_ISSUER.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
            username: Some(username.clone()),
        }
    }

    /// The user id carried in `sub`.
    pub fn user_id(&self) -> UserId {
        UserId::new(self.sub.clone())
    }
}

/// Sign an access token for a user.
pub fn sign_token(
    user_id: &UserId,
    username: &UserName,
    expiry_hours: Option<i64>,
) -> AuthResult<(String, JwtClaims)> {
    let claims = JwtClaims::new(user_id, username, expiry_hours);
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(jwt_config()?.secret.as_bytes());

    let token = encode(&header, &claims, &key)
        .map_err(|e| AuthError::HashingError(format!("JWT encoding error: {}", e)))?;
    Ok((token, claims))
}

/// Validate a token and return its claims.
///
/// # Errors
/// `TokenExpired` for expired tokens, `InvalidSignature` for everything
/// else that fails cryptographic or structural checks.
pub fn validate_token(token: &str) -> AuthResult<JwtClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ATRIUM_ISSUER]);
    let key = DecodingKey::from_secret(jwt_config()?.secret.as_bytes());

    match decode::<JwtClaims>(token, &key, &validation) {
        Ok(data) => Ok(data.claims),
        Err(e) => match e.kind() {
            ErrorKind::ExpiredSignature => Err(AuthError::TokenExpired),
            _ => Err(AuthError::InvalidSignature),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        init_jwt_config("test-secret");
    }

    #[test]
    fn test_sign_and_validate_roundtrip() {
        init();
        let user_id = UserId::new("u_1");
        let username = UserName::new("alice");

        let (token, claims) = sign_token(&user_id, &username, Some(1)).unwrap();
        assert_eq!(claims.sub, "u_1");

        let decoded = validate_token(&token).unwrap();
        assert_eq!(decoded.user_id(), user_id);
        assert_eq!(decoded.username, Some(username));
    }

    #[test]
    fn test_tampered_token_rejected() {
        init();
        let user_id = UserId::new("u_1");
        let username = UserName::new("alice");

        let (token, _) = sign_token(&user_id, &username, Some(1)).unwrap();
        let tampered = format!("{}x", token);
        assert!(matches!(validate_token(&tampered), Err(AuthError::InvalidSignature)));
    }
}
