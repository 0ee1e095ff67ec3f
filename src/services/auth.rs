use argon2::password_hash::{self, rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Bearer token payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i32,
    pub username: String,
    /// Unix seconds
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    fn issue(user_id: i32, username: &str, ttl: Duration) -> Self {
        let issued_at = OffsetDateTime::now_utc();
        Self {
            sub: user_id,
            username: username.to_owned(),
            exp: (issued_at + ttl).unix_timestamp(),
            iat: issued_at.unix_timestamp(),
        }
    }
}

/// Password hashing and bearer token issue/verification
pub struct AuthService;

impl AuthService {
    /// Argon2id hash in PHC string form, fresh random salt each call
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|phc| phc.to_string())
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// `Ok(false)` on mismatch; a malformed stored hash is an internal error
    pub fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| AppError::Internal(format!("Stored password hash unreadable: {}", e)))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::Internal(format!("Password check failed: {}", e))),
        }
    }

    /// HS256 token valid for `JWT_EXPIRATION_MINUTES`
    pub fn generate_token(user_id: i32, username: &str, config: &Config) -> AppResult<String> {
        let claims = Claims::issue(
            user_id,
            username,
            Duration::minutes(config.jwt_expiration_minutes),
        );
        let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());

        jsonwebtoken::encode(&Header::default(), &claims, &key)
            .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
    }

    /// Check signature and expiry, returning the payload
    pub fn verify_token(token: &str, config: &Config) -> AppResult<Claims> {
        let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
        let data = jsonwebtoken::decode::<Claims>(token, &key, &Validation::default())?;
        Ok(data.claims)
    }
}
