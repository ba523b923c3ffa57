//! JWT access-token generation and validation.
//!
//! Tokens are HS256-signed and carry the subject id plus a role tag. The role
//! in the token is the only source of truth for authorization; it is not
//! re-checked against the database on each request. Lifetime depends on the
//! role: end users get a week, admins a day.

use coursehub_core::roles::ROLE_ADMIN;
use coursehub_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- a `users.id` or `admins.id` depending on `role`.
    pub sub: DbId,
    /// `"user"` or `"admin"`.
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Lifetime of end-user tokens in days (default: 7).
    pub user_token_expiry_days: i64,
    /// Lifetime of admin tokens in days (default: 1).
    pub admin_token_expiry_days: i64,
}

/// Default end-user token expiry in days.
const DEFAULT_USER_EXPIRY_DAYS: i64 = 7;
/// Default admin token expiry in days.
const DEFAULT_ADMIN_EXPIRY_DAYS: i64 = 1;

const SECS_PER_DAY: i64 = 86_400;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_USER_EXPIRY_DAYS`   | no       | `7`     |
    /// | `JWT_ADMIN_EXPIRY_DAYS`  | no       | `1`     |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let user_token_expiry_days: i64 = std::env::var("JWT_USER_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_USER_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_USER_EXPIRY_DAYS must be a valid i64");

        let admin_token_expiry_days: i64 = std::env::var("JWT_ADMIN_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_ADMIN_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_ADMIN_EXPIRY_DAYS must be a valid i64");

        Self {
            secret,
            user_token_expiry_days,
            admin_token_expiry_days,
        }
    }

    /// Token lifetime in seconds for the given role.
    pub fn expiry_secs_for(&self, role: &str) -> i64 {
        let days = if role == ROLE_ADMIN {
            self.admin_token_expiry_days
        } else {
            self.user_token_expiry_days
        };
        days * SECS_PER_DAY
    }
}

/// Generate an HS256 access token for `subject` with the given role.
pub fn generate_access_token(
    subject: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.expiry_secs_for(role);

    let claims = Claims {
        sub: subject,
        role: role.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
