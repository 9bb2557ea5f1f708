use jsonwebtoken::{encode, EncodingKey, Header};
use sha2::{Digest, Sha256};

use tecnologuia_shared::errors::{AppError, ErrorCode};
use tecnologuia_shared::middleware::validate_jwt;
use tecnologuia_shared::types::auth::{Claims, ResetClaims, TokenPurpose, UserRole};

fn sign<T: serde::Serialize>(claims: &T, secret: &str) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(format!("JWT encoding failed: {e}")))
}

pub fn create_access_token(
    user_id: i32,
    email: &str,
    role: UserRole,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, AppError> {
    sign(&Claims::new(user_id, email, role, ttl_secs), secret)
}

pub fn create_reset_token(user_id: i32, secret: &str, ttl_secs: i64) -> Result<String, AppError> {
    sign(&ResetClaims::new(user_id, ttl_secs), secret)
}

/// Verifies a reset token's signature, expiry and purpose. Any failure maps
/// to `ResetTokenInvalid` so the caller can't tell the cases apart.
pub fn verify_reset_token(token: &str, secret: &str) -> Result<ResetClaims, AppError> {
    let claims: ResetClaims = validate_jwt(token, secret)
        .map_err(|_| AppError::new(ErrorCode::ResetTokenInvalid, "invalid or expired reset token"))?;

    if claims.purpose != TokenPurpose::PasswordReset {
        return Err(AppError::new(ErrorCode::ResetTokenInvalid, "invalid or expired reset token"));
    }
    Ok(claims)
}

pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
