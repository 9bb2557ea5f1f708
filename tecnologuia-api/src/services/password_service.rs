use anyhow::Context;

use tecnologuia_shared::errors::{AppError, ErrorCode};

pub const BCRYPT_COST: u32 = 10;
pub const MIN_PASSWORD_LEN: usize = 6;
/// bcrypt only reads the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

pub async fn hash_password(password: String) -> Result<String, AppError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .context("password hashing task failed")?
        .context("password hashing failed")?;
    Ok(hash)
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("password verification task failed")?
        .context("invalid password hash")?;
    Ok(valid)
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(
            ErrorCode::PasswordTooWeak,
            format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::new(
            ErrorCode::PasswordTooWeak,
            format!("password must be at most {MAX_PASSWORD_BYTES} bytes"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_length_bounds() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
        assert!(validate_password(&"a".repeat(72)).is_ok());
        let err = validate_password(&"a".repeat(73)).unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::PasswordTooWeak);
    }

    #[test]
    fn multibyte_passwords_count_bytes_for_the_upper_bound() {
        // 25 three-byte characters = 75 bytes
        assert!(validate_password(&"€".repeat(25)).is_err());
        assert!(validate_password("ção123").is_ok());
    }

    #[tokio::test]
    async fn hash_then_verify() {
        let hash = hash_password("segredo123".into()).await.unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("segredo123".into(), hash.clone()).await.unwrap());
        assert!(!verify_password("outra".into(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        assert!(verify_password("x".into(), "not-a-hash".into()).await.is_err());
    }
}
