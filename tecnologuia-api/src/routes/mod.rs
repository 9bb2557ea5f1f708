pub mod areas;
pub mod comments;
pub mod contents;
pub mod forgot_password;
pub mod health;
pub mod login;
pub mod logout;
pub mod profile;
pub mod register;
pub mod reset_password;
pub mod users;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::Serialize;
use tecnologuia_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::UserResponse;

#[derive(Debug, Serialize)]
pub struct UserPayload {
    pub user: UserResponse,
}

/// Trimmed value of a required text field. Absent and blank both fail.
pub(crate) fn required<'a>(field: &str, value: Option<&'a str>) -> AppResult<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => {
            let mut details = serde_json::Map::new();
            details.insert(field.to_string(), "required".into());
            Err(AppError::with_details(
                ErrorCode::ValidationError,
                "missing required fields",
                serde_json::Value::Object(details),
            ))
        }
    }
}

pub(crate) fn is_unique_violation(err: &DieselError) -> bool {
    matches!(err, DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _))
}

pub(crate) fn is_foreign_key_violation(err: &DieselError) -> bool {
    matches!(err, DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_absent_and_blank() {
        assert!(required("name", None).is_err());
        assert!(required("name", Some("   ")).is_err());
        assert_eq!(required("name", Some("  Ana ")).unwrap(), "Ana");
    }

    #[test]
    fn required_error_names_the_field() {
        match required("email", None) {
            Err(AppError::Known { code, details, .. }) => {
                assert_eq!(code, ErrorCode::ValidationError);
                assert_eq!(details.unwrap()["email"], "required");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn classifies_constraint_violations() {
        let unique = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from("duplicate key")),
        );
        assert!(is_unique_violation(&unique));
        assert!(!is_foreign_key_violation(&unique));
        assert!(!is_unique_violation(&DieselError::NotFound));
    }
}
