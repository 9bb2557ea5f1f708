use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use tecnologuia_shared::errors::{AppError, AppResult, ErrorCode};
use tecnologuia_shared::middleware::AppJson;
use tecnologuia_shared::types::auth::AuthUser;
use tecnologuia_shared::types::WithMessage;

use crate::models::{ProfileChanges, User, UserResponse};
use crate::routes::{required, UserPayload};
use crate::schema::users;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub occupation: Option<String>,
    pub bio: Option<String>,
}

impl UpdateProfileRequest {
    fn into_changes(self) -> AppResult<ProfileChanges> {
        let name = match self.name {
            Some(name) => Some(required("name", Some(name.as_str()))?.to_string()),
            None => None,
        };
        let changes = ProfileChanges {
            name,
            phone: self.phone,
            location: self.location,
            occupation: self.occupation,
            bio: self.bio,
        };
        changes.validate()?;
        Ok(changes)
    }
}

pub async fn get_profile(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<UserResponse>> {
    let mut conn = state.db.get()?;
    Ok(Json(find_user(&mut conn, user.id)?.into()))
}

pub async fn update_profile(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<UpdateProfileRequest>,
) -> AppResult<Json<WithMessage<UserPayload>>> {
    let changes = req.into_changes()?;
    let mut conn = state.db.get()?;

    let updated: User = if changes.is_empty() {
        find_user(&mut conn, user.id)?
    } else {
        diesel::update(users::table.find(user.id))
            .set(&changes)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .optional()?
            .ok_or_else(user_not_found)?
    };

    tracing::info!(user_id = %user.id, "profile updated");

    Ok(Json(WithMessage::new(
        "profile updated successfully",
        UserPayload { user: updated.into() },
    )))
}

fn find_user(conn: &mut PgConnection, id: i32) -> AppResult<User> {
    users::table
        .find(id)
        .select(User::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(user_not_found)
}

fn user_not_found() -> AppError {
    AppError::new(ErrorCode::UserNotFound, "user not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let req = UpdateProfileRequest { name: Some("  ".into()), ..Default::default() };
        assert!(req.into_changes().is_err());
    }

    #[test]
    fn name_is_trimmed_and_other_fields_pass_through() {
        let req = UpdateProfileRequest {
            name: Some(" Ana Souza ".into()),
            bio: Some("".into()),
            ..Default::default()
        };
        let changes = req.into_changes().unwrap();
        assert_eq!(changes.name.as_deref(), Some("Ana Souza"));
        assert_eq!(changes.bio.as_deref(), Some(""));
        assert!(changes.phone.is_none());
    }

    #[test]
    fn overlong_phone_is_rejected() {
        let req = UpdateProfileRequest { phone: Some("1".repeat(60)), ..Default::default() };
        let err = req.into_changes().unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::ValidationError);
    }

    #[test]
    fn name_length_is_checked_after_trimming() {
        let padded = format!("  {}  ", "a".repeat(255));
        let req = UpdateProfileRequest { name: Some(padded), ..Default::default() };
        assert_eq!(req.into_changes().unwrap().name.map(|n| n.len()), Some(255));
    }

    #[test]
    fn absent_fields_make_an_empty_change_set() {
        assert!(UpdateProfileRequest::default().into_changes().unwrap().is_empty());
    }
}
