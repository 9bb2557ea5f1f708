use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use tecnologuia_shared::errors::{AppError, AppResult, ErrorCode};
use tecnologuia_shared::middleware::AppJson;
use tecnologuia_shared::types::WithMessage;

use crate::models::{NewUser, User};
use crate::routes::{is_unique_violation, required, UserPayload};
use crate::schema::users;
use crate::services::password_service;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A registration after trimming, with the email lower-cased.
#[derive(Debug, Validate)]
pub struct Registration {
    #[validate(length(max = 255, message = "name must be at most 255 characters"))]
    pub name: String,
    #[validate(
        email(message = "invalid email format"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn into_registration(self) -> AppResult<Registration> {
        let registration = Registration {
            name: required("name", self.name.as_deref())?.to_string(),
            email: required("email", self.email.as_deref())?.to_lowercase(),
            password: required("password", self.password.as_deref())?.to_string(),
        };
        registration.validate()?;
        password_service::validate_password(&registration.password)?;
        Ok(registration)
    }
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<WithMessage<UserPayload>>)> {
    let Registration { name, email, password } = req.into_registration()?;

    let email_taken = {
        let mut conn = state.db.get()?;
        users::table
            .filter(users::email.eq(&email))
            .count()
            .get_result::<i64>(&mut conn)?
            > 0
    };
    if email_taken {
        return Err(email_already_registered());
    }

    let password = password_service::hash_password(password).await?;

    let mut conn = state.db.get()?;
    let user: User = diesel::insert_into(users::table)
        .values(&NewUser { name, email, password })
        .returning(User::as_returning())
        .get_result(&mut conn)
        .map_err(|e| {
            if is_unique_violation(&e) {
                email_already_registered()
            } else {
                AppError::from(e)
            }
        })?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(WithMessage::new(
            "user registered successfully",
            UserPayload { user: user.into() },
        )),
    ))
}

fn email_already_registered() -> AppError {
    AppError::new(ErrorCode::EmailAlreadyExists, "email already registered")
}
