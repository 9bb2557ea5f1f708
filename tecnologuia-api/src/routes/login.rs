use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use tecnologuia_shared::errors::{AppError, AppResult, ErrorCode};
use tecnologuia_shared::middleware::AppJson;
use tecnologuia_shared::types::auth::UserRole;

use crate::models::{User, UserResponse};
use crate::routes::required;
use crate::schema::users;
use crate::services::{password_service, token_service};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let email = required("email", req.email.as_deref())?.to_lowercase();
    let password = required("password", req.password.as_deref())?.to_string();

    let user: User = {
        let mut conn = state.db.get()?;
        users::table
            .filter(users::email.eq(&email))
            .select(User::as_select())
            .first(&mut conn)
            .optional()?
            .ok_or_else(invalid_credentials)?
    };

    let valid = password_service::verify_password(password, user.password.clone()).await?;
    if !valid {
        tracing::debug!(user_id = %user.id, "login rejected");
        return Err(invalid_credentials());
    }

    let role = user.role.parse::<UserRole>().unwrap_or(UserRole::User);
    let token = token_service::create_access_token(
        user.id,
        &user.email,
        role,
        &state.config.jwt_secret,
        state.config.jwt_ttl_secs,
    )?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(LoginResponse { token, user: user.into() }))
}

fn invalid_credentials() -> AppError {
    AppError::new(ErrorCode::InvalidCredentials, "invalid email or password")
}
