use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;

use tecnologuia_shared::errors::{AppError, AppResult, ErrorCode};
use tecnologuia_shared::middleware::AppJson;
use tecnologuia_shared::types::MessageResponse;

use crate::routes::required;
use crate::schema::users;
use crate::services::{password_service, token_service};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: Option<String>,
    pub new_password: Option<String>,
}

pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let token = required("token", req.token.as_deref())?;
    let new_password = required("newPassword", req.new_password.as_deref())?.to_string();

    let claims = token_service::verify_reset_token(token, &state.config.jwt_secret)?;
    password_service::validate_password(&new_password)?;

    let token_hash = token_service::hash_token(token);
    let password = password_service::hash_password(new_password).await?;

    // Clearing the digest in the same statement makes the token single-use.
    let mut conn = state.db.get()?;
    let updated = diesel::update(
        users::table
            .filter(users::id.eq(claims.sub))
            .filter(users::reset_token.eq(&token_hash)),
    )
    .set((
        users::password.eq(password),
        users::reset_token.eq(None::<String>),
    ))
    .execute(&mut conn)?;

    if updated == 0 {
        return Err(AppError::new(ErrorCode::ResetTokenInvalid, "invalid or expired reset token"));
    }

    tracing::info!(user_id = %claims.sub, "password reset");

    Ok(Json(MessageResponse::new("password reset successfully")))
}
