use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;

use tecnologuia_shared::errors::AppResult;
use tecnologuia_shared::middleware::AppJson;
use tecnologuia_shared::types::MessageResponse;

use crate::routes::required;
use crate::schema::users;
use crate::services::token_service;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let email = required("email", req.email.as_deref())?.to_lowercase();

    // Find the user (don't reveal whether the email exists)
    let user = {
        let mut conn = state.db.get()?;
        users::table
            .filter(users::email.eq(&email))
            .select((users::id, users::email))
            .first::<(i32, String)>(&mut conn)
            .optional()?
    };

    if let Some((user_id, user_email)) = user {
        let token = token_service::create_reset_token(
            user_id,
            &state.config.jwt_secret,
            state.config.reset_token_ttl_secs,
        )?;

        {
            let mut conn = state.db.get()?;
            diesel::update(users::table.find(user_id))
                .set(users::reset_token.eq(Some(token_service::hash_token(&token))))
                .execute(&mut conn)?;
        }

        let link = state.config.reset_link(&token);
        match &state.email {
            Some(client) => {
                let ttl = state.config.reset_token_ttl_secs;
                if let Err(e) = client.send_password_reset_link(&user_email, &link, ttl).await {
                    tracing::error!(user_id = %user_id, error = %e, "failed to send reset email");
                }
            }
            None => tracing::warn!(user_id = %user_id, "email delivery disabled, reset link not sent"),
        }

        tracing::info!(user_id = %user_id, "password reset requested");
    }

    Ok(Json(MessageResponse::new(
        "if the email is registered, a reset link has been sent",
    )))
}
