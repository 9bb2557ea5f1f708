use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use std::sync::Arc;

use tecnologuia_shared::errors::AppResult;
use tecnologuia_shared::middleware::AdminUser;

use crate::models::{User, UserResponse};
use crate::schema::users;
use crate::AppState;

pub async fn list_users(
    AdminUser(admin): AdminUser,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let mut conn = state.db.get()?;

    let all: Vec<User> = users::table
        .select(User::as_select())
        .order((users::name.asc(), users::id.asc()))
        .load(&mut conn)?;

    tracing::debug!(admin_id = %admin.id, count = all.len(), "listed users");

    Ok(Json(all.into_iter().map(UserResponse::from).collect()))
}
